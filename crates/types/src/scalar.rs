use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A single loosely-typed value: the cell contents of a record field or a
/// statistics entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// Converts a JSON value, mapping `null` to `None`.
    ///
    /// Arrays and objects are not scalars and are returned back as the error.
    pub fn from_json(value: &Value) -> Result<Option<Scalar>, &Value> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Scalar::Bool(*b))),
            Value::Number(n) => Ok(Some(Scalar::Number(n.clone()))),
            Value::String(s) => Ok(Some(Scalar::Text(s.clone()))),
            other => Err(other),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<usize> for Scalar {
    fn from(n: usize) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}
