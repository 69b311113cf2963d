use crate::error::DataFormatError;
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(month, year)` reporting window a render call covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod", into = "RawPeriod")]
pub struct ReportPeriod {
    month: Month,
    year: i32,
}

#[derive(Serialize, Deserialize)]
struct RawPeriod {
    month: u32,
    year: i32,
}

impl TryFrom<RawPeriod> for ReportPeriod {
    type Error = DataFormatError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        ReportPeriod::new(raw.month, raw.year)
    }
}

impl From<ReportPeriod> for RawPeriod {
    fn from(period: ReportPeriod) -> Self {
        RawPeriod {
            month: period.month(),
            year: period.year,
        }
    }
}

impl ReportPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, DataFormatError> {
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| {
                DataFormatError::new("month", month.to_string(), "month must be between 1 and 12")
            })?;
        Ok(Self { month, year })
    }

    pub fn month(&self) -> u32 {
        self.month.number_from_month()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Human-facing label, e.g. `October 2026`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month.name(), self.year)
    }

    /// Machine-facing code, e.g. `2026-10`.
    pub fn code(&self) -> String {
        format!("{}-{:02}", self.year, self.month())
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
