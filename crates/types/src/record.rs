//! Deployment records: the raw input shape and the canonical, validated shape.

use crate::scalar::Scalar;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// A record exactly as the orchestrator supplied it.
pub type RawRecord = Map<String, Value>;

/// Rendering of timestamps in the tabular outputs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The canonical column schema, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    JiraId,
    Project,
    Component,
    Developer,
    BuildServer,
    DeployServer,
    Environment,
    Timestamp,
    Status,
    Notes,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Id,
        Column::JiraId,
        Column::Project,
        Column::Component,
        Column::Developer,
        Column::BuildServer,
        Column::DeployServer,
        Column::Environment,
        Column::Timestamp,
        Column::Status,
        Column::Notes,
    ];

    /// The snake_case key this column is read from.
    pub fn key(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::JiraId => "jira_id",
            Column::Project => "project_name",
            Column::Component => "component_name",
            Column::Developer => "developer",
            Column::BuildServer => "build_server",
            Column::DeployServer => "deploy_server",
            Column::Environment => "environment",
            Column::Timestamp => "timestamp",
            Column::Status => "status",
            Column::Notes => "notes",
        }
    }

    /// The display header written above the column.
    pub fn header(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::JiraId => "Jira ID",
            Column::Project => "Project",
            Column::Component => "Component",
            Column::Developer => "Developer",
            Column::BuildServer => "Build Server",
            Column::DeployServer => "Deploy Server",
            Column::Environment => "Environment",
            Column::Timestamp => "Timestamp",
            Column::Status => "Status",
            Column::Notes => "Notes",
        }
    }

    pub fn from_key(key: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// A deployment record after validation. Every field is optional; absent
/// input keys and JSON `null` both end up as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentRecord {
    pub id: Option<Scalar>,
    pub jira_id: Option<Scalar>,
    pub project_name: Option<Scalar>,
    pub component_name: Option<Scalar>,
    pub developer: Option<Scalar>,
    pub build_server: Option<Scalar>,
    pub deploy_server: Option<Scalar>,
    pub environment: Option<Scalar>,
    pub timestamp: Option<NaiveDateTime>,
    pub status: Option<Scalar>,
    pub notes: Option<Scalar>,
}

impl DeploymentRecord {
    /// Mutable slot for a scalar-valued column. `Timestamp` has no scalar
    /// slot and returns `None`.
    pub fn scalar_slot_mut(&mut self, column: Column) -> Option<&mut Option<Scalar>> {
        match column {
            Column::Id => Some(&mut self.id),
            Column::JiraId => Some(&mut self.jira_id),
            Column::Project => Some(&mut self.project_name),
            Column::Component => Some(&mut self.component_name),
            Column::Developer => Some(&mut self.developer),
            Column::BuildServer => Some(&mut self.build_server),
            Column::DeployServer => Some(&mut self.deploy_server),
            Column::Environment => Some(&mut self.environment),
            Column::Timestamp => None,
            Column::Status => Some(&mut self.status),
            Column::Notes => Some(&mut self.notes),
        }
    }

    /// The value of `column` as it appears in tabular output.
    pub fn cell(&self, column: Column) -> Option<Scalar> {
        let value = match column {
            Column::Id => &self.id,
            Column::JiraId => &self.jira_id,
            Column::Project => &self.project_name,
            Column::Component => &self.component_name,
            Column::Developer => &self.developer,
            Column::BuildServer => &self.build_server,
            Column::DeployServer => &self.deploy_server,
            Column::Environment => &self.environment,
            Column::Timestamp => {
                return self
                    .timestamp
                    .map(|ts| Scalar::Text(ts.format(TIMESTAMP_FORMAT).to_string()));
            }
            Column::Status => &self.status,
            Column::Notes => &self.notes,
        };
        value.clone()
    }

    /// The value of `column` as display text, empty when absent.
    pub fn text(&self, column: Column) -> String {
        self.cell(column).map(|v| v.to_string()).unwrap_or_default()
    }
}

/// Canonical table produced by the normalizer: the resolved column list and
/// the records, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentTable {
    pub columns: Vec<Column>,
    pub records: Vec<DeploymentRecord>,
}

impl DeploymentTable {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.header()).collect()
    }

    /// Every record projected onto the resolved column list.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Option<Scalar>>> + '_ {
        self.records
            .iter()
            .map(|record| self.columns.iter().map(|c| record.cell(*c)).collect())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
