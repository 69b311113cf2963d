use chklst_reports::{RawRecord, ReportPeriod, StatisticsMapping};
use serde_json::{Value, json};

pub fn march_2025() -> ReportPeriod {
    ReportPeriod::new(3, 2025).expect("valid period")
}

pub fn record(value: Value) -> RawRecord {
    value.as_object().cloned().expect("record fixture must be an object")
}

/// A fully populated deployment record.
pub fn deployment(id: i64, environment: &str) -> RawRecord {
    record(json!({
        "id": id,
        "jira_id": format!("OPS-{id}"),
        "project_name": "payments-gateway",
        "component_name": "api",
        "developer": "jdoe",
        "build_server": "ci-01",
        "deploy_server": "app-03",
        "environment": environment,
        "timestamp": "2025-03-14T10:30:00",
        "status": "success",
        "notes": "routine release"
    }))
}

/// Three prod, two staging, one with no environment at all.
pub fn mixed_environments() -> Vec<RawRecord> {
    let mut records: Vec<RawRecord> = ["prod", "staging", "prod", "staging", "prod"]
        .iter()
        .zip(1..)
        .map(|(env, id)| deployment(id, env))
        .collect();
    records.push(record(json!({"id": 6, "project_name": "ledger"})));
    records
}

pub fn many_deployments(count: i64) -> Vec<RawRecord> {
    (1..=count)
        .map(|id| deployment(id, if id % 3 == 0 { "staging" } else { "prod" }))
        .collect()
}

pub fn monthly_stats() -> StatisticsMapping {
    serde_json::from_str(r#"{"total_deployments": 12, "success_rate": 0.92}"#)
        .expect("valid statistics fixture")
}
