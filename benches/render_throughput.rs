//! End-to-end report rendering benchmarks
//!
//! Measures normalization plus serialization for both output formats.

use chklst_reports::{FixedClock, RawRecord, ReportFormat, ReportGenerator, ReportPeriod};
use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;

const ENVIRONMENTS: [&str; 4] = ["prod", "staging", "qa", "dev"];

fn generate_records(count: usize) -> Vec<RawRecord> {
    (0..count)
        .filter_map(|i| {
            json!({
                "id": i,
                "jira_id": format!("OPS-{}", 1000 + i),
                "project_name": format!("service-{}", i % 17),
                "component_name": "api",
                "developer": format!("dev{}", i % 9),
                "environment": ENVIRONMENTS[i % ENVIRONMENTS.len()],
                "timestamp": format!("2025-03-{:02}T{:02}:15:00", 1 + i % 28, i % 24),
                "status": if i % 11 == 0 { "failed" } else { "success" },
            })
            .as_object()
            .cloned()
        })
        .collect()
}

fn bench_deployment_reports(c: &mut Criterion) {
    let at = NaiveDate::from_ymd_opt(2025, 4, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid benchmark timestamp");
    let period = ReportPeriod::new(3, 2025).expect("valid benchmark period");
    let generator = ReportGenerator::builder().with_clock(FixedClock(at)).build();

    let mut group = c.benchmark_group("deployment_report");
    for count in [10usize, 100, 1000] {
        let records = generate_records(count);
        group.throughput(Throughput::Elements(count as u64));
        for format in ReportFormat::ALL {
            group.bench_with_input(
                BenchmarkId::new(format.extension(), count),
                &records,
                |b, records| {
                    b.iter(|| {
                        generator
                            .render_deployments(format, black_box(records), period)
                            .map(|bytes| bytes.len())
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_deployment_reports);
criterion_main!(benches);
