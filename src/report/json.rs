//! Machine-readable export of a report's results.

use serde::Serialize;

use super::{Report, TIMESTAMP_FORMAT};
use crate::models::{Payload, RunSummary, TestStatus, test_id};

#[derive(Serialize)]
struct JsonReport<'a> {
    title: String,
    environment: &'a str,
    generated_at: String,
    summary: RunSummary,
    results: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    id: String,
    description: &'a str,
    test_data: &'a Payload,
    expected: &'a str,
    actual_result: &'a str,
    status: TestStatus,
    passed: bool,
    duration_ms: u64,
}

pub fn to_string(report: &Report<'_>) -> serde_json::Result<String> {
    let options = report.options();
    let results = (1..)
        .zip(report.results())
        .map(|(position, r)| JsonRow {
            id: test_id(position),
            description: &r.description,
            test_data: &r.test_data,
            expected: report.expected(position),
            actual_result: &r.actual_result,
            status: r.status,
            passed: r.passed,
            duration_ms: r.duration_ms,
        })
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        title: options.title(),
        environment: &options.environment,
        generated_at: options.generated_at.format(TIMESTAMP_FORMAT).to_string(),
        summary: report.summary(),
        results,
    })
}
