//! One end-to-end run: execute the suite, then render and write the report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::client::{Storefront, TestClient};
use crate::config::Config;
use crate::harness::Harness;
use crate::models::{RunSummary, TestResult};
use crate::report::{Report, ReportOptions};
use crate::suite::{self, ExpectedResults};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub report_path: PathBuf,
    pub json_path: Option<PathBuf>,
    pub results: Vec<TestResult>,
    pub summary: RunSummary,
}

/// Run the registered suite against an in-process storefront and write the report.
///
/// Test failures never make this fail; only problems creating the output
/// directory or writing files do, and then nothing is reported.
pub fn generate_report(config: &Config, generated_at: NaiveDateTime) -> Result<RunOutput> {
    let report_dir = config.report_dir();
    std::fs::create_dir_all(&report_dir)
        .with_context(|| format!("failed to create {}", report_dir.display()))?;

    let client = TestClient::new(Storefront::default());
    let mut harness = Harness::new();
    let summary = harness.run_all(&suite::cases(&client));
    tracing::info!(
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        "suite finished"
    );

    let expected = ExpectedResults::builtin().with_overrides(&config.expected);
    let options = ReportOptions::from_config(config, generated_at);
    let results = harness.into_results();
    let report = Report::new(&results, &expected, &options);

    let report_path = config.report_path();
    report.write(&report_path)?;

    let json_path = if config.report.write_json {
        let path = report_path.with_extension("json");
        report.write_json(&path)?;
        Some(path)
    } else {
        None
    };

    Ok(RunOutput {
        report_path,
        json_path,
        results,
        summary,
    })
}
