use serde::{Deserialize, Serialize};

use super::status::TestStatus;

/// Field name to value mapping handed to a test procedure.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Display identifier for the 1-based position of a test case, e.g. `TC001`.
pub fn test_id(position: usize) -> String {
    format!("TC{:03}", position)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestResult {
    pub description: String,
    pub test_data: Payload,
    pub status: TestStatus,
    /// Failure message (if any) followed by everything the procedure printed.
    pub actual_result: String,
    pub passed: bool,
    pub duration_ms: u64,
}

impl TestResult {
    pub(crate) fn not_run(description: &str, test_data: &Payload) -> Self {
        Self {
            description: description.to_string(),
            test_data: test_data.clone(),
            ..Self::default()
        }
    }

    /// The payload as rendered in reports.
    pub fn test_data_text(&self) -> String {
        serde_json::Value::Object(self.test_data.clone()).to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    /// Everything that did not pass, errors included.
    pub failed: usize,
    /// The share of `failed` caused by unexpected faults.
    pub errored: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let errored = results
            .iter()
            .filter(|r| r.status == TestStatus::Error)
            .count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            errored,
            duration_ms: results.iter().map(|r| r.duration_ms).sum(),
        }
    }

    /// One-line totals, e.g. `Total: 3, Passed: 2, Failed: 1`.
    pub fn headline(&self) -> String {
        format!(
            "Total: {}, Passed: {}, Failed: {}",
            self.total, self.passed, self.failed
        )
    }
}
