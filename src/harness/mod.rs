//! Sequential test execution with output capture and outcome classification.

mod error;

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::capture::Capture;
use crate::models::{Payload, RunSummary, TestResult, TestStatus, test_id};

pub use error::ProcedureError;

/// A registered test body: receives the case payload and a diagnostic stream.
pub type Procedure<'a> = Box<dyn Fn(&Payload, &mut Capture) -> Result<(), ProcedureError> + 'a>;

pub struct TestCase<'a> {
    pub procedure: Procedure<'a>,
    pub description: String,
    pub payload: Payload,
}

impl<'a> TestCase<'a> {
    pub fn new<F>(procedure: F, description: impl Into<String>, payload: Payload) -> Self
    where
        F: Fn(&Payload, &mut Capture) -> Result<(), ProcedureError> + 'a,
    {
        Self {
            procedure: Box::new(procedure),
            description: description.into(),
            payload,
        }
    }
}

/// Terminal classification of one invocation.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Passed,
    Failed { message: String },
    Error { message: String },
}

impl Outcome {
    fn status(&self) -> TestStatus {
        match self {
            Outcome::Passed => TestStatus::Passed,
            Outcome::Failed { .. } => TestStatus::Failed,
            Outcome::Error { .. } => TestStatus::Error,
        }
    }

    fn into_message(self) -> String {
        match self {
            Outcome::Passed => String::new(),
            Outcome::Failed { message } | Outcome::Error { message } => message,
        }
    }
}

/// Runs test procedures one at a time and keeps their results in run order.
#[derive(Debug, Default)]
pub struct Harness {
    results: Vec<TestResult>,
    current: Option<TestResult>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a single procedure and record its result. Returns whether it passed.
    ///
    /// Nothing the procedure does escapes this call: expectation failures become
    /// `Failed`, every other error and any panic becomes `Error`. Whatever the
    /// procedure wrote to its capture is appended after the failure message.
    pub fn run_test<F>(&mut self, procedure: F, description: &str, payload: &Payload) -> bool
    where
        F: FnOnce(&Payload, &mut Capture) -> Result<(), ProcedureError>,
    {
        let id = test_id(self.results.len() + 1);
        let _span = tracing::info_span!("test", %id, description).entered();

        let current = self.current.insert(TestResult::not_run(description, payload));
        let mut capture = Capture::new();
        let start = Instant::now();

        let outcome = match catch_quietly(|| procedure(payload, &mut capture)) {
            Ok(Ok(())) => Outcome::Passed,
            Ok(Err(ProcedureError::Expectation(message))) => Outcome::Failed { message },
            Ok(Err(ProcedureError::Fault(e))) => Outcome::Error {
                message: format!("Unexpected error: {:#}", e),
            },
            Err(panic) => Outcome::Error {
                message: format!("Unexpected error: {}", panic_message(panic.as_ref())),
            },
        };

        current.duration_ms = millis(start.elapsed());
        current.status = outcome.status();
        current.passed = current.status == TestStatus::Passed;
        current.actual_result = outcome.into_message();
        current.actual_result.push_str(&capture.into_string());

        match current.status {
            TestStatus::Passed => tracing::info!(duration_ms = current.duration_ms, "passed"),
            status => {
                tracing::warn!(%id, %status, duration_ms = current.duration_ms, "did not pass");
                tracing::debug!(actual = %current.actual_result.trim_end(), "captured output");
            }
        }

        let passed = current.passed;
        self.results.push(current.clone());
        passed
    }

    /// Run every case in order and return the totals.
    pub fn run_all(&mut self, cases: &[TestCase<'_>]) -> RunSummary {
        tracing::info!(count = cases.len(), "running test cases");
        for case in cases {
            self.run_test(
                |payload, out| (case.procedure)(payload, out),
                &case.description,
                &case.payload,
            );
        }
        self.summary()
    }

    /// Results in the order their cases were run.
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }

    /// The most recently started test, if any.
    pub fn current(&self) -> Option<&TestResult> {
        self.current.as_ref()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }
}

/// Look up a string field of a payload. A missing or non-string field is a fault,
/// not an expectation failure.
pub fn text_field<'p>(payload: &'p Payload, key: &str) -> Result<&'p str, ProcedureError> {
    match payload.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ProcedureError::fault(format!(
            "field '{}' is not a string: {}",
            key, other
        ))),
        None => Err(ProcedureError::fault(format!("missing payload field '{}'", key))),
    }
}

/// Serialises panic hook swaps between harnesses on different threads.
static PANIC_HOOK: Mutex<()> = Mutex::new(());

/// Run `f`, catching any panic with the panic hook muted so nothing reaches stderr.
/// The panic payload is returned to the caller instead.
fn catch_quietly<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    let _guard = PANIC_HOOK.lock().unwrap_or_else(PoisonError::into_inner);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);
    result
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "procedure panicked".to_string()
    }
}

#[cfg(test)]
mod tests;
