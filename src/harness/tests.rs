use std::io;
use std::sync::{Arc, Mutex};
use std::thread;

use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::{verify, verify_eq};

fn payload(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Payload::new(),
    }
}

#[test]
fn passing_procedure_records_its_output() {
    let mut harness = Harness::new();
    let passed = harness.run_test(
        |_, out| {
            verify_eq!(1, 1);
            out.line("ok");
            Ok(())
        },
        "one equals one",
        &Payload::new(),
    );

    assert!(passed);
    let result = &harness.results()[0];
    assert_eq!(result.status, TestStatus::Passed);
    assert!(result.passed);
    assert_eq!(result.actual_result, "ok\n");
}

#[test]
fn expectation_failure_is_failed_with_message_first() {
    let mut harness = Harness::new();
    let passed = harness.run_test(
        |_, out| {
            out.line("posted login form");
            let response_code = 200;
            verify_eq!(response_code, 302);
            Ok(())
        },
        "redirect after login",
        &Payload::new(),
    );

    assert!(!passed);
    let result = &harness.results()[0];
    assert_eq!(result.status, TestStatus::Failed);
    assert!(!result.passed);
    let first_line = result.actual_result.lines().next().unwrap_or_default();
    assert!(first_line.contains("302"), "{first_line}");
    assert!(first_line.contains("200"), "{first_line}");
    assert!(result.actual_result.ends_with("posted login form\n"));
}

#[test]
fn verify_with_custom_message() {
    let mut harness = Harness::new();
    harness.run_test(
        |_, _| {
            verify!("<p>hi</p>".contains("<script>"), "body has no script tag");
            Ok(())
        },
        "custom",
        &Payload::new(),
    );
    assert_eq!(harness.results()[0].actual_result, "body has no script tag");
}

#[test]
fn verify_without_message_names_the_condition() {
    let mut harness = Harness::new();
    harness.run_test(
        |_, _| {
            let body = "hello";
            verify!(body.is_empty());
            Ok(())
        },
        "plain verify",
        &Payload::new(),
    );
    assert_eq!(
        harness.results()[0].actual_result,
        "assertion failed: `body.is_empty()`"
    );
}

#[test]
fn other_faults_are_errors() {
    let mut harness = Harness::new();
    let data = payload(json!({ "password": "x" }));
    let passed = harness.run_test(
        |p, out| {
            out.line("looking up email");
            let _email = text_field(p, "email")?;
            Ok(())
        },
        "missing key",
        &data,
    );

    assert!(!passed);
    let result = &harness.results()[0];
    assert_eq!(result.status, TestStatus::Error);
    assert_eq!(
        result.actual_result,
        "Unexpected error: missing payload field 'email'looking up email\n"
    );
}

#[test]
fn panics_are_caught_and_classified_as_errors() {
    let this = thread::current().id();
    let hook_calls = Arc::new(Mutex::new(Vec::new()));
    let previous = panic::take_hook();
    {
        let hook_calls = Arc::clone(&hook_calls);
        panic::set_hook(Box::new(move |info| {
            if thread::current().id() == this {
                hook_calls.lock().unwrap().push(info.to_string());
            }
        }));
    }

    let mut harness = Harness::new();
    harness.run_test(
        |_, out| {
            out.line("about to blow up");
            panic!("index out of range");
        },
        "panics",
        &Payload::new(),
    );
    let passed = harness.run_test(|_, _| Ok(()), "runs afterwards", &Payload::new());

    let _ = panic::take_hook();
    panic::set_hook(previous);

    assert!(passed);
    let results = harness.results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, TestStatus::Error);
    assert!(
        results[0]
            .actual_result
            .starts_with("Unexpected error: index out of range")
    );
    assert!(results[0].actual_result.ends_with("about to blow up\n"));
    assert_eq!(results[1].status, TestStatus::Passed);
    assert_eq!(*hook_calls.lock().unwrap(), Vec::<String>::new());
}

#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedLog {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn warnings_leave_captured_output_out_of_the_log() {
    let log = SharedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();

    let mut harness = Harness::new();
    tracing::subscriber::with_default(subscriber, || {
        harness.run_test(
            |_, out| {
                out.line("response body was <p>secret</p>");
                verify!(false, "no redirect");
                Ok(())
            },
            "noisy failure",
            &Payload::new(),
        );
    });

    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    assert!(text.contains("did not pass"), "{text}");
    assert!(text.contains("TC001"), "{text}");
    assert!(!text.contains("secret"), "{text}");
    assert!(!text.contains("no redirect"), "{text}");
}

#[test]
fn durations_saturate_instead_of_wrapping() {
    assert_eq!(millis(Duration::from_millis(1500)), 1500);
    assert_eq!(millis(Duration::MAX), u64::MAX);
}

#[test]
fn output_never_leaks_between_results() {
    let mut harness = Harness::new();
    let noisy = |_: &Payload, out: &mut Capture| -> Result<(), ProcedureError> {
        out.line("noise");
        Ok(())
    };
    harness.run_test(noisy, "first", &Payload::new());
    harness.run_test(noisy, "second", &Payload::new());

    for result in harness.results() {
        assert_eq!(result.actual_result, "noise\n");
    }
}

#[test]
fn results_keep_registration_order() {
    let cases: Vec<TestCase<'_>> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            TestCase::new(
                move |_: &Payload, out: &mut Capture| {
                    out.line(name);
                    verify!(name != "b", "{} rejected", name);
                    Ok(())
                },
                name,
                payload(json!({ "name": name })),
            )
        })
        .collect();

    let mut harness = Harness::new();
    let summary = harness.run_all(&cases);

    let descriptions: Vec<&str> = harness
        .results()
        .iter()
        .map(|r| r.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["a", "b", "c"]);
    assert_eq!(harness.results()[1].test_data, payload(json!({ "name": "b" })));
    assert_eq!(summary.total, 3);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(harness.current().map(|r| r.description.as_str()), Some("c"));
}

#[test]
fn empty_run_has_zero_totals() {
    let mut harness = Harness::new();
    let summary = harness.run_all(&[]);
    assert!(harness.results().is_empty());
    assert_eq!((summary.total, summary.passed, summary.failed), (0, 0, 0));
    assert!(harness.current().is_none());
}
