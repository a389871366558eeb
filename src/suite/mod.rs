//! The registered storefront test suite.

pub mod expected;
mod procedures;

use serde_json::{Value, json};

use crate::client::Client;
use crate::harness::TestCase;
use crate::models::Payload;

pub use expected::{ExpectedResults, PLACEHOLDER};
pub use procedures::{login_invalid, login_valid, xss_protection};

/// The fixed, ordered list of test cases, each bound to `client`.
pub fn cases(client: &dyn Client) -> Vec<TestCase<'_>> {
    vec![
        TestCase::new(
            move |data, out| login_valid(client, data, out),
            "Valid login",
            object(json!({ "email": "user@test.com", "password": "Test@123" })),
        ),
        TestCase::new(
            move |data, out| login_invalid(client, data, out),
            "Invalid password",
            object(json!({ "email": "user@test.com", "password": "wrong" })),
        ),
        TestCase::new(
            move |data, out| xss_protection(client, data, out),
            "XSS Protection",
            object(json!({ "input": "<script>alert(1)</script>" })),
        ),
    ]
}

fn object(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        _ => Payload::new(),
    }
}
