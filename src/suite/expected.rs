use std::collections::BTreeMap;

/// Shown when no expected result is known for a position.
pub const PLACEHOLDER: &str = "N/A";

/// Expected-result text for the report, keyed by 1-based test position.
///
/// The built-in table only covers a few positions; the rest render as
/// [`PLACEHOLDER`].
#[derive(Debug, Clone, Default)]
pub struct ExpectedResults {
    entries: BTreeMap<usize, String>,
}

impl ExpectedResults {
    pub fn builtin() -> Self {
        let entries = [
            (1, "Successful login, redirected to dashboard"),
            (2, "Error message: Invalid credentials"),
            (41, "Input sanitized, no script execution"),
        ]
        .into_iter()
        .map(|(position, text)| (position, text.to_string()))
        .collect();
        Self { entries }
    }

    /// Add or replace entries from config keys such as `TC003` (or a bare `3`).
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, text) in overrides {
            match parse_position(key) {
                Some(position) => {
                    self.entries.insert(position, text.clone());
                }
                None => tracing::warn!(key = %key, "ignoring expected result with invalid test id"),
            }
        }
        self
    }

    pub fn get(&self, position: usize) -> &str {
        self.entries
            .get(&position)
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER)
    }
}

fn parse_position(key: &str) -> Option<usize> {
    let digits = key.strip_prefix("TC").unwrap_or(key);
    digits.parse().ok().filter(|&p| p > 0)
}
