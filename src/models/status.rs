use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use crate::theme::{self, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TestStatus {
    #[default]
    NotRun,
    Passed,
    Failed,
    Error,
}

impl TestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::NotRun => "Not Run",
            TestStatus::Passed => "Passed",
            TestStatus::Failed => "Failed",
            TestStatus::Error => "Error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TestStatus::NotRun => "◌",
            TestStatus::Passed => "✔",
            TestStatus::Failed => "✘",
            TestStatus::Error => "⚠",
        }
    }

    /// Console colour for the status label.
    pub fn color(&self) -> Color {
        match self {
            TestStatus::Passed => theme::GREEN,
            TestStatus::Failed => theme::RED,
            TestStatus::Error => theme::YELLOW,
            TestStatus::NotRun => theme::SUBTEXT0,
        }
    }

    /// Row fill used in the detailed results table.
    pub fn fill(&self) -> Rgb {
        match self {
            TestStatus::Passed => theme::PASSED_FILL,
            TestStatus::Failed => theme::FAILED_FILL,
            _ => theme::ERROR_FILL,
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
