use thiserror::Error;

use crate::client::ClientError;

/// How a test procedure can stop short of passing.
#[derive(Debug, Error)]
pub enum ProcedureError {
    /// A checked expectation did not hold.
    #[error("{0}")]
    Expectation(String),

    /// Anything else went wrong while the procedure ran.
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

impl ProcedureError {
    pub fn expectation(message: impl Into<String>) -> Self {
        ProcedureError::Expectation(message.into())
    }

    pub fn fault(message: impl std::fmt::Display) -> Self {
        ProcedureError::Fault(anyhow::anyhow!("{}", message))
    }
}

impl From<ClientError> for ProcedureError {
    fn from(e: ClientError) -> Self {
        ProcedureError::Fault(e.into())
    }
}

/// Return an expectation failure unless `cond` holds.
///
/// ```ignore
/// verify!(body.contains("Invalid login credentials"));
/// verify!(!body.contains("<script>"), "script tag leaked into {}", path);
/// ```
#[macro_export]
macro_rules! verify {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err($crate::harness::ProcedureError::Expectation(format!(
                "assertion failed: `{}`",
                stringify!($cond)
            )));
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::harness::ProcedureError::Expectation(format!($($arg)+)));
        }
    };
}

/// Return an expectation failure unless both sides compare equal.
/// The message names the compared expressions and both values.
#[macro_export]
macro_rules! verify_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    return Err($crate::harness::ProcedureError::Expectation(format!(
                        "assertion failed: `{} == {}` (left: {:?}, right: {:?})",
                        stringify!($left),
                        stringify!($right),
                        left,
                        right
                    )));
                }
            }
        }
    };
}
