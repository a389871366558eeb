pub mod result;
pub mod status;

pub use result::{Payload, RunSummary, TestResult, test_id};
pub use status::TestStatus;
