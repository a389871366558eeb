//! Manual test execution for the storefront: run a fixed suite of functional
//! checks in-process and publish the outcome as a paginated report.

pub mod app;
pub mod capture;
pub mod client;
pub mod config;
pub mod harness;
pub mod html;
pub mod logging;
pub mod models;
pub mod report;
pub mod suite;
pub mod theme;
pub mod viewer;

pub use app::{RunOutput, generate_report};
