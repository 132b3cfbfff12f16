//! Client for the Platinum member-administration platform.
//!
//! Wraps the provider's core API (bearer token) and gateway API
//! (subscription key). Failed calls are classified into an
//! [`ErrorReport`](domain::error_report::ErrorReport), logged, mailed to
//! operators, and returned to the caller as [`AppError::Platinum`](error::AppError).

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::error_report::{ErrorReport, ErrorReporter};
pub use error::{AppError, AppResult};
pub use infrastructure::config::Config;
pub use infrastructure::platinum::{Contributions, PlatinumClient};
