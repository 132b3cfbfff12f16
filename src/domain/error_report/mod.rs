pub mod failure;
pub mod model;
pub mod notifier;
pub mod service;

pub use failure::{Failure, RequestDetails};
pub use model::{ErrorReport, NO_RESPONSE_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
pub use notifier::{render_body, EmailNotifier};
pub use service::ErrorReporter;
