pub mod error;
pub mod service;
pub mod types;

pub use error::ServiceError;
pub use service::Helpdesk;
pub use types::{submission_from_draft, ChatOutcome, ChatQuery};
