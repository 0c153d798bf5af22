use thiserror::Error;

/// Failures shared across the workspace: configuration and knowledge-base
/// loading. Storage crates carry their own error types.
#[derive(Debug, Error)]
pub enum HelpdeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),
}

impl HelpdeskError {
    /// Short error code string for machine-readable surfacing (an embedding
    /// HTTP layer maps these into response bodies).
    pub fn code(&self) -> &'static str {
        match self {
            HelpdeskError::Config(_) => "CONFIG_ERROR",
            HelpdeskError::Knowledge(_) => "KNOWLEDGE_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, HelpdeskError>;
