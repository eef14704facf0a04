use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RootCauseError {
    #[error("Unknown check: {0}")]
    UnknownCheck(String),

    #[error("Invalid value for {check}: {reason}")]
    InvalidValue { check: String, reason: String },

    #[error("Invalid observation document: {0}")]
    InvalidDocument(String),
}
