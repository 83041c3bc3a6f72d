//! Logger errors

use thiserror::Error;

/// Errors raised while installing the subscriber.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LogError {
    /// The filter directive does not parse.
    #[error("invalid log filter `{directive}`: {reason}")]
    Filter {
        /// Directive as configured
        directive: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("logger already initialised: {0}")]
    AlreadyInitialized(String),
}

pub type LogResult<T> = Result<T, LogError>;
