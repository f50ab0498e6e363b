//! Configuration errors.

use crate::models::{ParseEnvironmentError, ParseProductTypeError};

/// Invalid configuration from the environment or the command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    InvalidEnvironment {
        var: &'static str,
        #[source]
        source: ParseEnvironmentError,
    },

    #[error("{0}")]
    InvalidProduct(#[from] ParseProductTypeError),

    /// Host must be an absolute http(s) URL.
    #[error("{var}: invalid API host '{value}'")]
    InvalidApiHost { var: &'static str, value: String },

    #[error("{var}: expected a number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },
}

impl ConfigError {
    /// Same as [`ConfigError::InvalidEnvironment`] but for a CLI flag.
    pub fn environment_flag(source: ParseEnvironmentError) -> Self {
        ConfigError::InvalidEnvironment { var: "--env", source }
    }
}
