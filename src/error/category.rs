//! Error category classification.
//!
//! Every failure in the token lifecycle ends up in one of three buckets. None
//! of them propagates to the caller as an error: they become state (no token)
//! or the advisory shown when opening the widget.

use std::fmt;

/// High-level categorization of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Client id or access key missing for the active environment.
    /// Suppresses token requests; surfaced only when opening the widget.
    ConfigurationIncomplete,

    /// Transport, status or parse failure while fetching a bridge token.
    /// Swallowed by the controller; the missing token is the only symptom.
    TokenAcquisitionFailure,

    /// The embedded widget reported an error.
    /// Ends the session like a close does.
    WidgetRuntimeError,
}

impl ErrorCategory {
    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::ConfigurationIncomplete => "configuration_incomplete",
            ErrorCategory::TokenAcquisitionFailure => "token_acquisition_failure",
            ErrorCategory::WidgetRuntimeError => "widget_runtime_error",
        }
    }

    /// User-facing description.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::ConfigurationIncomplete => "Credentials are missing",
            ErrorCategory::TokenAcquisitionFailure => "No bridge token is available",
            ErrorCategory::WidgetRuntimeError => "The widget reported an error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
