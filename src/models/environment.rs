//! Backend environments.
//!
//! Each environment keeps its own credentials; only one is active at a time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three backend environments the demo can talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Sandbox environment (default)
    #[default]
    Sandbox,
    /// Development environment
    Dev,
    /// Production environment
    Prod,
}

impl Environment {
    /// All environments, in the order the settings screen lists them.
    pub const ALL: [Environment; 3] = [Environment::Sandbox, Environment::Dev, Environment::Prod];

    /// The wire/config tag for this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Environment::Sandbox => "Sandbox",
            Environment::Dev => "Development",
            Environment::Prod => "Production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known environment tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment '{0}' (expected sandbox, dev or prod)")]
pub struct ParseEnvironmentError(pub String);

impl FromStr for Environment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sandbox" => Ok(Environment::Sandbox),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ParseEnvironmentError(other.to_string())),
        }
    }
}
