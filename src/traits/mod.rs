//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - outbound HTTP used by the bridge token client
//! - [`SettingsProvider`] - settings persistence

pub mod http;
pub mod settings;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use settings::{SettingsError, SettingsProvider};
