//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable and deferred responses
//! - [`InMemorySettings`] - in-memory settings storage

pub mod http;
pub mod settings;

pub use http::{DeferredResponse, MockHttpClient, MockResponse, RecordedRequest};
pub use settings::InMemorySettings;
