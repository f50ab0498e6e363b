//! Concrete implementations of the traits in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSettingsProvider`] - JSON file settings storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_settings;
pub mod mock;
pub mod reqwest_http;

pub use file_settings::FileSettingsProvider;
pub use mock::{InMemorySettings, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
