//! Shared application state.

pub mod store;

pub use store::{SettingsSnapshot, SettingsStore};
