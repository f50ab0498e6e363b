//! Citadel Bridge demo client.
//!
//! Keeps user-editable settings in a [`state::SettingsStore`], derives a
//! bridge token from them with [`bridge::TokenController`], and gates widget
//! launch on that token with [`session::WidgetGate`].

pub mod adapters;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod state;
pub mod traits;
