//! Error handling for the demo core.
//!
//! | Category | Source | User-visible as |
//! |----------|--------|-----------------|
//! | ConfigurationIncomplete | empty client id / access key | open advisory |
//! | TokenAcquisitionFailure | [`BridgeApiError`](crate::bridge::BridgeApiError) | open advisory |
//! | WidgetRuntimeError | widget error event | session ends |
//!
//! [`ConfigError`] is separate: it stops the binary before the store exists.

mod category;
mod config;

pub use category::ErrorCategory;
pub use config::ConfigError;
