//! Widget session gate.
//!
//! Two states, derived from the store's widget flag:
//!
//! ```text
//!            open() [token + credentials]
//! Configuring ───────────────────────────▶ WidgetActive
//!      ▲                                        │
//!      └──────── success / error / close ───────┘
//! ```
//!
//! A refused `open()` leaves the state alone and returns an [`Advisory`].
//! The guard only applies on entry: a running session lasts until the
//! widget reports success, error or close, even if the token is cleared
//! meanwhile. The widget keeps working with the token it was started with.

use serde_json::Value;

use crate::error::ErrorCategory;
use crate::models::BridgeToken;
use crate::state::SettingsStore;

pub const ADVISORY_TITLE: &str = "Can\u{2019}t open Citadel Bridge";
pub const ADVISORY_MESSAGE: &str =
    "Add a key or change the environment in the settings to run Citadel Bridge.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Configuring,
    WidgetActive,
}

/// Callbacks from the embedded widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Load,
    /// Progress event with an arbitrary payload.
    Event(Value),
    Success,
    Error { message: Option<String> },
    Close,
}

impl WidgetEvent {
    /// Whether this event ends an active session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WidgetEvent::Success | WidgetEvent::Error { .. } | WidgetEvent::Close
        )
    }
}

/// Follow-up offered with an [`Advisory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryAction {
    OpenSettings,
}

impl AdvisoryAction {
    pub fn label(&self) -> &'static str {
        match self {
            AdvisoryAction::OpenSettings => "Open settings",
        }
    }
}

/// Refusal shown when the widget cannot be opened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{title}: {message}")]
pub struct Advisory {
    pub title: &'static str,
    pub message: &'static str,
    pub action: AdvisoryAction,
    /// Which precondition failed.
    pub reason: ErrorCategory,
}

impl Advisory {
    fn new(reason: ErrorCategory) -> Self {
        Self {
            title: ADVISORY_TITLE,
            message: ADVISORY_MESSAGE,
            action: AdvisoryAction::OpenSettings,
            reason,
        }
    }
}

/// Result of an accepted [`WidgetGate::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The widget was shown and should start with this token.
    Opened(BridgeToken),
    /// A session is already running; nothing changed.
    AlreadyActive,
}

/// Guards widget launch on token and credential presence.
#[derive(Debug, Clone)]
pub struct WidgetGate {
    store: SettingsStore,
}

impl WidgetGate {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    pub fn state(&self) -> GateState {
        if self.store.widget_visible() {
            GateState::WidgetActive
        } else {
            GateState::Configuring
        }
    }

    /// Try to show the widget.
    ///
    /// From `Configuring`, succeeds only when the active environment has
    /// both a client id and an access key and a bridge token is present.
    /// From `WidgetActive` this is a no-op.
    pub fn open(&self) -> Result<OpenOutcome, Advisory> {
        if self.state() == GateState::WidgetActive {
            tracing::debug!("widget already open");
            return Ok(OpenOutcome::AlreadyActive);
        }

        if !self.store.active_credentials().is_complete() {
            tracing::info!("refusing to open widget: credentials incomplete");
            return Err(Advisory::new(ErrorCategory::ConfigurationIncomplete));
        }

        let Some(token) = self.store.session_token() else {
            tracing::info!("refusing to open widget: no bridge token");
            return Err(Advisory::new(ErrorCategory::TokenAcquisitionFailure));
        };

        self.store.set_widget_visible(true);
        tracing::info!("widget opened");
        Ok(OpenOutcome::Opened(token))
    }

    /// Apply a widget callback and return the resulting state.
    pub fn handle_event(&self, event: WidgetEvent) -> GateState {
        if self.state() == GateState::Configuring {
            tracing::debug!(?event, "ignoring widget event while configuring");
            return GateState::Configuring;
        }

        match &event {
            WidgetEvent::Load => tracing::info!("widget loaded"),
            WidgetEvent::Event(payload) => tracing::info!(%payload, "widget event"),
            WidgetEvent::Success => tracing::info!("widget succeeded"),
            WidgetEvent::Error { message } => tracing::warn!(
                category = %ErrorCategory::WidgetRuntimeError,
                "widget error: {}",
                message.as_deref().unwrap_or("unknown")
            ),
            WidgetEvent::Close => tracing::info!("widget closed"),
        }

        if event.is_terminal() {
            self.store.set_widget_visible(false);
        }
        self.state()
    }
}
