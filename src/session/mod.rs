//! Widget session gating.

mod gate;

pub use gate::{
    Advisory, AdvisoryAction, GateState, OpenOutcome, WidgetEvent, WidgetGate, ADVISORY_MESSAGE,
    ADVISORY_TITLE,
};
