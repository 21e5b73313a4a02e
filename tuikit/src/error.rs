//! Error types.
//!
//! Layout never aborts on these. Callers inside the resize pass log them and
//! fall back to a neutral value; they surface as `Result`s only on the public
//! setters and the pure distribution functions.

use thiserror::Error;

use crate::widget::WidgetId;

/// Degenerate layout input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A distribution was requested over zero slots.
    #[error("cannot distribute space over zero slots")]
    NoSlots,

    /// A range widget was used without an attached adjustment.
    #[error("widget {0} has no adjustment attached")]
    MissingAdjustment(WidgetId),

    /// The widget already belongs to another container.
    #[error("widget {child} is already a child of {parent}")]
    AlreadyParented { child: WidgetId, parent: WidgetId },

    /// A container was asked to hold itself.
    #[error("widget {0} cannot contain itself")]
    SelfParent(WidgetId),

    /// A negative spacing or padding was supplied.
    #[error("negative {what}: {value}")]
    Negative { what: &'static str, value: i32 },
}

/// Rejected adjustment mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustmentError {
    /// A validator refused the proposed change.
    #[error("change to {field} vetoed: {reason}")]
    Vetoed { field: &'static str, reason: String },

    /// The adjustment's lock was poisoned by a panicking writer.
    #[error("adjustment state is poisoned")]
    Poisoned,
}

/// Dynamic extension property access failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("property {name} not set")]
    Missing { name: String },

    #[error("property {name} holds {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

