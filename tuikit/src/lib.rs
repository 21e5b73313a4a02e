//! Layout core for terminal widgets: packing containers, scrollbars and
//! scrolled viewports, all driven by shared [`Adjustment`]s.
//!
//! Coordinates are integer cells. A widget's origin is screen-relative and
//! its allocation is the size it was given by its parent during the last
//! resize pass. Layout is a single synchronous depth-first walk started by
//! calling [`Sizable::resize`] on the root.

pub mod adjustment;
pub mod buffer;
pub mod container;
pub mod error;
pub mod event;
pub mod layout;
pub mod range;
pub mod scroll;
pub mod types;
pub mod widget;

pub use adjustment::{Adjustment, AdjustmentChange, AdjustmentValues, HandlerId, Validation};
pub use buffer::{Buffer, Cell};
pub use container::{ButtonBox, PackBox, PackChild};
pub use error::{AdjustmentError, LayoutError, PropertyError};
pub use event::{Event, EventResult, Key, Modifiers, MouseButton};
pub use layout::{Point, Rect, Size};
pub use range::{RangeHit, Scrollbar, ScrollbarConfig, Stepper, StepperRole, Steppers};
pub use scroll::{ScrolledViewport, Viewport};
pub use types::*;
pub use widget::{
    Alignable, Label, Packable, Properties, PropertyValue, Scrollable, Sizable, Widget,
    WidgetCore, WidgetId,
};
