//! Scrollbars: trough geometry and the scrollbar widget.

mod geometry;
mod scrollbar;

pub use geometry::{
    slider_length, slider_offset, trough_geometry, RangeHit, ScrollbarConfig, Steppers,
    TroughGeometry,
};
pub use scrollbar::{Scrollbar, Stepper, StepperRole};
