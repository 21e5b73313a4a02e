//! Scrolling composition: a clipping viewport and a viewport with scrollbars.

mod scrolled;
mod viewport;

pub use scrolled::ScrolledViewport;
pub use viewport::Viewport;
