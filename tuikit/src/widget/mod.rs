//! Capability traits shared by every widget.
//!
//! Widgets are not arranged in a type hierarchy. Each concrete widget embeds a
//! [`WidgetCore`] and implements the capabilities it supports:
//!
//! - [`Sizable`]: size request, origin, allocation and the resize pass
//! - [`Alignable`]: alignment fractions used when a slot is larger than the
//!   widget
//! - [`Packable`]: containers that accept packed children
//! - [`Scrollable`]: widgets driven by a pair of adjustments
//!
//! Anything that is both sizable and alignable is a [`Widget`] and can be
//! packed into a container, including the containers themselves.

mod base;
mod label;
mod properties;

use std::fmt;
use std::sync::Arc;

pub use base::{WidgetCore, WidgetId};
pub use label::Label;
pub use properties::{Properties, PropertyValue};

use crate::adjustment::Adjustment;
use crate::buffer::Buffer;
use crate::error::LayoutError;
use crate::event::EventResult;
use crate::layout::{Point, Rect, Size};
use crate::types::PackSide;

pub trait Sizable: Send + Sync + fmt::Debug {
    fn core(&self) -> &WidgetCore;

    fn id(&self) -> WidgetId {
        self.core().id()
    }

    /// Preferred size. Negative components mean "no preference".
    fn size_request(&self) -> Size {
        self.core().size_request()
    }

    fn set_size_request(&self, size: Size) {
        self.core().set_size_request(size);
    }

    fn origin(&self) -> Point {
        self.core().origin()
    }

    fn set_origin(&self, origin: Point) {
        self.core().set_origin(origin);
    }

    fn allocation(&self) -> Size {
        self.core().allocation()
    }

    fn set_allocation(&self, allocation: Size) {
        self.core().set_allocation(allocation);
    }

    fn region(&self) -> Rect {
        self.core().region()
    }

    /// Recompute this widget's internal geometry from its current origin and
    /// allocation, then resize its children.
    fn resize(&self) -> EventResult {
        self.core().invalidate();
        EventResult::Consumed
    }

    /// Mark this widget and its subtree as needing a redraw.
    fn invalidate(&self) {
        self.core().invalidate();
        for child in self.children() {
            child.invalidate();
        }
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        Vec::new()
    }

    /// Draw into `buf` using the geometry from the last resize.
    fn draw(&self, _buf: &mut Buffer) {}
}

pub trait Alignable: Sizable {
    fn alignment(&self) -> (f32, f32) {
        self.core().alignment()
    }

    fn set_alignment(&self, x: f32, y: f32) {
        self.core().set_alignment(x, y);
    }
}

/// A sizable, alignable widget.
pub trait Widget: Sizable + Alignable {}

impl<T: Sizable + Alignable + ?Sized> Widget for T {}

/// Containers that lay out packed children.
pub trait Packable: Widget {
    /// Append `child` to the given side with its packing directives.
    fn pack(
        &self,
        child: Arc<dyn Widget>,
        side: PackSide,
        expand: bool,
        fill: bool,
        padding: i32,
    ) -> Result<(), LayoutError>;

    fn pack_start(
        &self,
        child: Arc<dyn Widget>,
        expand: bool,
        fill: bool,
        padding: i32,
    ) -> Result<(), LayoutError> {
        self.pack(child, PackSide::Start, expand, fill, padding)
    }

    fn pack_end(
        &self,
        child: Arc<dyn Widget>,
        expand: bool,
        fill: bool,
        padding: i32,
    ) -> Result<(), LayoutError> {
        self.pack(child, PackSide::End, expand, fill, padding)
    }

    /// Detach a child. Returns whether it was packed here.
    fn remove(&self, child: WidgetId) -> bool;

    fn child_count(&self) -> usize;
}

/// Widgets whose visible part is driven by a horizontal and a vertical
/// adjustment.
pub trait Scrollable: Widget {
    fn hadjustment(&self) -> Adjustment;
    fn vadjustment(&self) -> Adjustment;
}

/// Find a descendant of `root` by id. `root` itself is not considered.
pub fn find_descendant(root: &dyn Widget, id: WidgetId) -> Option<Arc<dyn Widget>> {
    for child in root.children() {
        if child.id() == id {
            return Some(child);
        }
        if let Some(found) = find_descendant(child.as_ref(), id) {
            return Some(found);
        }
    }
    None
}

pub fn is_descendant(root: &dyn Widget, id: WidgetId) -> bool {
    find_descendant(root, id).is_some()
}
