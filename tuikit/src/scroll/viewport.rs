use std::sync::{Arc, RwLock};

use crate::adjustment::{Adjustment, AdjustmentValues};
use crate::buffer::Buffer;
use crate::error::LayoutError;
use crate::event::EventResult;
use crate::layout::{Point, Size};
use crate::widget::{Alignable, Scrollable, Sizable, Widget, WidgetCore};

#[derive(Debug, Default)]
struct ViewportInner {
    child: Option<Arc<dyn Widget>>,
}

/// Shows a window onto a child that may be larger than the viewport.
///
/// On each resize the viewport configures its two adjustments from the
/// child's size request. An axis where the child overflows gets a scrollable
/// range and the child is shifted by the adjustment value; an axis where it
/// fits collapses its adjustment to the moot range.
#[derive(Debug)]
pub struct Viewport {
    core: WidgetCore,
    inner: RwLock<ViewportInner>,
    hadjustment: Adjustment,
    vadjustment: Adjustment,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::with_adjustments(Adjustment::default(), Adjustment::default())
    }

    pub fn with_adjustments(hadjustment: Adjustment, vadjustment: Adjustment) -> Self {
        Self {
            core: WidgetCore::new(),
            inner: RwLock::new(ViewportInner::default()),
            hadjustment,
            vadjustment,
        }
    }

    pub fn child(&self) -> Option<Arc<dyn Widget>> {
        self.inner.read().ok().and_then(|guard| guard.child.clone())
    }

    /// Replace the child. The previous child, if any, is detached.
    pub fn set_child(&self, child: Option<Arc<dyn Widget>>) -> Result<(), LayoutError> {
        if let Some(child) = &child {
            child.core().claim_parent(self.core.id())?;
        }
        let previous = match self.inner.write() {
            Ok(mut guard) => std::mem::replace(&mut guard.child, child),
            Err(_) => {
                log::error!("[viewport] {} state poisoned", self.core.id());
                return Ok(());
            }
        };
        if let Some(previous) = previous {
            previous.core().release_parent();
        }
        self.core.invalidate();
        Ok(())
    }

    /// Offset of the visible window into the child.
    pub fn scroll_offset(&self) -> Point {
        Point::new(self.hadjustment.value(), self.vadjustment.value())
    }
}

/// Configure `adjustment` for one axis and return the child's
/// (offset, extent) along it.
fn fit_axis(adjustment: &Adjustment, available: i32, requested: i32) -> (i32, i32) {
    let available = available.max(0);
    if requested > available {
        let upper = requested - available;
        let values = AdjustmentValues::new(
            adjustment.value().clamp(0, upper),
            0,
            upper,
            1,
            (available / 2).max(1),
            available,
        );
        if let Err(err) = adjustment.configure(values) {
            log::debug!("[viewport] configure rejected: {}", err);
        }
        (-adjustment.value(), requested)
    } else {
        if let Err(err) = adjustment.collapse() {
            log::debug!("[viewport] collapse rejected: {}", err);
        }
        (0, available)
    }
}

impl Scrollable for Viewport {
    fn hadjustment(&self) -> Adjustment {
        self.hadjustment.clone()
    }

    fn vadjustment(&self) -> Adjustment {
        self.vadjustment.clone()
    }
}

impl Sizable for Viewport {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        let explicit = self.core.size_request();
        if explicit.width >= 0 && explicit.height >= 0 {
            return explicit;
        }
        let natural = self
            .child()
            .map(|child| child.size_request().clamped())
            .unwrap_or_default();
        Size::new(
            if explicit.width >= 0 { explicit.width } else { natural.width },
            if explicit.height >= 0 { explicit.height } else { natural.height },
        )
    }

    fn resize(&self) -> EventResult {
        let region = self.core.region();
        self.core.invalidate();

        let Some(child) = self.child() else {
            for adjustment in [&self.hadjustment, &self.vadjustment] {
                if let Err(err) = adjustment.collapse() {
                    log::debug!("[viewport] collapse rejected: {}", err);
                }
            }
            return EventResult::Consumed;
        };

        let request = child.size_request();
        let (dx, width) = fit_axis(&self.hadjustment, region.width, request.width);
        let (dy, height) = fit_axis(&self.vadjustment, region.height, request.height);
        log::trace!(
            "[viewport] {} child {}x{} at offset ({}, {})",
            self.core.id(),
            width,
            height,
            dx,
            dy
        );

        child.set_origin(region.origin().offset(dx, dy));
        child.set_allocation(Size::new(width, height));
        child.resize();
        EventResult::Consumed
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        self.child().into_iter().collect()
    }

    /// Draw the child clipped to the viewport's region.
    fn draw(&self, buf: &mut Buffer) {
        let Some(child) = self.child() else {
            return;
        };
        let region = self.core.region().clamped();
        if region.is_empty() {
            return;
        }
        let mut scratch = Buffer::new(region.right(), region.bottom());
        child.draw(&mut scratch);
        for y in region.top()..region.bottom() {
            for x in region.left()..region.right() {
                if let Some(cell) = scratch.get(x, y) {
                    buf.set(x, y, *cell);
                }
            }
        }
    }
}

impl Alignable for Viewport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_axis_overflow() {
        let adjustment = Adjustment::default();
        assert_eq!(fit_axis(&adjustment, 10, 25), (0, 25));
        assert_eq!(
            adjustment.values(),
            AdjustmentValues::new(0, 0, 15, 1, 5, 10)
        );

        adjustment.set_value(4).unwrap();
        assert_eq!(fit_axis(&adjustment, 10, 25), (-4, 25));
    }

    #[test]
    fn test_fit_axis_collapses_when_content_fits() {
        let adjustment = Adjustment::new(3, 0, 8, 1, 2, 4);
        assert_eq!(fit_axis(&adjustment, 10, 6), (0, 10));
        assert!(adjustment.is_moot());
        assert_eq!(adjustment.value(), 0);
    }

    #[test]
    fn test_fit_axis_small_viewport_page_increment() {
        let adjustment = Adjustment::default();
        fit_axis(&adjustment, 1, 5);
        assert_eq!(adjustment.page_increment(), 1);
    }
}
