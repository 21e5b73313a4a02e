use std::sync::{Arc, RwLock};

use super::Viewport;
use crate::adjustment::Adjustment;
use crate::buffer::Buffer;
use crate::error::LayoutError;
use crate::event::{Event, EventResult, Key};
use crate::layout::{Point, Rect, Size};
use crate::range::{Scrollbar, ScrollbarConfig};
use crate::types::{Orientation, ScrollbarPolicy};
use crate::widget::{self, Alignable, Scrollable, Sizable, Widget, WidgetCore};

/// Property holding the glyph drawn where both scrollbars meet.
pub const FILL_GLYPH_PROPERTY: &str = "fill-glyph";

const DEFAULT_FILL_GLYPH: char = '░';

#[derive(Debug, Clone, Copy, Default)]
struct ScrolledInner {
    hpolicy: ScrollbarPolicy,
    vpolicy: ScrollbarPolicy,
    hvisible: bool,
    vvisible: bool,
}

/// A [`Viewport`] with a horizontal and a vertical [`Scrollbar`] sharing its
/// adjustments.
///
/// ```ignore
/// let scrolled = ScrolledViewport::new();
/// scrolled.set_child(Some(content))?;
/// scrolled.set_origin(Point::new(0, 0));
/// scrolled.set_allocation(Size::new(80, 24));
/// scrolled.resize();
/// ```
#[derive(Debug)]
pub struct ScrolledViewport {
    core: WidgetCore,
    inner: RwLock<ScrolledInner>,
    viewport: Arc<Viewport>,
    hscrollbar: Arc<Scrollbar>,
    vscrollbar: Arc<Scrollbar>,
}

impl Default for ScrolledViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrolledViewport {
    pub fn new() -> Self {
        let viewport = Arc::new(Viewport::new());
        let hscrollbar = Arc::new(Scrollbar::horizontal().with_adjustment(viewport.hadjustment()));
        let vscrollbar = Arc::new(Scrollbar::vertical().with_adjustment(viewport.vadjustment()));
        let core = WidgetCore::new();

        let parts: [&dyn Widget; 3] = [&*viewport, &*hscrollbar, &*vscrollbar];
        for part in parts {
            if let Err(err) = part.core().claim_parent(core.id()) {
                log::error!("[scrolled] {}", err);
            }
        }

        Self {
            core,
            inner: RwLock::new(ScrolledInner::default()),
            viewport,
            hscrollbar,
            vscrollbar,
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn policy(self, hpolicy: ScrollbarPolicy, vpolicy: ScrollbarPolicy) -> Self {
        self.set_policy(hpolicy, vpolicy);
        self
    }

    pub fn scrollbar_config(self, config: ScrollbarConfig) -> Self {
        self.hscrollbar.set_config(config);
        self.vscrollbar.set_config(config);
        self
    }

    pub fn fill_glyph(self, glyph: char) -> Self {
        self.core.set_property(FILL_GLYPH_PROPERTY, glyph);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn viewport(&self) -> Arc<Viewport> {
        Arc::clone(&self.viewport)
    }

    pub fn scrollbar(&self, orientation: Orientation) -> Arc<Scrollbar> {
        match orientation {
            Orientation::Horizontal => Arc::clone(&self.hscrollbar),
            Orientation::Vertical => Arc::clone(&self.vscrollbar),
        }
    }

    pub fn child(&self) -> Option<Arc<dyn Widget>> {
        self.viewport.child()
    }

    pub fn set_child(&self, child: Option<Arc<dyn Widget>>) -> Result<(), LayoutError> {
        self.viewport.set_child(child)?;
        self.core.invalidate();
        Ok(())
    }

    /// (horizontal, vertical) policies.
    pub fn policies(&self) -> (ScrollbarPolicy, ScrollbarPolicy) {
        self.inner
            .read()
            .map(|guard| (guard.hpolicy, guard.vpolicy))
            .unwrap_or_default()
    }

    pub fn set_policy(&self, hpolicy: ScrollbarPolicy, vpolicy: ScrollbarPolicy) {
        if let Ok(mut guard) = self.inner.write() {
            guard.hpolicy = hpolicy;
            guard.vpolicy = vpolicy;
            self.core.invalidate();
        }
    }

    /// (horizontal, vertical) visibility decided by the last resize.
    pub fn scrollbars_visible(&self) -> (bool, bool) {
        self.inner
            .read()
            .map(|guard| (guard.hvisible, guard.vvisible))
            .unwrap_or_default()
    }

    fn fill_glyph_char(&self) -> char {
        self.core
            .with_properties(|props| props.char_or(FILL_GLYPH_PROPERTY, DEFAULT_FILL_GLYPH))
            .unwrap_or(DEFAULT_FILL_GLYPH)
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    /// Scroll the minimum amount needed to bring `target` into view.
    ///
    /// Returns false when `target` is not inside this viewport or is already
    /// fully visible. On change, runs one resize pass.
    pub fn scroll_to(&self, target: &dyn Widget) -> bool {
        if !widget::is_descendant(&*self.viewport, target.id()) {
            log::debug!(
                "[scrolled] {} is not inside {}",
                target.id(),
                self.core.id()
            );
            return false;
        }

        let visible = self.viewport.region();
        let wanted = target.region();
        if visible.contains_rect(&wanted) {
            return false;
        }

        let dx = axis_delta(visible.left(), visible.right(), wanted.left(), wanted.right());
        let dy = axis_delta(visible.top(), visible.bottom(), wanted.top(), wanted.bottom());
        log::debug!(
            "[scrolled] {} scroll to {} by ({}, {})",
            self.core.id(),
            target.id(),
            dx,
            dy
        );

        let mut changed = false;
        for (adjustment, delta) in [
            (self.viewport.hadjustment(), dx),
            (self.viewport.vadjustment(), dy),
        ] {
            if delta == 0 {
                continue;
            }
            match adjustment.set_value(adjustment.value().saturating_add(delta)) {
                Ok(moved) => changed |= moved,
                Err(err) => log::debug!("[scrolled] {}", err),
            }
        }
        if changed {
            self.resize();
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route an event to the scrollbars. Runs a resize pass when handled.
    pub fn process_event(&self, event: &Event) -> bool {
        let (hvisible, vvisible) = self.scrollbars_visible();
        let handled = match event {
            Event::Press { x, y, .. } => {
                let point = Point::new(*x, *y);
                if vvisible && self.vscrollbar.region().contains_point(point) {
                    self.vscrollbar.process_event(event)
                } else if hvisible && self.hscrollbar.region().contains_point(point) {
                    self.hscrollbar.process_event(event)
                } else {
                    false
                }
            }
            Event::Drag { .. } => {
                if self.vscrollbar.is_dragging() {
                    self.vscrollbar.process_event(event)
                } else if self.hscrollbar.is_dragging() {
                    self.hscrollbar.process_event(event)
                } else {
                    false
                }
            }
            Event::Release { .. } | Event::Blur => {
                let v = self.vscrollbar.process_event(event);
                let h = self.hscrollbar.process_event(event);
                v || h
            }
            Event::Scroll {
                x,
                y,
                delta_x,
                delta_y,
            } => {
                if !self.core.region().contains(*x, *y) {
                    return false;
                }
                let v = *delta_y != 0
                    && self
                        .vscrollbar
                        .forward(delta_y.saturating_mul(self.vscrollbar_step()));
                let h = *delta_x != 0
                    && self
                        .hscrollbar
                        .forward(delta_x.saturating_mul(self.hscrollbar_step()));
                v || h
            }
            Event::Key { key, .. } => match key {
                Key::Left | Key::Right => self.hscrollbar.process_event(event),
                Key::Up | Key::Down | Key::PageUp | Key::PageDown | Key::Home | Key::End => {
                    self.vscrollbar.process_event(event)
                }
                _ => false,
            },
            Event::Focus => false,
        };

        if handled {
            self.resize();
        }
        handled
    }

    fn vscrollbar_step(&self) -> i32 {
        self.viewport.vadjustment().step_increment()
    }

    fn hscrollbar_step(&self) -> i32 {
        self.viewport.hadjustment().step_increment()
    }

    /// Resolve bar visibility for `allocation` in one pass. An Automatic bar
    /// shows when the content overflows the room left after the other bar.
    fn decide_visibility(&self, allocation: Size) -> (bool, bool) {
        let (hpolicy, vpolicy) = self.policies();
        let request = self
            .viewport
            .child()
            .map(|child| child.size_request())
            .unwrap_or_default();
        let visible = |policy: ScrollbarPolicy, content: i32, room: i32| match policy {
            ScrollbarPolicy::Always => true,
            ScrollbarPolicy::Never => false,
            ScrollbarPolicy::Automatic => content > room.max(0),
        };

        let mut state = (
            hpolicy == ScrollbarPolicy::Always,
            vpolicy == ScrollbarPolicy::Always,
        );
        // Showing one bar can only make the other axis tighter, so this
        // settles within two rounds.
        for _ in 0..3 {
            let (hvisible, vvisible) = state;
            let next = (
                visible(
                    hpolicy,
                    request.width,
                    allocation.width - i32::from(vvisible),
                ),
                visible(
                    vpolicy,
                    request.height,
                    allocation.height - i32::from(hvisible),
                ),
            );
            if next == state {
                break;
            }
            state = next;
        }
        state
    }
}

/// Minimal shift that brings `[start, end)` inside `[lo, hi)`: the near edge
/// when it lies before the window, otherwise the far edge.
fn axis_delta(lo: i32, hi: i32, start: i32, end: i32) -> i32 {
    if start < lo {
        start - lo
    } else if end > hi {
        end - hi
    } else {
        0
    }
}

impl Scrollable for ScrolledViewport {
    fn hadjustment(&self) -> Adjustment {
        self.viewport.hadjustment()
    }

    fn vadjustment(&self) -> Adjustment {
        self.viewport.vadjustment()
    }
}

impl Sizable for ScrolledViewport {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        let explicit = self.core.size_request();
        if explicit.width >= 0 && explicit.height >= 0 {
            return explicit;
        }
        let (hpolicy, vpolicy) = self.policies();
        let content = self.viewport.size_request();
        let natural = Size::new(
            content.width + i32::from(vpolicy == ScrollbarPolicy::Always),
            content.height + i32::from(hpolicy == ScrollbarPolicy::Always),
        );
        Size::new(
            if explicit.width >= 0 { explicit.width } else { natural.width },
            if explicit.height >= 0 { explicit.height } else { natural.height },
        )
    }

    fn resize(&self) -> EventResult {
        let region = self.core.region();
        let (hvisible, vvisible) = self.decide_visibility(region.size());
        if let Ok(mut guard) = self.inner.write() {
            guard.hvisible = hvisible;
            guard.vvisible = vvisible;
        }
        self.core.invalidate();

        let inner = Rect::new(
            region.x,
            region.y,
            (region.width - i32::from(vvisible)).max(0),
            (region.height - i32::from(hvisible)).max(0),
        );
        log::trace!(
            "[scrolled] {} viewport {:?} bars h={} v={}",
            self.core.id(),
            inner,
            hvisible,
            vvisible
        );

        self.viewport.set_origin(inner.origin());
        self.viewport.set_allocation(inner.size());
        self.viewport.resize();

        let vbar = if vvisible {
            Rect::new(inner.right(), inner.y, 1, inner.height)
        } else {
            Rect::from_parts(inner.origin(), Size::zero())
        };
        let hbar = if hvisible {
            Rect::new(inner.x, inner.bottom(), inner.width, 1)
        } else {
            Rect::from_parts(inner.origin(), Size::zero())
        };
        for (bar, rect) in [(&self.vscrollbar, vbar), (&self.hscrollbar, hbar)] {
            bar.set_origin(rect.origin());
            bar.set_allocation(rect.size());
            bar.resize();
        }
        EventResult::Consumed
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        vec![
            Arc::clone(&self.viewport) as Arc<dyn Widget>,
            Arc::clone(&self.hscrollbar) as Arc<dyn Widget>,
            Arc::clone(&self.vscrollbar) as Arc<dyn Widget>,
        ]
    }

    fn draw(&self, buf: &mut Buffer) {
        let (hvisible, vvisible) = self.scrollbars_visible();
        self.viewport.draw(buf);
        if hvisible {
            self.hscrollbar.draw(buf);
        }
        if vvisible {
            self.vscrollbar.draw(buf);
        }
        if hvisible && vvisible {
            let region = self.core.region();
            if !region.is_empty() {
                buf.set_char(region.right() - 1, region.bottom() - 1, self.fill_glyph_char());
            }
        }
    }
}

impl Alignable for ScrolledViewport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_delta() {
        assert_eq!(axis_delta(0, 10, 2, 5), 0);
        assert_eq!(axis_delta(0, 10, 8, 14), 4);
        assert_eq!(axis_delta(5, 10, 1, 3), -4);
        // Wider than the window: the near edge wins.
        assert_eq!(axis_delta(5, 10, 2, 20), -3);
    }
}
