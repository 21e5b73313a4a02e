use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use super::geometry::{self, RangeHit, ScrollbarConfig, TroughGeometry};
use crate::adjustment::{Adjustment, AdjustmentValues};
use crate::buffer::Buffer;
use crate::error::LayoutError;
use crate::event::{Event, EventResult, Key, MouseButton};
use crate::layout::{Point, Rect, Size};
use crate::types::Orientation;
use crate::widget::{Alignable, Sizable, Widget, WidgetCore};

const SLIDER_GLYPH: char = '█';

/// Role of a stepper button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepperRole {
    Backward,
    Forward,
    SecondaryBackward,
    SecondaryForward,
}

impl StepperRole {
    const fn is_forward(self) -> bool {
        matches!(self, StepperRole::Forward | StepperRole::SecondaryForward)
    }

    fn glyph(self, orientation: Orientation) -> char {
        match (orientation, self.is_forward()) {
            (Orientation::Horizontal, false) => '◀',
            (Orientation::Horizontal, true) => '▶',
            (Orientation::Vertical, false) => '▲',
            (Orientation::Vertical, true) => '▼',
        }
    }
}

/// One-cell stepper button owned by a [`Scrollbar`].
#[derive(Debug)]
pub struct Stepper {
    core: WidgetCore,
    role: StepperRole,
    pressed: AtomicBool,
}

impl Stepper {
    fn new(role: StepperRole) -> Self {
        Self {
            core: WidgetCore::new(),
            role,
            pressed: AtomicBool::new(false),
        }
    }

    pub fn role(&self) -> StepperRole {
        self.role
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::SeqCst)
    }

    /// Returns the previous pressed state.
    fn set_pressed(&self, pressed: bool) -> bool {
        let previous = self.pressed.swap(pressed, Ordering::SeqCst);
        if previous != pressed {
            self.core.invalidate();
        }
        previous
    }
}

impl Sizable for Stepper {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        Size::new(1, 1)
    }
}

impl Alignable for Stepper {}

/// In-progress slider drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SliderDrag {
    /// Primary-axis position of the previous pointer sample, local.
    last: i32,
}

#[derive(Debug)]
struct ScrollbarInner {
    orientation: Orientation,
    config: ScrollbarConfig,
    adjustment: Option<Adjustment>,
    drag: Option<SliderDrag>,
}

/// A scrollbar: steppers at both ends and a slider moving along a trough,
/// driven by an [`Adjustment`].
///
/// Slider drags are step-quantized: every pointer sample that moves along
/// the primary axis applies exactly one page increment in that direction.
#[derive(Debug)]
pub struct Scrollbar {
    core: WidgetCore,
    inner: RwLock<ScrollbarInner>,
    steppers: [Arc<Stepper>; 4],
}

impl Scrollbar {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            core: WidgetCore::new(),
            inner: RwLock::new(ScrollbarInner {
                orientation,
                config: ScrollbarConfig::default(),
                adjustment: None,
                drag: None,
            }),
            steppers: [
                Arc::new(Stepper::new(StepperRole::Backward)),
                Arc::new(Stepper::new(StepperRole::Forward)),
                Arc::new(Stepper::new(StepperRole::SecondaryBackward)),
                Arc::new(Stepper::new(StepperRole::SecondaryForward)),
            ],
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn with_adjustment(self, adjustment: Adjustment) -> Self {
        self.set_adjustment(Some(adjustment));
        self
    }

    pub fn with_config(self, config: ScrollbarConfig) -> Self {
        self.set_config(config);
        self
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn orientation(&self) -> Orientation {
        self.inner
            .read()
            .map(|guard| guard.orientation)
            .unwrap_or_default()
    }

    pub fn config(&self) -> ScrollbarConfig {
        self.inner
            .read()
            .map(|guard| guard.config)
            .unwrap_or_default()
    }

    pub fn set_config(&self, config: ScrollbarConfig) {
        if let Ok(mut guard) = self.inner.write() {
            guard.config = config;
            self.core.invalidate();
        }
    }

    pub fn adjustment(&self) -> Option<Adjustment> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.adjustment.clone())
    }

    pub fn set_adjustment(&self, adjustment: Option<Adjustment>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.adjustment = adjustment;
            guard.drag = None;
            self.core.invalidate();
        }
    }

    pub fn stepper(&self, role: StepperRole) -> Arc<Stepper> {
        let index = match role {
            StepperRole::Backward => 0,
            StepperRole::Forward => 1,
            StepperRole::SecondaryBackward => 2,
            StepperRole::SecondaryForward => 3,
        };
        Arc::clone(&self.steppers[index])
    }

    pub fn is_dragging(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.drag.is_some())
            .unwrap_or(false)
    }

    fn require_adjustment(&self) -> Option<Adjustment> {
        let adjustment = self.adjustment();
        if adjustment.is_none() {
            log::error!(
                "[range] {}",
                LayoutError::MissingAdjustment(self.core.id())
            );
        }
        adjustment
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Current geometry, local to the allocation. Recomputed on every call.
    pub fn geometry(&self) -> TroughGeometry {
        let Some(adjustment) = self.require_adjustment() else {
            return TroughGeometry::default();
        };
        let (orientation, config) = match self.inner.read() {
            Ok(guard) => (guard.orientation, guard.config),
            Err(_) => return TroughGeometry::default(),
        };
        geometry::trough_geometry(
            self.core.allocation(),
            orientation,
            &config,
            &adjustment.values(),
        )
    }

    // -------------------------------------------------------------------------
    // Value changes
    // -------------------------------------------------------------------------

    /// Move the value forward by `step`. Returns whether it changed.
    pub fn forward(&self, step: i32) -> bool {
        self.shift(step)
    }

    /// Move the value backward by `step`. Returns whether it changed.
    pub fn backward(&self, step: i32) -> bool {
        self.shift(-step)
    }

    pub fn step_forward(&self) -> bool {
        self.with_values(|v| v.step_increment)
            .is_some_and(|step| self.forward(step))
    }

    pub fn step_backward(&self) -> bool {
        self.with_values(|v| v.step_increment)
            .is_some_and(|step| self.backward(step))
    }

    pub fn page_forward(&self) -> bool {
        self.with_values(|v| v.page_increment)
            .is_some_and(|page| self.forward(page))
    }

    pub fn page_backward(&self) -> bool {
        self.with_values(|v| v.page_increment)
            .is_some_and(|page| self.backward(page))
    }

    fn with_values<T>(&self, f: impl FnOnce(&AdjustmentValues) -> T) -> Option<T> {
        self.require_adjustment().map(|adj| f(&adj.values()))
    }

    fn set_to(&self, value: i32) -> bool {
        let Some(adjustment) = self.require_adjustment() else {
            return false;
        };
        match adjustment.set_value(value) {
            Ok(changed) => {
                if changed {
                    self.core.invalidate();
                }
                changed
            }
            Err(err) => {
                log::debug!("[range] {} {}", self.core.id(), err);
                false
            }
        }
    }

    fn shift(&self, delta: i32) -> bool {
        let Some(adjustment) = self.require_adjustment() else {
            return false;
        };
        self.set_to(adjustment.value().saturating_add(delta))
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a pointer, wheel, key or focus event. Returns whether the
    /// event was handled.
    pub fn process_event(&self, event: &Event) -> bool {
        let orientation = self.orientation();
        match event {
            Event::Press {
                x,
                y,
                button: MouseButton::Left,
            } => self.press(Point::new(*x, *y), orientation),
            Event::Drag { x, y, .. } => self.drag_to(Point::new(*x, *y), orientation),
            Event::Release { .. } => self.release(),
            Event::Blur => {
                self.release();
                false
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
                let delta = match orientation {
                    Orientation::Vertical => *delta_y,
                    Orientation::Horizontal if *delta_x != 0 => *delta_x,
                    Orientation::Horizontal => *delta_y,
                };
                let step = self.with_values(|v| v.step_increment).unwrap_or(0);
                delta != 0 && self.shift(delta.saturating_mul(step))
            }
            Event::Key { key, .. } => self.key(*key, orientation),
            _ => false,
        }
    }

    fn press(&self, screen: Point, orientation: Orientation) -> bool {
        let local = screen.to_local(self.core.origin());
        let hit = self.geometry().hit(local, orientation);
        log::trace!("[range] {} press at {:?} hit {:?}", self.core.id(), local, hit);
        match hit {
            RangeHit::BackwardStepper => self.press_stepper(StepperRole::Backward),
            RangeHit::ForwardStepper => self.press_stepper(StepperRole::Forward),
            RangeHit::SecondaryBackwardStepper => {
                self.press_stepper(StepperRole::SecondaryBackward)
            }
            RangeHit::SecondaryForwardStepper => self.press_stepper(StepperRole::SecondaryForward),
            RangeHit::Slider => {
                let last = if orientation.is_horizontal() {
                    local.x
                } else {
                    local.y
                };
                if let Ok(mut guard) = self.inner.write() {
                    guard.drag = Some(SliderDrag { last });
                }
                true
            }
            RangeHit::TroughBefore => self.page_backward(),
            RangeHit::TroughAfter => self.page_forward(),
            RangeHit::Outside => false,
        }
    }

    fn press_stepper(&self, role: StepperRole) -> bool {
        self.stepper(role).set_pressed(true);
        if role.is_forward() {
            self.step_forward()
        } else {
            self.step_backward()
        }
    }

    fn drag_to(&self, screen: Point, orientation: Orientation) -> bool {
        let local = screen.to_local(self.core.origin());
        let position = if orientation.is_horizontal() {
            local.x
        } else {
            local.y
        };
        let previous = match self.inner.write() {
            Ok(mut guard) => match guard.drag.as_mut() {
                Some(drag) => std::mem::replace(&mut drag.last, position),
                None => return false,
            },
            Err(_) => return false,
        };

        let delta = position - previous;
        if delta > 0 {
            self.page_forward();
        } else if delta < 0 {
            self.page_backward();
        }
        true
    }

    /// End any drag and unpress all steppers. Returns whether anything was
    /// active.
    fn release(&self) -> bool {
        let was_dragging = match self.inner.write() {
            Ok(mut guard) => guard.drag.take().is_some(),
            Err(_) => false,
        };
        let mut was_pressed = false;
        for stepper in &self.steppers {
            was_pressed |= stepper.set_pressed(false);
        }
        was_dragging || was_pressed
    }

    fn key(&self, key: Key, orientation: Orientation) -> bool {
        match (key, orientation) {
            (Key::Up, Orientation::Vertical) | (Key::Left, Orientation::Horizontal) => {
                self.step_backward()
            }
            (Key::Down, Orientation::Vertical) | (Key::Right, Orientation::Horizontal) => {
                self.step_forward()
            }
            (Key::PageUp, _) => self.page_backward(),
            (Key::PageDown, _) => self.page_forward(),
            (Key::Home, _) => self
                .with_values(|v| v.lower)
                .is_some_and(|lower| self.set_to(lower)),
            (Key::End, _) => self
                .with_values(|v| v.upper)
                .is_some_and(|upper| self.set_to(upper)),
            _ => false,
        }
    }
}

impl Sizable for Scrollbar {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        let explicit = self.core.size_request();
        if explicit.width >= 0 && explicit.height >= 0 {
            return explicit;
        }
        let config = self.config();
        let primary = config.steppers.count() + config.min_slider_length.max(1) + 1;
        let natural = if self.orientation().is_horizontal() {
            Size::new(primary, 1)
        } else {
            Size::new(1, primary)
        };
        Size::new(
            if explicit.width >= 0 { explicit.width } else { natural.width },
            if explicit.height >= 0 { explicit.height } else { natural.height },
        )
    }

    fn resize(&self) -> EventResult {
        let geometry = self.geometry();
        let origin = self.core.origin();
        let placements = [
            (StepperRole::Backward, geometry.backward_stepper),
            (StepperRole::Forward, geometry.forward_stepper),
            (StepperRole::SecondaryBackward, geometry.secondary_backward_stepper),
            (StepperRole::SecondaryForward, geometry.secondary_forward_stepper),
        ];
        for (role, rect) in placements {
            let stepper = self.stepper(role);
            let rect = rect
                .map(|r| r.to_screen(origin))
                .unwrap_or_else(|| Rect::from_parts(origin, Size::zero()));
            stepper.set_origin(rect.origin());
            stepper.set_allocation(rect.size());
            stepper.resize();
        }
        self.core.invalidate();
        EventResult::Consumed
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        self.steppers
            .iter()
            .map(|stepper| Arc::clone(stepper) as Arc<dyn Widget>)
            .collect()
    }

    fn draw(&self, buf: &mut Buffer) {
        let orientation = self.orientation();
        let origin = self.core.origin();
        let geometry = self.geometry();
        let trough_glyph = if orientation.is_horizontal() { '─' } else { '│' };

        buf.fill(geometry.trough.to_screen(origin), trough_glyph);
        buf.fill(geometry.slider.to_screen(origin), SLIDER_GLYPH);

        let steppers = [
            (StepperRole::Backward, geometry.backward_stepper),
            (StepperRole::Forward, geometry.forward_stepper),
            (StepperRole::SecondaryBackward, geometry.secondary_backward_stepper),
            (StepperRole::SecondaryForward, geometry.secondary_forward_stepper),
        ];
        for (role, rect) in steppers {
            if let Some(rect) = rect {
                buf.fill(rect.to_screen(origin), role.glyph(orientation));
            }
        }
    }
}

impl Alignable for Scrollbar {}
