//! Mapping between an adjustment and the cells of a scrollbar.
//!
//! All rectangles here are local to the scrollbar's allocation.

use crate::adjustment::AdjustmentValues;
use crate::layout::{Point, Rect, Size};
use crate::types::Orientation;

/// Which stepper buttons a scrollbar shows.
///
/// The leading end holds `backward` then `secondary_forward`; the trailing
/// end holds `secondary_backward` then `forward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Steppers {
    pub backward: bool,
    pub forward: bool,
    pub secondary_backward: bool,
    pub secondary_forward: bool,
}

impl Steppers {
    pub const NONE: Steppers = Steppers {
        backward: false,
        forward: false,
        secondary_backward: false,
        secondary_forward: false,
    };

    pub const STANDARD: Steppers = Steppers {
        backward: true,
        forward: true,
        secondary_backward: false,
        secondary_forward: false,
    };

    pub const ALL: Steppers = Steppers {
        backward: true,
        forward: true,
        secondary_backward: true,
        secondary_forward: true,
    };

    pub const fn leading(&self) -> i32 {
        self.backward as i32 + self.secondary_forward as i32
    }

    pub const fn trailing(&self) -> i32 {
        self.forward as i32 + self.secondary_backward as i32
    }

    pub const fn count(&self) -> i32 {
        self.leading() + self.trailing()
    }
}

impl Default for Steppers {
    fn default() -> Self {
        Steppers::STANDARD
    }
}

/// Scrollbar appearance configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollbarConfig {
    pub steppers: Steppers,
    /// Lower bound for the slider length.
    pub min_slider_length: i32,
    /// When set, the slider keeps this length instead of tracking the page.
    pub fixed_slider_length: Option<i32>,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            steppers: Steppers::STANDARD,
            min_slider_length: 1,
            fixed_slider_length: None,
        }
    }
}

impl ScrollbarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steppers(mut self, steppers: Steppers) -> Self {
        self.steppers = steppers;
        self
    }

    pub fn min_slider_length(mut self, length: i32) -> Self {
        self.min_slider_length = length.max(1);
        self
    }

    pub fn fixed_slider_length(mut self, length: i32) -> Self {
        self.fixed_slider_length = Some(length);
        self
    }
}

/// Stepper, trough and slider rectangles for one scrollbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TroughGeometry {
    pub trough: Rect,
    pub slider: Rect,
    pub backward_stepper: Option<Rect>,
    pub forward_stepper: Option<Rect>,
    pub secondary_backward_stepper: Option<Rect>,
    pub secondary_forward_stepper: Option<Rect>,
}

/// What a local point lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeHit {
    BackwardStepper,
    ForwardStepper,
    SecondaryBackwardStepper,
    SecondaryForwardStepper,
    Slider,
    /// Trough between the leading edge and the slider.
    TroughBefore,
    /// Trough between the slider and the trailing edge.
    TroughAfter,
    Outside,
}

impl TroughGeometry {
    pub fn trough_length(&self, orientation: Orientation) -> i32 {
        primary(self.trough, orientation).1
    }

    pub fn slider_length(&self, orientation: Orientation) -> i32 {
        primary(self.slider, orientation).1
    }

    /// Slider offset from the start of the trough.
    pub fn slider_offset(&self, orientation: Orientation) -> i32 {
        primary(self.slider, orientation).0 - primary(self.trough, orientation).0
    }

    pub fn hit(&self, point: Point, orientation: Orientation) -> RangeHit {
        let steppers = [
            (self.backward_stepper, RangeHit::BackwardStepper),
            (self.secondary_forward_stepper, RangeHit::SecondaryForwardStepper),
            (self.secondary_backward_stepper, RangeHit::SecondaryBackwardStepper),
            (self.forward_stepper, RangeHit::ForwardStepper),
        ];
        for (rect, hit) in steppers {
            if rect.is_some_and(|r| r.contains_point(point)) {
                return hit;
            }
        }
        if self.slider.contains_point(point) {
            return RangeHit::Slider;
        }
        if self.trough.contains_point(point) {
            let along = if orientation.is_horizontal() { point.x } else { point.y };
            let (slider_start, _) = primary(self.slider, orientation);
            return if along < slider_start {
                RangeHit::TroughBefore
            } else {
                RangeHit::TroughAfter
            };
        }
        RangeHit::Outside
    }
}

/// (start, length) of `rect` along the primary axis.
fn primary(rect: Rect, orientation: Orientation) -> (i32, i32) {
    if orientation.is_horizontal() {
        (rect.x, rect.width)
    } else {
        (rect.y, rect.height)
    }
}

fn along(orientation: Orientation, start: i32, length: i32, cross: i32) -> Rect {
    if orientation.is_horizontal() {
        Rect::new(start, 0, length, cross)
    } else {
        Rect::new(0, start, cross, length)
    }
}

/// Slider length for a trough of `trough_len` cells.
///
/// Never fills the whole trough while there is something to scroll, so the
/// bar always shows that more content exists.
pub fn slider_length(trough_len: i32, config: &ScrollbarConfig, values: &AdjustmentValues) -> i32 {
    if trough_len <= 0 {
        return 0;
    }
    let min = config.min_slider_length.max(1);

    if let Some(fixed) = config.fixed_slider_length {
        return fixed.clamp(min.min(trough_len), trough_len);
    }
    if values.is_moot() || values.range() == 0 {
        return trough_len;
    }

    let page = values.page_increment.max(0) as i64;
    let usable = (trough_len - 2).max(0) as i64;
    let proportional = (page * usable / values.range() as i64).min(trough_len as i64) as i32;
    proportional.max(min).clamp(1, (trough_len - 1).max(1))
}

/// Offset of the slider from the start of the trough.
///
/// Any value past `lower` moves the slider off the leading edge, and any
/// value short of `upper` keeps it off the trailing edge. When only one cell
/// of travel exists the trailing rule wins.
pub fn slider_offset(trough_len: i32, slider_len: i32, values: &AdjustmentValues) -> i32 {
    let travel = trough_len - slider_len;
    if travel <= 0 || values.is_moot() || values.range() == 0 {
        return 0;
    }
    let value = values.clamp(values.value);
    let position = (value - values.lower) as i64;
    let mut offset = (position * travel as i64 / values.range() as i64) as i32;

    if value > values.lower {
        offset = offset.max(1);
    }
    if value < values.upper {
        offset = offset.min(travel - 1);
    }
    offset.clamp(0, travel)
}

/// Lay out steppers, trough and slider inside an allocation of `size`.
pub fn trough_geometry(
    size: Size,
    orientation: Orientation,
    config: &ScrollbarConfig,
    values: &AdjustmentValues,
) -> TroughGeometry {
    let size = size.clamped();
    let (span, cross) = if orientation.is_horizontal() {
        (size.width, size.height)
    } else {
        (size.height, size.width)
    };
    if span == 0 || cross == 0 {
        return TroughGeometry::default();
    }

    let steppers = config.steppers;
    let cell = |start: i32| Some(along(orientation, start.clamp(0, span - 1), 1, cross));

    let mut lead = 0;
    let backward_stepper = steppers.backward.then(|| {
        lead += 1;
        lead - 1
    });
    let secondary_forward_stepper = steppers.secondary_forward.then(|| {
        lead += 1;
        lead - 1
    });
    let mut trail = span;
    let forward_stepper = steppers.forward.then(|| {
        trail -= 1;
        trail
    });
    let secondary_backward_stepper = steppers.secondary_backward.then(|| {
        trail -= 1;
        trail
    });

    let trough_start = lead.min(span);
    let trough_len = (span - steppers.count()).max(0);
    let slider_len = slider_length(trough_len, config, values);
    let offset = slider_offset(trough_len, slider_len, values);

    TroughGeometry {
        trough: along(orientation, trough_start, trough_len, cross),
        slider: along(orientation, trough_start + offset, slider_len, cross),
        backward_stepper: backward_stepper.and_then(cell),
        forward_stepper: forward_stepper.and_then(cell),
        secondary_backward_stepper: secondary_backward_stepper.and_then(cell),
        secondary_forward_stepper: secondary_forward_stepper.and_then(cell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(value: i32, upper: i32, page: i32) -> AdjustmentValues {
        AdjustmentValues::new(value, 0, upper, 1, page, page)
    }

    #[test]
    fn test_stepper_counts() {
        assert_eq!(Steppers::NONE.count(), 0);
        assert_eq!(Steppers::STANDARD.count(), 2);
        assert_eq!(Steppers::ALL.leading(), 2);
        assert_eq!(Steppers::ALL.trailing(), 2);
    }

    #[test]
    fn test_moot_slider_fills_trough() {
        let config = ScrollbarConfig::default();
        assert_eq!(slider_length(10, &config, &AdjustmentValues::default()), 10);
        assert_eq!(slider_offset(10, 10, &AdjustmentValues::default()), 0);
    }

    #[test]
    fn test_single_cell_of_travel_prefers_trailing_rule() {
        let v = values(5, 10, 2);
        assert_eq!(slider_offset(5, 4, &v), 0);
        assert_eq!(slider_offset(5, 4, &values(10, 10, 2)), 1);
    }
}
