//! Box packing: turns a container area plus per-child packing directives into
//! one rectangle per child.
//!
//! Children on the start side are placed from the leading edge in insertion
//! order, children on the end side from the trailing edge in insertion order.
//! Every child receives the full cross-axis extent.

use super::distribute::{self, fair_share};
use super::{Rect, Size};
use crate::types::{Orientation, PackSide, TextDirection};

/// Container-wide packing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PackParams {
    pub orientation: Orientation,
    pub homogeneous: bool,
    pub spacing: i32,
    pub direction: TextDirection,
}

/// One child's packing directives plus what it asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    pub request: Size,
    pub expand: bool,
    pub fill: bool,
    pub padding: i32,
    pub side: PackSide,
    /// Horizontal and vertical alignment fractions in `0.0..=1.0`.
    pub align: (f32, f32),
}

impl Default for PackItem {
    fn default() -> Self {
        Self {
            request: Size::UNSPECIFIED,
            expand: false,
            fill: true,
            padding: 0,
            side: PackSide::Start,
            align: (0.5, 0.5),
        }
    }
}

impl PackItem {
    fn primary_request(&self, orientation: Orientation) -> i32 {
        if orientation.is_horizontal() {
            self.request.width
        } else {
            self.request.height
        }
    }

    fn cross_request(&self, orientation: Orientation) -> i32 {
        if orientation.is_horizontal() {
            self.request.height
        } else {
            self.request.width
        }
    }

    fn primary_align(&self, orientation: Orientation) -> f32 {
        let frac = if orientation.is_horizontal() {
            self.align.0
        } else {
            self.align.1
        };
        if frac.is_nan() { 0.5 } else { frac.clamp(0.0, 1.0) }
    }

    fn padding(&self) -> i32 {
        self.padding.max(0)
    }
}

/// Compute one rectangle per item inside `area`.
///
/// The result has the same length and order as `items`. Degenerate areas
/// produce zero-sized rectangles at the area's origin so callers can still
/// resize every child.
pub fn pack(area: Rect, params: &PackParams, items: &[PackItem]) -> Vec<Rect> {
    if items.is_empty() {
        return Vec::new();
    }

    let orientation = params.orientation;
    let horizontal = orientation.is_horizontal();
    let area = area.clamped();
    let primary = if horizontal { area.width } else { area.height };
    let cross = if horizontal { area.height } else { area.width };

    if primary <= 0 {
        log::debug!("[pack] primary extent {} <= 0, zeroing {} children", primary, items.len());
        return vec![Rect::new(area.x, area.y, 0, 0); items.len()];
    }

    let spacing = if params.spacing < 0 {
        log::error!("[pack] negative spacing {}, using 0", params.spacing);
        0
    } else {
        params.spacing
    };

    // (offset along primary, extent along primary) per item, relative to area
    let spans = if params.homogeneous {
        homogeneous_spans(primary, spacing, orientation, items)
    } else {
        dynamic_spans(primary, spacing, orientation, items)
    };

    spans
        .into_iter()
        .map(|(offset, extent)| {
            let offset = if params.direction == TextDirection::Rtl && horizontal {
                primary - offset - extent
            } else {
                offset
            };
            if horizontal {
                Rect::new(area.x + offset, area.y, extent, cross)
            } else {
                Rect::new(area.x, area.y + offset, cross, extent)
            }
        })
        .collect()
}

/// Natural size of a box holding `items`: the sum of primary requests plus
/// padding and spacing, by the largest cross request.
pub fn natural_size(params: &PackParams, items: &[PackItem]) -> Size {
    if items.is_empty() {
        return Size::zero();
    }
    let orientation = params.orientation;
    let count = i32::try_from(items.len()).unwrap_or(i32::MAX);
    let gaps = params.spacing.max(0).saturating_mul(count - 1);
    let slots = items.iter().map(|item| {
        item.primary_request(orientation)
            .max(0)
            .saturating_add(item.padding().saturating_mul(2))
    });
    let primary = if params.homogeneous {
        slots.max().unwrap_or(0).saturating_mul(count).saturating_add(gaps)
    } else {
        slots.fold(0i32, i32::saturating_add).saturating_add(gaps)
    };
    let cross = items
        .iter()
        .map(|item| item.cross_request(orientation).max(0))
        .max()
        .unwrap_or(0);

    if orientation.is_horizontal() {
        Size::new(primary, cross)
    } else {
        Size::new(cross, primary)
    }
}

fn homogeneous_spans(
    primary: i32,
    spacing: i32,
    orientation: Orientation,
    items: &[PackItem],
) -> Vec<(i32, i32)> {
    let dist = match distribute::homogeneous(primary, spacing, items.len()) {
        Ok(dist) => dist,
        Err(err) => {
            log::error!("[pack] {}", err);
            return vec![(0, 0); items.len()];
        }
    };

    let mut slot_offsets = Vec::with_capacity(dist.slots.len());
    let mut cursor = 0;
    for (i, slot) in dist.slots.iter().enumerate() {
        slot_offsets.push(cursor);
        cursor += slot + dist.gaps.get(i).copied().unwrap_or(0);
    }

    let last = items.len() - 1;
    let mut next_start = 0;
    let mut next_end = 0;
    items
        .iter()
        .map(|item| {
            let index = match item.side {
                PackSide::Start => {
                    next_start += 1;
                    next_start - 1
                }
                PackSide::End => {
                    next_end += 1;
                    last - (next_end - 1)
                }
            };
            let slot = dist.slots[index];
            let inner = slot.saturating_sub(item.padding().saturating_mul(2)).max(0);
            let size = if item.fill {
                inner
            } else {
                let request = item.primary_request(orientation);
                if request < 0 { inner } else { request.min(inner) }
            };
            let before = align_slack(inner - size, item.primary_align(orientation));
            (slot_offsets[index] + item.padding().min(slot) + before, size)
        })
        .collect()
}

fn dynamic_spans(
    primary: i32,
    spacing: i32,
    orientation: Orientation,
    items: &[PackItem],
) -> Vec<(i32, i32)> {
    let n = items.len();
    let gap_total = spacing.saturating_mul(i32::try_from(n).unwrap_or(i32::MAX) - 1);
    let increment = fair_share(primary.saturating_sub(gap_total), n);

    let natural: Vec<i32> = items
        .iter()
        .map(|item| {
            let request = item.primary_request(orientation);
            if request < 0 { increment } else { request }
        })
        .collect();
    let consumed: i32 = items
        .iter()
        .zip(&natural)
        .map(|(item, size)| size.saturating_add(item.padding().saturating_mul(2)))
        .fold(0, i32::saturating_add);
    let shortfall = primary.saturating_sub(gap_total).saturating_sub(consumed);

    let expanding: Vec<bool> = items.iter().map(|item| item.expand).collect();
    let extra = match distribute::expand(shortfall, &expanding, spacing) {
        Ok(dist) => dist.extra,
        Err(err) => {
            log::error!("[pack] {}", err);
            vec![0; n]
        }
    };

    if shortfall < 0 {
        log::trace!("[pack] children overflow primary extent by {}", -shortfall);
    }

    let mut start_cursor = 0;
    let mut end_cursor = primary;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let padding = item.padding();
            let slot = natural[i]
                .saturating_add(padding.saturating_mul(2))
                .saturating_add(extra[i]);
            let (slot_start, room) = match item.side {
                PackSide::Start => {
                    let slot_start = start_cursor.min(primary);
                    start_cursor = start_cursor.saturating_add(slot).saturating_add(spacing);
                    (slot_start, primary - slot_start)
                }
                PackSide::End => {
                    let slot_end = end_cursor;
                    end_cursor = end_cursor.saturating_sub(slot);
                    let slot_start = end_cursor.max(0);
                    let room = slot_end.max(0) - slot_start;
                    end_cursor = end_cursor.saturating_sub(spacing);
                    (slot_start, room)
                }
            };

            let slot = slot.min(room).max(0);
            let inner = slot.saturating_sub(padding.saturating_mul(2)).max(0);
            let size = if item.fill { inner } else { natural[i].min(inner) };
            // the remainder after the child stays inside the slot, so the
            // cursor above already carried it past this child
            let before = align_slack(inner - size, item.primary_align(orientation));
            (slot_start + padding.min(slot) + before, size)
        })
        .collect()
}

fn align_slack(slack: i32, frac: f32) -> i32 {
    if slack <= 0 {
        return 0;
    }
    ((slack as f32 * frac) as i32).clamp(0, slack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_slack() {
        assert_eq!(align_slack(10, 0.0), 0);
        assert_eq!(align_slack(10, 0.5), 5);
        assert_eq!(align_slack(10, 1.0), 10);
        assert_eq!(align_slack(-3, 0.5), 0);
    }

    #[test]
    fn test_nan_alignment_centers() {
        let item = PackItem {
            align: (f32::NAN, 0.0),
            ..Default::default()
        };
        assert_eq!(item.primary_align(Orientation::Horizontal), 0.5);
        assert_eq!(item.primary_align(Orientation::Vertical), 0.0);
    }
}
