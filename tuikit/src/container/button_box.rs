use std::sync::{Arc, RwLock};

use crate::buffer::Buffer;
use crate::error::LayoutError;
use crate::event::EventResult;
use crate::layout::distribute;
use crate::layout::{Rect, Size};
use crate::types::{ButtonBoxStyle, Orientation, PackSide};
use crate::widget::{Alignable, Packable, Sizable, Widget, WidgetCore, WidgetId};

#[derive(Debug)]
struct ButtonBoxInner {
    orientation: Orientation,
    style: ButtonBoxStyle,
    spacing: i32,
    start: Vec<Arc<dyn Widget>>,
    end: Vec<Arc<dyn Widget>>,
}

/// A row or column of equally sized children, typically buttons.
///
/// Every child gets the largest primary-axis request among its siblings.
/// The [`ButtonBoxStyle`] decides where the children sit when there is room
/// to spare; when there is not, they share the extent evenly.
#[derive(Debug)]
pub struct ButtonBox {
    core: WidgetCore,
    inner: RwLock<ButtonBoxInner>,
}

impl ButtonBox {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            core: WidgetCore::new(),
            inner: RwLock::new(ButtonBoxInner {
                orientation,
                style: ButtonBoxStyle::default(),
                spacing: 0,
                start: Vec::new(),
                end: Vec::new(),
            }),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn style(self, style: ButtonBoxStyle) -> Self {
        self.set_style(style);
        self
    }

    pub fn spacing(self, spacing: i32) -> Self {
        if let Ok(mut guard) = self.inner.write() {
            guard.spacing = spacing.max(0);
        }
        self
    }

    pub fn layout_style(&self) -> ButtonBoxStyle {
        self.inner
            .read()
            .map(|guard| guard.style)
            .unwrap_or_default()
    }

    pub fn set_style(&self, style: ButtonBoxStyle) {
        if let Ok(mut guard) = self.inner.write() {
            guard.style = style;
            self.core.invalidate();
        }
    }

    /// Children in placement order: start children, then end children from
    /// the innermost outward.
    fn ordered(&self) -> Vec<Arc<dyn Widget>> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .start
                    .iter()
                    .chain(guard.end.iter().rev())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn child_extent(orientation: Orientation, children: &[Arc<dyn Widget>]) -> (i32, i32) {
        children
            .iter()
            .map(|child| {
                let request = child.size_request();
                if orientation.is_horizontal() {
                    (request.width.max(0), request.height.max(0))
                } else {
                    (request.height.max(0), request.width.max(0))
                }
            })
            .fold((0, 0), |(p, c), (cp, cc)| (p.max(cp), c.max(cc)))
    }
}

/// Offsets and extents along the primary axis for `n` children that each
/// want `child_size` cells.
pub(crate) fn button_box_spans(
    primary: i32,
    spacing: i32,
    style: ButtonBoxStyle,
    n: usize,
    child_size: i32,
) -> Vec<(i32, i32)> {
    if n == 0 {
        return Vec::new();
    }
    let count = n as i32;
    let primary = primary.max(0);
    let needed = child_size * count + spacing * (count - 1);

    if style == ButtonBoxStyle::Expand || needed > primary {
        return match distribute::homogeneous(primary, spacing, n) {
            Ok(dist) => {
                let mut cursor = 0;
                dist.slots
                    .iter()
                    .enumerate()
                    .map(|(i, slot)| {
                        let span = (cursor, *slot);
                        cursor += slot + dist.gaps.get(i).copied().unwrap_or(0);
                        span
                    })
                    .collect()
            }
            Err(err) => {
                log::error!("[buttonbox] {}", err);
                vec![(0, 0); n]
            }
        };
    }

    let free = primary - child_size * count;
    // gaps[0] before the first child, gaps[i] after child i - 1
    let gaps: Vec<i32> = match style {
        ButtonBoxStyle::Start => leading_gaps(0, spacing, n),
        ButtonBoxStyle::End => leading_gaps(primary - needed, spacing, n),
        ButtonBoxStyle::Center => leading_gaps((primary - needed) / 2, spacing, n),
        ButtonBoxStyle::Spread | ButtonBoxStyle::Expand => spread_gaps(free, n + 1, false),
        ButtonBoxStyle::Edge if n == 1 => vec![(primary - child_size) / 2],
        ButtonBoxStyle::Edge => spread_gaps(free, n - 1, true),
    };

    let mut cursor = 0;
    (0..n)
        .map(|i| {
            cursor += gaps.get(i).copied().unwrap_or(0);
            let span = (cursor, child_size);
            cursor += child_size;
            span
        })
        .collect()
}

fn leading_gaps(offset: i32, spacing: i32, n: usize) -> Vec<i32> {
    std::iter::once(offset)
        .chain(std::iter::repeat_n(spacing, n - 1))
        .collect()
}

/// Divide `free` cells over `count` gaps. With `edge` set, a zero-width gap is
/// prepended so the first child sits flush with the leading edge.
fn spread_gaps(free: i32, count: usize, edge: bool) -> Vec<i32> {
    let spread = distribute::homogeneous(free, 0, count)
        .map(|dist| dist.slots)
        .unwrap_or_default();
    if edge {
        std::iter::once(0).chain(spread).collect()
    } else {
        spread
    }
}

impl Packable for ButtonBox {
    fn pack(
        &self,
        child: Arc<dyn Widget>,
        side: PackSide,
        _expand: bool,
        _fill: bool,
        _padding: i32,
    ) -> Result<(), LayoutError> {
        child.core().claim_parent(self.core.id())?;
        match self.inner.write() {
            Ok(mut guard) => {
                let id = child.id();
                if guard.start.iter().chain(&guard.end).any(|c| c.id() == id) {
                    return Ok(());
                }
                match side {
                    PackSide::Start => guard.start.push(child),
                    PackSide::End => guard.end.push(child),
                }
                self.core.invalidate();
            }
            Err(_) => {
                child.core().release_parent();
                log::error!("[buttonbox] {} state poisoned", self.core.id());
            }
        }
        Ok(())
    }

    fn remove(&self, child: WidgetId) -> bool {
        let removed = self.inner.write().ok().and_then(|mut guard| {
            let from_start = guard.start.iter().position(|c| c.id() == child);
            if let Some(index) = from_start {
                return Some(guard.start.remove(index));
            }
            let from_end = guard.end.iter().position(|c| c.id() == child);
            from_end.map(|index| guard.end.remove(index))
        });
        match removed {
            Some(widget) => {
                widget.core().release_parent();
                self.core.invalidate();
                true
            }
            None => false,
        }
    }

    fn child_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.start.len() + guard.end.len())
            .unwrap_or(0)
    }
}

impl Sizable for ButtonBox {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        let explicit = self.core.size_request();
        if explicit.width >= 0 && explicit.height >= 0 {
            return explicit;
        }
        let children = self.ordered();
        let (orientation, spacing) = self
            .inner
            .read()
            .map(|guard| (guard.orientation, guard.spacing))
            .unwrap_or_default();
        let count = children.len() as i32;
        let (child_primary, cross) = Self::child_extent(orientation, &children);
        let primary = if count == 0 {
            0
        } else {
            child_primary * count + spacing * (count - 1)
        };
        let natural = if orientation.is_horizontal() {
            Size::new(primary, cross)
        } else {
            Size::new(cross, primary)
        };
        Size::new(
            if explicit.width >= 0 { explicit.width } else { natural.width },
            if explicit.height >= 0 { explicit.height } else { natural.height },
        )
    }

    fn resize(&self) -> EventResult {
        let region = self.core.region();
        let children = self.ordered();
        let Ok((orientation, style, spacing)) = self
            .inner
            .read()
            .map(|guard| (guard.orientation, guard.style, guard.spacing))
        else {
            return EventResult::Ignored;
        };

        self.core.invalidate();
        if children.is_empty() {
            return EventResult::Consumed;
        }

        let horizontal = orientation.is_horizontal();
        let (primary, cross) = if horizontal {
            (region.width, region.height)
        } else {
            (region.height, region.width)
        };
        let (child_size, _) = Self::child_extent(orientation, &children);
        let spans = button_box_spans(primary, spacing, style, children.len(), child_size);

        for (child, (offset, extent)) in children.iter().zip(spans) {
            let rect = if horizontal {
                Rect::new(region.x + offset, region.y, extent, cross)
            } else {
                Rect::new(region.x, region.y + offset, cross, extent)
            };
            child.set_origin(rect.origin());
            child.set_allocation(rect.size());
            child.resize();
        }
        EventResult::Consumed
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        self.ordered()
    }

    fn draw(&self, buf: &mut Buffer) {
        for child in self.ordered() {
            child.draw(buf);
        }
    }
}

impl Alignable for ButtonBox {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_end_styles() {
        assert_eq!(
            button_box_spans(20, 1, ButtonBoxStyle::Start, 3, 4),
            vec![(0, 4), (5, 4), (10, 4)]
        );
        assert_eq!(
            button_box_spans(20, 1, ButtonBoxStyle::End, 3, 4),
            vec![(6, 4), (11, 4), (16, 4)]
        );
        assert_eq!(
            button_box_spans(20, 1, ButtonBoxStyle::Center, 3, 4),
            vec![(3, 4), (8, 4), (13, 4)]
        );
    }

    #[test]
    fn test_spread_and_edge_styles() {
        // free = 20 - 12 = 8, four gaps of 2
        assert_eq!(
            button_box_spans(20, 0, ButtonBoxStyle::Spread, 3, 4),
            vec![(2, 4), (8, 4), (14, 4)]
        );
        // free = 8, two gaps of 4 between flush children
        assert_eq!(
            button_box_spans(20, 0, ButtonBoxStyle::Edge, 3, 4),
            vec![(0, 4), (8, 4), (16, 4)]
        );
    }

    #[test]
    fn test_overflow_falls_back_to_even_share() {
        assert_eq!(
            button_box_spans(10, 0, ButtonBoxStyle::Start, 3, 6),
            vec![(0, 4), (4, 3), (7, 3)]
        );
    }

    #[test]
    fn test_pack_into_poisoned_box_releases_child() {
        let bbox = ButtonBox::horizontal();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = bbox.inner.write().unwrap();
            panic!("poison the box state");
        }));
        assert!(bbox.inner.is_poisoned());

        let button = Arc::new(crate::widget::Label::new("[ok]"));
        assert!(bbox.pack_start(button.clone(), false, true, 0).is_ok());
        assert_eq!(button.core().parent(), None, "claim released");
        assert_eq!(bbox.child_count(), 0);
    }
}
