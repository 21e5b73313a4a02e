use std::sync::{Arc, RwLock};

use crate::buffer::Buffer;
use crate::error::LayoutError;
use crate::event::EventResult;
use crate::layout::{self, PackItem, PackParams, Size};
use crate::types::{Orientation, PackSide, TextDirection};
use crate::widget::{Alignable, Packable, Sizable, Widget, WidgetCore, WidgetId};

/// One packed child and its directives.
#[derive(Debug, Clone)]
pub struct PackChild {
    pub widget: Arc<dyn Widget>,
    pub expand: bool,
    pub fill: bool,
    pub padding: i32,
    pub side: PackSide,
}

impl PackChild {
    fn item(&self) -> PackItem {
        PackItem {
            request: self.widget.size_request(),
            expand: self.expand,
            fill: self.fill,
            padding: self.padding,
            side: self.side,
            align: self.widget.alignment(),
        }
    }
}

#[derive(Debug, Default)]
struct PackBoxInner {
    params: PackParams,
    children: Vec<PackChild>,
}

/// Lays out children in a single row or column.
///
/// ```ignore
/// let row = PackBox::horizontal().spacing(1);
/// row.pack_start(Arc::new(Label::new("name")), false, true, 0)?;
/// row.pack_start(Arc::new(Label::new("value")), true, true, 0)?;
/// row.pack_end(Arc::new(Label::new("[x]")), false, true, 0)?;
/// ```
#[derive(Debug)]
pub struct PackBox {
    core: WidgetCore,
    inner: RwLock<PackBoxInner>,
}

impl PackBox {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            core: WidgetCore::new(),
            inner: RwLock::new(PackBoxInner {
                params: PackParams {
                    orientation,
                    ..Default::default()
                },
                children: Vec::new(),
            }),
        }
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn spacing(self, spacing: i32) -> Self {
        self.set_spacing(spacing);
        self
    }

    pub fn homogeneous(self, homogeneous: bool) -> Self {
        self.set_homogeneous(homogeneous);
        self
    }

    pub fn direction(self, direction: TextDirection) -> Self {
        self.set_direction(direction);
        self
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn params(&self) -> PackParams {
        self.inner
            .read()
            .map(|guard| guard.params)
            .unwrap_or_default()
    }

    pub fn orientation(&self) -> Orientation {
        self.params().orientation
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.update_params(|params| params.orientation = orientation);
    }

    pub fn set_spacing(&self, spacing: i32) {
        if spacing < 0 {
            log::error!("[pack] {} negative spacing {}, using 0", self.core.id(), spacing);
        }
        self.update_params(|params| params.spacing = spacing.max(0));
    }

    pub fn set_homogeneous(&self, homogeneous: bool) {
        self.update_params(|params| params.homogeneous = homogeneous);
    }

    pub fn set_direction(&self, direction: TextDirection) {
        self.update_params(|params| params.direction = direction);
    }

    fn update_params(&self, f: impl FnOnce(&mut PackParams)) {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut guard.params);
            self.core.invalidate();
        }
    }

    // -------------------------------------------------------------------------
    // Children
    // -------------------------------------------------------------------------

    /// Snapshot of the packed children in insertion order.
    pub fn pack_children(&self) -> Vec<PackChild> {
        self.inner
            .read()
            .map(|guard| guard.children.clone())
            .unwrap_or_default()
    }

    /// Packing directives of a child, if it is packed here.
    pub fn child_packing(&self, child: WidgetId) -> Option<(bool, bool, i32, PackSide)> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .children
                .iter()
                .find(|c| c.widget.id() == child)
                .map(|c| (c.expand, c.fill, c.padding, c.side))
        })
    }

    /// Change the directives of an already packed child.
    pub fn set_child_packing(
        &self,
        child: WidgetId,
        expand: bool,
        fill: bool,
        padding: i32,
        side: PackSide,
    ) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let Some(record) = guard.children.iter_mut().find(|c| c.widget.id() == child) else {
            return false;
        };
        record.expand = expand;
        record.fill = fill;
        record.padding = padding.max(0);
        record.side = side;
        self.core.invalidate();
        true
    }

    /// Move a child to `position` within the insertion order.
    pub fn reorder_child(&self, child: WidgetId, position: usize) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let Some(index) = guard.children.iter().position(|c| c.widget.id() == child) else {
            return false;
        };
        let record = guard.children.remove(index);
        let position = position.min(guard.children.len());
        guard.children.insert(position, record);
        self.core.invalidate();
        true
    }
}

impl Packable for PackBox {
    fn pack(
        &self,
        child: Arc<dyn Widget>,
        side: PackSide,
        expand: bool,
        fill: bool,
        padding: i32,
    ) -> Result<(), LayoutError> {
        if padding < 0 {
            return Err(LayoutError::Negative {
                what: "padding",
                value: padding,
            });
        }
        child.core().claim_parent(self.core.id())?;

        match self.inner.write() {
            Ok(mut guard) => {
                if guard.children.iter().any(|c| c.widget.id() == child.id()) {
                    return Ok(());
                }
                log::trace!("[pack] {} packs {} at {:?}", self.core.id(), child.id(), side);
                guard.children.push(PackChild {
                    widget: child,
                    expand,
                    fill,
                    padding,
                    side,
                });
                self.core.invalidate();
                Ok(())
            }
            Err(_) => {
                child.core().release_parent();
                log::error!("[pack] {} state poisoned", self.core.id());
                Ok(())
            }
        }
    }

    fn remove(&self, child: WidgetId) -> bool {
        let removed = match self.inner.write() {
            Ok(mut guard) => guard
                .children
                .iter()
                .position(|c| c.widget.id() == child)
                .map(|index| guard.children.remove(index)),
            Err(_) => None,
        };
        match removed {
            Some(record) => {
                record.widget.core().release_parent();
                self.core.invalidate();
                true
            }
            None => false,
        }
    }

    fn child_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.children.len())
            .unwrap_or(0)
    }
}

impl Sizable for PackBox {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        let explicit = self.core.size_request();
        if explicit.width >= 0 && explicit.height >= 0 {
            return explicit;
        }
        let (params, children) = match self.inner.read() {
            Ok(guard) => (guard.params, guard.children.clone()),
            Err(_) => return Size::zero(),
        };
        let items: Vec<PackItem> = children.iter().map(PackChild::item).collect();
        let natural = layout::natural_size(&params, &items);
        Size::new(
            if explicit.width >= 0 { explicit.width } else { natural.width },
            if explicit.height >= 0 { explicit.height } else { natural.height },
        )
    }

    fn resize(&self) -> EventResult {
        let region = self.core.region();
        let (params, children) = match self.inner.read() {
            Ok(guard) => (guard.params, guard.children.clone()),
            Err(_) => {
                log::error!("[pack] {} state poisoned, keeping previous layout", self.core.id());
                return EventResult::Ignored;
            }
        };

        self.core.invalidate();
        if children.is_empty() {
            return EventResult::Consumed;
        }

        let items: Vec<PackItem> = children.iter().map(PackChild::item).collect();
        let rects = layout::pack(region, &params, &items);
        log::trace!(
            "[pack] {} resized {} children in {:?}",
            self.core.id(),
            children.len(),
            region
        );

        for (child, rect) in children.iter().zip(rects) {
            child.widget.set_origin(rect.origin());
            child.widget.set_allocation(rect.size());
            child.widget.resize();
        }
        EventResult::Consumed
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        self.pack_children()
            .into_iter()
            .map(|child| child.widget)
            .collect()
    }

    fn draw(&self, buf: &mut Buffer) {
        for child in self.children() {
            child.draw(buf);
        }
    }
}

impl Alignable for PackBox {}
