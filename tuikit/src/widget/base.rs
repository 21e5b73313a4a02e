use std::fmt;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::properties::{Properties, PropertyValue};
use crate::error::LayoutError;
use crate::layout::{Point, Rect, Size};

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "widget-{}", self.0)
    }
}

#[derive(Debug)]
struct CoreState {
    origin: Point,
    allocation: Size,
    size_request: Size,
    align: (f32, f32),
    parent: Option<WidgetId>,
    properties: Properties,
}

impl Default for CoreState {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            allocation: Size::zero(),
            size_request: Size::UNSPECIFIED,
            align: (0.5, 0.5),
            parent: None,
            properties: Properties::default(),
        }
    }
}

/// State every widget carries: identity, geometry, alignment, parent link and
/// extension properties. Concrete widgets embed one and delegate to it.
///
/// The lock is only ever held for a single field access.
#[derive(Debug)]
pub struct WidgetCore {
    id: WidgetId,
    state: RwLock<CoreState>,
    dirty: AtomicBool,
}

impl Default for WidgetCore {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetCore {
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            state: RwLock::new(CoreState::default()),
            dirty: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    fn read<T>(&self, default: T, f: impl FnOnce(&CoreState) -> T) -> T {
        match self.state.read() {
            Ok(guard) => f(&guard),
            Err(_) => {
                log::error!("[widget] {} state poisoned", self.id);
                default
            }
        }
    }

    fn write(&self, f: impl FnOnce(&mut CoreState)) {
        match self.state.write() {
            Ok(mut guard) => f(&mut guard),
            Err(_) => log::error!("[widget] {} state poisoned", self.id),
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn origin(&self) -> Point {
        self.read(Point::default(), |s| s.origin)
    }

    pub fn set_origin(&self, origin: Point) {
        self.write(|s| s.origin = origin);
    }

    pub fn allocation(&self) -> Size {
        self.read(Size::zero(), |s| s.allocation)
    }

    /// Store the allocation, flooring negative components at zero.
    pub fn set_allocation(&self, allocation: Size) {
        if allocation.width < 0 || allocation.height < 0 {
            log::debug!(
                "[widget] {} negative allocation {:?} floored",
                self.id,
                allocation
            );
        }
        self.write(|s| s.allocation = allocation.clamped());
    }

    /// Screen-relative region: origin plus allocation.
    pub fn region(&self) -> Rect {
        self.read(Rect::default(), |s| Rect::from_parts(s.origin, s.allocation))
    }

    pub fn size_request(&self) -> Size {
        self.read(Size::UNSPECIFIED, |s| s.size_request)
    }

    pub fn set_size_request(&self, size: Size) {
        self.write(|s| s.size_request = size);
    }

    pub fn alignment(&self) -> (f32, f32) {
        self.read((0.5, 0.5), |s| s.align)
    }

    pub fn set_alignment(&self, x: f32, y: f32) {
        self.write(|s| s.align = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)));
    }

    // -------------------------------------------------------------------------
    // Hierarchy
    // -------------------------------------------------------------------------

    pub fn parent(&self) -> Option<WidgetId> {
        self.read(None, |s| s.parent)
    }

    /// Record `parent` as this widget's container.
    ///
    /// Fails if the widget already belongs to a different container.
    pub fn claim_parent(&self, parent: WidgetId) -> Result<(), LayoutError> {
        if parent == self.id {
            return Err(LayoutError::SelfParent(self.id));
        }
        let mut result = Ok(());
        self.write(|s| match s.parent {
            Some(existing) if existing != parent => {
                result = Err(LayoutError::AlreadyParented {
                    child: self.id,
                    parent: existing,
                });
            }
            _ => s.parent = Some(parent),
        });
        result
    }

    pub fn release_parent(&self) {
        self.write(|s| s.parent = None);
    }

    // -------------------------------------------------------------------------
    // Invalidation
    // -------------------------------------------------------------------------

    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Extension properties
    // -------------------------------------------------------------------------

    pub fn set_property(&self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let (name, value) = (name.into(), value.into());
        self.write(|s| s.properties.set(name, value));
    }

    pub fn with_properties<T>(&self, f: impl FnOnce(&Properties) -> T) -> Option<T> {
        self.state.read().ok().map(|guard| f(&guard.properties))
    }
}
