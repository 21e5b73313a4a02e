//! Bounded integer value shared between a scrollable widget and its
//! scrollbars.
//!
//! Every mutation runs the same protocol: validators see the proposed change
//! and may veto it, the change is committed under the write lock, and
//! listeners are notified after the lock is released. Listeners may therefore
//! read from (or write to) the adjustment without deadlocking.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::AdjustmentError;

/// The six numeric fields of an [`Adjustment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AdjustmentValues {
    pub value: i32,
    pub lower: i32,
    pub upper: i32,
    pub step_increment: i32,
    pub page_increment: i32,
    pub page_size: i32,
}

impl AdjustmentValues {
    pub const fn new(
        value: i32,
        lower: i32,
        upper: i32,
        step_increment: i32,
        page_increment: i32,
        page_size: i32,
    ) -> Self {
        Self {
            value,
            lower,
            upper,
            step_increment,
            page_increment,
            page_size,
        }
    }

    /// `upper == lower` or `upper == 0`: nothing to scroll.
    pub const fn is_moot(&self) -> bool {
        self.upper == self.lower || self.upper == 0
    }

    /// Width of the traversable range, never negative.
    pub const fn range(&self) -> i32 {
        if self.upper > self.lower {
            self.upper - self.lower
        } else {
            0
        }
    }

    /// Clamp `value` into `[lower, upper]`.
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.lower, self.upper.max(self.lower))
    }

    fn bounds_differ(&self, other: &Self) -> bool {
        self.lower != other.lower
            || self.upper != other.upper
            || self.step_increment != other.step_increment
            || self.page_increment != other.page_increment
            || self.page_size != other.page_size
    }
}

/// A proposed mutation, as seen by validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentChange {
    Value(i32),
    Lower(i32),
    Upper(i32),
    StepIncrement(i32),
    PageIncrement(i32),
    PageSize(i32),
    Configure(AdjustmentValues),
    ClampPage { upper: i32, lower: i32 },
}

impl AdjustmentChange {
    pub const fn field(&self) -> &'static str {
        match self {
            AdjustmentChange::Value(_) => "value",
            AdjustmentChange::Lower(_) => "lower",
            AdjustmentChange::Upper(_) => "upper",
            AdjustmentChange::StepIncrement(_) => "step-increment",
            AdjustmentChange::PageIncrement(_) => "page-increment",
            AdjustmentChange::PageSize(_) => "page-size",
            AdjustmentChange::Configure(_) => "configure",
            AdjustmentChange::ClampPage { .. } => "clamp-page",
        }
    }
}

/// Verdict of a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accept,
    Veto(String),
}

/// Handle returned when connecting a validator or listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(usize);

impl HandlerId {
    fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

pub type Validator = Arc<dyn Fn(&AdjustmentChange) -> Validation + Send + Sync>;
pub type Listener = Arc<dyn Fn(&Adjustment) + Send + Sync>;

#[derive(Default)]
struct AdjustmentInner {
    values: AdjustmentValues,
    validators: Vec<(HandlerId, Validator)>,
    on_changed: Vec<(HandlerId, Listener)>,
    on_value_changed: Vec<(HandlerId, Listener)>,
}

/// Which notifications a commit produced.
#[derive(Debug, Clone, Copy, Default)]
struct Emitted {
    changed: bool,
    value_changed: bool,
}

/// Shared bounded value. Cloning yields another handle to the same state.
#[derive(Clone, Default)]
pub struct Adjustment {
    inner: Arc<RwLock<AdjustmentInner>>,
}

impl fmt::Debug for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adjustment")
            .field("values", &self.values())
            .finish()
    }
}

impl Adjustment {
    pub fn new(
        value: i32,
        lower: i32,
        upper: i32,
        step_increment: i32,
        page_increment: i32,
        page_size: i32,
    ) -> Self {
        Self::from_values(AdjustmentValues::new(
            value,
            lower,
            upper,
            step_increment,
            page_increment,
            page_size,
        ))
    }

    pub fn from_values(values: AdjustmentValues) -> Self {
        let values = AdjustmentValues {
            value: values.clamp(values.value),
            ..values
        };
        Self {
            inner: Arc::new(RwLock::new(AdjustmentInner {
                values,
                ..Default::default()
            })),
        }
    }

    /// True when both handles point at the same adjustment.
    pub fn same_as(&self, other: &Adjustment) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn values(&self) -> AdjustmentValues {
        self.inner
            .read()
            .map(|guard| guard.values)
            .unwrap_or_default()
    }

    pub fn value(&self) -> i32 {
        self.values().value
    }

    pub fn lower(&self) -> i32 {
        self.values().lower
    }

    pub fn upper(&self) -> i32 {
        self.values().upper
    }

    pub fn step_increment(&self) -> i32 {
        self.values().step_increment
    }

    pub fn page_increment(&self) -> i32 {
        self.values().page_increment
    }

    pub fn page_size(&self) -> i32 {
        self.values().page_size
    }

    pub fn is_moot(&self) -> bool {
        self.values().is_moot()
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Set the value, clamped to `[lower, upper]`. Returns whether it changed.
    pub fn set_value(&self, value: i32) -> Result<bool, AdjustmentError> {
        let proposed = self.values().clamp(value);
        self.update(AdjustmentChange::Value(proposed))
            .map(|emitted| emitted.value_changed)
    }

    pub fn set_lower(&self, lower: i32) -> Result<bool, AdjustmentError> {
        self.update(AdjustmentChange::Lower(lower))
            .map(|emitted| emitted.changed)
    }

    pub fn set_upper(&self, upper: i32) -> Result<bool, AdjustmentError> {
        self.update(AdjustmentChange::Upper(upper))
            .map(|emitted| emitted.changed)
    }

    pub fn set_step_increment(&self, step: i32) -> Result<bool, AdjustmentError> {
        self.update(AdjustmentChange::StepIncrement(step))
            .map(|emitted| emitted.changed)
    }

    pub fn set_page_increment(&self, page: i32) -> Result<bool, AdjustmentError> {
        self.update(AdjustmentChange::PageIncrement(page))
            .map(|emitted| emitted.changed)
    }

    pub fn set_page_size(&self, page_size: i32) -> Result<bool, AdjustmentError> {
        self.update(AdjustmentChange::PageSize(page_size))
            .map(|emitted| emitted.changed)
    }

    /// Replace all six fields at once.
    ///
    /// Emits at most one `changed` and one `value_changed`, each only when
    /// the corresponding fields actually differ. Returns whether anything
    /// changed.
    pub fn configure(&self, values: AdjustmentValues) -> Result<bool, AdjustmentError> {
        let values = AdjustmentValues {
            value: values.clamp(values.value),
            ..values
        };
        self.update(AdjustmentChange::Configure(values))
            .map(|emitted| emitted.changed || emitted.value_changed)
    }

    /// Collapse to the moot range `{0, 0, 0}`.
    pub fn collapse(&self) -> Result<bool, AdjustmentError> {
        self.configure(AdjustmentValues::default())
    }

    /// Change only `upper` and `lower`; the value is left untouched.
    pub fn clamp_page(&self, upper: i32, lower: i32) -> Result<bool, AdjustmentError> {
        self.update(AdjustmentChange::ClampPage { upper, lower })
            .map(|emitted| emitted.changed)
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    /// Register a validator consulted before every mutation.
    pub fn connect_validate<F>(&self, validator: F) -> HandlerId
    where
        F: Fn(&AdjustmentChange) -> Validation + Send + Sync + 'static,
    {
        let id = HandlerId::next();
        if let Ok(mut guard) = self.inner.write() {
            guard.validators.push((id, Arc::new(validator)));
        }
        id
    }

    /// Register a listener for bound and increment changes.
    pub fn connect_changed<F>(&self, listener: F) -> HandlerId
    where
        F: Fn(&Adjustment) + Send + Sync + 'static,
    {
        let id = HandlerId::next();
        if let Ok(mut guard) = self.inner.write() {
            guard.on_changed.push((id, Arc::new(listener)));
        }
        id
    }

    /// Register a listener for value changes.
    pub fn connect_value_changed<F>(&self, listener: F) -> HandlerId
    where
        F: Fn(&Adjustment) + Send + Sync + 'static,
    {
        let id = HandlerId::next();
        if let Ok(mut guard) = self.inner.write() {
            guard.on_value_changed.push((id, Arc::new(listener)));
        }
        id
    }

    /// Remove a validator or listener. Returns whether it was connected.
    pub fn disconnect(&self, id: HandlerId) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let before =
            guard.validators.len() + guard.on_changed.len() + guard.on_value_changed.len();
        guard.validators.retain(|(handler, _)| *handler != id);
        guard.on_changed.retain(|(handler, _)| *handler != id);
        guard.on_value_changed.retain(|(handler, _)| *handler != id);
        before != guard.validators.len() + guard.on_changed.len() + guard.on_value_changed.len()
    }

    // -------------------------------------------------------------------------
    // Protocol
    // -------------------------------------------------------------------------

    fn update(&self, change: AdjustmentChange) -> Result<Emitted, AdjustmentError> {
        self.validate(&change)?;
        let emitted = self.commit(change)?;
        self.notify(emitted);
        Ok(emitted)
    }

    fn validate(&self, change: &AdjustmentChange) -> Result<(), AdjustmentError> {
        let validators: Vec<Validator> = self
            .inner
            .read()
            .map_err(|_| AdjustmentError::Poisoned)?
            .validators
            .iter()
            .map(|(_, validator)| Arc::clone(validator))
            .collect();

        for validator in validators {
            if let Validation::Veto(reason) = validator(change) {
                log::debug!("[adjustment] {} vetoed: {}", change.field(), reason);
                return Err(AdjustmentError::Vetoed {
                    field: change.field(),
                    reason,
                });
            }
        }
        Ok(())
    }

    fn commit(&self, change: AdjustmentChange) -> Result<Emitted, AdjustmentError> {
        let mut guard = self.inner.write().map_err(|_| AdjustmentError::Poisoned)?;
        let old = guard.values;
        let mut new = old;
        match change {
            AdjustmentChange::Value(value) => new.value = old.clamp(value),
            AdjustmentChange::Lower(lower) => new.lower = lower,
            AdjustmentChange::Upper(upper) => new.upper = upper,
            AdjustmentChange::StepIncrement(step) => new.step_increment = step,
            AdjustmentChange::PageIncrement(page) => new.page_increment = page,
            AdjustmentChange::PageSize(page_size) => new.page_size = page_size,
            AdjustmentChange::Configure(values) => new = values,
            AdjustmentChange::ClampPage { upper, lower } => {
                new.upper = upper;
                new.lower = lower;
            }
        }
        guard.values = new;

        Ok(Emitted {
            changed: old.bounds_differ(&new),
            value_changed: old.value != new.value,
        })
    }

    fn notify(&self, emitted: Emitted) {
        if !emitted.changed && !emitted.value_changed {
            return;
        }
        let (changed, value_changed): (Vec<Listener>, Vec<Listener>) = match self.inner.read() {
            Ok(guard) => (
                guard.on_changed.iter().map(|(_, l)| Arc::clone(l)).collect(),
                guard
                    .on_value_changed
                    .iter()
                    .map(|(_, l)| Arc::clone(l))
                    .collect(),
            ),
            Err(_) => return,
        };

        if emitted.changed {
            for listener in changed {
                listener(self);
            }
        }
        if emitted.value_changed {
            for listener in value_changed {
                listener(self);
            }
        }
    }
}
