use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tuikit::{Adjustment, AdjustmentChange, AdjustmentError, AdjustmentValues, Validation};

/// Counts `changed` and `value_changed` notifications.
fn counters(adjustment: &Adjustment) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let changed = Arc::new(AtomicUsize::new(0));
    let value_changed = Arc::new(AtomicUsize::new(0));
    let c = changed.clone();
    adjustment.connect_changed(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let v = value_changed.clone();
    adjustment.connect_value_changed(move |_| {
        v.fetch_add(1, Ordering::SeqCst);
    });
    (changed, value_changed)
}

fn count(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

// ============================================================================
// Value Tests
// ============================================================================

#[test]
fn test_set_value_clamps_to_bounds() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);

    assert_eq!(adj.set_value(15), Ok(true));
    assert_eq!(adj.value(), 10, "clamped to upper");
    assert_eq!(adj.set_value(12), Ok(false), "still clamped to upper, no change");
    assert_eq!(adj.set_value(-3), Ok(true));
    assert_eq!(adj.value(), 0, "clamped to lower");
}

#[test]
fn test_constructor_clamps_value() {
    let adj = Adjustment::new(50, 0, 10, 1, 5, 5);
    assert_eq!(adj.value(), 10);
}

#[test]
fn test_moot_range() {
    assert!(Adjustment::default().is_moot());
    assert!(Adjustment::new(0, 4, 4, 1, 1, 1).is_moot());
    assert!(!Adjustment::new(0, 0, 3, 1, 1, 1).is_moot());
}

// ============================================================================
// Notification Tests
// ============================================================================

#[test]
fn test_value_and_bound_notifications_are_separate() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    let (changed, value_changed) = counters(&adj);

    adj.set_value(3).unwrap();
    assert_eq!((count(&changed), count(&value_changed)), (0, 1));

    adj.set_upper(20).unwrap();
    adj.set_step_increment(2).unwrap();
    assert_eq!((count(&changed), count(&value_changed)), (2, 1));

    adj.set_page_size(5).unwrap();
    assert_eq!(count(&changed), 2, "unchanged page size does not notify");
}

#[test]
fn test_configure_identical_values_fires_nothing() {
    let adj = Adjustment::new(4, 0, 10, 1, 5, 5);
    let (changed, value_changed) = counters(&adj);

    assert_eq!(adj.configure(adj.values()), Ok(false));
    assert_eq!((count(&changed), count(&value_changed)), (0, 0));
}

#[test]
fn test_configure_batches_notifications() {
    let adj = Adjustment::new(4, 0, 10, 1, 5, 5);
    let (changed, value_changed) = counters(&adj);

    adj.configure(AdjustmentValues::new(4, 0, 30, 2, 10, 10))
        .unwrap();
    assert_eq!(
        (count(&changed), count(&value_changed)),
        (1, 0),
        "four bound fields change, one notification"
    );

    adj.configure(AdjustmentValues::new(7, 0, 40, 2, 10, 10))
        .unwrap();
    assert_eq!((count(&changed), count(&value_changed)), (2, 1));
}

#[test]
fn test_configure_clamps_value() {
    let adj = Adjustment::default();
    adj.configure(AdjustmentValues::new(99, 0, 12, 1, 4, 4))
        .unwrap();
    assert_eq!(adj.value(), 12);
}

#[test]
fn test_clamp_page_changes_only_bounds() {
    let adj = Adjustment::new(6, 0, 10, 1, 5, 5);
    let (changed, value_changed) = counters(&adj);

    assert_eq!(adj.clamp_page(20, 2), Ok(true));
    assert_eq!(adj.values(), AdjustmentValues::new(6, 2, 20, 1, 5, 5));
    assert_eq!((count(&changed), count(&value_changed)), (1, 0));

    assert_eq!(adj.clamp_page(20, 2), Ok(false));
    assert_eq!(count(&changed), 1);
}

#[test]
fn test_disconnect_stops_notifications() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    let id = adj.connect_value_changed(move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });

    adj.set_value(1).unwrap();
    assert!(adj.disconnect(id));
    assert!(!adj.disconnect(id));
    adj.set_value(2).unwrap();
    assert_eq!(count(&hits), 1);
}

#[test]
fn test_listener_may_reenter_adjustment() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    adj.connect_value_changed(|adj| {
        let value = adj.value();
        adj.set_step_increment(value.max(1)).unwrap();
    });

    adj.set_value(3).unwrap();
    assert_eq!(adj.step_increment(), 3);
}

#[test]
fn test_clones_share_state() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    let other = adj.clone();
    other.set_value(7).unwrap();

    assert_eq!(adj.value(), 7);
    assert!(adj.same_as(&other));
    assert!(!adj.same_as(&Adjustment::new(7, 0, 10, 1, 5, 5)));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_validator_veto_leaves_state_untouched() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    let (changed, value_changed) = counters(&adj);
    adj.connect_validate(|change| match change {
        AdjustmentChange::Value(v) if *v > 5 => Validation::Veto(format!("{} is too far", v)),
        _ => Validation::Accept,
    });

    let err = adj.set_value(8).unwrap_err();
    assert_eq!(
        err,
        AdjustmentError::Vetoed {
            field: "value",
            reason: "8 is too far".into()
        }
    );
    assert_eq!(adj.value(), 0);
    assert_eq!((count(&changed), count(&value_changed)), (0, 0));

    assert_eq!(adj.set_value(4), Ok(true));
}

#[test]
fn test_validator_sees_clamped_value() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    let seen = Arc::new(AtomicUsize::new(0));
    let s = seen.clone();
    adj.connect_validate(move |change| {
        if let AdjustmentChange::Value(v) = change {
            s.store(*v as usize, Ordering::SeqCst);
        }
        Validation::Accept
    });

    adj.set_value(1000).unwrap();
    assert_eq!(count(&seen), 10);
}

#[test]
fn test_validator_can_veto_configure() {
    let adj = Adjustment::new(0, 0, 10, 1, 5, 5);
    adj.connect_validate(|change| match change {
        AdjustmentChange::Configure(_) => Validation::Veto("frozen".into()),
        _ => Validation::Accept,
    });

    assert!(adj.collapse().is_err());
    assert_eq!(adj.upper(), 10);
}
