use std::sync::Arc;

use tuikit::{
    AdjustmentValues, Buffer, Event, Key, Label, PackBox, Packable, Point, Rect, Scrollable,
    ScrollbarPolicy, ScrolledViewport, Size, Sizable, Viewport,
};

/// A scrolled viewport at the screen origin holding a blank child that
/// requests `content`.
fn compose(content: Size, allocation: Size) -> (ScrolledViewport, Arc<Label>) {
    let child = Arc::new(Label::new("").with_size_request(content.width, content.height));
    let scrolled = ScrolledViewport::new();
    scrolled.set_child(Some(child.clone())).unwrap();
    scrolled.set_allocation(allocation);
    scrolled.resize();
    (scrolled, child)
}

// ============================================================================
// Viewport Tests
// ============================================================================

#[test]
fn test_viewport_shifts_child_by_value() {
    let viewport = Viewport::new();
    let child = Arc::new(Label::new("").with_size_request(30, 5));
    viewport.set_child(Some(child.clone())).unwrap();
    viewport.set_origin(Point::new(2, 1));
    viewport.set_allocation(Size::new(10, 5));
    viewport.resize();

    assert_eq!(viewport.hadjustment().upper(), 20);
    assert!(viewport.vadjustment().is_moot(), "height fits");
    assert_eq!(child.region(), Rect::new(2, 1, 30, 5));

    viewport.hadjustment().set_value(7).unwrap();
    viewport.resize();
    assert_eq!(child.region(), Rect::new(-5, 1, 30, 5));
    assert_eq!(viewport.scroll_offset(), Point::new(7, 0));
}

#[test]
fn test_viewport_clips_drawing() {
    let viewport = Viewport::new();
    let child = Arc::new(Label::new("0123456789").with_alignment(0.0, 0.0));
    viewport.set_child(Some(child)).unwrap();
    viewport.set_origin(Point::new(1, 0));
    viewport.set_allocation(Size::new(4, 1));
    viewport.resize();
    viewport.hadjustment().set_value(3).unwrap();
    viewport.resize();

    let mut buf = Buffer::new(6, 1);
    buf.fill(buf.area(), '.');
    viewport.draw(&mut buf);
    assert_eq!(buf.row(0), ".3456.");
}

#[test]
fn test_viewport_replaces_child() {
    let viewport = Viewport::new();
    let first = Arc::new(Label::new("a"));
    let second = Arc::new(Label::new("b"));
    viewport.set_child(Some(first.clone())).unwrap();
    viewport.set_child(Some(second.clone())).unwrap();

    assert_eq!(first.core().parent(), None, "old child is detached");
    assert_eq!(second.core().parent(), Some(viewport.id()));
    assert_eq!(viewport.children().len(), 1);
}

// ============================================================================
// Scrollbar Visibility Tests
// ============================================================================

#[test]
fn test_overflow_on_both_axes() {
    let (scrolled, child) = compose(Size::new(120, 40), Size::new(80, 24));

    assert_eq!(scrolled.scrollbars_visible(), (true, true));
    assert_eq!(scrolled.hadjustment().upper(), 41, "120 - 79");
    assert_eq!(scrolled.vadjustment().upper(), 17, "40 - 23");
    assert_eq!(scrolled.hadjustment().page_size(), 79);
    assert_eq!(scrolled.vadjustment().page_increment(), 11);

    assert_eq!(scrolled.viewport().region(), Rect::new(0, 0, 79, 23));
    assert_eq!(child.region(), Rect::new(0, 0, 120, 40));
    assert_eq!(
        scrolled.scrollbar(tuikit::Orientation::Vertical).region(),
        Rect::new(79, 0, 1, 23)
    );
    assert_eq!(
        scrolled.scrollbar(tuikit::Orientation::Horizontal).region(),
        Rect::new(0, 23, 79, 1)
    );
}

#[test]
fn test_content_that_fits_hides_bars() {
    let (scrolled, child) = compose(Size::new(40, 10), Size::new(80, 24));

    assert_eq!(scrolled.scrollbars_visible(), (false, false));
    assert!(scrolled.hadjustment().is_moot());
    assert!(scrolled.vadjustment().is_moot());
    assert_eq!(child.region(), Rect::new(0, 0, 80, 24), "child gets the full viewport");
}

#[test]
fn test_single_axis_overflow() {
    let (scrolled, _) = compose(Size::new(50, 40), Size::new(80, 24));

    assert_eq!(scrolled.scrollbars_visible(), (false, true));
    assert_eq!(scrolled.viewport().region(), Rect::new(0, 0, 79, 24));
    assert_eq!(scrolled.vadjustment().upper(), 16);
}

#[test]
fn test_always_and_never_policies() {
    let (always, _) = compose(Size::new(10, 5), Size::new(80, 24));
    always.set_policy(ScrollbarPolicy::Always, ScrollbarPolicy::Always);
    always.resize();
    assert_eq!(always.scrollbars_visible(), (true, true));
    assert_eq!(always.viewport().region(), Rect::new(0, 0, 79, 23));

    let (never, _) = compose(Size::new(120, 40), Size::new(80, 24));
    never.set_policy(ScrollbarPolicy::Never, ScrollbarPolicy::Never);
    never.resize();
    assert_eq!(never.scrollbars_visible(), (false, false));
    assert_eq!(never.viewport().region(), Rect::new(0, 0, 80, 24));
    assert_eq!(never.hadjustment().upper(), 40, "still scrollable without bars");
}

#[test]
fn test_bars_hide_after_content_shrinks() {
    let (scrolled, child) = compose(Size::new(120, 40), Size::new(80, 24));
    child.set_size_request(Size::new(40, 10));

    scrolled.resize();
    assert!(scrolled.hadjustment().is_moot());
    assert!(scrolled.vadjustment().is_moot());
    assert_eq!(scrolled.scrollbars_visible(), (false, false), "hidden in the same pass");
    assert_eq!(child.region(), Rect::new(0, 0, 80, 24));
}

#[test]
fn test_vertical_bar_forces_horizontal_bar() {
    // Fits horizontally only until the vertical bar takes a column.
    let (scrolled, child) = compose(Size::new(80, 40), Size::new(80, 24));

    assert_eq!(scrolled.scrollbars_visible(), (true, true));
    assert_eq!(scrolled.hadjustment().upper(), 1, "80 - 79");
    assert_eq!(scrolled.vadjustment().upper(), 17, "40 - 23");
    assert_eq!(scrolled.vadjustment().page_size(), 23);
    assert_eq!(child.region(), Rect::new(0, 0, 80, 40));
}

type Snapshot = ((bool, bool), Rect, Rect, AdjustmentValues, AdjustmentValues);

fn snapshot(scrolled: &ScrolledViewport, child: &Label) -> Snapshot {
    (
        scrolled.scrollbars_visible(),
        scrolled.viewport().region(),
        child.region(),
        scrolled.hadjustment().values(),
        scrolled.vadjustment().values(),
    )
}

#[test]
fn test_resize_is_idempotent() {
    for content in [Size::new(120, 40), Size::new(80, 40), Size::new(40, 24), Size::new(10, 5)] {
        let (scrolled, child) = compose(content, Size::new(80, 24));
        let first = snapshot(&scrolled, &child);
        scrolled.resize();
        assert_eq!(first, snapshot(&scrolled, &child), "content {:?}", content);
    }

    let (scrolled, child) = compose(Size::new(120, 40), Size::new(80, 24));
    child.set_size_request(Size::new(40, 10));
    scrolled.resize();
    let first = snapshot(&scrolled, &child);
    scrolled.resize();
    assert_eq!(first, snapshot(&scrolled, &child), "after shrinking");
}

// ============================================================================
// Drawing Tests
// ============================================================================

#[test]
fn test_corner_is_filled() {
    let (scrolled, _) = compose(Size::new(120, 40), Size::new(80, 24));
    let mut buf = Buffer::new(80, 24);
    scrolled.draw(&mut buf);
    assert_eq!(buf.get(79, 23).map(|c| c.char), Some('░'));

    let (custom, _) = compose(Size::new(120, 40), Size::new(80, 24));
    let custom = custom.fill_glyph('#');
    let mut buf = Buffer::new(80, 24);
    custom.draw(&mut buf);
    assert_eq!(buf.get(79, 23).map(|c| c.char), Some('#'));
}

#[test]
fn test_corner_untouched_with_one_bar() {
    let (scrolled, _) = compose(Size::new(50, 40), Size::new(80, 24));
    let mut buf = Buffer::new(80, 24);
    scrolled.draw(&mut buf);
    assert_ne!(buf.get(79, 23).map(|c| c.char), Some('░'));
}

// ============================================================================
// Input Routing Tests
// ============================================================================

#[test]
fn test_trough_press_scrolls_content() {
    let (scrolled, child) = compose(Size::new(120, 40), Size::new(80, 24));

    assert!(scrolled.process_event(&Event::press(79, 20)));
    assert_eq!(scrolled.vadjustment().value(), 11, "one page");
    assert_eq!(child.origin(), Point::new(0, -11), "resize ran after the event");
}

#[test]
fn test_wheel_and_keys_route_to_bars() {
    let (scrolled, child) = compose(Size::new(120, 40), Size::new(80, 24));

    let wheel = Event::Scroll {
        x: 10,
        y: 10,
        delta_x: 0,
        delta_y: 2,
    };
    assert!(scrolled.process_event(&wheel));
    assert_eq!(child.origin(), Point::new(0, -2));

    assert!(scrolled.process_event(&Event::key(Key::Right)));
    assert_eq!(scrolled.hadjustment().value(), 1);
    assert!(scrolled.process_event(&Event::key(Key::End)));
    assert_eq!(scrolled.vadjustment().value(), 17);
    assert!(!scrolled.process_event(&Event::key(Key::Enter)));
}

#[test]
fn test_press_in_viewport_is_ignored() {
    let (scrolled, _) = compose(Size::new(120, 40), Size::new(80, 24));
    assert!(!scrolled.process_event(&Event::press(5, 5)));
}

// ============================================================================
// Scroll-to Tests
// ============================================================================

fn scrolled_list(rows: usize) -> (ScrolledViewport, Vec<Arc<Label>>) {
    let list = Arc::new(PackBox::vertical());
    let labels: Vec<Arc<Label>> = (0..rows)
        .map(|i| Arc::new(Label::new(format!("{:<10}", i))))
        .collect();
    for label in &labels {
        list.pack_start(label.clone(), false, true, 0).unwrap();
    }
    let scrolled = ScrolledViewport::new();
    scrolled.set_child(Some(list)).unwrap();
    scrolled.set_allocation(Size::new(20, 10));
    scrolled.resize();
    (scrolled, labels)
}

#[test]
fn test_scroll_to_brings_far_edge_into_view() {
    let (scrolled, labels) = scrolled_list(30);
    assert_eq!(scrolled.scrollbars_visible(), (false, true));
    assert_eq!(scrolled.vadjustment().upper(), 20);

    assert!(scrolled.scroll_to(&*labels[15]));
    assert_eq!(scrolled.vadjustment().value(), 6, "minimal delta");
    assert_eq!(labels[15].region().y, 9, "target on the last visible row");

    assert!(!scrolled.scroll_to(&*labels[15]), "already visible");
}

#[test]
fn test_scroll_to_brings_near_edge_into_view() {
    let (scrolled, labels) = scrolled_list(30);
    scrolled.vadjustment().set_value(12).unwrap();
    scrolled.resize();

    assert!(scrolled.scroll_to(&*labels[2]));
    assert_eq!(scrolled.vadjustment().value(), 2);
    assert_eq!(labels[2].region().y, 0);
}

#[test]
fn test_scroll_to_ignores_foreign_widget() {
    let (scrolled, _) = scrolled_list(30);
    let stranger = Label::new("elsewhere");
    stranger.set_origin(Point::new(0, 50));

    assert!(!scrolled.scroll_to(&stranger));
    assert_eq!(scrolled.vadjustment().value(), 0);
}
