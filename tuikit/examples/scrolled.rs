use std::fs::File;
use std::sync::Arc;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use simplelog::{Config, LevelFilter, WriteLogger};
use tuikit::{
    Buffer, ButtonBox, ButtonBoxStyle, Event, Label, PackBox, Packable, Point, Scrollable,
    ScrolledViewport, Size, Sizable,
};

const WIDTH: i32 = 40;
const HEIGHT: i32 = 12;

fn print_screen(title: &str, root: &PackBox) {
    let mut buf = Buffer::new(WIDTH, HEIGHT);
    root.draw(&mut buf);
    println!("-- {} --", title);
    for y in 0..buf.height() {
        println!("{}", buf.row(y));
    }
}

/// Replay a crossterm mouse event against the scrolled view.
fn click(scrolled: &ScrolledViewport, column: u16, row: u16) {
    let raw = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    if let Some(event) = Event::from_mouse(raw) {
        let handled = scrolled.process_event(&event);
        log::info!("click at ({}, {}) handled: {}", column, row, handled);
        scrolled.process_event(&Event::release(column as i32, row as i32));
    }
}

fn main() -> std::io::Result<()> {
    let log_file = File::create("scrolled.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let list = Arc::new(PackBox::vertical());
    for i in 0..30 {
        let line = format!("{:>3}  {}", i, "the quick brown fox jumps over the lazy dog");
        list.pack_start(Arc::new(Label::new(line).with_alignment(0.0, 0.0)), false, true, 0)
            .expect("fresh label has no parent");
    }

    let scrolled = Arc::new(ScrolledViewport::new());
    // ask for a single row and let the root expand it
    scrolled.set_size_request(Size::new(WIDTH, 1));
    scrolled
        .set_child(Some(list))
        .expect("fresh list has no parent");

    let buttons = Arc::new(ButtonBox::horizontal().style(ButtonBoxStyle::End).spacing(1));
    for text in ["[ok]", "[cancel]"] {
        buttons
            .pack_start(Arc::new(Label::new(text)), false, true, 0)
            .expect("fresh label has no parent");
    }

    let root = PackBox::vertical();
    root.pack_start(Arc::new(Label::new("tuikit scrolled demo")), false, true, 0)
        .expect("fresh label has no parent");
    root.pack_start(scrolled.clone(), true, true, 0)
        .expect("fresh view has no parent");
    root.pack_end(buttons, false, true, 0)
        .expect("fresh buttons have no parent");

    root.set_origin(Point::new(0, 0));
    root.set_allocation(Size::new(WIDTH, HEIGHT));
    root.resize();
    print_screen("initial", &root);

    let region = scrolled.region();
    // below the vertical slider: one page down
    click(&scrolled, (region.right() - 1) as u16, (region.bottom() - 3) as u16);
    print_screen("after trough press", &root);

    // right stepper of the horizontal bar
    for _ in 0..4 {
        click(&scrolled, (region.right() - 2) as u16, (region.bottom() - 1) as u16);
    }
    print_screen("after stepping right", &root);

    let (h, v) = (scrolled.hadjustment(), scrolled.vadjustment());
    println!(
        "h {}/{}  v {}/{}",
        h.value(),
        h.upper(),
        v.value(),
        v.upper()
    );
    Ok(())
}
