use std::sync::RwLock;

use unicode_width::UnicodeWidthStr;

use super::{Alignable, Sizable, WidgetCore};
use crate::buffer::Buffer;
use crate::layout::Size;

/// A leaf widget showing one or more lines of text.
///
/// Unless an explicit size request is set, the label asks for the display
/// width of its widest line by its line count.
#[derive(Debug)]
pub struct Label {
    core: WidgetCore,
    text: RwLock<String>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            core: WidgetCore::new(),
            text: RwLock::new(text.into()),
        }
    }

    pub fn with_size_request(self, width: i32, height: i32) -> Self {
        self.core.set_size_request(Size::new(width, height));
        self
    }

    pub fn with_alignment(self, x: f32, y: f32) -> Self {
        self.core.set_alignment(x, y);
        self
    }

    pub fn text(&self) -> String {
        self.text
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        if let Ok(mut guard) = self.text.write() {
            *guard = text.into();
            self.core.invalidate();
        }
    }

    fn text_size(&self) -> Size {
        let text = self.text();
        let width = text.lines().map(|line| line.width()).max().unwrap_or(0);
        let height = text.lines().count().max(1);
        Size::new(width as i32, height as i32)
    }
}

impl Sizable for Label {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn size_request(&self) -> Size {
        let explicit = self.core.size_request();
        if explicit.width >= 0 && explicit.height >= 0 {
            return explicit;
        }
        let natural = self.text_size();
        Size::new(
            if explicit.width >= 0 { explicit.width } else { natural.width },
            if explicit.height >= 0 { explicit.height } else { natural.height },
        )
    }

    fn draw(&self, buf: &mut Buffer) {
        let region = self.region();
        if region.is_empty() {
            return;
        }
        let natural = self.text_size();
        let (xalign, yalign) = self.alignment();
        let x_slack = (region.width - natural.width).max(0);
        let y_slack = (region.height - natural.height).max(0);
        let x = region.x + (x_slack as f32 * xalign) as i32;
        let y = region.y + (y_slack as f32 * yalign) as i32;

        for (row, line) in self.text().lines().enumerate() {
            let row_y = y + row as i32;
            if row_y >= region.bottom() {
                break;
            }
            buf.set_str(x, row_y, line, region);
        }
    }
}

impl Alignable for Label {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_request_uses_display_width() {
        let label = Label::new("wide 字\nx");
        assert_eq!(label.size_request(), Size::new(7, 2));
    }

    #[test]
    fn test_partial_explicit_request() {
        let label = Label::new("hello").with_size_request(-1, 3);
        assert_eq!(label.size_request(), Size::new(5, 3));
    }
}
