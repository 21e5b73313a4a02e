use super::Cell;
use crate::layout::Rect;

/// A grid of character cells addressed in screen coordinates.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    pub fn set_char(&mut self, x: i32, y: i32, char: char) {
        self.set(x, y, Cell::new(char));
    }

    /// Fill every cell of `rect` that lies inside the buffer.
    pub fn fill(&mut self, rect: Rect, char: char) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                self.set_char(x, y, char);
            }
        }
    }

    /// Write `text` starting at `(x, y)`, dropping cells outside `clip`.
    pub fn set_str(&mut self, x: i32, y: i32, text: &str, clip: Rect) {
        let mut cursor = x;
        for ch in text.chars() {
            let cell = Cell::new(ch);
            let width = cell.width();
            if width == 0 {
                continue;
            }
            if cursor + width > clip.right() {
                break;
            }
            if clip.contains(cursor, y) {
                self.set(cursor, y, cell);
                if width > 1 {
                    self.set(
                        cursor + 1,
                        y,
                        Cell {
                            char: ' ',
                            wide_continuation: true,
                        },
                    );
                }
            }
            cursor += width;
        }
    }

    /// Row `y` as a string, skipping wide-character continuation cells.
    pub fn row(&self, y: i32) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }
}
