//! Core data model for the LED pixel canvas.
//! A fixed 64x64 monochrome grid, the paint/drag mode switch and the change record
//! handed to listeners.

/// Width and height of the grid in cells. Matches the LED matrix panel.
pub const GRID_SIZE: usize = 64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Touch toggles pixels.
    #[default]
    Paint,
    /// Touch pans and zooms the view.
    Drag,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Paint => Mode::Drag,
            Mode::Drag => Mode::Paint,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Paint => "Paint",
            Mode::Drag => "Drag",
        }
    }
}

/// A single successful toggle, as reported to the canvas listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub x: usize,
    pub y: usize,
    pub on: bool,
}

impl CellChange {
    /// Value in the 0/1 form the LED firmware expects.
    pub fn value(&self) -> u8 {
        u8::from(self.on)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    /// Row-major cells; length = GRID_SIZE * GRID_SIZE.
    cells: Vec<bool>,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelGrid {
    pub fn new() -> Self {
        Self {
            cells: vec![false; GRID_SIZE * GRID_SIZE],
        }
    }

    pub fn in_bounds(x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE
    }

    fn idx(x: usize, y: usize) -> usize {
        y * GRID_SIZE + x
    }

    /// Cell value, or `false` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return false;
        }
        self.cells[Self::idx(x, y)]
    }

    /// Flips the cell and returns its new value. Out-of-range input leaves the grid
    /// untouched and yields `None`.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<bool> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return None;
        }
        let i = Self::idx(x, y);
        self.cells[i] = !self.cells[i];
        Some(self.cells[i])
    }

    pub fn fill_all(&mut self, value: bool) {
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    /// True iff every cell equals `value`; stops at the first mismatch.
    pub fn is_uniform(&self, value: bool) -> bool {
        self.cells.iter().all(|&c| c == value)
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterates `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % GRID_SIZE, i / GRID_SIZE, v))
    }
}
