//! The pixel canvas: grid, view transform, interaction mode and the single change listener.
//! Input is routed by mode. Paint mode only reacts to pointer events, drag mode only to
//! gestures, so one never disturbs the state owned by the other.

use crate::bitmap;
use crate::input::{InputEvent, InputSource};
use crate::model::{CellChange, Mode, PixelGrid};
use crate::render::CanvasSnapshot;
use crate::state::Camera;
use crate::util::clog;

pub type PixelListener = Box<dyn FnMut(CellChange)>;

pub struct PixelCanvas {
    grid: PixelGrid,
    camera: Camera,
    mode: Mode,
    listener: Option<PixelListener>,
    /// Last cell toggled by the current paint stroke.
    stroke_cell: Option<(usize, usize)>,
    dirty: bool,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelCanvas {
    pub fn new() -> Self {
        Self {
            grid: PixelGrid::new(),
            camera: Camera::default(),
            mode: Mode::Paint,
            listener: None,
            stroke_cell: None,
            dirty: true,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            clog(&format!("mode: {} -> {}", self.mode.label(), mode.label()));
        }
        self.mode = mode;
        self.stroke_cell = None;
    }

    /// Replaces the listener; passing `None` detaches it.
    pub fn set_listener(&mut self, listener: Option<PixelListener>) {
        self.listener = listener;
    }

    /// Flips one cell, notifying the listener. Out-of-range cells are ignored.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<bool> {
        let on = self.grid.toggle(x, y)?;
        self.dirty = true;
        if let Some(listener) = self.listener.as_mut() {
            listener(CellChange { x, y, on });
        }
        Some(on)
    }

    pub fn fill_all(&mut self, value: bool) {
        self.grid.fill_all(value);
        self.dirty = true;
        clog(&format!("fill all: {}", if value { "on" } else { "off" }));
    }

    pub fn is_uniform(&self, value: bool) -> bool {
        self.grid.is_uniform(value)
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
        self.dirty = true;
        clog("view reset");
    }

    pub fn packed_bitmap(&self) -> Vec<u8> {
        bitmap::encode(&self.grid)
    }

    pub fn snapshot(&self, viewport_width: u32, show_grid_lines: bool) -> CanvasSnapshot<'_> {
        CanvasSnapshot {
            grid: &self.grid,
            camera: &self.camera,
            viewport_width,
            show_grid_lines,
        }
    }

    /// Reports whether a redraw is due and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn handle(&mut self, event: InputEvent, viewport_width: u32) {
        match self.mode {
            Mode::Paint => self.handle_paint(event, viewport_width),
            Mode::Drag => self.handle_drag(event),
        }
    }

    pub fn pump<S: InputSource + ?Sized>(&mut self, source: &mut S, viewport_width: u32) {
        while let Some(event) = source.next_event() {
            self.handle(event, viewport_width);
        }
    }

    fn handle_paint(&mut self, event: InputEvent, viewport_width: u32) {
        let (px, py, is_down) = match event {
            InputEvent::PointerDown { x, y } => (x, y, true),
            InputEvent::PointerMove { x, y } => (x, y, false),
            InputEvent::PointerUp { .. } => {
                self.stroke_cell = None;
                return;
            }
            _ => return,
        };
        let Some((cx, cy)) = self.camera.screen_to_cell(px, py, viewport_width) else {
            return;
        };
        if !PixelGrid::in_bounds(cx, cy) {
            return;
        }
        let cell = (cx as usize, cy as usize);
        if !is_down && self.stroke_cell == Some(cell) {
            return;
        }
        self.stroke_cell = Some(cell);
        self.toggle(cell.0, cell.1);
    }

    fn handle_drag(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pinch { factor } => self.camera.apply_scale(factor),
            InputEvent::Scroll { dx, dy } => self.camera.apply_pan(dx, dy),
            InputEvent::DoubleTap => self.camera.reset(),
            _ => return,
        }
        self.dirty = true;
    }
}
