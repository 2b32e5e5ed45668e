//! Read-only drawing surface for the canvas. The snapshot exposes grid geometry in
//! untransformed screen units; renderers apply the camera themselves.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::model::{GRID_SIZE, PixelGrid};
use crate::state::Camera;

pub const PIXEL_ON: &str = "#ffffff";
pub const PIXEL_OFF: &str = "#000000";
pub const GRID_LINE: &str = "#3a4455";
pub const BACKGROUND: &str = "#0e1116";

pub struct CanvasSnapshot<'a> {
    pub grid: &'a PixelGrid,
    pub camera: &'a Camera,
    pub viewport_width: u32,
    pub show_grid_lines: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub on: bool,
}

impl CanvasSnapshot<'_> {
    pub fn cell_size(&self) -> f64 {
        Camera::cell_size(self.viewport_width) as f64
    }

    /// Every cell in row-major order, before the camera transform.
    pub fn cells(&self) -> impl Iterator<Item = CellRect> + '_ {
        let size = self.cell_size();
        self.grid.iter().map(move |(x, y, on)| CellRect {
            x: x as f64 * size,
            y: y as f64 * size,
            size,
            on,
        })
    }

    /// Positions of separator lines, one per cell boundary including both edges.
    pub fn grid_lines(&self) -> Vec<f64> {
        if !self.show_grid_lines {
            return Vec::new();
        }
        let size = self.cell_size();
        (0..=GRID_SIZE).map(|i| i as f64 * size).collect()
    }

    /// Canvas transform `(a, b, c, d, e, f)`: scale, then translate in screen units.
    pub fn transform(&self) -> (f64, f64, f64, f64, f64, f64) {
        let cam = self.camera;
        (cam.scale, 0.0, 0.0, cam.scale, cam.translate_x, cam.translate_y)
    }
}

pub trait Renderer {
    fn render(&mut self, snapshot: &CanvasSnapshot<'_>);
}

pub struct Canvas2dRenderer {
    canvas: HtmlCanvasElement,
}

impl Canvas2dRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    fn context(&self) -> Option<CanvasRenderingContext2d> {
        self.canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    }
}

impl Renderer for Canvas2dRenderer {
    fn render(&mut self, snapshot: &CanvasSnapshot<'_>) {
        if !self.canvas.is_connected() {
            return;
        }
        let Some(ctx) = self.context() else {
            return;
        };
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);
        let (a, b, c, d, e, f) = snapshot.transform();
        ctx.set_transform(a, b, c, d, e, f).ok();
        for cell in snapshot.cells() {
            ctx.set_fill_style_str(if cell.on { PIXEL_ON } else { PIXEL_OFF });
            ctx.fill_rect(cell.x, cell.y, cell.size, cell.size);
        }
        let lines = snapshot.grid_lines();
        if lines.is_empty() {
            return;
        }
        let extent = snapshot.cell_size() * GRID_SIZE as f64;
        ctx.set_stroke_style_str(GRID_LINE);
        ctx.set_line_width((1.0 / snapshot.camera.scale).max(0.001));
        for p in lines {
            ctx.begin_path();
            ctx.move_to(p, 0.0);
            ctx.line_to(p, extent);
            ctx.stroke();
            ctx.begin_path();
            ctx.move_to(0.0, p);
            ctx.line_to(extent, p);
            ctx.stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lit: Vec<CellRect>,
        lines: usize,
        transform: Option<(f64, f64, f64, f64, f64, f64)>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, snapshot: &CanvasSnapshot<'_>) {
            self.lit = snapshot.cells().filter(|c| c.on).collect();
            self.lines = snapshot.grid_lines().len();
            self.transform = Some(snapshot.transform());
        }
    }

    #[test]
    fn snapshot_geometry() {
        let mut grid = PixelGrid::new();
        grid.toggle(3, 2);
        let camera = Camera {
            scale: 2.0,
            translate_x: 5.0,
            translate_y: -7.0,
        };
        let snap = CanvasSnapshot {
            grid: &grid,
            camera: &camera,
            viewport_width: 640,
            show_grid_lines: true,
        };
        let mut r = Recorder::default();
        r.render(&snap);
        assert_eq!(
            r.lit,
            vec![CellRect {
                x: 30.0,
                y: 20.0,
                size: 10.0,
                on: true
            }]
        );
        assert_eq!(r.lines, GRID_SIZE + 1);
        assert_eq!(r.transform, Some((2.0, 0.0, 0.0, 2.0, 5.0, -7.0)));
        assert_eq!(snap.cells().count(), GRID_SIZE * GRID_SIZE);
    }

    #[test]
    fn grid_lines_can_be_hidden() {
        let grid = PixelGrid::new();
        let camera = Camera::default();
        let snap = CanvasSnapshot {
            grid: &grid,
            camera: &camera,
            viewport_width: 128,
            show_grid_lines: false,
        };
        assert!(snap.grid_lines().is_empty());
        assert_eq!(snap.cell_size(), 2.0);
    }

    #[test]
    fn rendering_does_not_mutate_canvas_state() {
        let mut canvas = crate::canvas::PixelCanvas::new();
        canvas.toggle(1, 1);
        let before = canvas.grid().clone();
        let mut r = Recorder::default();
        r.render(&canvas.snapshot(640, true));
        assert_eq!(canvas.grid(), &before);
        assert!(canvas.camera().is_identity());
        assert_eq!(r.lit.len(), 1);
    }
}
