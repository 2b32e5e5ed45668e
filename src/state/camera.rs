// Pan/zoom transform between screen pixels and grid cells
use crate::model::GRID_SIZE;

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl Camera {
    /// Side of one cell in unscaled screen pixels. Integer division: remainder pixels at the
    /// right/bottom edge belong to no cell.
    pub fn cell_size(viewport_width: u32) -> u32 {
        viewport_width / GRID_SIZE as u32
    }

    /// Maps a pointer position to a cell index. The result may lie outside the grid; callers
    /// bounds-check it. `None` only when the viewport is too narrow to hold a single pixel per cell.
    pub fn screen_to_cell(&self, px: f64, py: f64, viewport_width: u32) -> Option<(i64, i64)> {
        let cell = Self::cell_size(viewport_width);
        if cell == 0 {
            return None;
        }
        let span = cell as f64 * self.scale;
        let cx = ((px - self.translate_x) / span).floor() as i64;
        let cy = ((py - self.translate_y) / span).floor() as i64;
        Some((cx, cy))
    }

    pub fn apply_scale(&mut self, factor: f64) {
        let next = self.scale * factor;
        // NaN from a degenerate gesture keeps the old scale
        if next.is_nan() {
            return;
        }
        self.scale = next.clamp(MIN_SCALE, MAX_SCALE);
    }

    /// Scroll distances are previous-minus-current, so subtracting moves the content with the finger.
    pub fn apply_pan(&mut self, dx: f64, dy: f64) {
        self.translate_x -= dx;
        self.translate_y -= dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_origin(cam: &Camera, cx: usize, cy: usize, width: u32) -> (f64, f64) {
        let span = Camera::cell_size(width) as f64 * cam.scale;
        (
            cx as f64 * span + cam.translate_x,
            cy as f64 * span + cam.translate_y,
        )
    }

    #[test]
    fn scale_stays_clamped() {
        let mut cam = Camera::default();
        for f in [0.0, -3.0, 0.5, 2.0, 100.0, f64::INFINITY, f64::NEG_INFINITY, 1e-9, 7.5] {
            cam.apply_scale(f);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&cam.scale), "factor {f}");
        }
        cam.reset();
        cam.apply_scale(3.0);
        assert_eq!(cam.scale, 3.0);
        cam.apply_scale(10.0);
        assert_eq!(cam.scale, MAX_SCALE);
        cam.apply_scale(f64::NAN);
        assert_eq!(cam.scale, MAX_SCALE);
    }

    #[test]
    fn reset_restores_identity() {
        let mut cam = Camera::default();
        cam.apply_scale(4.0);
        cam.apply_pan(12.0, -7.5);
        assert!(!cam.is_identity());
        cam.reset();
        assert!(cam.is_identity());
        assert_eq!(cam.scale, 1.0);
        assert_eq!((cam.translate_x, cam.translate_y), (0.0, 0.0));
    }

    #[test]
    fn pan_subtracts_scroll_distance() {
        let mut cam = Camera::default();
        cam.apply_pan(10.0, 4.0);
        cam.apply_pan(-2.0, 1.0);
        assert_eq!((cam.translate_x, cam.translate_y), (-8.0, -5.0));
    }

    #[test]
    fn screen_to_cell_inverts_cell_origin_at_identity() {
        let cam = Camera::default();
        for width in [64u32, 128, 640, 1024] {
            for (cx, cy) in [(0, 0), (1, 0), (0, 63), (31, 17), (63, 63)] {
                let (sx, sy) = cell_origin(&cam, cx, cy, width);
                assert_eq!(
                    cam.screen_to_cell(sx, sy, width),
                    Some((cx as i64, cy as i64))
                );
            }
        }
    }

    #[test]
    fn screen_to_cell_with_transform() {
        let cam = Camera {
            scale: 2.0,
            translate_x: -100.0,
            translate_y: 50.0,
        };
        // cell size 10, span 20
        assert_eq!(cam.screen_to_cell(0.0, 50.0, 640), Some((5, 0)));
        assert_eq!(cam.screen_to_cell(-100.0, 49.0, 640), Some((0, -1)));
        let (sx, sy) = cell_origin(&cam, 7, 3, 640);
        assert_eq!(cam.screen_to_cell(sx, sy, 640), Some((7, 3)));
    }

    #[test]
    fn truncated_cell_size_leaves_dead_strip() {
        let cam = Camera::default();
        // 100 / 64 = 1, so x = 64..100 lands past the last cell
        assert_eq!(Camera::cell_size(100), 1);
        assert_eq!(cam.screen_to_cell(80.0, 0.0, 100), Some((80, 0)));
        assert_eq!(cam.screen_to_cell(5.0, 5.0, 63), None);
    }
}
