// Touch/pinch gesture tracking for the canvas host.
// Raw touch and mouse samples come in, normalized InputEvents come out.
use std::collections::VecDeque;

use crate::input::{InputEvent, InputSource};

/// Max gap between two taps, in ms.
pub const DOUBLE_TAP_MS: f64 = 300.0;
/// Max distance between two taps, in px.
pub const DOUBLE_TAP_SLOP: f64 = 24.0;

#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub pinch: bool,
    pub last_pinch_dist: f64,
    pub last_touch_x: f64,
    pub last_touch_y: f64,
    pub last_tap: Option<(f64, f64, f64)>,
    pending: VecDeque<InputEvent>,
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

impl TouchState {
    /// First contact of a single pointer (touchstart with one touch, or mousedown).
    pub fn begin(&mut self, x: f64, y: f64, now_ms: f64) {
        if let Some((tx, ty, t)) = self.last_tap {
            if now_ms - t <= DOUBLE_TAP_MS && distance((tx, ty), (x, y)) <= DOUBLE_TAP_SLOP {
                self.pending.push_back(InputEvent::DoubleTap);
                self.last_tap = None;
            } else {
                self.last_tap = Some((x, y, now_ms));
            }
        } else {
            self.last_tap = Some((x, y, now_ms));
        }
        self.single_active = true;
        self.pinch = false;
        self.last_touch_x = x;
        self.last_touch_y = y;
        self.pending.push_back(InputEvent::PointerDown { x, y });
    }

    /// Single pointer moved while down.
    pub fn drag(&mut self, x: f64, y: f64) {
        if !self.single_active {
            return;
        }
        let dx = self.last_touch_x - x;
        let dy = self.last_touch_y - y;
        self.last_touch_x = x;
        self.last_touch_y = y;
        self.pending.push_back(InputEvent::PointerMove { x, y });
        if dx != 0.0 || dy != 0.0 {
            self.pending.push_back(InputEvent::Scroll { dx, dy });
        }
    }

    /// Two fingers down; any single-pointer stroke ends here.
    pub fn begin_pinch(&mut self, a: (f64, f64), b: (f64, f64)) {
        if self.single_active {
            self.pending.push_back(InputEvent::PointerUp {
                x: self.last_touch_x,
                y: self.last_touch_y,
            });
        }
        self.single_active = false;
        self.pinch = true;
        self.last_tap = None;
        self.last_pinch_dist = distance(a, b);
    }

    pub fn pinch_move(&mut self, a: (f64, f64), b: (f64, f64)) {
        if !self.pinch {
            self.begin_pinch(a, b);
            return;
        }
        let dist = distance(a, b);
        if self.last_pinch_dist > 0.0 && dist > 0.0 {
            self.pending.push_back(InputEvent::Pinch {
                factor: dist / self.last_pinch_dist,
            });
        }
        self.last_pinch_dist = dist;
    }

    /// Mouse wheel; negative delta zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        self.pending.push_back(InputEvent::Pinch {
            factor: (-delta_y * 0.001).exp(),
        });
    }

    /// All pointers lifted.
    pub fn end(&mut self) {
        if self.single_active {
            self.pending.push_back(InputEvent::PointerUp {
                x: self.last_touch_x,
                y: self.last_touch_y,
            });
        }
        self.single_active = false;
        self.pinch = false;
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl InputSource for TouchState {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(ts: &mut TouchState) -> Vec<InputEvent> {
        std::iter::from_fn(|| ts.next_event()).collect()
    }

    #[test]
    fn single_stroke_emits_pointer_and_scroll() {
        let mut ts = TouchState::default();
        ts.begin(10.0, 10.0, 0.0);
        ts.drag(14.0, 7.0);
        ts.end();
        assert_eq!(
            drain(&mut ts),
            vec![
                InputEvent::PointerDown { x: 10.0, y: 10.0 },
                InputEvent::PointerMove { x: 14.0, y: 7.0 },
                InputEvent::Scroll { dx: -4.0, dy: 3.0 },
                InputEvent::PointerUp { x: 14.0, y: 7.0 },
            ]
        );
        assert!(!ts.has_pending());
    }

    #[test]
    fn quick_second_tap_is_double_tap() {
        let mut ts = TouchState::default();
        ts.begin(50.0, 50.0, 1000.0);
        ts.end();
        ts.begin(55.0, 52.0, 1200.0);
        ts.end();
        let events = drain(&mut ts);
        assert_eq!(events.iter().filter(|e| **e == InputEvent::DoubleTap).count(), 1);
        // a third tap starts a new sequence
        ts.begin(55.0, 52.0, 1300.0);
        assert!(!drain(&mut ts).contains(&InputEvent::DoubleTap));
    }

    #[test]
    fn slow_or_distant_taps_are_not_double_taps() {
        let mut ts = TouchState::default();
        ts.begin(50.0, 50.0, 0.0);
        ts.end();
        ts.begin(50.0, 50.0, 1000.0);
        ts.end();
        ts.begin(200.0, 50.0, 1100.0);
        ts.end();
        assert!(!drain(&mut ts).contains(&InputEvent::DoubleTap));
    }

    #[test]
    fn pinch_reports_distance_ratio() {
        let mut ts = TouchState::default();
        ts.begin_pinch((0.0, 0.0), (100.0, 0.0));
        ts.pinch_move((0.0, 0.0), (150.0, 0.0));
        ts.pinch_move((0.0, 0.0), (75.0, 0.0));
        ts.end();
        assert_eq!(
            drain(&mut ts),
            vec![
                InputEvent::Pinch { factor: 1.5 },
                InputEvent::Pinch { factor: 0.5 },
            ]
        );
    }

    #[test]
    fn pinch_ends_single_stroke() {
        let mut ts = TouchState::default();
        ts.begin(1.0, 2.0, 0.0);
        ts.begin_pinch((0.0, 0.0), (10.0, 0.0));
        let events = drain(&mut ts);
        assert_eq!(events.last(), Some(&InputEvent::PointerUp { x: 1.0, y: 2.0 }));
        ts.drag(5.0, 5.0);
        assert!(!ts.has_pending());
    }

    #[test]
    fn wheel_zooms_in_on_negative_delta() {
        let mut ts = TouchState::default();
        ts.wheel(-100.0);
        ts.wheel(0.0);
        match drain(&mut ts).as_slice() {
            [InputEvent::Pinch { factor: a }, InputEvent::Pinch { factor: b }] => {
                assert!(*a > 1.0);
                assert_eq!(*b, 1.0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
