//! Normalized input records fed to the canvas. Hosts translate their toolkit's events
//! into these; the canvas never sees DOM types.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Pinch zoom; `factor` multiplies the current scale.
    Pinch { factor: f64 },
    /// Drag scroll; distance is previous position minus current position.
    Scroll { dx: f64, dy: f64 },
    DoubleTap,
}

pub trait InputSource {
    fn next_event(&mut self) -> Option<InputEvent>;
}

impl InputSource for VecDeque<InputEvent> {
    fn next_event(&mut self) -> Option<InputEvent> {
        self.pop_front()
    }
}
