//! User settings, persisted as JSON in localStorage.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::model::Mode;
use crate::util::clog;

pub const SETTINGS_KEY: &str = "plc_settings";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw separator lines between cells.
    pub show_grid_lines: bool,
    /// Emit a pixel command for every toggle instead of waiting for "Send".
    pub real_time: bool,
    pub start_in_drag_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_grid_lines: true,
            real_time: false,
            start_in_drag_mode: false,
        }
    }
}

pub enum SettingsAction {
    ToggleGridLines,
    ToggleRealTime,
    ToggleStartInDrag,
    Replace(Settings),
    Reset,
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Stored settings, or defaults when absent or unreadable.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(Self::from_json) {
            Some(Ok(s)) => s,
            Some(Err(e)) => {
                clog(&format!("settings: ignoring stored value ({})", e));
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn initial_mode(&self) -> Mode {
        if self.start_in_drag_mode {
            Mode::Drag
        } else {
            Mode::Paint
        }
    }

    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(SETTINGS_KEY).ok().flatten());
        Self::parse_or_default(raw.as_deref())
    }

    pub fn save(&self) {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(s) = self.to_json() {
                    let _ = store.set_item(SETTINGS_KEY, &s);
                }
            }
        }
    }

    pub fn clear_stored() {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                let _ = store.remove_item(SETTINGS_KEY);
            }
        }
    }
}

impl Reducible for Settings {
    type Action = SettingsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SettingsAction::*;
        let mut new = (*self).clone();
        match action {
            ToggleGridLines => new.show_grid_lines = !new.show_grid_lines,
            ToggleRealTime => new.real_time = !new.real_time,
            ToggleStartInDrag => new.start_in_drag_mode = !new.start_in_drag_mode,
            Replace(s) => new = s,
            Reset => new = Settings::default(),
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}
