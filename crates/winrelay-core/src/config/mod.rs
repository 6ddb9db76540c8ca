mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::controller::{ControllerSettings, DEFAULT_TITLE};
use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration for winrelay.
///
/// Loaded from `~/.config/winrelay/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which window to control.
    pub window: WindowConfig,
    /// Commands the launched application may use.
    pub permissions: PermissionsConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Target window settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Exact title of the window to control. Also the title written
    /// back when the window is restored.
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
        }
    }
}

/// Opt-in switches for commands that change what the user sees.
///
/// Both default to `false`: a launched application cannot move or
/// rename its window until the user allows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Allows `SetWindow`.
    pub can_move_window: bool,
    /// Allows `SetWindowTitle`.
    pub can_set_window_title: bool,
}

impl Config {
    /// Normalizes loaded values.
    ///
    /// A blank window title falls back to the default title, since it
    /// would match untitled windows. Any other title is kept verbatim,
    /// surrounding spaces included, because discovery matches exactly.
    pub fn validate(&mut self) {
        if self.window.title.trim().is_empty() {
            self.window.title = DEFAULT_TITLE.into();
        }
    }

    /// Projects the window and permission sections into controller settings.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            title: self.window.title.clone(),
            can_move_window: self.permissions.can_move_window,
            can_set_window_title: self.permissions.can_set_window_title,
        }
    }
}
