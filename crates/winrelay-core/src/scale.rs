//! Window geometry cache and virtual-to-pixel scaling.
//!
//! Incoming coordinates are expressed in virtual units against a
//! [`ScaleReference`] (1280x720 unless the client changes it). They are
//! converted to pixels using the effective screen size captured when
//! the window was discovered.

use crate::Rect;
use crate::visual::VisualState;
use crate::window::DisplayMetrics;

/// DPI at which one logical unit equals one pixel.
pub const REFERENCE_DPI: u32 = 96;

/// Virtual resolution used until a client supplies its own.
pub const DEFAULT_SCALE_REFERENCE: ScaleReference = ScaleReference {
    width: 1280.0,
    height: 720.0,
};

/// Virtual resolution against which incoming coordinates are interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleReference {
    pub width: f64,
    pub height: f64,
}

impl Default for ScaleReference {
    fn default() -> Self {
        DEFAULT_SCALE_REFERENCE
    }
}

/// Primary display size adjusted by the window's DPI scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    /// Computes `display * (dpi / 96)`. A DPI of zero is treated as 96.
    pub fn effective(metrics: &DisplayMetrics) -> Self {
        let dpi = if metrics.dpi == 0 {
            REFERENCE_DPI
        } else {
            metrics.dpi
        };
        let factor = f64::from(dpi) / f64::from(REFERENCE_DPI);
        Self {
            width: f64::from(metrics.width) * factor,
            height: f64::from(metrics.height) * factor,
        }
    }
}

/// A partial geometry change in virtual units.
///
/// `None` means "not supplied": the cached value is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub scale_width: Option<f64>,
    pub scale_height: Option<f64>,
}

/// Authoritative cached state of the controlled window.
///
/// The OS window is never read back after discovery, so this is the
/// only source of truth for the current position.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCache {
    current: Rect,
    baseline: Rect,
    scale: ScaleReference,
    screen: ScreenSize,
    visual: VisualState,
}

impl GeometryCache {
    /// Creates the cache for a freshly discovered window. The baseline
    /// starts equal to the discovered rectangle.
    pub fn discovered(rect: Rect, screen: ScreenSize) -> Self {
        Self {
            current: rect,
            baseline: rect,
            scale: ScaleReference::default(),
            screen,
            visual: VisualState::default(),
        }
    }

    pub fn current(&self) -> Rect {
        self.current
    }

    pub fn baseline(&self) -> Rect {
        self.baseline
    }

    pub fn scale(&self) -> ScaleReference {
        self.scale
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn visual(&self) -> VisualState {
        self.visual
    }

    pub fn visual_mut(&mut self) -> &mut VisualState {
        &mut self.visual
    }

    /// Applies a partial update and returns the full rectangle to move to.
    ///
    /// A supplied scale reference replaces the current one before any
    /// coordinate is converted. Converted values truncate toward zero.
    pub fn apply_scaled_update(&mut self, update: &GeometryUpdate) -> Rect {
        if let Some(width) = update.scale_width {
            self.scale.width = width;
        }
        if let Some(height) = update.scale_height {
            self.scale.height = height;
        }

        let scale_x = self.screen.width / self.scale.width;
        let scale_y = self.screen.height / self.scale.height;

        if let Some(x) = update.x {
            self.current.x = to_pixels(x, scale_x);
        }
        if let Some(y) = update.y {
            self.current.y = to_pixels(y, scale_y);
        }
        if let Some(width) = update.width {
            self.current.width = to_pixels(width, scale_x);
        }
        if let Some(height) = update.height {
            self.current.height = to_pixels(height, scale_y);
        }

        self.current
    }

    /// Makes the current rectangle the new restore point.
    pub fn save_baseline(&mut self) {
        self.baseline = self.current;
    }

    /// Resets rectangle, scale reference, and visual state to the baseline
    /// and returns the rectangle to move to.
    pub fn restore(&mut self) -> Rect {
        self.current = self.baseline;
        self.scale = ScaleReference::default();
        self.visual = VisualState::default();
        self.current
    }
}

fn to_pixels(value: f64, scale: f64) -> i32 {
    (value * scale).trunc() as i32
}
