use crate::Rect;
use crate::visual::LayeredAttributes;

/// A boxed error type for platform window operations.
///
/// Any error type that implements the `Error` trait can be boxed into this.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Opaque identifier of the controlled top-level window.
///
/// Wraps the raw pointer-sized handle value so the core never depends
/// on a platform crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(usize);

impl WindowHandle {
    pub const fn from_raw(handle: usize) -> Self {
        Self(handle)
    }

    pub const fn raw(self) -> usize {
        self.0
    }
}

/// Display information captured once, when the window is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMetrics {
    /// Primary display width in 96-DPI logical units.
    pub width: u32,
    /// Primary display height in 96-DPI logical units.
    pub height: u32,
    /// DPI of the target window.
    pub dpi: u32,
}

/// Capability interface over the host windowing system.
///
/// Each primitive is a single blocking call with no retry. The Windows
/// implementation lives in `winrelay-windows`; tests substitute a double
/// that records calls instead of touching real windows.
pub trait WindowGateway {
    /// Returns the first visible top-level window whose title is exactly `title`.
    fn find_by_title(&self, title: &str) -> Option<WindowHandle>;

    /// Reads the window's outer rectangle.
    fn rect(&self, window: WindowHandle) -> WindowResult<Rect>;

    /// Moves and resizes the window in one call.
    fn move_resize(&self, window: WindowHandle, rect: &Rect) -> WindowResult<()>;

    /// Replaces the window's caption text.
    fn set_text(&self, window: WindowHandle, text: &str) -> WindowResult<()>;

    /// Enables the layered style with the given attributes, or clears it
    /// when `attributes` is `None`.
    fn set_layered(
        &self,
        window: WindowHandle,
        attributes: Option<LayeredAttributes>,
    ) -> WindowResult<()>;

    /// Returns the primary display size and the window's DPI.
    fn display_metrics(&self, window: WindowHandle) -> WindowResult<DisplayMetrics>;
}
