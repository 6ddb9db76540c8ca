use winrelay_core::visual::LayeredAttributes;
use winrelay_core::{Rect, WindowHandle, WindowResult};

use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetWindowLongPtrW, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    IsWindowVisible, LAYERED_WINDOW_ATTRIBUTES_FLAGS, LWA_COLORKEY, MoveWindow,
    SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowTextW, WS_EX_LAYERED,
};
use windows::core::HSTRING;

use crate::dpi;

/// Only the color key is applied. The alpha byte is passed along but
/// Windows ignores it without `LWA_ALPHA`, so keyed pixels turn
/// see-through while the rest of the window stays opaque.
const LAYERED_FLAGS: LAYERED_WINDOW_ATTRIBUTES_FLAGS = LWA_COLORKEY;

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle: a number that identifies a window to the OS.
/// The controlled window belongs to another process, so every method is a
/// single cross-process call with no cached state.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a `Window` from a platform-agnostic handle.
    pub fn from_handle(handle: WindowHandle) -> Self {
        Self {
            hwnd: HWND(handle.raw() as *mut _),
        }
    }

    /// Returns the platform-agnostic handle for this window.
    pub fn handle(&self) -> WindowHandle {
        WindowHandle::from_raw(self.hwnd.0 as usize)
    }

    /// Returns the window title, or an empty string if it has none.
    pub fn title(&self) -> String {
        // SAFETY: GetWindowTextLengthW and GetWindowTextW read the window
        // text without modifying state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    /// Returns whether this window is currently visible.
    pub fn is_visible(&self) -> bool {
        // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    /// Returns the outer window rectangle, invisible borders included.
    ///
    /// `MoveWindow` takes the same outer coordinates, so restoring this
    /// rectangle puts the window back exactly where it was.
    pub fn rect(&self) -> WindowResult<Rect> {
        let mut rect = RECT::default();
        // SAFETY: GetWindowRect fills a caller-owned RECT.
        unsafe { GetWindowRect(self.hwnd, &mut rect)? };
        Ok(Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom))
    }

    /// Moves and resizes the window without forcing a repaint.
    pub fn move_resize(&self, rect: &Rect) -> WindowResult<()> {
        // SAFETY: MoveWindow with a valid HWND is safe; a stale handle
        // makes the call fail, which is reported as an error.
        unsafe { MoveWindow(self.hwnd, rect.x, rect.y, rect.width, rect.height, false)? };
        Ok(())
    }

    /// Sets the caption text.
    ///
    /// For a top-level window of another process this sends `WM_SETTEXT`
    /// to that window, like the app's own title change would.
    pub fn set_text(&self, text: &str) -> WindowResult<()> {
        // SAFETY: SetWindowTextW copies the string before returning.
        unsafe { SetWindowTextW(self.hwnd, &HSTRING::from(text))? };
        Ok(())
    }

    /// Turns the `WS_EX_LAYERED` bit on or off, leaving other extended
    /// styles untouched, and applies the color key when on.
    pub fn set_layered(&self, attributes: Option<LayeredAttributes>) -> WindowResult<()> {
        // SAFETY: Get/SetWindowLongPtrW read and write the extended style
        // of a valid HWND.
        unsafe {
            let ex_style = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32;
            let wanted = match attributes {
                Some(_) => ex_style | WS_EX_LAYERED.0,
                None => ex_style & !WS_EX_LAYERED.0,
            };
            if wanted != ex_style {
                SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, wanted as isize);
            }
        }

        let Some(attributes) = attributes else {
            return Ok(());
        };

        // SAFETY: the window now has WS_EX_LAYERED, which
        // SetLayeredWindowAttributes requires.
        unsafe {
            SetLayeredWindowAttributes(
                self.hwnd,
                colorref(attributes.color_key),
                attributes.alpha,
                LAYERED_FLAGS,
            )?
        };
        Ok(())
    }

    /// DPI of the monitor the window is on.
    pub fn dpi(&self) -> u32 {
        dpi::window_dpi(self.hwnd)
    }
}

/// Converts `0xRRGGBB` to a Win32 `COLORREF` (`0x00BBGGRR`).
fn colorref(rgb: u32) -> COLORREF {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;
    COLORREF((b << 16) | (g << 8) | r)
}

#[cfg(test)]
mod tests {
    use windows::Win32::UI::WindowsAndMessaging::LWA_ALPHA;

    use super::*;

    #[test]
    fn layered_flags_key_color_without_whole_window_alpha() {
        assert_eq!(LAYERED_FLAGS, LWA_COLORKEY);
        assert_eq!(LAYERED_FLAGS.0 & LWA_ALPHA.0, 0);
    }

    #[test]
    fn colorref_swaps_red_and_blue() {
        assert_eq!(colorref(0xFF0000), COLORREF(0x0000FF));
        assert_eq!(colorref(0x00FF00), COLORREF(0x00FF00));
        assert_eq!(colorref(0x123456), COLORREF(0x563412));
    }

    #[test]
    fn handle_roundtrips_through_window() {
        let handle = WindowHandle::from_raw(0x1234);

        assert_eq!(Window::from_handle(handle).handle(), handle);
    }
}
