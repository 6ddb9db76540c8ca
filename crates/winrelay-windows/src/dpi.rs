use windows::Win32::Foundation::HWND;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForSystem, GetDpiForWindow,
    SetProcessDpiAwarenessContext,
};

use winrelay_core::scale::REFERENCE_DPI;

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows virtualizes the coordinates we read and write
/// for the target window based on our own DPI, not the window's. Must be
/// called once at process startup, before any other Win32 call.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// DPI of the given window, or 96 if the query fails.
pub fn window_dpi(hwnd: HWND) -> u32 {
    // SAFETY: GetDpiForWindow returns 0 for an invalid handle.
    let dpi = unsafe { GetDpiForWindow(hwnd) };
    if dpi == 0 { REFERENCE_DPI } else { dpi }
}

/// System DPI (the primary monitor's DPI at logon).
pub fn system_dpi() -> u32 {
    // SAFETY: GetDpiForSystem has no preconditions.
    let dpi = unsafe { GetDpiForSystem() };
    if dpi == 0 { REFERENCE_DPI } else { dpi }
}
