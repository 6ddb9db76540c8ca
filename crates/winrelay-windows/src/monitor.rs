use winrelay_core::WindowResult;
use winrelay_core::scale::REFERENCE_DPI;

use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use crate::dpi;

/// Returns the primary display size in 96-DPI logical units.
///
/// The process is per-monitor DPI aware, so `GetSystemMetrics` reports
/// physical pixels; dividing by the system scale factor yields the
/// logical size the window's DPI is later applied to.
pub fn primary_logical_size() -> WindowResult<(u32, u32)> {
    // SAFETY: GetSystemMetrics is a simple query.
    let (width, height) =
        unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    if width <= 0 || height <= 0 {
        return Err("Failed to get primary display size".into());
    }

    let system_dpi = dpi::system_dpi();
    Ok((
        to_logical(width as u32, system_dpi),
        to_logical(height as u32, system_dpi),
    ))
}

fn to_logical(pixels: u32, dpi: u32) -> u32 {
    (u64::from(pixels) * u64::from(REFERENCE_DPI) / u64::from(dpi)) as u32
}
