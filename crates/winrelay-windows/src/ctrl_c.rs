//! Console control handler using `SetConsoleCtrlHandler`.
//!
//! Lets the host restore the window when the user presses Ctrl+C or
//! Ctrl+Break instead of dying with the window left modified.

use std::sync::OnceLock;

use winrelay_core::WindowResult;

use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

type Callback = Box<dyn Fn() + Send + Sync>;

/// Written once by `set_handler`, read by the console callback.
static CALLBACK: OnceLock<Callback> = OnceLock::new();

/// Registers `on_interrupt` to run on Ctrl+C / Ctrl+Break.
///
/// Can only be registered once per process.
pub fn set_handler(on_interrupt: impl Fn() + Send + Sync + 'static) -> WindowResult<()> {
    CALLBACK
        .set(Box::new(on_interrupt))
        .map_err(|_| "console handler already registered")?;

    // SAFETY: handler is a plain extern "system" fn that only reads CALLBACK.
    unsafe { SetConsoleCtrlHandler(Some(handler), true)? };
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    let interrupt = ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT;
    match CALLBACK.get() {
        Some(callback) if interrupt => {
            callback();
            windows::core::BOOL(1)
        }
        _ => windows::core::BOOL(0),
    }
}
