//! Windows platform implementation for winrelay.
//!
//! Everything here calls Win32 and is compiled on Windows only.
#![cfg(windows)]

/// Console Ctrl+C / Ctrl+Break handling.
pub mod ctrl_c;

/// DPI awareness and DPI queries.
pub mod dpi;

/// Win32 top-level window enumeration and title lookup.
pub mod enumerate;

/// `WindowGateway` implementation over Win32.
pub mod gateway;

/// Host loop driving the window controller.
pub mod host;

/// IPC via Named Pipes.
pub mod ipc;

/// Primary display metrics.
pub mod monitor;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use enumerate::enumerate_windows;
pub use gateway::Win32Gateway;
pub use window::Window;
