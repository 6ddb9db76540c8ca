pub mod config;
pub mod controller;
pub mod ipc;
pub mod log;
pub mod payload;
pub mod rect;
pub mod scale;
pub mod visual;
pub mod window;

pub use controller::{ControllerSettings, ControllerStatus, WindowController};
pub use ipc::{Command, PIPE_NAME, Response};
pub use payload::{DecodeError, Message, WindowCommand};
pub use rect::Rect;
pub use window::{DisplayMetrics, WindowGateway, WindowHandle, WindowResult};
