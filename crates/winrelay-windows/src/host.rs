//! The host: owns the window controller and feeds it requests.
//!
//! The pipe listener runs on its own thread and forwards each request
//! over a channel; the controller is only ever touched from the thread
//! that called [`run`], one request at a time.

use std::sync::mpsc;
use std::thread;

use winrelay_core::config::{self, Config};
use winrelay_core::ipc::{Command, Response};
use winrelay_core::{WindowController, WindowGateway, WindowResult, log_error, log_info, log_warn};

use crate::gateway::Win32Gateway;
use crate::ipc::{self, PipeServer};
use crate::{ctrl_c, dpi};

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Replaces `window.title`.
    pub title: Option<String>,
    /// Forces `permissions.can_move_window` on.
    pub allow_move: bool,
    /// Forces `permissions.can_set_window_title` on.
    pub allow_title: bool,
}

impl HostOptions {
    fn apply(&self, config: &mut Config) {
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }
        config.permissions.can_move_window |= self.allow_move;
        config.permissions.can_set_window_title |= self.allow_title;
        config.validate();
    }
}

enum HostMsg {
    /// A pipe request with the channel to send its response on.
    Request(Command, mpsc::Sender<Response>),
    /// Ctrl+C / Ctrl+Break.
    Interrupt,
}

/// Runs the host until a `Stop` request or Ctrl+C.
///
/// The window is restored to its baseline before this returns.
pub fn run(options: &HostOptions) -> WindowResult<()> {
    dpi::enable_dpi_awareness();

    if ipc::is_host_running() {
        return Err("another winrelay host is already running".into());
    }

    let mut config = config::load();
    options.apply(&mut config);
    winrelay_core::log::init(&config.logging);
    log_info!(
        "Host started (PID: {}), title={:?}, can_move_window={}, can_set_window_title={}",
        std::process::id(),
        config.window.title,
        config.permissions.can_move_window,
        config.permissions.can_set_window_title
    );

    let (tx, rx) = mpsc::channel::<HostMsg>();

    let interrupt_tx = tx.clone();
    ctrl_c::set_handler(move || {
        let _ = interrupt_tx.send(HostMsg::Interrupt);
    })?;

    thread::spawn(move || pipe_loop(tx));

    let mut controller = WindowController::new(Win32Gateway, config.controller_settings());
    eprintln!(
        "winrelay host started, waiting for window {:?}.",
        controller.settings().title
    );

    for msg in rx {
        match msg {
            HostMsg::Request(command, reply) => {
                let (response, stop) = handle_request(&mut controller, command);
                let _ = reply.send(response);
                if stop {
                    break;
                }
            }
            HostMsg::Interrupt => {
                log_info!("Interrupted, shutting down");
                break;
            }
        }
    }

    controller.dispose();
    log_info!("Host stopped");
    Ok(())
}

/// Applies one request to the controller.
///
/// Returns the response and whether the host should stop.
fn handle_request<G: WindowGateway>(
    controller: &mut WindowController<G>,
    command: Command,
) -> (Response, bool) {
    match command {
        Command::Stop => {
            log_info!("Stop requested");
            (Response::ok_with_message("Host stopping"), true)
        }
        Command::Status => (Response::ok_with_message(controller.status().summary()), false),
        Command::Relay { message } => {
            controller.handle_message(&message);
            (Response::ok(), false)
        }
    }
}

/// Accepts pipe connections in a loop and forwards requests to the
/// controller thread. Returns once the host stops listening.
fn pipe_loop(tx: mpsc::Sender<HostMsg>) {
    loop {
        let server = match PipeServer::create() {
            Ok(s) => s,
            Err(e) => {
                log_error!("Failed to create pipe: {e}");
                return;
            }
        };

        let line = match server.accept_line() {
            Ok(line) => line,
            Err(e) => {
                log_warn!("Error reading request: {e}");
                continue;
            }
        };

        let command: Command = match serde_json::from_str(line.trim()) {
            Ok(command) => command,
            Err(e) => {
                log_warn!("Rejecting malformed request: {e}");
                let _ = server.respond(&Response::error(format!("malformed request: {e}")));
                continue;
            }
        };

        let is_stop = matches!(command, Command::Stop);
        let (reply_tx, reply_rx) = mpsc::channel();
        if tx.send(HostMsg::Request(command, reply_tx)).is_err() {
            return;
        }
        if let Ok(response) = reply_rx.recv() {
            let _ = server.respond(&response);
        }
        if is_stop {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use winrelay_core::ipc::ResponseStatus;
    use winrelay_core::visual::LayeredAttributes;
    use winrelay_core::{ControllerSettings, DisplayMetrics, Message, Rect, WindowHandle};

    use super::*;

    /// A gateway that never finds a window.
    struct EmptyDesktop;

    impl WindowGateway for EmptyDesktop {
        fn find_by_title(&self, _title: &str) -> Option<WindowHandle> {
            None
        }

        fn rect(&self, _window: WindowHandle) -> WindowResult<Rect> {
            Err("no window".into())
        }

        fn move_resize(&self, _window: WindowHandle, _rect: &Rect) -> WindowResult<()> {
            Err("no window".into())
        }

        fn set_text(&self, _window: WindowHandle, _text: &str) -> WindowResult<()> {
            Err("no window".into())
        }

        fn set_layered(
            &self,
            _window: WindowHandle,
            _attributes: Option<LayeredAttributes>,
        ) -> WindowResult<()> {
            Err("no window".into())
        }

        fn display_metrics(&self, _window: WindowHandle) -> WindowResult<DisplayMetrics> {
            Err("no window".into())
        }
    }

    fn controller() -> WindowController<EmptyDesktop> {
        WindowController::new(EmptyDesktop, ControllerSettings::default())
    }

    #[test]
    fn stop_request_stops_host() {
        let (response, stop) = handle_request(&mut controller(), Command::Stop);

        assert!(stop);
        assert_eq!(response.status, ResponseStatus::Ok);
    }

    #[test]
    fn status_reports_missing_window() {
        let (response, stop) = handle_request(&mut controller(), Command::Status);

        assert!(!stop);
        assert_eq!(response.message.as_deref(), Some("no window attached"));
    }

    #[test]
    fn relay_is_acknowledged_even_without_window() {
        let command = Command::Relay {
            message: Message::new("RestoreWindowState", None),
        };

        let (response, stop) = handle_request(&mut controller(), command);

        assert!(!stop);
        assert_eq!(response.status, ResponseStatus::Ok);
    }

    #[test]
    fn blank_title_option_falls_back_to_default() {
        let mut config = Config::default();
        let options = HostOptions {
            title: Some("  ".into()),
            ..Default::default()
        };

        options.apply(&mut config);

        assert_eq!(config.window.title, "Roblox");
    }

    #[test]
    fn options_override_config() {
        // Arrange
        let mut config = Config::default();
        let options = HostOptions {
            title: Some(" Studio ".into()),
            allow_move: true,
            allow_title: false,
        };

        // Act
        options.apply(&mut config);

        // Assert
        assert_eq!(config.window.title, " Studio ");
        assert!(config.permissions.can_move_window);
        assert!(!config.permissions.can_set_window_title);
    }
}
