//! Remote control of one externally owned top-level window.
//!
//! The controller lazily locates the window by title, caches its
//! geometry, and turns inbound [`Message`]s into gateway calls. It is
//! driven from a single thread: every message is handled to completion
//! before the next one.

use crate::payload::{self, GeometryRequest, Message, WindowCommand};
use crate::scale::{GeometryCache, ScaleReference, ScreenSize};
use crate::visual::VisualState;
use crate::window::{WindowGateway, WindowHandle, WindowResult};
use crate::{Rect, log_debug, log_info, log_warn};

/// Title searched for and restored when no other title is configured.
pub const DEFAULT_TITLE: &str = "Roblox";

/// Settings the host passes in: which window to control and which
/// commands the user allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Exact title of the window to control; also the restore title.
    pub title: String,
    /// Allows `SetWindow`.
    pub can_move_window: bool,
    /// Allows `SetWindowTitle`.
    pub can_set_window_title: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            can_move_window: false,
            can_set_window_title: false,
        }
    }
}

/// A read-only snapshot of the controller, for status reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerStatus {
    pub window: Option<WindowHandle>,
    pub current: Option<Rect>,
    pub baseline: Option<Rect>,
    pub scale: ScaleReference,
    pub visual: VisualState,
}

impl ControllerStatus {
    pub fn summary(&self) -> String {
        match (self.window, self.current, self.baseline) {
            (Some(window), Some(current), Some(baseline)) => format!(
                "attached to 0x{:X}, current {current}, baseline {baseline}, scale {}x{}, transparency {}",
                window.raw(),
                self.scale.width,
                self.scale.height,
                self.visual.transparency
            ),
            _ => "no window attached".into(),
        }
    }
}

enum State {
    NoWindow,
    WindowFound {
        handle: WindowHandle,
        cache: GeometryCache,
    },
}

/// Locates the target window and dispatches commands to it.
///
/// Dropping the controller restores the window to its baseline (once).
pub struct WindowController<G: WindowGateway> {
    gateway: G,
    settings: ControllerSettings,
    state: State,
    disposed: bool,
}

impl<G: WindowGateway> WindowController<G> {
    /// Creates a controller and makes a first attempt to locate the window.
    pub fn new(gateway: G, settings: ControllerSettings) -> Self {
        let mut controller = Self {
            gateway,
            settings,
            state: State::NoWindow,
            disposed: false,
        };
        controller.locate();
        controller
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn window(&self) -> Option<WindowHandle> {
        match self.state {
            State::WindowFound { handle, .. } => Some(handle),
            State::NoWindow => None,
        }
    }

    pub fn status(&self) -> ControllerStatus {
        match &self.state {
            State::WindowFound { handle, cache } => ControllerStatus {
                window: Some(*handle),
                current: Some(cache.current()),
                baseline: Some(cache.baseline()),
                scale: cache.scale(),
                visual: cache.visual(),
            },
            State::NoWindow => ControllerStatus {
                window: None,
                current: None,
                baseline: None,
                scale: ScaleReference::default(),
                visual: VisualState::default(),
            },
        }
    }

    /// Tries to find the window if none is held yet.
    ///
    /// Failure is not remembered: the next call searches again.
    pub fn locate(&mut self) -> Option<WindowHandle> {
        if let Some(handle) = self.window() {
            return Some(handle);
        }

        let handle = self.gateway.find_by_title(&self.settings.title)?;
        match self.discover(handle) {
            Ok(cache) => {
                log_info!(
                    "Found window 0x{:X} titled {:?}: rect {}, effective screen {}x{}",
                    handle.raw(),
                    self.settings.title,
                    cache.current(),
                    cache.screen().width,
                    cache.screen().height
                );
                self.state = State::WindowFound { handle, cache };
                Some(handle)
            }
            Err(e) => {
                log_warn!("Found window 0x{:X} but could not read it: {e}", handle.raw());
                None
            }
        }
    }

    fn discover(&self, handle: WindowHandle) -> WindowResult<GeometryCache> {
        let rect = self.gateway.rect(handle)?;
        let metrics = self.gateway.display_metrics(handle)?;
        Ok(GeometryCache::discovered(rect, ScreenSize::effective(&metrics)))
    }

    /// Handles one inbound message.
    ///
    /// Messages arriving before the window is found, unknown commands,
    /// denied commands, and undecodable payloads are dropped without
    /// touching any state.
    pub fn handle_message(&mut self, message: &Message) {
        if self.locate().is_none() {
            log_debug!(
                "No window titled {:?}, dropping {}",
                self.settings.title,
                message.command
            );
            return;
        }
        let Some(command) = WindowCommand::parse(&message.command) else {
            log_debug!("Ignoring unknown command {:?}", message.command);
            return;
        };
        let Some(mut target) = self.target() else {
            return;
        };

        match command {
            WindowCommand::BeginListening | WindowCommand::StopListening => {}
            WindowCommand::Restore => target.restore(),
            WindowCommand::SetGeometry => target.set_geometry(message),
            WindowCommand::SetTitle => target.set_title(message),
            WindowCommand::SaveState => target.save_state(),
            WindowCommand::SetTransparency => target.set_transparency(message),
        }
    }

    /// Restores the window to its baseline. No-op without a window.
    pub fn restore(&mut self) {
        if let Some(mut target) = self.target() {
            target.restore();
        }
    }

    /// Restores the window one final time. Later calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.restore();
    }

    fn target(&mut self) -> Option<Target<'_, G>> {
        match &mut self.state {
            State::WindowFound { handle, cache } => Some(Target {
                gateway: &self.gateway,
                settings: &self.settings,
                handle: *handle,
                cache,
            }),
            State::NoWindow => None,
        }
    }
}

impl<G: WindowGateway> Drop for WindowController<G> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Borrowed view of a found window: the cache plus the calls to make.
struct Target<'a, G: WindowGateway> {
    gateway: &'a G,
    settings: &'a ControllerSettings,
    handle: WindowHandle,
    cache: &'a mut GeometryCache,
}

impl<G: WindowGateway> Target<'_, G> {
    fn restore(&mut self) {
        let rect = self.cache.restore();
        log_info!("Restoring window to {rect}");

        report("move_resize", self.gateway.move_resize(self.handle, &rect));
        report("set_layered", self.gateway.set_layered(self.handle, None));
        report(
            "set_text",
            self.gateway.set_text(self.handle, &self.settings.title),
        );
    }

    fn set_geometry(&mut self, message: &Message) {
        if !self.settings.can_move_window {
            log_debug!("SetWindow is disabled, dropping");
            return;
        }
        let request = match payload::decode_geometry(message.data.as_ref()) {
            Ok(request) => request,
            Err(e) => {
                log_warn!("Failed to parse {} message: {e}", message.command);
                return;
            }
        };

        match request {
            GeometryRequest::Reset => self.restore(),
            GeometryRequest::Update(update) => {
                let rect = self.cache.apply_scaled_update(&update);
                log_debug!("Moving window to {rect}");
                report("move_resize", self.gateway.move_resize(self.handle, &rect));
            }
        }
    }

    fn set_title(&mut self, message: &Message) {
        if !self.settings.can_set_window_title {
            log_debug!("SetWindowTitle is disabled, dropping");
            return;
        }
        let name = match payload::decode_title(message.data.as_ref()) {
            Ok(name) => name,
            Err(e) => {
                log_warn!("Failed to parse {} message: {e}", message.command);
                return;
            }
        };

        let title = name.as_deref().unwrap_or(&self.settings.title);
        report("set_text", self.gateway.set_text(self.handle, title));
    }

    fn save_state(&mut self) {
        self.cache.save_baseline();
        log_info!("Saved baseline {}", self.cache.baseline());
    }

    fn set_transparency(&mut self, message: &Message) {
        let update = match payload::decode_transparency(message.data.as_ref()) {
            Ok(update) => update,
            Err(e) => {
                log_warn!("Failed to parse {} message: {e}", message.command);
                return;
            }
        };

        let visual = self.cache.visual_mut();
        visual.apply(&update);
        let layered = visual.layered();
        report("set_layered", self.gateway.set_layered(self.handle, layered));
    }
}

/// Logs a failed gateway call. Cached state is left as it is.
fn report(call: &str, result: WindowResult<()>) {
    if let Err(e) = result {
        log_warn!("{call} failed: {e}");
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
