use winrelay_core::visual::LayeredAttributes;
use winrelay_core::{DisplayMetrics, Rect, WindowGateway, WindowHandle, WindowResult};

use crate::enumerate;
use crate::monitor;
use crate::window::Window;

/// [`WindowGateway`] backed by the Win32 API.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Gateway;

impl WindowGateway for Win32Gateway {
    fn find_by_title(&self, title: &str) -> Option<WindowHandle> {
        enumerate::find_by_title(title).map(|w| w.handle())
    }

    fn rect(&self, window: WindowHandle) -> WindowResult<Rect> {
        Window::from_handle(window).rect()
    }

    fn move_resize(&self, window: WindowHandle, rect: &Rect) -> WindowResult<()> {
        Window::from_handle(window).move_resize(rect)
    }

    fn set_text(&self, window: WindowHandle, text: &str) -> WindowResult<()> {
        Window::from_handle(window).set_text(text)
    }

    fn set_layered(
        &self,
        window: WindowHandle,
        attributes: Option<LayeredAttributes>,
    ) -> WindowResult<()> {
        Window::from_handle(window).set_layered(attributes)
    }

    fn display_metrics(&self, window: WindowHandle) -> WindowResult<DisplayMetrics> {
        let (width, height) = monitor::primary_logical_size()?;
        Ok(DisplayMetrics {
            width,
            height,
            dpi: Window::from_handle(window).dpi(),
        })
    }
}
