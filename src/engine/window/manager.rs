//! Window management implementation.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::window::Window;
use winit::event_loop::ActiveEventLoop;
use log::{error, info};

pub struct WindowManager {
    window: Option<Arc<Window>>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            window: None,
        }
    }

    pub fn create_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Arc<Window>, winit::error::OsError> {
        let attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height));
        let window = event_loop.create_window(attributes)
            .map_err(|e| {
                error!("Failed to create window: {:?}", e);
                e
            })?;

        let window = Arc::new(window);
        let size = window.inner_size();
        info!("Created window '{}' ({}x{})", title, size.width, size.height);
        self.window = Some(window.clone());
        Ok(window)
    }

    pub fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
