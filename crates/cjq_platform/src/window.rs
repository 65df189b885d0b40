use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub start_in_fullscreen: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Cat Jump Quick".to_string(),
            width: 800,
            height: 600,
            start_in_fullscreen: false,
        }
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let mut attrs = WindowAttributes::default()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));
    if config.start_in_fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    let window = event_loop
        .create_window(attrs)
        .expect("Failed to create window");
    Arc::new(window)
}

/// Flip between windowed and borderless fullscreen (bound to F10 in game).
pub fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
        log::info!("Fullscreen: off");
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        log::info!("Fullscreen: on");
    }
}
