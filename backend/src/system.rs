use super::error::BackendError;
use super::glutils;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub w: u32,
    pub h: u32,
    // major, minor
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Viewport".to_string(),
            w: 640,
            h: 480,
            gl_version: (3, 3),
            vsync: true,
        }
    }
}

/// Window state updated only while events are polled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    close_requested: bool,
    size: (u32, u32),
    resized: bool,
}

impl WindowState {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            close_requested: false,
            size: (w, h),
            resized: false,
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.request_close(),
            Event::KeyDown {
                keycode: Some(key), ..
            } => self.key_down(*key),
            Event::Window {
                win_event: WindowEvent::SizeChanged(w, h) | WindowEvent::Resized(w, h),
                ..
            } => {
                let size = ((*w).max(0) as u32, (*h).max(0) as u32);
                if size != self.size {
                    self.size = size;
                    self.resized = true;
                }
            }
            _ => {}
        }
    }

    pub fn key_down(&mut self, key: Keycode) {
        if key == Keycode::Escape {
            self.request_close();
        }
    }

    fn request_close(&mut self) {
        if !self.close_requested {
            log::debug!("close requested");
        }
        self.close_requested = true;
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Returns true once per size change.
    pub fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}

fn platform_err(wrap: fn(String) -> BackendError) -> impl Fn(String) -> BackendError {
    move |msg| {
        log::error!("SDL: {}", msg);
        wrap(msg)
    }
}

/// Vsync is best effort: without it frames are simply not throttled.
fn vsync_enabled(result: Result<(), String>) -> bool {
    match result {
        Ok(()) => true,
        Err(msg) => {
            log::warn!("SDL: could not enable vsync: {}", msg);
            false
        }
    }
}

// Fields drop in declaration order: the GL context goes before the window,
// SDL itself shuts down last.
pub struct System {
    pub state: WindowState,
    event_pump: sdl2::EventPump,
    pub gl_ctx: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl_context: sdl2::Sdl,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System, BackendError> {
        let sdl_context = sdl2::init().map_err(platform_err(BackendError::Platform))?;
        let video_subsystem = sdl_context
            .video()
            .map_err(platform_err(BackendError::Platform))?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(config.gl_version.0, config.gl_version.1);

        let window = match video_subsystem
            .window(&config.title, config.w, config.h)
            .opengl()
            .build()
        {
            Ok(w) => w,
            Err(e) => {
                return Err(platform_err(BackendError::WindowCreation)(format!(
                    "error while building OpenGL window: {e}"
                )))
            }
        };

        let gl_ctx = window
            .gl_create_context()
            .map_err(platform_err(BackendError::Context))?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(platform_err(BackendError::Context))?;

        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        glutils::check_loaded()?;
        glutils::log_opengl_info();

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);

        if config.vsync {
            vsync_enabled(video_subsystem.gl_set_swap_interval(SwapInterval::VSync));
        }

        let event_pump = sdl_context
            .event_pump()
            .map_err(platform_err(BackendError::Platform))?;

        let (w, h) = window.drawable_size();
        glutils::set_viewport(w, h);

        log::info!(
            "created {}x{} window '{}' with OpenGL {}.{} core context",
            config.w,
            config.h,
            config.title,
            config.gl_version.0,
            config.gl_version.1
        );

        Ok(System {
            state: WindowState::new(config.w, config.h),
            event_pump,
            gl_ctx,
            window,
            video_subsystem,
            sdl_context,
        })
    }

    /// Drains pending events. Returns false once the window should close.
    pub fn process_io_events(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            self.state.handle_event(&event);
        }
        if self.state.take_resized() {
            let (w, h) = self.window.drawable_size();
            log::debug!(
                "window resized to {:?}, viewport {}x{}",
                self.state.size(),
                w,
                h
            );
            glutils::set_viewport(w, h);
        }
        !self.state.should_close()
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
    }
}

impl Drop for System {
    fn drop(&mut self) {
        log::debug!("destroying window '{}'", self.window.title());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;

    fn key_event(keycode: Keycode, pressed: bool) -> Event {
        if pressed {
            Event::KeyDown {
                timestamp: 0,
                window_id: 1,
                keycode: Some(keycode),
                scancode: None,
                keymod: Mod::NOMOD,
                repeat: false,
            }
        } else {
            Event::KeyUp {
                timestamp: 0,
                window_id: 1,
                keycode: Some(keycode),
                scancode: None,
                keymod: Mod::NOMOD,
                repeat: false,
            }
        }
    }

    fn window_event(win_event: WindowEvent) -> Event {
        Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event,
        }
    }

    #[test]
    fn default_config_matches_window_contract() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Viewport");
        assert_eq!((config.w, config.h), (640, 480));
        assert_eq!(config.gl_version, (3, 3));
        assert!(config.vsync);
    }

    #[test]
    fn escape_requests_close() {
        let mut state = WindowState::new(640, 480);
        assert!(!state.should_close());
        state.key_down(Keycode::Escape);
        assert!(state.should_close());
    }

    #[test]
    fn escape_press_event_requests_close() {
        let mut state = WindowState::new(640, 480);
        state.handle_event(&key_event(Keycode::Escape, false));
        assert!(!state.should_close());
        state.handle_event(&key_event(Keycode::Escape, true));
        assert!(state.should_close());
    }

    #[test]
    fn other_key_press_events_are_ignored() {
        let mut state = WindowState::new(640, 480);
        state.handle_event(&key_event(Keycode::Space, true));
        state.handle_event(&key_event(Keycode::Return, true));
        state.handle_event(&key_event(Keycode::Space, false));
        assert!(!state.should_close());
    }

    #[test]
    fn failed_vsync_is_not_fatal() {
        assert!(vsync_enabled(Ok(())));
        assert!(!vsync_enabled(Err("swap interval unsupported".to_string())));
    }

    #[test]
    fn quit_requests_close() {
        let mut state = WindowState::new(640, 480);
        state.handle_event(&Event::Quit { timestamp: 0 });
        assert!(state.should_close());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut state = WindowState::new(640, 480);
        state.key_down(Keycode::Space);
        state.key_down(Keycode::Q);
        state.handle_event(&window_event(WindowEvent::FocusLost));
        assert!(!state.should_close());
    }

    #[test]
    fn close_flag_is_sticky() {
        let mut state = WindowState::new(640, 480);
        state.key_down(Keycode::Escape);
        state.key_down(Keycode::Space);
        assert!(state.should_close());
    }

    #[test]
    fn resize_is_reported_once() {
        let mut state = WindowState::new(640, 480);
        state.handle_event(&window_event(WindowEvent::SizeChanged(800, 600)));
        state.handle_event(&window_event(WindowEvent::Resized(800, 600)));
        assert_eq!(state.size(), (800, 600));
        assert!(state.take_resized());
        assert!(!state.take_resized());
    }

    #[test]
    fn same_size_is_not_a_resize() {
        let mut state = WindowState::new(640, 480);
        state.handle_event(&window_event(WindowEvent::SizeChanged(640, 480)));
        assert!(!state.take_resized());
    }
}
