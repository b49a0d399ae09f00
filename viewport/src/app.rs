use std::fmt;

use anyhow::{bail, Context, Result};
use backend::glutils;
use backend::system::{System, WindowConfig};

use crate::scene::Triangle;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Running,
    Terminated,
}

impl Lifecycle {
    pub fn can_advance_to(self, next: Lifecycle) -> bool {
        use Lifecycle::*;
        matches!(
            (self, next),
            (Uninitialized, Initialized) | (Initialized, Running) | (Running, Terminated)
        )
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Owns the window and the GPU resources and drives the frame loop.
pub struct App {
    state: Lifecycle,
    frames: u64,
    // dropped before `system` so GL names are released with a live context
    scene: Option<Triangle>,
    system: Option<System>,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: Lifecycle::Uninitialized,
            frames: 0,
            scene: None,
            system: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    fn advance(&mut self, next: Lifecycle) -> Result<()> {
        if !self.state.can_advance_to(next) {
            bail!("invalid lifecycle transition {} -> {}", self.state, next);
        }
        log::debug!("lifecycle {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    pub fn init(&mut self, config: &WindowConfig) -> Result<()> {
        if self.state != Lifecycle::Uninitialized {
            bail!("init called in state {}", self.state);
        }
        let system = System::new(config).context("failed to initialize display")?;
        self.system = Some(system);
        self.advance(Lifecycle::Initialized)
    }

    /// Brings the app from `Uninitialized` to `Running`.
    pub fn start(&mut self, config: &WindowConfig) -> Result<()> {
        self.init(config)
            .and_then(|_| self.upload_scene())
            .context("initialization failure")
    }

    pub fn upload_scene(&mut self) -> Result<()> {
        if self.state != Lifecycle::Initialized {
            bail!("upload_scene called in state {}", self.state);
        }
        let triangle = Triangle::upload().context("failed to upload triangle")?;
        self.scene = Some(triangle);
        self.advance(Lifecycle::Running)
    }

    /// Renders one frame and polls events. Returns false once the window
    /// asked to close.
    pub fn frame(&mut self) -> Result<bool> {
        let (Some(system), Some(scene)) = (self.system.as_mut(), self.scene.as_ref()) else {
            bail!("frame called in state {}", self.state);
        };

        glutils::clear_screen();
        scene.draw();
        if cfg!(debug_assertions) {
            glutils::check_gl_err()
                .with_context(|| format!("OpenGL error in frame {}", self.frames))?;
        }
        system.draw_to_screen();
        self.frames += 1;

        Ok(system.process_io_events())
    }

    pub fn run(&mut self) -> Result<()> {
        while self.frame()? {}
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        self.advance(Lifecycle::Terminated)?;
        // GPU resources first, then the window and SDL
        self.scene = None;
        self.system = None;
        log::info!("terminated after {} frames", self.frames);
        Ok(())
    }
}
