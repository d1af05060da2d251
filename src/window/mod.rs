//!
//! Surface layer: the always-on-top companion window.
//!
//! This module provides the shared types and the driver trait; the SDL2
//! implementation lives in [`sdl`]. Everything that touches the window
//! goes through [`PetSurface`], and only the UI loop holds the surface.
//!

pub mod font;
pub mod sdl;

use std::fmt;

use crate::assets::SpriteId;
use crate::behavior::Point;

/// Error types for surface operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Platform/video subsystem initialization failed.
    InitFailed(String),
    /// Window creation failed.
    WindowCreationFailed(String),
    /// Renderer creation failed.
    RendererCreationFailed(String),
    /// A query failed transiently (window mid-destruction, display
    /// reconfiguration). The caller skips the tick.
    QueryFailed(String),
    /// Invalid operation for the current state.
    InvalidOperation(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed(msg) => write!(f, "Surface initialization failed: {}", msg),
            Self::WindowCreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
            Self::RendererCreationFailed(msg) => write!(f, "Renderer creation failed: {}", msg),
            Self::QueryFailed(msg) => write!(f, "Surface query failed: {}", msg),
            Self::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window edge length in pixels (matches the sprite size).
    pub size: u32,
    /// Window title (not normally visible on a borderless window).
    pub title: String,
    /// Background color treated as transparent where the platform honors
    /// a color key; always used as the clear color.
    pub colorkey: (u8, u8, u8),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: 256,
            title: "Giorgos".to_string(),
            // tkinter "pink", kept for parity with the original art.
            colorkey: (255, 192, 203),
        }
    }
}

impl WindowConfig {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

/// Wrapper for platform events the companion reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Window close / quit request.
    Quit,
    /// Primary mouse button pressed inside the window.
    Clicked,
    /// Any other event; ignored.
    Other,
}

/// Trait for companion window drivers.
///
/// Mirrors the driver-table pattern of the graphics layer: one trait, one
/// platform implementation, unit-testable fakes in the integration tests.
/// All methods must be called from the thread that created the driver.
pub trait PetSurface {
    /// Current window top-left position in screen coordinates.
    fn position(&self) -> SurfaceResult<Point>;

    /// Move the window to an absolute top-left position.
    fn set_position(&mut self, pos: Point) -> SurfaceResult<()>;

    /// Visible desktop bounds (width, height).
    fn desktop_bounds(&self) -> SurfaceResult<(u32, u32)>;

    /// Global pointer position in screen coordinates.
    fn pointer(&self) -> SurfaceResult<Point>;

    /// Select which sprite the next frame shows.
    fn set_sprite(&mut self, sprite: SpriteId);

    /// Show overlay text anchored near the top of the window, replacing
    /// any previous overlay.
    fn show_overlay(&mut self, text: &str);

    /// Remove the overlay.
    fn clear_overlay(&mut self);

    /// Poll pending events.
    fn poll_events(&mut self) -> SurfaceResult<Vec<SurfaceEvent>>;

    /// Render the current sprite and overlay.
    fn present(&mut self) -> SurfaceResult<()>;
}
