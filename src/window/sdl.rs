//!
//! SDL2 driver for the companion window.
//!
//! **Supported:**
//! - Borderless, always-on-top window sized to the sprite
//! - Absolute repositioning in screen coordinates
//! - Global pointer position query
//! - Sprite rendering with per-frame texture upload
//! - Quote overlay text via the built-in bitmap font
//! - Left-click and quit events
//!
//! **NOT Supported (by design):**
//! - Color-key window transparency (SDL2 has no portable equivalent of a
//!   transparent-color attribute; the window clears to the key color and
//!   sprites with an alpha channel still composite correctly onto it)
//! - Multiple displays (desktop bounds come from display 0)
//! - Window resizing (the window is fixed at the sprite size)
//!
//! SDL2 must be initialized on the main thread; the driver is owned by
//! the UI loop and never crosses a thread boundary.
//!

use sdl2::event::Event;
use sdl2::mouse::MouseButton;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{TextureCreator, WindowCanvas};
use sdl2::video::{WindowContext, WindowPos};
use sdl2::{EventPump, Sdl, VideoSubsystem};

use super::{font, PetSurface, SurfaceError, SurfaceEvent, SurfaceResult, WindowConfig};
use crate::assets::{AssetBundle, SpriteId};
use crate::behavior::Point;

/// Overlay text placement and look.
const OVERLAY_TOP_MARGIN: i32 = 6;
const OVERLAY_SIDE_MARGIN: u32 = 4;
const OVERLAY_COLOR: Color = Color::RGB(255, 255, 255);
const OVERLAY_SHADOW: Color = Color::RGB(0, 0, 0);

/// SDL2 companion window driver.
pub struct SdlSurface {
    // Held to keep the subsystems alive for the window's lifetime.
    _sdl: Sdl,
    video: VideoSubsystem,
    canvas: WindowCanvas,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
    sprites: AssetBundle,
    config: WindowConfig,
    current: SpriteId,
    overlay: Option<String>,
}

impl SdlSurface {
    /// Initialize SDL2 and create the companion window.
    pub fn new(config: WindowConfig, sprites: AssetBundle) -> SurfaceResult<Self> {
        log::info!("Initializing SDL2");

        let sdl = sdl2::init().map_err(SurfaceError::InitFailed)?;
        let video = sdl.video().map_err(SurfaceError::InitFailed)?;
        log::info!("SDL2 video driver: {}", video.current_video_driver());

        let window = video
            .window(&config.title, config.size, config.size)
            .position_centered()
            .borderless()
            .build()
            .map_err(|e| SurfaceError::WindowCreationFailed(e.to_string()))?;

        // rust-sdl2 exposes no safe wrapper for the always-on-top window
        // flag; set it through the C API.
        unsafe {
            sdl2::sys::SDL_SetWindowAlwaysOnTop(window.raw(), sdl2::sys::SDL_bool::SDL_TRUE);
        }

        let event_pump = sdl
            .event_pump()
            .map_err(|e| SurfaceError::InitFailed(format!("event pump: {}", e)))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| SurfaceError::RendererCreationFailed(e.to_string()))?;
        log::info!("SDL2 renderer: {}", canvas.info().name);

        let texture_creator = canvas.texture_creator();

        Ok(Self {
            _sdl: sdl,
            video,
            canvas,
            texture_creator,
            event_pump,
            sprites,
            config,
            current: SpriteId::Idle,
            overlay: None,
        })
    }

    fn draw_sprite(&mut self) -> SurfaceResult<()> {
        let image = self.sprites.sprite(self.current);
        let (width, height) = image.dimensions();

        // Texture created per frame; three small sprites make caching not
        // worth the creator lifetime tangle.
        let mut pixels = image.as_raw().clone();
        let surface = sdl2::surface::Surface::from_data(
            &mut pixels,
            width,
            height,
            width * 4,
            PixelFormatEnum::RGBA32,
        )
        .map_err(SurfaceError::InvalidOperation)?;

        let texture = self
            .texture_creator
            .create_texture_from_surface(&surface)
            .map_err(|e| SurfaceError::InvalidOperation(e.to_string()))?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(SurfaceError::InvalidOperation)
    }

    fn draw_overlay(&mut self) -> SurfaceResult<()> {
        let Some(text) = self.overlay.clone() else {
            return Ok(());
        };

        let (text_w, _) = font::measure(&text);
        if text_w == 0 {
            return Ok(());
        }

        // Prefer 2x glyphs; fall back to 1x for segments that would not
        // fit the window width.
        let avail = self.config.size.saturating_sub(OVERLAY_SIDE_MARGIN * 2);
        let scale = if text_w * 2 <= avail { 2u32 } else { 1u32 };

        let x0 = ((self.config.size.saturating_sub(text_w * scale)) / 2) as i32;
        let offsets = [(scale as i32, scale as i32, OVERLAY_SHADOW), (0, 0, OVERLAY_COLOR)];
        for (ox, oy, color) in offsets {
            self.canvas.set_draw_color(color);
            let mut result = Ok(());
            font::for_each_pixel(&text, |px, py| {
                if result.is_err() {
                    return;
                }
                let rect = Rect::new(
                    x0 + ox + (px * scale) as i32,
                    OVERLAY_TOP_MARGIN + oy + (py * scale) as i32,
                    scale,
                    scale,
                );
                result = self.canvas.fill_rect(rect);
            });
            result.map_err(SurfaceError::InvalidOperation)?;
        }
        Ok(())
    }
}

impl PetSurface for SdlSurface {
    fn position(&self) -> SurfaceResult<Point> {
        let (x, y) = self.canvas.window().position();
        Ok(Point::new(x, y))
    }

    fn set_position(&mut self, pos: Point) -> SurfaceResult<()> {
        self.canvas
            .window_mut()
            .set_position(WindowPos::Positioned(pos.x), WindowPos::Positioned(pos.y));
        Ok(())
    }

    fn desktop_bounds(&self) -> SurfaceResult<(u32, u32)> {
        let bounds = self
            .video
            .display_bounds(0)
            .map_err(SurfaceError::QueryFailed)?;
        Ok((bounds.width(), bounds.height()))
    }

    fn pointer(&self) -> SurfaceResult<Point> {
        let mut x = 0;
        let mut y = 0;
        unsafe {
            sdl2::sys::SDL_GetGlobalMouseState(&mut x, &mut y);
        }
        Ok(Point::new(x, y))
    }

    fn set_sprite(&mut self, sprite: SpriteId) {
        if self.current != sprite {
            log::debug!("sprite -> {}", sprite.name());
            self.current = sprite;
        }
    }

    fn show_overlay(&mut self, text: &str) {
        self.overlay = Some(text.to_string());
    }

    fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    fn poll_events(&mut self) -> SurfaceResult<Vec<SurfaceEvent>> {
        let mut events = Vec::new();
        for event in self.event_pump.poll_iter() {
            events.push(match event {
                Event::Quit { .. } => SurfaceEvent::Quit,
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    ..
                } => SurfaceEvent::Clicked,
                _ => SurfaceEvent::Other,
            });
        }
        Ok(events)
    }

    fn present(&mut self) -> SurfaceResult<()> {
        let (r, g, b) = self.config.colorkey;
        self.canvas.set_draw_color(Color::RGB(r, g, b));
        self.canvas.clear();
        self.draw_sprite()?;
        self.draw_overlay()?;
        self.canvas.present();
        Ok(())
    }
}
