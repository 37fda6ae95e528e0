use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use vip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8_core::{FrameBuffer, FrameSink};

/// Bytes per pixel in an RGB24 texture
const CHANNELS: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl: {0}")]
    Sdl(String),

    #[error("unable to open window: {0}")]
    Window(#[from] WindowBuildError),

    #[error("unable to create canvas: {0}")]
    Canvas(#[from] IntegerOrSdlError),

    #[error("unable to create texture: {0}")]
    Texture(#[from] TextureValueError),
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display is handed a frame by the CPU every time the FrameBuffer changes.
pub struct Display {
    canvas: WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: usize) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video().map_err(DisplayError::Sdl)?;
        let window = video_subsystem
            .window(
                "vip8",
                (DISPLAY_WIDTH * scale) as u32,
                (DISPLAY_HEIGHT * scale) as u32,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Expands the frame into RGB24, one `CHANNELS`-byte pixel per cell; lit cells are white.
    ///
    /// Rows are laid end to end with no padding. The texture's rows may be wider than this
    /// (its pitch), so `render` copies them across one at a time.
    fn frame_to_rgb(frame: &FrameBuffer) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(DISPLAY_WIDTH * DISPLAY_HEIGHT * CHANNELS);
        for &cell in frame.iter().flatten() {
            let level = if cell == 0 { 0x00 } else { 0xFF };
            rgb.extend_from_slice(&[level; CHANNELS]);
        }
        rgb
    }

    /// Uploads the frame to a streaming RGB24 texture and presents it, scaled to the window.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        let pixels = Display::frame_to_rgb(frame);
        let row_bytes = self.width * CHANNELS;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // Rows may be padded, so copy them one at a time
                for (row, line) in pixels.chunks(row_bytes).enumerate() {
                    let start = row * pitch;
                    buffer[start..start + row_bytes].copy_from_slice(line);
                }
            })
            .map_err(DisplayError::Sdl)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(DisplayError::Sdl)?;
        self.canvas.present();
        Ok(())
    }
}

impl FrameSink for Display {
    fn present(&mut self, frame: &FrameBuffer) {
        if let Err(e) = self.render(frame) {
            tracing::warn!("dropped frame: {}", e);
        }
    }
}
