//! Graphics!
//!
//! A CPU-side 2D toolkit: decoded images, streaming textures whose pixels can
//! be locked and edited, and a software canvas that textures are copied onto.
//!
//! ## Goals
//!
//! - Feature set
//!  - PNG decoding to RGBA8, and encoding of finished frames.
//!  - Color keying on load (cyan becomes transparent).
//!  - Texture locking for direct pixel access.
//!  - Partial copies (clip rectangles), flipping, color and alpha modulation.
//!  - Points, lines, and filled or outlined rectangles.
//!
//! ## Non-goals
//!
//! - Windows, swapchains, and GPU backends. Finished frames are plain pixel
//!   buffers; presenting them is up to the caller.

mod assets;
mod canvas;
mod codec;
mod error;
mod pixel_buffer;
mod texture;

pub use assets::AssetCache;
pub use canvas::{Canvas, Flip};
pub use codec::{decode_png, encode_png, load_png, save_png};
pub use error::GraphicsError;
pub use pixel_buffer::{PixelBuffer, PixelBufferRef, Rows, BYTES_PER_PIXEL};
pub use texture::{BlendMode, Texture, TextureConfig, TextureLock};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    pub const CYAN: Self = Self::new(0.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color from 8-bit channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 0xFF)
    }

    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Packs the color into a single RGBA8888 value (red in the most
    /// significant byte).
    #[must_use]
    pub fn to_rgba8888(self) -> u32 {
        u32::from_be_bytes(self.to_rgba8())
    }

    #[must_use]
    pub fn from_rgba8888(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self::rgba8(r, g, b, a)
    }
}
