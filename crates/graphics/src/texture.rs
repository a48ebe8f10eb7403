use geometry::{Extent, PixelRect, Point, Px};
use parking_lot::{Mutex, MutexGuard};

use crate::{Color, GraphicsError, PixelBuffer, PixelBufferRef};

/// How a texture's pixels are combined with the canvas when copied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source pixels overwrite the destination.
    None,
    /// Source-over alpha blending.
    #[default]
    Blend,
}

/// Options applied when a texture is created from decoded pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureConfig {
    /// Pixels of exactly this (opaque) color are made fully transparent.
    ///
    /// Defaults to cyan (`0, 255, 255`). `None` disables color keying.
    pub color_key: Option<Color>,

    /// The blend mode new textures start with. Defaults to `Blend`.
    pub blend_mode: BlendMode,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            color_key: Some(Color::CYAN),
            blend_mode: BlendMode::Blend,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Modulation {
    color: [u8; 3],
    alpha: u8,
    blend_mode: BlendMode,
}

/// A streaming texture: RGBA pixels that can be locked for direct access and
/// copied onto a [`Canvas`](crate::Canvas).
///
/// Textures are shared behind `Arc`s, so all mutation goes through the lock
/// or the interior modulation state.
pub struct Texture {
    extent: Extent<u32, Px>,
    pixels: Mutex<PixelBuffer>,
    modulation: Mutex<Modulation>,
}

impl Texture {
    #[must_use]
    pub fn from_buffer(pixels: PixelBuffer) -> Self {
        Self::with_config(pixels, &TextureConfig {
            color_key: None,
            ..TextureConfig::default()
        })
    }

    /// Creates a texture, replacing every pixel that matches the color key
    /// with a transparent pixel of the same color.
    #[must_use]
    pub fn with_config(mut pixels: PixelBuffer, config: &TextureConfig) -> Self {
        if let Some(key) = config.color_key {
            let [r, g, b, _] = key.to_rgba8();
            let opaque = u32::from_be_bytes([r, g, b, 0xFF]);
            let transparent = u32::from_be_bytes([r, g, b, 0x00]);

            let replaced = pixels.replace_pixels(opaque, transparent);
            tracing::trace!(replaced, "applied color key");
        }

        Self {
            extent: Extent::new(pixels.width(), pixels.height()),
            pixels: Mutex::new(pixels),
            modulation: Mutex::new(Modulation {
                color: [0xFF; 3],
                alpha: 0xFF,
                blend_mode: config.blend_mode,
            }),
        }
    }

    #[must_use]
    pub fn extent(&self) -> Extent<u32, Px> {
        self.extent
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.extent.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.extent.height
    }

    /// The whole texture as a rectangle.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(
            Point::zero(),
            Extent::new(self.extent.width as i32, self.extent.height as i32),
        )
    }

    /// Locks the texture for direct pixel access. The lock is released when
    /// the returned guard is dropped.
    ///
    /// Fails if the texture is already locked; locks do not nest and never
    /// block.
    pub fn lock(&self) -> Result<TextureLock<'_>, GraphicsError> {
        let Some(pixels) = self.pixels.try_lock() else {
            tracing::warn!("texture is already locked");
            return Err(GraphicsError::AlreadyLocked);
        };

        Ok(TextureLock { pixels })
    }

    /// Tints the texture when it is copied. Each channel is multiplied by
    /// `value / 255`.
    pub fn set_color(&self, r: u8, g: u8, b: u8) {
        self.modulation.lock().color = [r, g, b];
    }

    pub fn set_alpha(&self, alpha: u8) {
        self.modulation.lock().alpha = alpha;
    }

    pub fn set_blend_mode(&self, blend_mode: BlendMode) {
        self.modulation.lock().blend_mode = blend_mode;
    }

    #[must_use]
    pub fn color_mod(&self) -> [u8; 3] {
        self.modulation.lock().color
    }

    #[must_use]
    pub fn alpha_mod(&self) -> u8 {
        self.modulation.lock().alpha
    }

    #[must_use]
    pub fn blend_mode(&self) -> BlendMode {
        self.modulation.lock().blend_mode
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.extent.width)
            .field("height", &self.extent.height)
            .field("locked", &self.pixels.is_locked())
            .finish()
    }
}

/// Exclusive access to a texture's pixels. Dropping the guard unlocks the
/// texture.
pub struct TextureLock<'a> {
    pixels: MutexGuard<'a, PixelBuffer>,
}

impl<'a> TextureLock<'a> {
    #[must_use]
    pub fn pixels(&self) -> PixelBufferRef<'_> {
        PixelBufferRef::from(&*self.pixels)
    }

    /// The raw RGBA8888 bytes, row by row. The texture's size is fixed.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.pixels.bytes_mut()
    }

    pub fn set_pixel32(&mut self, x: u32, y: u32, value: u32) {
        self.pixels.set_pixel32(x, y, value);
    }

    /// Overwrites every pixel with `source`, which must be the same size as
    /// the texture.
    pub fn copy_from(&mut self, source: PixelBufferRef<'_>) -> Result<(), GraphicsError> {
        let expected = (self.pixels.width(), self.pixels.height());
        let found = (source.width(), source.height());

        if expected != found {
            return Err(GraphicsError::SizeMismatch { expected, found });
        }

        self.pixels.bytes_mut().copy_from_slice(source.bytes());
        Ok(())
    }

    #[must_use]
    pub fn pitch(&self) -> usize {
        self.pixels.pitch()
    }

    /// Reads the pixel at `(x, y)` as a packed RGBA8888 value.
    #[must_use]
    pub fn pixel32(&self, x: u32, y: u32) -> u32 {
        self.pixels.pixel32(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_key_becomes_transparent() {
        let mut pixels = PixelBuffer::filled(2, 2, Color::CYAN);
        pixels.set_pixel32(0, 0, Color::BLACK.to_rgba8888());

        let texture = Texture::with_config(pixels, &TextureConfig::default());
        let lock = texture.lock().unwrap();

        assert_eq!(lock.pixel32(0, 0), Color::BLACK.to_rgba8888());
        assert_eq!(lock.pixel32(1, 0), 0x00FF_FF00);
        assert_eq!(lock.pixel32(1, 1), 0x00FF_FF00);
    }

    #[test]
    fn no_color_key() {
        let texture = Texture::from_buffer(PixelBuffer::filled(1, 1, Color::CYAN));
        assert_eq!(texture.lock().unwrap().pixel32(0, 0), 0x00FF_FFFF);
    }

    #[test]
    fn locks_do_not_nest() {
        let texture = Texture::from_buffer(PixelBuffer::filled(2, 2, Color::WHITE));

        let lock = texture.lock().unwrap();
        assert!(matches!(texture.lock(), Err(GraphicsError::AlreadyLocked)));
        drop(lock);

        assert!(texture.lock().is_ok());
    }

    #[test]
    fn edits_through_lock_persist() {
        let texture = Texture::from_buffer(PixelBuffer::filled(2, 2, Color::WHITE));

        {
            let mut lock = texture.lock().unwrap();
            assert_eq!(lock.pitch(), 8);
            lock.set_pixel32(1, 1, 0x0000_00FF);
            lock.bytes_mut()[..4].copy_from_slice(&[1, 2, 3, 4]);
        }

        let lock = texture.lock().unwrap();
        assert_eq!(lock.pixel32(1, 1), 0x0000_00FF);
        assert_eq!(lock.pixel32(0, 0), 0x0102_0304);
    }

    #[test]
    fn streaming_frames_in() {
        let texture = Texture::from_buffer(PixelBuffer::new(2, 2));
        let frame = PixelBuffer::filled(2, 2, Color::GREEN);

        texture.lock().unwrap().copy_from(frame.as_ref()).unwrap();
        assert_eq!(texture.lock().unwrap().pixel32(1, 1), Color::GREEN.to_rgba8888());

        let wrong = PixelBuffer::new(3, 2);
        assert!(matches!(
            texture.lock().unwrap().copy_from(wrong.as_ref()),
            Err(GraphicsError::SizeMismatch {
                expected: (2, 2),
                found: (3, 2)
            })
        ));
        assert_eq!(texture.lock().unwrap().pixel32(0, 0), Color::GREEN.to_rgba8888());
    }

    #[test]
    fn modulation() {
        let texture = Texture::from_buffer(PixelBuffer::filled(1, 1, Color::WHITE));
        assert_eq!(texture.color_mod(), [255, 255, 255]);
        assert_eq!(texture.alpha_mod(), 255);
        assert_eq!(texture.blend_mode(), BlendMode::Blend);

        texture.set_color(10, 20, 30);
        texture.set_alpha(128);
        texture.set_blend_mode(BlendMode::None);

        assert_eq!(texture.color_mod(), [10, 20, 30]);
        assert_eq!(texture.alpha_mod(), 128);
        assert_eq!(texture.blend_mode(), BlendMode::None);
        assert_eq!(texture.bounds(), PixelRect::from_xywh(0, 0, 1, 1));
    }
}
