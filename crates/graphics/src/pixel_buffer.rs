use std::{ops::Deref, slice::ChunksExact};

use crate::Color;

/// Every buffer stores RGBA8888: four bytes per pixel in R, G, B, A order, so
/// a pixel read as a big-endian `u32` has red in the most significant byte.
pub const BYTES_PER_PIXEL: usize = 4;

/// Iterates over the rows of a buffer, top to bottom.
pub type Rows<'a> = ChunksExact<'a, u8>;

/// An owned, mutable RGBA8888 image with tightly packed rows.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: Image<Box<[u8]>>,
}

impl PixelBuffer {
    /// Creates a buffer of transparent black pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_vec(vec![0; area(width, height) * BYTES_PER_PIXEL], width)
    }

    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let bytes = color.to_rgba8().repeat(area(width, height));
        Self::from_vec(bytes, width)
    }

    /// Takes ownership of `bytes`, which hold whole rows of `width` pixels.
    ///
    /// Panics if `bytes` is not a whole number of rows.
    #[must_use]
    pub fn from_vec(bytes: Vec<u8>, width: u32) -> Self {
        Self {
            image: Image::new(width, bytes.into_boxed_slice()),
        }
    }

    /// Packs `colors`, given row by row, into a buffer `width` pixels wide.
    #[must_use]
    pub fn from_colors(colors: &[Color], width: u32) -> Self {
        let bytes = colors.iter().flat_map(|color| color.to_rgba8()).collect();
        Self::from_vec(bytes, width)
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Bytes from the start of one row to the start of the next.
    #[inline]
    #[must_use]
    pub fn pitch(&self) -> usize {
        self.image.pitch()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.image.data
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.image.data
    }

    #[must_use]
    pub fn rows(&self) -> Rows<'_> {
        self.image.rows()
    }

    /// The packed RGBA8888 value at `(x, y)`.
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    #[must_use]
    pub fn pixel32(&self, x: u32, y: u32) -> u32 {
        self.image.pixel32(x, y)
    }

    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn set_pixel32(&mut self, x: u32, y: u32, value: u32) {
        let at = self.image.index(x, y);
        self.image.data[at..at + BYTES_PER_PIXEL].copy_from_slice(&value.to_be_bytes());
    }

    #[must_use]
    pub fn color_at(&self, x: u32, y: u32) -> Color {
        Color::from_rgba8888(self.pixel32(x, y))
    }

    pub fn set_color_at(&mut self, x: u32, y: u32, color: Color) {
        self.set_pixel32(x, y, color.to_rgba8888());
    }

    /// Replaces every pixel equal to `from` with `to`, returning how many
    /// were replaced.
    pub fn replace_pixels(&mut self, from: u32, to: u32) -> usize {
        let (from, to) = (from.to_be_bytes(), to.to_be_bytes());
        let mut count = 0;

        for pixel in self.image.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            if *pixel == from {
                pixel.copy_from_slice(&to);
                count += 1;
            }
        }

        count
    }

    #[must_use]
    pub fn as_ref(&self) -> PixelBufferRef<'_> {
        self.into()
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// A read-only view of RGBA8888 pixels borrowed from elsewhere.
#[derive(Clone, Copy)]
#[allow(clippy::module_name_repetitions)]
pub struct PixelBufferRef<'a> {
    image: Image<&'a [u8]>,
}

impl<'a> PixelBufferRef<'a> {
    /// Panics if `bytes` is not a whole number of rows.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8], width: u32) -> Self {
        Self {
            image: Image::new(width, bytes),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height
    }

    #[inline]
    #[must_use]
    pub fn pitch(&self) -> usize {
        self.image.pitch()
    }

    #[must_use]
    pub fn bytes(&self) -> &'a [u8] {
        self.image.data
    }

    #[must_use]
    pub fn rows(&self) -> Rows<'a> {
        self.image.data.chunks_exact(self.image.pitch().max(1))
    }

    /// The packed RGBA8888 value at `(x, y)`.
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    #[must_use]
    pub fn pixel32(&self, x: u32, y: u32) -> u32 {
        self.image.pixel32(x, y)
    }
}

impl<'a> From<&'a PixelBuffer> for PixelBufferRef<'a> {
    fn from(buffer: &'a PixelBuffer) -> Self {
        Self {
            image: Image {
                width: buffer.image.width,
                height: buffer.image.height,
                data: &*buffer.image.data,
            },
        }
    }
}

/// Size and indexing shared by the owned and borrowed buffers, generic over
/// where the bytes live.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Image<S>
where
    S: Deref<Target = [u8]>,
{
    width: u32,
    height: u32,
    data: S,
}

impl<S> Image<S>
where
    S: Deref<Target = [u8]>,
{
    fn new(width: u32, data: S) -> Self {
        let pitch = width as usize * BYTES_PER_PIXEL;
        let rows = if pitch == 0 {
            assert!(data.is_empty(), "a zero-width image holds no pixels");
            0
        } else {
            assert!(
                data.len() % pitch == 0,
                "{} bytes is not a whole number of {width} pixel rows",
                data.len()
            );
            data.len() / pitch
        };

        Self {
            width,
            height: u32::try_from(rows).expect("row count fits in u32"),
            data,
        }
    }

    #[inline]
    fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside a {}x{} image",
            self.width,
            self.height
        );
        y as usize * self.pitch() + x as usize * BYTES_PER_PIXEL
    }

    #[inline]
    fn pixel32(&self, x: u32, y: u32) -> u32 {
        let at = self.index(x, y);
        let data: &[u8] = &self.data;
        u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
    }

    fn rows(&self) -> Rows<'_> {
        self.data.chunks_exact(self.pitch().max(1))
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_views() {
        let colors = [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE];
        let buffer = PixelBuffer::from_colors(&colors, 2);

        assert_eq!((buffer.width(), buffer.height()), (2, 2));
        assert_eq!(buffer.pitch(), 8);

        let mut rows = buffer.rows();
        assert_eq!(rows.next(), Some([255, 0, 0, 255, 0, 255, 0, 255].as_slice()));
        assert_eq!(rows.next(), Some([0, 0, 255, 255, 255, 255, 255, 255].as_slice()));
        assert_eq!(rows.next(), None);

        let view = buffer.as_ref();
        assert_eq!((view.width(), view.height()), (2, 2));
        assert_eq!(view.bytes(), buffer.bytes());
        assert_eq!(view.rows().count(), 2);
        assert_eq!(view.pixel32(1, 1), 0xFFFF_FFFF);
        assert_eq!(view.pixel32(0, 0), 0xFF00_00FF);
    }

    #[test]
    fn pixel_access() {
        let mut buffer = PixelBuffer::filled(3, 2, Color::CYAN);

        assert_eq!(buffer.pixel32(2, 1), 0x00FF_FFFF);

        buffer.set_pixel32(1, 0, 0x1122_3344);
        assert_eq!(buffer.pixel32(1, 0), 0x1122_3344);
        assert_eq!(&buffer.bytes()[4..8], &[0x11, 0x22, 0x33, 0x44]);

        buffer.set_color_at(0, 1, Color::RED);
        assert_eq!(buffer.color_at(0, 1), Color::RED);
    }

    #[test]
    fn replace() {
        let mut buffer = PixelBuffer::filled(4, 4, Color::CYAN);
        buffer.set_pixel32(0, 0, Color::BLACK.to_rgba8888());

        let replaced = buffer.replace_pixels(Color::CYAN.to_rgba8888(), 0x00FF_FF00);

        assert_eq!(replaced, 15);
        assert_eq!(buffer.pixel32(3, 3), 0x00FF_FF00);
        assert_eq!(buffer.pixel32(0, 0), Color::BLACK.to_rgba8888());
    }

    #[test]
    fn empty() {
        let buffer = PixelBuffer::new(0, 0);
        assert_eq!(buffer.height(), 0);
        assert_eq!(buffer.rows().count(), 0);

        let buffer = PixelBuffer::new(3, 0);
        assert_eq!(buffer.height(), 0);
        assert_eq!(buffer.rows().count(), 0);
    }

    #[test]
    #[should_panic(expected = "whole number")]
    fn ragged_rows() {
        let _ = PixelBuffer::from_vec(vec![0; 10], 2);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds() {
        let buffer = PixelBuffer::filled(2, 2, Color::BLACK);
        let _ = buffer.pixel32(2, 0);
    }
}
