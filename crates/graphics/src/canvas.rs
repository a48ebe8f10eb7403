use std::path::Path;

use geometry::{Extent, PixelRect, Point, Px};

use crate::{codec, BlendMode, Color, GraphicsError, PixelBuffer, Texture};

bitflags::bitflags! {
    /// Mirroring applied to a texture as it is copied onto a canvas.
    pub struct Flip: u8 {
        const HORIZONTAL = 0x1;
        const VERTICAL = 0x2;
    }
}

impl Default for Flip {
    fn default() -> Self {
        Flip::empty()
    }
}

/// A software render target.
///
/// Primitives are drawn in the current draw color and overwrite what is
/// underneath; texture copies honor the texture's blend mode and modulation.
pub struct Canvas {
    target: PixelBuffer,
    draw_color: Color,
}

impl Canvas {
    /// Creates an opaque black canvas.
    #[must_use]
    pub fn new(extent: Extent<u32, Px>) -> Self {
        Self {
            target: PixelBuffer::filled(extent.width, extent.height, Color::BLACK),
            draw_color: Color::WHITE,
        }
    }

    #[must_use]
    pub fn extent(&self) -> Extent<u32, Px> {
        Extent::new(self.target.width(), self.target.height())
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn bounds(&self) -> PixelRect {
        PixelRect::from_xywh(
            0,
            0,
            self.target.width() as i32,
            self.target.height() as i32,
        )
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    #[must_use]
    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Fills the whole canvas with the draw color.
    pub fn clear(&mut self) {
        let rgba = self.draw_color.to_rgba8();
        for pixel in self.target.bytes_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    pub fn draw_point(&mut self, at: Point<i32, Px>) {
        if self.bounds().contains(at) {
            self.plot(at.x, at.y, self.draw_color.to_rgba8888());
        }
    }

    /// Draws a one pixel wide line, including both end points.
    pub fn draw_line(&mut self, from: Point<i32, Px>, to: Point<i32, Px>) {
        let bounds = self.bounds();
        let color = self.draw_color.to_rgba8888();

        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - x).abs();
        let dy = -(to.y - y).abs();
        let step_x = if x < to.x { 1 } else { -1 };
        let step_y = if y < to.y { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            if bounds.contains(Point::new(x, y)) {
                self.plot(x, y, color);
            }

            if x == to.x && y == to.y {
                break;
            }

            let e2 = 2 * error;
            if e2 >= dy {
                error += dy;
                x += step_x;
            }
            if e2 <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    pub fn fill_rect(&mut self, rect: PixelRect) {
        let Some(visible) = rect.intersection(&self.bounds()) else {
            return;
        };

        let color = self.draw_color.to_rgba8888();
        for y in visible.y()..visible.bottom() {
            for x in visible.x()..visible.right() {
                self.plot(x, y, color);
            }
        }
    }

    /// Draws the one pixel wide outline of `rect`.
    pub fn draw_rect(&mut self, rect: PixelRect) {
        if rect.is_empty() {
            return;
        }

        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;

        self.draw_line(rect.top_left(), Point::new(right, rect.y()));
        self.draw_line(Point::new(rect.x(), bottom), Point::new(right, bottom));
        self.draw_line(rect.top_left(), Point::new(rect.x(), bottom));
        self.draw_line(Point::new(right, rect.y()), Point::new(right, bottom));
    }

    /// Copies `clip` (or the whole texture) from `texture` so that its
    /// top-left corner lands at `at`. The destination has the same size as
    /// the clip; anything falling outside the canvas or the texture is
    /// skipped.
    ///
    /// Fails if the texture is currently locked.
    pub fn copy(
        &mut self,
        texture: &Texture,
        at: Point<i32, Px>,
        clip: Option<PixelRect>,
        flip: Flip,
    ) -> Result<(), GraphicsError> {
        let source_bounds = texture.bounds();
        let clip = clip.unwrap_or(source_bounds);
        let [mod_r, mod_g, mod_b] = texture.color_mod();
        let mod_a = texture.alpha_mod();
        let blend_mode = texture.blend_mode();

        let lock = texture.lock()?;
        let source = lock.pixels();

        let Some(visible) = PixelRect::new(at, clip.extent()).intersection(&self.bounds()) else {
            return Ok(());
        };

        for y in visible.y()..visible.bottom() {
            for x in visible.x()..visible.right() {
                let (dx, dy) = (x - at.x, y - at.y);

                let source_x = if flip.contains(Flip::HORIZONTAL) {
                    clip.right() - 1 - dx
                } else {
                    clip.x() + dx
                };
                let source_y = if flip.contains(Flip::VERTICAL) {
                    clip.bottom() - 1 - dy
                } else {
                    clip.y() + dy
                };

                if !source_bounds.contains(Point::new(source_x, source_y)) {
                    continue;
                }

                #[allow(clippy::cast_sign_loss)]
                let [r, g, b, a] = source.pixel32(source_x as u32, source_y as u32).to_be_bytes();
                let src = [
                    modulate(r, mod_r),
                    modulate(g, mod_g),
                    modulate(b, mod_b),
                    modulate(a, mod_a),
                ];

                let out = match blend_mode {
                    BlendMode::None => src,
                    BlendMode::Blend => {
                        #[allow(clippy::cast_sign_loss)]
                        let dst = self.target.pixel32(x as u32, y as u32).to_be_bytes();
                        blend_over(src, dst)
                    }
                };

                self.plot(x, y, u32::from_be_bytes(out));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.target
    }

    #[must_use]
    pub fn into_pixels(self) -> PixelBuffer {
        self.target
    }

    /// Writes the current contents of the canvas to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), GraphicsError> {
        codec::save_png(&self.target, path)
    }

    #[allow(clippy::cast_sign_loss)]
    fn plot(&mut self, x: i32, y: i32, color: u32) {
        self.target.set_pixel32(x as u32, y as u32, color);
    }
}

impl From<PixelBuffer> for Canvas {
    fn from(target: PixelBuffer) -> Self {
        Self {
            target,
            draw_color: Color::WHITE,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn modulate(channel: u8, factor: u8) -> u8 {
    ((u32::from(channel) * u32::from(factor) + 127) / 255) as u8
}

/// Source-over compositing on 8-bit channels.
#[allow(clippy::cast_possible_truncation)]
fn blend_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let alpha = u32::from(src[3]);
    let inverse = 255 - alpha;
    let mix = |s: u8, d: u8| ((u32::from(s) * alpha + u32::from(d) * inverse + 127) / 255) as u8;

    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (alpha + (u32::from(dst[3]) * inverse + 127) / 255) as u8,
    ]
}
