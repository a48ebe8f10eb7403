use std::sync::Arc;

use geometry::{Extent, PixelRect, Point, Px};
use graphics::{Canvas, Flip, Texture};

use crate::{FontError, GlyphAtlas, Layout};

/// A font sheet texture together with its scanned glyph atlas.
pub struct BitmapFont {
    texture: Arc<Texture>,
    atlas: GlyphAtlas,
}

impl BitmapFont {
    /// Locks `texture`, scans its pixels into a glyph atlas, and unlocks it
    /// again.
    ///
    /// Fails without producing a font if the texture is already locked or is
    /// too small for the 16x16 grid.
    pub fn build(texture: Arc<Texture>) -> Result<Self, FontError> {
        let atlas = {
            let lock = texture.lock().map_err(FontError::Lock)?;
            GlyphAtlas::scan(lock.pixels())?
        };

        tracing::info!(
            space_width = atlas.space_width(),
            newline_height = atlas.newline_height(),
            "built bitmap font"
        );

        Ok(Self { texture, atlas })
    }

    #[must_use]
    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    #[must_use]
    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<PixelRect> {
        self.atlas.glyph(ch)
    }

    #[must_use]
    pub fn space_width(&self) -> i32 {
        self.atlas.space_width()
    }

    #[must_use]
    pub fn newline_height(&self) -> i32 {
        self.atlas.newline_height()
    }

    /// See [`GlyphAtlas::layout`].
    #[must_use]
    pub fn layout<'a>(&'a self, origin: Point<i32, Px>, text: &'a str) -> Layout<'a> {
        self.atlas.layout(origin, text)
    }

    /// Fails on the first character outside the font.
    pub fn measure(&self, text: &str) -> Result<Extent<i32, Px>, FontError> {
        self.atlas.measure(text)
    }

    /// Draws `text` onto `canvas` with the pen starting at `origin`.
    ///
    /// Nothing is drawn if the text contains a character outside the font.
    pub fn render_text(
        &self,
        canvas: &mut Canvas,
        origin: Point<i32, Px>,
        text: &str,
    ) -> Result<(), FontError> {
        for placement in self.atlas.try_layout(origin, text)? {
            canvas
                .copy(&self.texture, placement.at, Some(placement.clip), Flip::empty())
                .map_err(FontError::Render)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for BitmapFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitmapFont")
            .field("texture", &self.texture)
            .field("space_width", &self.atlas.space_width())
            .field("newline_height", &self.atlas.newline_height())
            .finish_non_exhaustive()
    }
}
