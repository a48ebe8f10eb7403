use geometry::{Extent, PixelRect, Point, Px};
use graphics::PixelBufferRef;

use crate::{FontError, GlyphPlacement, Layout};

/// Cells per row and per column of a font sheet.
pub const GRID: u32 = 16;

/// One glyph per code point 0-255.
pub const GLYPH_COUNT: usize = 256;

/// Glyph rectangles and line metrics scanned from a font sheet.
///
/// The atlas is a pure function of the sheet's pixels: scanning the same
/// pixels twice gives equal atlases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphAtlas {
    glyphs: [PixelRect; GLYPH_COUNT],
    cell: Extent<i32, Px>,
    top: i32,
    space_width: i32,
    newline_height: i32,
}

impl GlyphAtlas {
    /// Scans a font sheet.
    ///
    /// Each glyph starts as its full cell. The left edge moves to the first
    /// column holding a non-background pixel and the width is cut back to the
    /// last such column. Cells with no visible pixels (such as the space) keep
    /// the full cell width.
    ///
    /// Vertically, every glyph is trimmed by the same amount: the smallest
    /// first-visible row of any cell. The line height is measured from that
    /// row to the bottom-most visible row of `'A'`.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn scan(pixels: PixelBufferRef<'_>) -> Result<Self, FontError> {
        let (width, height) = (pixels.width(), pixels.height());
        let cell_width = (width / GRID) as i32;
        let cell_height = (height / GRID) as i32;

        if cell_width == 0 || cell_height == 0 {
            return Err(FontError::AtlasTooSmall { width, height });
        }

        let background = pixels.pixel32(0, 0);
        let is_ink = |x: i32, y: i32| pixels.pixel32(x as u32, y as u32) != background;

        let mut glyphs = [PixelRect::zero(); GLYPH_COUNT];
        let mut top = cell_height;
        let mut base_a = cell_height;

        for (code, glyph) in glyphs.iter_mut().enumerate() {
            let cell = cell_bounds(code, cell_width, cell_height);
            let column_has_ink =
                |col: i32| (0..cell_height).any(|row| is_ink(cell.x() + col, cell.y() + row));
            let row_has_ink =
                |row: i32| (0..cell_width).any(|col| is_ink(cell.x() + col, cell.y() + row));

            let mut x = cell.x();
            let mut w = cell_width;

            if let Some(first) = (0..cell_width).find(|&col| column_has_ink(col)) {
                x = cell.x() + first;
            }

            if let Some(last) = (0..cell_width).rev().find(|&col| column_has_ink(col)) {
                w = cell.x() + last - x + 1;
            }

            if let Some(row) = (0..cell_height).find(|&row| row_has_ink(row)) {
                top = top.min(row);
            }

            if code == usize::from(b'A') {
                if let Some(row) = (0..cell_height).rev().find(|&row| row_has_ink(row)) {
                    base_a = row;
                }
            }

            *glyph = PixelRect::from_xywh(x, cell.y(), w, cell_height);
        }

        for glyph in &mut glyphs {
            *glyph = PixelRect::from_xywh(
                glyph.x(),
                glyph.y() + top,
                glyph.width(),
                glyph.height() - top,
            );
        }

        let atlas = Self {
            glyphs,
            cell: Extent::new(cell_width, cell_height),
            top,
            space_width: cell_width / 2,
            newline_height: base_a - top,
        };

        tracing::debug!(
            cell_width,
            cell_height,
            top,
            space_width = atlas.space_width,
            newline_height = atlas.newline_height,
            "scanned glyph atlas"
        );

        Ok(atlas)
    }

    /// The clip rectangle for `ch`, or `None` if the character is outside the
    /// atlas's 0-255 range.
    #[must_use]
    pub fn glyph(&self, ch: char) -> Option<PixelRect> {
        u8::try_from(ch).ok().map(|code| self.glyphs[usize::from(code)])
    }

    #[must_use]
    pub fn glyphs(&self) -> &[PixelRect; GLYPH_COUNT] {
        &self.glyphs
    }

    #[must_use]
    pub fn cell_extent(&self) -> Extent<i32, Px> {
        self.cell
    }

    /// The untrimmed grid cell for a code point.
    #[must_use]
    pub fn cell(&self, code: u8) -> PixelRect {
        cell_bounds(usize::from(code), self.cell.width, self.cell.height)
    }

    /// Rows of leading background removed from the top of every glyph.
    #[must_use]
    pub fn top(&self) -> i32 {
        self.top
    }

    #[must_use]
    pub fn space_width(&self) -> i32 {
        self.space_width
    }

    #[must_use]
    pub fn newline_height(&self) -> i32 {
        self.newline_height
    }

    /// Lays out `text` with the pen starting at `origin`. The layout ends
    /// with an error at the first character outside the atlas.
    #[must_use]
    pub fn layout<'a>(&'a self, origin: Point<i32, Px>, text: &'a str) -> Layout<'a> {
        Layout::new(self, origin, text)
    }

    /// Collects the whole layout, or the first character outside the atlas.
    pub fn try_layout(
        &self,
        origin: Point<i32, Px>,
        text: &str,
    ) -> Result<Vec<GlyphPlacement>, FontError> {
        self.layout(origin, text).collect()
    }

    /// The extent of the glyphs drawn for `text`, measured from the pen's
    /// starting point. Trailing spaces and empty lines add nothing.
    pub fn measure(&self, text: &str) -> Result<Extent<i32, Px>, FontError> {
        self.layout(Point::zero(), text)
            .try_fold(Extent::zero(), |extent: Extent<i32, Px>, placement| {
                let placement = placement?;
                let right = placement.at.x + placement.clip.width();
                let bottom = placement.at.y + placement.clip.height();
                Ok(Extent::new(extent.width.max(right), extent.height.max(bottom)))
            })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn cell_bounds(code: usize, cell_width: i32, cell_height: i32) -> PixelRect {
    let column = (code % GRID as usize) as i32;
    let row = (code / GRID as usize) as i32;
    PixelRect::from_xywh(
        column * cell_width,
        row * cell_height,
        cell_width,
        cell_height,
    )
}
