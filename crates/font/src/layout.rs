use std::{iter::FusedIterator, str::Chars};

use geometry::{PixelRect, Point, Px};

use crate::{FontError, GlyphAtlas};

/// Where to draw one glyph: the clip rectangle within the font sheet and the
/// pen position its top-left corner is copied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPlacement {
    pub ch: char,
    pub clip: PixelRect,
    pub at: Point<i32, Px>,
}

/// Walks a string left to right, placing one glyph per drawable character.
///
/// - `' '` moves the pen right by the space width and places nothing.
/// - `'\n'` returns the pen to the starting column and moves it down by the
///   line height.
/// - Anything else is placed at the pen, which then moves right by the glyph's
///   width plus one pixel.
///
/// A character outside the atlas yields [`FontError::UnmappedChar`] and ends
/// the layout. Clone the layout to restart it from the same point.
#[derive(Clone, Debug)]
pub struct Layout<'a> {
    atlas: &'a GlyphAtlas,
    chars: Chars<'a>,
    line_start: i32,
    pen: Point<i32, Px>,
}

impl<'a> Layout<'a> {
    pub(crate) fn new(atlas: &'a GlyphAtlas, origin: Point<i32, Px>, text: &'a str) -> Self {
        Self {
            atlas,
            chars: text.chars(),
            line_start: origin.x,
            pen: origin,
        }
    }

    /// The current pen position.
    #[must_use]
    pub fn pen(&self) -> Point<i32, Px> {
        self.pen
    }
}

impl<'a> Iterator for Layout<'a> {
    type Item = Result<GlyphPlacement, FontError>;

    fn next(&mut self) -> Option<Self::Item> {
        for ch in self.chars.by_ref() {
            match ch {
                ' ' => self.pen.x += self.atlas.space_width(),
                '\n' => {
                    self.pen.x = self.line_start;
                    self.pen.y += self.atlas.newline_height();
                }
                ch => {
                    let Some(clip) = self.atlas.glyph(ch) else {
                        self.chars = "".chars();
                        return Some(Err(FontError::UnmappedChar(ch)));
                    };

                    let at = self.pen;
                    self.pen.x += clip.width() + 1;
                    return Some(Ok(GlyphPlacement { ch, clip, at }));
                }
            }
        }

        None
    }
}

impl<'a> FusedIterator for Layout<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sheet;

    fn atlas() -> GlyphAtlas {
        // 8x12 cells; 'A' is four columns wide, 'B' one; top = 2, line = 6.
        let pixels = sheet(
            8,
            12,
            &[(b'A', 2, 3), (b'A', 5, 8), (b'B', 1, 2), (b'B', 1, 6)],
        );
        GlyphAtlas::scan(pixels.as_ref()).unwrap()
    }

    #[test]
    fn empty_text() {
        let atlas = atlas();
        let mut layout = atlas.layout(Point::new(3, 4), "");

        assert!(layout.next().is_none());
        assert_eq!(layout.pen(), Point::new(3, 4));
    }

    #[test]
    fn space_only_moves_the_pen() {
        let atlas = atlas();
        let mut layout = atlas.layout(Point::new(3, 4), " ");

        assert!(layout.next().is_none());
        assert_eq!(layout.pen(), Point::new(3 + atlas.space_width(), 4));
    }

    #[test]
    fn newline_resets_the_column() {
        let atlas = atlas();
        let placements: Vec<_> = atlas.try_layout(Point::new(10, 20), "A\nB").unwrap();

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].ch, 'A');
        assert_eq!(placements[0].at, Point::new(10, 20));
        assert_eq!(placements[0].clip, atlas.glyph('A').unwrap());
        assert_eq!(placements[1].ch, 'B');
        assert_eq!(
            placements[1].at,
            Point::new(10, 20 + atlas.newline_height())
        );
    }

    #[test]
    fn glyphs_advance_by_width_plus_one() {
        let atlas = atlas();
        let placements: Vec<_> = atlas.try_layout(Point::zero(), "AB A").unwrap();

        let a_width = atlas.glyph('A').unwrap().width();
        let b_width = atlas.glyph('B').unwrap().width();

        assert_eq!(placements[0].at.x, 0);
        assert_eq!(placements[1].at.x, a_width + 1);
        assert_eq!(
            placements[2].at.x,
            a_width + 1 + b_width + 1 + atlas.space_width()
        );
    }

    #[test]
    fn restartable() {
        let atlas = atlas();
        let layout = atlas.layout(Point::zero(), "AB\nBA");

        let first: Result<Vec<_>, _> = layout.clone().collect();
        let second: Result<Vec<_>, _> = layout.collect();

        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn unmapped_characters_end_the_layout() {
        let atlas = atlas();
        let mut layout = atlas.layout(Point::zero(), "A€B");

        assert_eq!(layout.next().unwrap().unwrap().ch, 'A');
        assert!(matches!(
            layout.next(),
            Some(Err(FontError::UnmappedChar('€')))
        ));
        assert!(layout.next().is_none());

        assert!(matches!(
            atlas.try_layout(Point::zero(), "A€B"),
            Err(FontError::UnmappedChar('€'))
        ));
        assert_eq!(atlas.try_layout(Point::zero(), "AB").unwrap().len(), 2);
    }
}
