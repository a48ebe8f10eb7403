//! Monospace bitmap fonts.
//!
//! A font sheet is a single image split into a 16x16 grid of equal cells, one
//! per code point 0-255 in row-major order. Building a font trims every cell
//! down to the columns that contain visible pixels and derives two metrics
//! shared by every glyph: the width of a space and the height of a line.
//!
//! ```text
//!   +---+---+---+     cell (0, 0) holds code point 0, cell (1, 0) code
//!   | 0 | 1 | 2 | ... point 1, and so on. Any pixel equal to the sheet's
//!   +---+---+---+     top-left pixel is background.
//!   |16 |17 |18 | ...
//! ```

mod atlas;
mod bitmap_font;
mod error;
mod layout;

pub use atlas::{GlyphAtlas, GLYPH_COUNT, GRID};
pub use bitmap_font::BitmapFont;
pub use error::FontError;
pub use layout::{GlyphPlacement, Layout};
