use graphics::GraphicsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("unable to lock bitmap font texture")]
    Lock(#[source] GraphicsError),

    #[error("a {width}x{height} image is too small to hold a 16x16 glyph grid")]
    AtlasTooSmall { width: u32, height: u32 },

    #[error("no glyph for character {0:?}")]
    UnmappedChar(char),

    #[error("unable to draw text")]
    Render(#[source] GraphicsError),
}
