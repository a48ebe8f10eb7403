use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::{GraphicsError, PixelBuffer};

/// Loads a PNG file from disk as an RGBA8888 pixel buffer.
pub fn load_png(path: impl AsRef<Path>) -> Result<PixelBuffer, GraphicsError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GraphicsError::Io {
        path: path.to_owned(),
        source,
    })?;

    let pixels = decode_png(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        width = pixels.width(),
        height = pixels.height(),
        "loaded image"
    );
    Ok(pixels)
}

/// Decodes a PNG stream into an RGBA8888 pixel buffer.
///
/// Palette, grayscale, and 16-bit images are widened to 8-bit RGBA; images
/// without an alpha channel become fully opaque.
pub fn decode_png(reader: impl Read) -> Result<PixelBuffer, GraphicsError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;
    buffer.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buffer,
        png::ColorType::Rgb => buffer
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xFF])
            .collect(),
        png::ColorType::GrayscaleAlpha => buffer
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buffer.iter().flat_map(|&v| [v, v, v, 0xFF]).collect(),
        other @ png::ColorType::Indexed => return Err(GraphicsError::UnsupportedColorType(other)),
    };

    Ok(PixelBuffer::from_vec(rgba, info.width))
}

/// Encodes an RGBA8888 pixel buffer as PNG.
pub fn encode_png(pixels: &PixelBuffer, writer: impl Write) -> Result<(), GraphicsError> {
    let mut encoder = png::Encoder::new(writer, pixels.width(), pixels.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels.bytes())?;
    writer.finish()?;
    Ok(())
}

/// Writes an RGBA8888 pixel buffer to disk as a PNG file.
pub fn save_png(pixels: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), GraphicsError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| GraphicsError::Io {
        path: path.to_owned(),
        source,
    })?;

    encode_png(pixels, BufWriter::new(file))?;
    tracing::debug!(path = %path.display(), "saved image");
    Ok(())
}
