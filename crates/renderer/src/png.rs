//! PNG encoding for canvas pixel data.
//!
//! Rows are fed to the deflate stream one at a time so encoding never holds
//! a second full-size copy of the image. Fully opaque images are written as
//! RGB (color type 2), anything else as RGBA (color type 6).

use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const COLOR_TYPE_RGB: u8 = 2;
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode straight (non-premultiplied) RGBA pixels as PNG into `out`.
///
/// `pixels` must hold exactly `width * height * 4` bytes in row-major order.
pub fn write_png<W: Write>(out: &mut W, pixels: &[u8], width: u32, height: u32) -> io::Result<()> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected || width == 0 || height == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "pixel buffer of {} bytes does not match {}x{} RGBA",
                pixels.len(),
                width,
                height
            ),
        ));
    }

    let opaque = pixels.chunks_exact(4).all(|p| p[3] == 255);
    let color_type = if opaque { COLOR_TYPE_RGB } else { COLOR_TYPE_RGBA };

    out.write_all(&PNG_SIGNATURE)?;

    // IHDR chunk
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(out, b"IHDR", &ihdr)?;

    // IDAT chunk (image data)
    let idat = deflate_rows(pixels, width as usize, opaque)?;
    write_chunk(out, b"IDAT", &idat)?;

    // IEND chunk
    write_chunk(out, b"IEND", &[])?;

    Ok(())
}

/// Encode into a byte vector.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> io::Result<Vec<u8>> {
    let mut png = Vec::new();
    write_png(&mut png, pixels, width, height)?;
    Ok(png)
}

fn deflate_rows(pixels: &[u8], width: usize, opaque: bool) -> io::Result<Vec<u8>> {
    let channels = if opaque { 3 } else { 4 };
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    let mut row = Vec::with_capacity(1 + width * channels);

    for src in pixels.chunks_exact(width * 4) {
        row.clear();
        row.push(0); // filter type: none
        if opaque {
            for p in src.chunks_exact(4) {
                row.extend_from_slice(&p[..3]);
            }
        } else {
            row.extend_from_slice(src);
        }
        encoder.write_all(&row)?;
    }

    encoder.finish()
}

fn write_chunk<W: Write>(out: &mut W, chunk_type: &[u8; 4], data: &[u8]) -> io::Result<()> {
    out.write_all(&(data.len() as u32).to_be_bytes())?;
    out.write_all(chunk_type)?;
    out.write_all(data)?;

    // CRC covers type and data
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    out.write_all(&hasher.finalize().to_be_bytes())
}
