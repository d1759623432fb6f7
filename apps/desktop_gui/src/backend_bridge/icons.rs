//! Coin logo decoding, done on the backend worker before textures are made.

use image::imageops::FilterType;

/// Longest edge of a decoded logo, twice the drawn size for crisp scaling.
pub const ICON_PIXELS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

pub fn decode_icon(bytes: &[u8]) -> Result<IconImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if decoded.width().max(decoded.height()) > ICON_PIXELS {
        decoded.resize(ICON_PIXELS, ICON_PIXELS, FilterType::Triangle)
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(IconImage {
        size,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([247, 147, 26, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(pixels)
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}
