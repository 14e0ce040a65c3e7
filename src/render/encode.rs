use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, AppError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| AppError::ImageError(e.to_string()))?;
    Ok(bytes)
}

pub fn to_data_uri(png: &[u8]) -> String {
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(png))
}

/// Rendered PNG, kept both raw (for writing to disk) and as a data URI.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub png: Vec<u8>,
    pub data_uri: String,
}

impl EncodedImage {
    pub fn from_image(img: &RgbImage) -> Result<Self, AppError> {
        let png = encode_png(img)?;
        let data_uri = to_data_uri(&png);
        Ok(EncodedImage { png, data_uri })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn png_has_signature() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn data_uri_round_trips_through_base64() {
        let img = RgbImage::from_pixel(4, 4, Rgb([255, 0, 0]));
        let encoded = EncodedImage::from_image(&img).unwrap();
        assert!(encoded.data_uri.starts_with(DATA_URI_PREFIX));
        let payload = &encoded.data_uri[DATA_URI_PREFIX.len()..];
        assert_eq!(STANDARD.decode(payload).unwrap(), encoded.png);
    }

    #[test]
    fn encoding_is_deterministic() {
        let img = RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]));
        assert_eq!(
            EncodedImage::from_image(&img).unwrap(),
            EncodedImage::from_image(&img).unwrap()
        );
    }
}
