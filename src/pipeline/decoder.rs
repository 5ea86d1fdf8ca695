use image::RgbImage;

use crate::types::{FrameError, Tuning};

/// Decodes one encoded frame payload into an RGB pixel grid.
///
/// The caller is expected to have stripped any transport framing (for
/// example a `data:image/jpeg;base64,` prefix) before handing bytes over.
/// Frames too small to contain the capture box are rejected here rather
/// than crashing the crop downstream.
pub fn decode_frame(bytes: &[u8], tuning: &Tuning) -> Result<RgbImage, FrameError> {
    let decoded = image::load_from_memory(bytes)?;
    let frame = decoded.to_rgb8();
    let (width, height) = frame.dimensions();

    if width == 0 || height == 0 {
        return Err(FrameError::EmptyFrame);
    }
    if !tuning.roi.fits_within(width, height) {
        return Err(FrameError::FrameTooSmall {
            width,
            height,
            min: tuning.roi.right.max(tuning.roi.bottom),
        });
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::encode_png;

    #[test]
    fn empty_payload_is_a_decode_error() {
        let err = decode_frame(&[], &Tuning::default()).unwrap_err();
        assert!(matches!(err, FrameError::Decode(_)));
    }

    #[test]
    fn garbage_payload_is_a_decode_error() {
        let err = decode_frame(b"not an image at all", &Tuning::default()).unwrap_err();
        assert!(matches!(err, FrameError::Decode(_)));
    }

    #[test]
    fn undersized_frame_is_rejected() {
        let png = encode_png(&RgbImage::from_pixel(320, 240, image::Rgb([255; 3])));
        let err = decode_frame(&png, &Tuning::default()).unwrap_err();
        assert!(matches!(
            err,
            FrameError::FrameTooSmall {
                width: 320,
                height: 240,
                min: 450,
            }
        ));
    }

    #[test]
    fn full_size_frame_decodes() {
        let png = encode_png(&RgbImage::from_pixel(500, 500, image::Rgb([255; 3])));
        let frame = decode_frame(&png, &Tuning::default()).unwrap();
        assert_eq!(frame.dimensions(), (500, 500));
    }
}
