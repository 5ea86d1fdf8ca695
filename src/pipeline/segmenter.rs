use image::{GrayImage, RgbImage, imageops};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::gaussian_blur_f32;
use rayon::prelude::*;

use crate::types::{RoiBox, Tuning};

/// Isolates the hand silhouette inside the fixed capture box.
///
/// Crop, luma conversion and a heavy Gaussian blur flatten skin texture,
/// then an Otsu threshold with inverted mapping turns the dark hand into
/// foreground (255) on a zero background. A degenerate all-background or
/// all-foreground mask is valid output; the contour stage filters it.
pub fn segment_hand(frame: &RgbImage, tuning: &Tuning) -> GrayImage {
    let roi = crop_roi(frame, &tuning.roi);
    let gray = rgb_to_luma(&roi);
    let blurred = gaussian_blur_f32(&gray, tuning.blur_sigma);
    let level = otsu_level(&blurred);
    threshold(&blurred, level, ThresholdType::BinaryInverted)
}

fn crop_roi(frame: &RgbImage, roi: &RoiBox) -> RgbImage {
    imageops::crop_imm(frame, roi.left, roi.top, roi.width(), roi.height()).to_image()
}

fn rgb_to_luma(rgb: &RgbImage) -> GrayImage {
    let (width, height) = rgb.dimensions();
    let luma: Vec<u8> = rgb
        .as_raw()
        .par_chunks_exact(3)
        .map(|px| {
            let y = 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
            y.round().clamp(0.0, 255.0) as u8
        })
        .collect();

    // One luma byte per RGB triple, so the buffer length always matches.
    GrayImage::from_raw(width, height, luma).unwrap_or_else(|| GrayImage::new(width, height))
}
