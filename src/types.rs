use thiserror::Error;

/// Fixed capture box where the hand is expected, in source frame pixels.
pub const ROI: RoiBox = RoiBox {
    top: 50,
    left: 50,
    bottom: 450,
    right: 450,
};

/// Sigma of the silhouette-smoothing blur, equivalent to a 35x35 Gaussian
/// kernel with auto-derived sigma: 0.3 * ((35 - 1) * 0.5 - 1) + 0.8.
pub const BLUR_SIGMA: f32 = 5.6;

/// Contours smaller than this (in ROI-local square pixels) are noise.
pub const MIN_HAND_AREA: f64 = 2500.0;

/// A concavity only counts as a finger valley at or below this angle.
pub const MAX_VALLEY_ANGLE_DEGREES: f64 = 90.0;

/// A concavity only counts as a finger valley beyond this depth, in pixels.
pub const MIN_VALLEY_DEPTH: f64 = 20.0;

/// Bounding boxes wider than this ratio separate a curved hand from a fist.
pub const WIDE_ASPECT_RATIO: f64 = 1.25;

/// One of the static letters the silhouette analysis can recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Letter {
    A,
    B,
    C,
    V,
    W,
}

impl Letter {
    pub fn symbol(&self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::V => "V",
            Letter::W => "W",
        }
    }
}

/// Per-frame outcome reported across the transport boundary.
///
/// `NoGesture` is the normal result for an empty or ambiguous silhouette,
/// `Fault` stands for any processing failure on that frame. Neither stops
/// the pipeline from accepting further frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recognition {
    Letter(Letter),
    NoGesture,
    Fault,
}

impl Recognition {
    /// Wire symbol sent back to the viewer: the letter, "" or "?".
    pub fn symbol(&self) -> &'static str {
        match self {
            Recognition::Letter(letter) => letter.symbol(),
            Recognition::NoGesture => "",
            Recognition::Fault => "?",
        }
    }
}

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("failed to decode frame: {0}")]
    Decode(#[from] image::ImageError),
    #[error("decoded frame has zero width or height")]
    EmptyFrame,
    #[error("frame {width}x{height} does not cover the {min}x{min} capture area")]
    FrameTooSmall { width: u32, height: u32, min: u32 },
}

/// Rectangular crop in source pixel coordinates, end-exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoiBox {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl RoiBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.right <= frame_width && self.bottom <= frame_height
    }
}

/// Tunable thresholds of the silhouette pipeline.
///
/// The defaults are the empirically calibrated values the recognizer was
/// tuned with; change them together with the capture setup, not per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub roi: RoiBox,
    pub blur_sigma: f32,
    pub min_hand_area: f64,
    pub max_valley_angle_degrees: f64,
    pub min_valley_depth: f64,
    pub wide_aspect_ratio: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            roi: ROI,
            blur_sigma: BLUR_SIGMA,
            min_hand_area: MIN_HAND_AREA,
            max_valley_angle_degrees: MAX_VALLEY_ANGLE_DEGREES,
            min_valley_depth: MIN_VALLEY_DEPTH,
            wide_aspect_ratio: WIDE_ASPECT_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_matches_calibrated_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.roi.left, 50);
        assert_eq!(tuning.roi.right, 450);
        assert_eq!(tuning.roi.width(), 400);
        assert_eq!(tuning.roi.height(), 400);
        assert_eq!(tuning.min_hand_area, 2500.0);
        assert_eq!(tuning.max_valley_angle_degrees, 90.0);
        assert_eq!(tuning.min_valley_depth, 20.0);
        assert_eq!(tuning.wide_aspect_ratio, 1.25);
    }

    #[test]
    fn roi_requires_at_least_450_square_frames() {
        assert!(ROI.fits_within(450, 450));
        assert!(ROI.fits_within(1280, 720));
        assert!(!ROI.fits_within(449, 450));
        assert!(!ROI.fits_within(640, 400));
    }

    #[test]
    fn recognition_symbols_match_wire_contract() {
        assert_eq!(Recognition::Letter(Letter::A).symbol(), "A");
        assert_eq!(Recognition::Letter(Letter::W).symbol(), "W");
        assert_eq!(Recognition::NoGesture.symbol(), "");
        assert_eq!(Recognition::Fault.symbol(), "?");
    }

    #[test]
    fn frame_too_small_display() {
        let err = FrameError::FrameTooSmall {
            width: 320,
            height: 240,
            min: 450,
        };
        assert_eq!(
            err.to_string(),
            "frame 320x240 does not cover the 450x450 capture area"
        );
    }
}
