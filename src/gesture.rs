use imageproc::point::Point;

use crate::pipeline::contour::{Defect, HandGeometry};
use crate::types::{Letter, Tuning};

/// Maps hand geometry to a letter, or `None` for no recognizable gesture.
///
/// Each defect deep and sharp enough counts as a valley between two raised
/// fingers, so N valleys mean N + 1 fingers showing. The finger count picks
/// the letter directly except for the single-finger case, where the
/// bounding-box aspect ratio separates a wide curved hand (`C`) from a
/// tall or square fist (`A`).
pub fn classify_geometry(geometry: &HandGeometry, tuning: &Tuning) -> Option<Letter> {
    let valleys = geometry
        .defects
        .iter()
        .filter(|defect| is_valley(&geometry.contour, defect, tuning))
        .count();
    let fingers_visible = valleys + 1;

    match fingers_visible {
        n if n >= 4 => Some(Letter::B),
        3 => Some(Letter::W),
        2 => Some(Letter::V),
        1 => {
            let (width, height) = bounding_extent(&geometry.contour);
            if height == 0.0 {
                return None;
            }
            if width / height > tuning.wide_aspect_ratio {
                Some(Letter::C)
            } else {
                Some(Letter::A)
            }
        }
        _ => None,
    }
}

fn is_valley(contour: &[Point<i32>], defect: &Defect, tuning: &Tuning) -> bool {
    let angle = valley_angle_degrees(
        contour[defect.start],
        contour[defect.end],
        contour[defect.far],
    );
    angle <= tuning.max_valley_angle_degrees && defect.depth > tuning.min_valley_depth
}

/// Interior angle at `far` of the (start, end, far) triangle, in degrees.
pub(crate) fn valley_angle_degrees(start: Point<i32>, end: Point<i32>, far: Point<i32>) -> f64 {
    let a = distance(end, start);
    let b = distance(far, start);
    let c = distance(end, far);

    // A near-degenerate triangle divides by almost zero; the epsilon keeps
    // the ratio finite and an out-of-range cosine simply fails the valley
    // test through NaN.
    let cos = (b * b + c * c - a * a) / (2.0 * b * c + 1e-6);
    cos.acos().to_degrees()
}

fn distance(a: Point<i32>, b: Point<i32>) -> f64 {
    ((a.x - b.x) as f64).hypot((a.y - b.y) as f64)
}

fn bounding_extent(contour: &[Point<i32>]) -> (f64, f64) {
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for point in contour {
        min_x = min_x.min(point.x);
        max_x = max_x.max(point.x);
        min_y = min_y.min(point.y);
        max_y = max_y.max(point.y);
    }

    if contour.is_empty() {
        return (0.0, 0.0);
    }
    ((max_x - min_x) as f64, (max_y - min_y) as f64)
}
