use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::point::Point;

use crate::types::Tuning;

/// One concavity between the convex hull and the contour.
///
/// `start`, `end` and `far` index into the contour's point sequence:
/// the two hull vertices bounding the concavity and the boundary point
/// deepest inside it. `depth` is the perpendicular distance from `far`
/// to the hull chord, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Defect {
    pub start: usize,
    pub end: usize,
    pub far: usize,
    pub depth: f64,
}

/// Hand candidate geometry extracted from a binary mask.
#[derive(Clone, Debug)]
pub struct HandGeometry {
    pub contour: Vec<Point<i32>>,
    pub hull: Vec<usize>,
    pub defects: Vec<Defect>,
}

/// Finds the hand candidate in a silhouette mask.
///
/// Returns `None` whenever the mask holds no usable hand: no foreground,
/// largest blob under the noise floor, or hull geometry too degenerate for
/// defect analysis. All of these mean "no gesture", never an error.
pub fn analyze_mask(mask: &GrayImage, tuning: &Tuning) -> Option<HandGeometry> {
    let contours = find_contours::<i32>(mask);
    let (area, hand) = contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| (contour_area(&c.points), c))
        .max_by(|a, b| a.0.total_cmp(&b.0))?;

    if area < tuning.min_hand_area {
        log::debug!("largest blob is {area:.0} px^2, below the noise floor");
        return None;
    }

    let contour = hand.points;
    let hull = convex_hull_indices(&contour);
    if hull.len() <= 3 {
        return None;
    }

    let defects = convexity_defects(&contour, &hull);
    if defects.is_empty() {
        return None;
    }

    Some(HandGeometry {
        contour,
        hull,
        defects,
    })
}

/// Shoelace area of the closed boundary polygon.
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut doubled: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        doubled += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    doubled.abs() as f64 / 2.0
}

/// Convex hull of the contour, as indices into its point sequence sorted
/// by traversal position so consecutive entries bound one boundary arc.
pub(crate) fn convex_hull_indices(points: &[Point<i32>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|&i| (points[i].x, points[i].y));
    order.dedup_by(|a, b| points[*a] == points[*b]);

    if order.len() < 3 {
        return order;
    }

    let turns_right = |hull: &[usize], i: usize| {
        let o = points[hull[hull.len() - 2]];
        let a = points[hull[hull.len() - 1]];
        let b = points[i];
        cross(o, a, b) <= 0
    };

    let mut hull: Vec<usize> = Vec::with_capacity(order.len() + 1);
    for &i in &order {
        while hull.len() >= 2 && turns_right(&hull, i) {
            hull.pop();
        }
        hull.push(i);
    }

    let lower_len = hull.len() + 1;
    for &i in order.iter().rev().skip(1) {
        while hull.len() >= lower_len && turns_right(&hull, i) {
            hull.pop();
        }
        hull.push(i);
    }
    hull.pop();

    hull.sort_unstable();
    hull
}

/// Walks each boundary arc between consecutive hull vertices and emits one
/// defect per non-empty arc, keyed by the point farthest from the chord.
pub(crate) fn convexity_defects(points: &[Point<i32>], hull: &[usize]) -> Vec<Defect> {
    let n = points.len();
    let mut defects = Vec::new();

    for (k, &start) in hull.iter().enumerate() {
        let end = hull[(k + 1) % hull.len()];
        let mut far = None;
        let mut depth = f64::MIN;

        let mut i = (start + 1) % n;
        while i != end {
            let d = chord_distance(points[start], points[end], points[i]);
            if d > depth {
                far = Some(i);
                depth = d;
            }
            i = (i + 1) % n;
        }

        if let Some(far) = far {
            defects.push(Defect {
                start,
                end,
                far,
                depth,
            });
        }
    }

    defects
}

fn cross(o: Point<i32>, a: Point<i32>, b: Point<i32>) -> i64 {
    (a.x - o.x) as i64 * (b.y - o.y) as i64 - (a.y - o.y) as i64 * (b.x - o.x) as i64
}

/// Perpendicular distance from `p` to the line through `a` and `b`, in pixels.
fn chord_distance(a: Point<i32>, b: Point<i32>, p: Point<i32>) -> f64 {
    let chord = ((b.x - a.x) as f64).hypot((b.y - a.y) as f64);
    if chord == 0.0 {
        return ((p.x - a.x) as f64).hypot((p.y - a.y) as f64);
    }
    (cross(a, b, p).abs() as f64) / chord
}
