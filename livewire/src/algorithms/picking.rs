use crate::geometry::math::{dist_sq, seg_distance_sq};
use crate::model::Vec2;

/// Index of the point closest to `(x, y)` within `tol` (canvas px).
pub fn nearest_point(points: &[Vec2], x: f32, y: f32, tol: f32) -> Option<(usize, f32)> {
    let tol2 = tol * tol;
    let q = Vec2::new(x, y);
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let d2 = dist_sq(*p, q);
        if d2 <= tol2 && best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((i, d2));
        }
    }
    best.map(|(i, d2)| (i, d2.sqrt()))
}

/// Nearest point regardless of distance; ties keep the lowest index.
pub fn nearest_point_any(points: &[Vec2], q: Vec2) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let d2 = dist_sq(*p, q);
        if best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((i, d2));
        }
    }
    best
}

/// True when `(x, y)` lies within `tol` of any segment of the polyline.
/// Closed polylines also test the segment from the last point back to the first.
pub fn polyline_within(points: &[Vec2], closed: bool, x: f32, y: f32, tol: f32) -> bool {
    let tol2 = tol * tol;
    match points.len() {
        0 => false,
        1 => dist_sq(points[0], Vec2::new(x, y)) <= tol2,
        n => {
            let mut prev = if closed { points[n - 1] } else { points[0] };
            let start = if closed { 0 } else { 1 };
            for p in &points[start..] {
                let (d2, _) = seg_distance_sq(x, y, prev.x, prev.y, p.x, p.y);
                if d2 <= tol2 {
                    return true;
                }
                prev = *p;
            }
            false
        }
    }
}
