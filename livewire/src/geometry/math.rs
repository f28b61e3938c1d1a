use crate::model::Vec2;

pub fn seg_distance_sq(px: f32, py: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32) {
    let vx = x2 - x1; let vy = y2 - y1;
    let wx = px - x1; let wy = py - y1;
    let vv = vx*vx + vy*vy;
    let mut t = if vv > 0.0 { (wx*vx + wy*vy) / vv } else { 0.0 };
    if t < 0.0 { t = 0.0; } else if t > 1.0 { t = 1.0; }
    let projx = x1 + t * vx; let projy = y1 + t * vy;
    let dx = px - projx; let dy = py - projy;
    (dx*dx + dy*dy, t)
}

#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x; let dy = a.y - b.y;
    dx*dx + dy*dy
}

/// Distance from `p` to the infinite line through `a` and `b`
/// (falls back to point distance when `a == b`).
pub fn perpendicular_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let vx = b.x - a.x; let vy = b.y - a.y;
    let len = (vx*vx + vy*vy).sqrt();
    if len <= super::tolerance::EPS_LEN {
        return dist_sq(p, a).sqrt();
    }
    ((p.x - a.x) * vy - (p.y - a.y) * vx).abs() / len
}

/// Axis-aligned bounds as (minx, miny, maxx, maxy).
pub fn aabb(points: &[Vec2]) -> Option<(f32, f32, f32, f32)> {
    let first = points.first()?;
    let mut b = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        b.0 = b.0.min(p.x); b.1 = b.1.min(p.y);
        b.2 = b.2.max(p.x); b.3 = b.3.max(p.y);
    }
    Some(b)
}
