//! Orientation of closed rings in y-down slice space.
//!
//! With y pointing down a positive shoelace sum means the ring turns
//! clockwise on screen.

use crate::model::{Pixel, Vec2, WindingDirection};

/// Shoelace signed area; the ring is treated as implicitly closed.
pub fn signed_area(ring: &[Vec2]) -> f32 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0.0f64;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        a += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
    }
    (a * 0.5) as f32
}

pub fn pixel_signed_area(ring: &[Pixel]) -> f32 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut a = 0i64;
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        a += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    a as f32 * 0.5
}

pub fn winding_direction(signed_area: f32) -> WindingDirection {
    if signed_area >= 0.0 {
        WindingDirection::Clockwise
    } else {
        WindingDirection::CounterClockwise
    }
}

/// Reverse ring orientation while keeping the start point in place.
pub fn reverse_keep_first<T>(ring: &mut [T]) {
    if ring.len() > 2 {
        ring[1..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_clockwise_square_is_positive() {
        // right, down, left in y-down space
        let ring = [Pixel::new(0, 0), Pixel::new(4, 0), Pixel::new(4, 4), Pixel::new(0, 4)];
        assert_eq!(pixel_signed_area(&ring), 16.0);
        assert_eq!(winding_direction(pixel_signed_area(&ring)), WindingDirection::Clockwise);
        let mut rev = ring;
        reverse_keep_first(&mut rev);
        assert_eq!(rev[0], ring[0]);
        assert_eq!(pixel_signed_area(&rev), -16.0);
    }
}
