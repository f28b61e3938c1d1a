// Centralized limits to harden against untrusted input (image buffers, JSON documents)

// Image caps
pub const MAX_IMAGE_DIM: u32 = 8_192;
pub const MAX_IMAGE_PIXELS: usize = 16 * 1024 * 1024;

// Snapping window half-size (px)
pub const MAX_SNAP_RADIUS: u32 = 64;

// Annotation documents
pub const MAX_ANNOTATIONS: usize = 10_000;
// Hosts address annotations with 32-bit ids
pub const MAX_ANNOTATION_UID: u64 = u32::MAX as u64;
pub const MAX_HANDLES_PER_CONTOUR: usize = 4_096;
pub const MAX_POLYLINE_POINTS: usize = 1_000_000;
pub const MAX_POLYLINE_POINTS_TOTAL: usize = 4_000_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_image_bounds(width: u32, height: u32) -> bool {
    width > 0
        && height > 0
        && width <= MAX_IMAGE_DIM
        && height <= MAX_IMAGE_DIM
        && (width as usize) * (height as usize) <= MAX_IMAGE_PIXELS
}
