// Centralized tolerances for the cost graph and slice transforms

pub const EPS_LEN: f32 = 1e-6;            // zero-length vector threshold
pub const EPS_DENOM: f32 = 1e-8;          // singular determinant guard
pub const EPS_INTENSITY: f32 = 1e-6;      // flat-image guard when normalizing intensities
pub const EPS_GRADIENT: f32 = 1e-6;       // gradients below this carry no direction

#[inline] pub fn clamp(x: f32, lo: f32, hi: f32) -> f32 { x.max(lo).min(hi) }
