//! Slice ↔ world coordinate mapping.
//!
//! A [`SliceTransform`] is a plain value built once per editing session from
//! the image's index→world matrix and, for volumetric views, the matrix that
//! places the active slice inside the volume's index space.

use super::tolerance::EPS_DENOM;
use crate::error::{LivewireError, Result};
use crate::model::{Pixel, Point3, Vec2};
use serde::{Deserialize, Serialize};

/// Row-major affine map: `out[r] = m[r][0]*x + m[r][1]*y + m[r][2]*z + m[r][3]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine3 {
    pub m: [[f32; 4]; 3],
}

impl Affine3 {
    pub const IDENTITY: Affine3 = Affine3 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ],
    };

    pub fn new(m: [[f32; 4]; 3]) -> Self {
        Affine3 { m }
    }

    /// Axis-aligned index→world map with the given origin and voxel spacing.
    pub fn from_origin_spacing(origin: Point3, spacing: (f32, f32, f32)) -> Self {
        Affine3 {
            m: [
                [spacing.0, 0.0, 0.0, origin.x],
                [0.0, spacing.1, 0.0, origin.y],
                [0.0, 0.0, spacing.2, origin.z],
            ],
        }
    }

    pub fn apply(&self, p: Point3) -> Point3 {
        let m = &self.m;
        Point3 {
            x: m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            y: m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            z: m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        }
    }

    /// `next ∘ self`: apply `self` first, then `next`.
    pub fn then(&self, next: &Affine3) -> Affine3 {
        let a = &next.m;
        let b = &self.m;
        let mut out = [[0.0f32; 4]; 3];
        for r in 0..3 {
            for c in 0..3 {
                out[r][c] = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
            }
            out[r][3] = a[r][0] * b[0][3] + a[r][1] * b[1][3] + a[r][2] * b[2][3] + a[r][3];
        }
        Affine3 { m: out }
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    pub fn inverse(&self) -> Option<Affine3> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() <= EPS_DENOM {
            return None;
        }
        let m = &self.m;
        let inv_det = 1.0 / det;
        let mut lin = [[0.0f32; 3]; 3];
        lin[0][0] = (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det;
        lin[0][1] = (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det;
        lin[0][2] = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;
        lin[1][0] = (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det;
        lin[1][1] = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
        lin[1][2] = (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det;
        lin[2][0] = (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det;
        lin[2][1] = (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det;
        lin[2][2] = (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det;
        let t = [m[0][3], m[1][3], m[2][3]];
        let mut out = [[0.0f32; 4]; 3];
        for r in 0..3 {
            out[r][0] = lin[r][0];
            out[r][1] = lin[r][1];
            out[r][2] = lin[r][2];
            out[r][3] = -(lin[r][0] * t[0] + lin[r][1] * t[1] + lin[r][2] * t[2]);
        }
        Some(Affine3 { m: out })
    }
}

impl Default for Affine3 {
    fn default() -> Self {
        Affine3::IDENTITY
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceTransform {
    slice_to_world: Affine3,
    world_to_slice: Affine3,
}

impl SliceTransform {
    /// `slice_to_index` places slice pixel `(x, y, 0)` in the image's index
    /// space; it is the identity for single-image (stack) views.
    pub fn new(index_to_world: Affine3, slice_to_index: Affine3) -> Result<Self> {
        let slice_to_world = slice_to_index.then(&index_to_world);
        let world_to_slice = slice_to_world
            .inverse()
            .ok_or(LivewireError::SingularTransform)?;
        Ok(SliceTransform {
            slice_to_world,
            world_to_slice,
        })
    }

    pub fn for_stack(index_to_world: Affine3) -> Result<Self> {
        SliceTransform::new(index_to_world, Affine3::IDENTITY)
    }

    pub fn to_world(&self, p: Vec2) -> Point3 {
        self.slice_to_world.apply(Point3::new(p.x, p.y, 0.0))
    }

    pub fn to_slice(&self, p: Point3) -> Vec2 {
        let s = self.world_to_slice.apply(p);
        Vec2::new(s.x, s.y)
    }

    pub fn to_pixel(&self, p: Point3) -> Pixel {
        Pixel::from_slice(self.to_slice(p))
    }

    pub fn pixel_to_world(&self, p: Pixel) -> Point3 {
        self.to_world(p.to_vec2())
    }

    pub fn slice_to_world(&self) -> &Affine3 {
        &self.slice_to_world
    }
}
