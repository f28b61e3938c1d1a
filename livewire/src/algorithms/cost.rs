//! Static intelligent-scissors cost graph.
//!
//! Each pixel carries three precomputed features: the inverted, normalised
//! Sobel gradient magnitude `f_G`, the Laplacian zero-crossing flag `f_Z`
//! and the unit edge direction `D` (gradient rotated by 90°). A directed
//! link `p → q` between 8-neighbours costs
//!
//! ```text
//! w_z·f_Z(q) + w_g·f_G(q)·s(p,q) + w_d·f_D(p,q)
//! ```
//!
//! with `s = 1` on diagonals and `1/√2` on cardinal links, so strong edges
//! that follow the boundary direction are cheap.

use crate::error::{LivewireError, Result};
use crate::geometry::limits::in_image_bounds;
use crate::geometry::tolerance::{clamp, EPS_GRADIENT, EPS_INTENSITY};
use crate::model::Pixel;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_1_SQRT_2, PI};

/// 8-neighbourhood offsets, cardinal first.
pub const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostWeights {
    pub zero_crossing: f32,
    pub gradient: f32,
    pub direction: f32,
}

impl Default for CostWeights {
    fn default() -> Self {
        CostWeights {
            zero_crossing: 0.43,
            gradient: 0.43,
            direction: 0.14,
        }
    }
}

impl CostWeights {
    pub fn is_valid(&self) -> bool {
        [self.zero_crossing, self.gradient, self.direction]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

#[derive(Clone, Debug)]
pub struct CostGraph {
    width: u32,
    height: u32,
    weights: CostWeights,
    gradient_cost: Vec<f32>,
    zero_crossing: Vec<f32>,
    direction: Vec<(f32, f32)>,
}

impl CostGraph {
    /// Build the graph from a row-major single-channel buffer. Intensities
    /// are normalised by `range` when it is non-degenerate, otherwise by the
    /// data min/max.
    pub fn from_grayscale(
        pixels: &[f32],
        width: u32,
        height: u32,
        range: Option<(f32, f32)>,
        weights: CostWeights,
    ) -> Result<Self> {
        if !in_image_bounds(width, height) {
            return Err(LivewireError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(LivewireError::ImageSizeMismatch {
                expected,
                got: pixels.len(),
                width,
                height,
                channels: 1,
            });
        }
        if pixels.iter().any(|v| !v.is_finite()) {
            return Err(LivewireError::NonFiniteImage);
        }
        if !weights.is_valid() {
            return Err(LivewireError::Config(format!("invalid cost weights {:?}", weights)));
        }

        let (lo, hi) = match range {
            Some((lo, hi)) if lo.is_finite() && hi.is_finite() && hi - lo > EPS_INTENSITY => (lo, hi),
            _ => pixels.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        };
        let span = hi - lo;
        let norm: Vec<f32> = if span > EPS_INTENSITY {
            pixels.iter().map(|&v| clamp((v - lo) / span, 0.0, 1.0)).collect()
        } else {
            vec![0.0; pixels.len()]
        };

        let w = width as i32;
        let h = height as i32;
        let at = |x: i32, y: i32| -> f32 {
            let cx = x.clamp(0, w - 1);
            let cy = y.clamp(0, h - 1);
            norm[(cy * w + cx) as usize]
        };

        let mut gradient = vec![(0.0f32, 0.0f32); expected];
        let mut magnitude = vec![0.0f32; expected];
        let mut laplacian = vec![0.0f32; expected];
        let mut max_mag = 0.0f32;
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) as usize;
                let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
                let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                    - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));
                let m = (gx * gx + gy * gy).sqrt();
                gradient[i] = (gx, gy);
                magnitude[i] = m;
                max_mag = max_mag.max(m);
                laplacian[i] = at(x + 1, y) + at(x - 1, y) + at(x, y + 1) + at(x, y - 1) - 4.0 * at(x, y);
            }
        }

        let gradient_cost = magnitude
            .iter()
            .map(|&m| if max_mag > EPS_GRADIENT { 1.0 - m / max_mag } else { 1.0 })
            .collect();

        let direction = gradient
            .iter()
            .zip(&magnitude)
            .map(|(&(gx, gy), &m)| if m > EPS_GRADIENT { (gy / m, -gx / m) } else { (0.0, 0.0) })
            .collect();

        // A pixel is on a zero crossing when the Laplacian changes sign towards
        // a 4-neighbour and this pixel is the one closer to zero.
        let mut zero_crossing = vec![1.0f32; expected];
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) as usize;
                let l = laplacian[i];
                let crosses = NEIGHBORS[..4].iter().any(|&(dx, dy)| {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        return false;
                    }
                    let ln = laplacian[(ny * w + nx) as usize];
                    l * ln < 0.0 && l.abs() <= ln.abs()
                });
                if crosses {
                    zero_crossing[i] = 0.0;
                }
            }
        }

        Ok(CostGraph {
            width,
            height,
            weights,
            gradient_cost,
            zero_crossing,
            direction,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn weights(&self) -> CostWeights {
        self.weights
    }

    pub fn len(&self) -> usize {
        self.gradient_cost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gradient_cost.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pixel) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    #[inline]
    pub fn index_of(&self, p: Pixel) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    #[inline]
    pub fn pixel_at(&self, index: usize) -> Pixel {
        let w = self.width as usize;
        Pixel::new((index % w) as i32, (index / w) as i32)
    }

    /// Direction-free part of the cost at a pixel; used for snapping.
    pub fn static_cost(&self, p: Pixel) -> f32 {
        let i = self.index_of(p);
        self.weights.zero_crossing * self.zero_crossing[i] + self.weights.gradient * self.gradient_cost[i]
    }

    pub fn gradient_cost(&self, p: Pixel) -> f32 {
        self.gradient_cost[self.index_of(p)]
    }

    pub fn is_zero_crossing(&self, p: Pixel) -> bool {
        self.zero_crossing[self.index_of(p)] == 0.0
    }

    /// Cost of the directed link `from → to`, where `to = from + (dx, dy)`.
    pub fn link_cost(&self, from: usize, to: usize, dx: i32, dy: i32) -> f32 {
        let diagonal = dx != 0 && dy != 0;
        let s = if diagonal { 1.0 } else { FRAC_1_SQRT_2 };
        let inv_len = if diagonal { FRAC_1_SQRT_2 } else { 1.0 };
        let (mut lx, mut ly) = (dx as f32 * inv_len, dy as f32 * inv_len);
        let dp = self.direction[from];
        let dq = self.direction[to];
        if dp.0 * lx + dp.1 * ly < 0.0 {
            lx = -lx;
            ly = -ly;
        }
        let cos_p = clamp(dp.0 * lx + dp.1 * ly, -1.0, 1.0);
        let cos_q = clamp(dq.0 * lx + dq.1 * ly, -1.0, 1.0);
        let f_d = (2.0 / (3.0 * PI)) * (cos_p.acos() + cos_q.acos());
        self.weights.zero_crossing * self.zero_crossing[to]
            + self.weights.gradient * self.gradient_cost[to] * s
            + self.weights.direction * f_d
    }
}
