//! Ordered slice-space polyline with control-point bookkeeping.
//!
//! Control points are stored as indexes into the point array so they stay
//! attached to their pixel while paths are spliced together.

use crate::error::{LivewireError, Result};
use crate::model::Pixel;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LivewirePath {
    points: Vec<Pixel>,
    control_indexes: Vec<usize>,
}

impl LivewirePath {
    pub fn new() -> Self {
        LivewirePath::default()
    }

    pub fn from_points(points: Vec<Pixel>) -> Self {
        LivewirePath {
            points,
            control_indexes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Pixel] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Pixel> {
        self.points
    }

    pub fn add_point(&mut self, p: Pixel) {
        self.points.push(p);
    }

    pub fn add_points(&mut self, ps: &[Pixel]) {
        self.points.extend_from_slice(ps);
    }

    /// Mark the latest occurrence of `p` as a control point.
    pub fn add_control_point(&mut self, p: Pixel) -> Result<()> {
        let idx = self
            .points
            .iter()
            .rposition(|q| *q == p)
            .ok_or(LivewireError::PointNotOnPath { x: p.x, y: p.y })?;
        self.push_control_index(idx);
        Ok(())
    }

    /// Mark the current last point as a control point. No-op on an empty path.
    pub fn mark_last_as_control_point(&mut self) {
        if let Some(idx) = self.points.len().checked_sub(1) {
            self.push_control_index(idx);
        }
    }

    fn push_control_index(&mut self, idx: usize) {
        if self.control_indexes.last() != Some(&idx) {
            self.control_indexes.push(idx);
        }
    }

    pub fn control_indexes(&self) -> &[usize] {
        &self.control_indexes
    }

    pub fn control_points(&self) -> Vec<Pixel> {
        self.control_indexes.iter().map(|&i| self.points[i]).collect()
    }

    pub fn first_point(&self) -> Option<Pixel> {
        self.points.first().copied()
    }

    pub fn last_point(&self) -> Option<Pixel> {
        self.points.last().copied()
    }

    pub fn last_control_point(&self) -> Option<Pixel> {
        self.control_indexes.last().map(|&i| self.points[i])
    }

    pub fn remove_last_control_point(&mut self) -> Option<Pixel> {
        self.control_indexes.pop().map(|i| self.points[i])
    }

    pub fn is_control_point(&self, p: Pixel) -> bool {
        self.control_indexes.iter().any(|&i| self.points[i] == p)
    }

    /// Put `other` in front of this path; `other`'s control points come first.
    pub fn prepend_path(&mut self, other: &LivewirePath) {
        let shift = other.points.len();
        let mut points = Vec::with_capacity(shift + self.points.len());
        points.extend_from_slice(&other.points);
        points.append(&mut self.points);
        let mut controls = other.control_indexes.clone();
        controls.extend(self.control_indexes.iter().map(|i| i + shift));
        self.points = points;
        self.control_indexes = controls;
    }

    /// Put `other` after this path; its control points follow ours.
    pub fn append_path(&mut self, other: &LivewirePath) {
        let shift = self.points.len();
        self.points.extend_from_slice(&other.points);
        self.control_indexes
            .extend(other.control_indexes.iter().map(|i| i + shift));
    }

    /// Append a freshly traced segment whose first point repeats our last one.
    pub fn join_points(&mut self, ps: &[Pixel]) {
        let skip = match (self.points.last(), ps.first()) {
            (Some(a), Some(b)) if a == b => 1,
            _ => 0,
        };
        self.points.extend_from_slice(&ps[skip..]);
    }

    /// Like [`append_path`](Self::append_path) but drops `other`'s first
    /// point when it repeats our last one. A control point on the dropped
    /// joint is kept once.
    pub fn join_path(&mut self, other: &LivewirePath) {
        let dup = matches!((self.points.last(), other.points.first()), (Some(a), Some(b)) if a == b);
        if !dup {
            self.append_path(other);
            return;
        }
        let joint = self.points.len() - 1;
        for &i in &other.control_indexes {
            let mapped = if i == 0 { joint } else { joint + i };
            self.push_control_index(mapped);
        }
        self.points.extend_from_slice(&other.points[1..]);
    }

    /// Drop the last point when it repeats the first (closed ring → open ring).
    pub fn pop_closing_point(&mut self) {
        if self.points.len() > 1 && self.points.first() == self.points.last() {
            let last = self.points.len() - 1;
            self.points.pop();
            self.control_indexes.retain(|&i| i != last);
        }
    }

    pub fn is_contiguous(&self) -> bool {
        self.points.windows(2).all(|w| w[0].touches(w[1]))
    }
}
