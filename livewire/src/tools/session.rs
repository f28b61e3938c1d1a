//! Per-contour editing state.
//!
//! A tool is either idle, tracing a new contour, or dragging something that
//! belongs to an existing one. All session data lives in the variant so it
//! is dropped as a whole when the session ends.

use crate::algorithms::cost::{CostGraph, CostWeights};
use crate::algorithms::path::LivewirePath;
use crate::algorithms::picking::nearest_point_any;
use crate::algorithms::scissors::Scissors;
use crate::error::{LivewireError, Result};
use crate::geometry::transform::SliceTransform;
use crate::image::SliceImage;
use crate::model::{AnnotationUid, ContourData, Pixel, Point3};
use std::rc::Rc;

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    Idle,
    Drawing(DrawSession),
    HandleEditing(HandleSession),
}

impl Session {
    pub fn name(&self) -> &'static str {
        match self {
            Session::Idle => "idle",
            Session::Drawing(_) => "drawing",
            Session::HandleEditing(_) => "handle editing",
        }
    }

    pub fn annotation(&self) -> Option<AnnotationUid> {
        match self {
            Session::Idle => None,
            Session::Drawing(s) => Some(s.annotation),
            Session::HandleEditing(s) => Some(s.annotation),
        }
    }
}

#[derive(Debug)]
pub struct DrawSession {
    pub annotation: AnnotationUid,
    pub viewport_id: String,
    pub transform: SliceTransform,
    pub scissors: Scissors,
    /// First click through the last confirmed control point.
    pub confirmed: LivewirePath,
    /// `confirmed` plus the live segment to the cursor.
    pub current: LivewirePath,
    pub closed: bool,
    pub hole_processing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grab {
    Handle(usize),
    TextBox,
    /// Whole-annotation drag; selecting works, moving does not.
    Annotation,
}

#[derive(Debug)]
pub struct HandleSession {
    pub annotation: AnnotationUid,
    pub viewport_id: String,
    pub grab: Grab,
    /// Contour data as it was when the session began, restored on cancel.
    pub original: ContourData,
    pub routing: Option<HandleRouting>,
    pub has_moved: bool,
    pub outside_image: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seam {
    /// The dragged handle is handle 0, where the ring starts and ends.
    Start,
    Interior,
}

/// Re-routes the two segments adjoining one handle of a closed contour.
#[derive(Debug)]
pub struct HandleRouting {
    pub transform: SliceTransform,
    pub handle_index: usize,
    pub seam: Seam,
    /// Seeded at the previous handle.
    pub scissors: Scissors,
    /// Seeded at the next handle.
    pub scissors_next: Scissors,
    /// Untouched ring before the previous handle (inclusive).
    pub confirmed: LivewirePath,
    /// Untouched ring from the next handle on.
    pub confirmed_next: LivewirePath,
}

/// Polyline (world) to an open pixel ring, dropping the closing duplicate.
pub fn ring_pixels(polyline: &[Point3], transform: &SliceTransform) -> Vec<Pixel> {
    let mut ring: Vec<Pixel> = polyline.iter().map(|p| transform.to_pixel(*p)).collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Ring index of a handle: the first exact match, otherwise the nearest point.
pub fn handle_ring_index(ring: &[Pixel], handle: Pixel) -> Option<usize> {
    if let Some(i) = ring.iter().position(|p| *p == handle) {
        return Some(i);
    }
    let pts: Vec<_> = ring.iter().map(|p| p.to_vec2()).collect();
    let (i, _) = nearest_point_any(&pts, handle.to_vec2())?;
    log::warn!("handle ({}, {}) is not on the contour, using nearest point {}", handle.x, handle.y, i);
    Some(i)
}

impl HandleRouting {
    pub fn build(image: &SliceImage, weights: CostWeights, data: &ContourData, handle_index: usize) -> Result<Self> {
        let transform = image.transform;
        let handles: Vec<Pixel> = data.handles.points.iter().map(|p| transform.to_pixel(*p)).collect();
        let k = handles.len();
        if k < 2 {
            return Err(LivewireError::TooFewHandles { min: 2, got: k });
        }
        if handle_index >= k {
            return Err(LivewireError::HandleOutOfRange { index: handle_index, count: k });
        }
        let ring = ring_pixels(&data.contour.polyline, &transform);
        let prev = (handle_index + k - 1) % k;
        let next = (handle_index + 1) % k;
        let idx_prev = handle_ring_index(&ring, handles[prev]).ok_or(LivewireError::HandleNotFound { handle: prev })?;
        let idx_next = handle_ring_index(&ring, handles[next]).ok_or(LivewireError::HandleNotFound { handle: next })?;

        let (seam, confirmed, confirmed_next) = if handle_index == 0 {
            if idx_next > idx_prev {
                return Err(LivewireError::HandleNotFound { handle: next });
            }
            (
                Seam::Start,
                LivewirePath::new(),
                LivewirePath::from_points(ring[idx_next..=idx_prev].to_vec()),
            )
        } else {
            let rest = if next == 0 {
                LivewirePath::new()
            } else if idx_next < idx_prev {
                return Err(LivewireError::HandleNotFound { handle: next });
            } else {
                LivewirePath::from_points(ring[idx_next..].to_vec())
            };
            (Seam::Interior, LivewirePath::from_points(ring[..=idx_prev].to_vec()), rest)
        };

        let gray = image.grayscale();
        let graph = Rc::new(CostGraph::from_grayscale(&gray, image.width, image.height, image.voi_range, weights)?);
        let mut scissors = Scissors::new(graph.clone());
        let mut scissors_next = Scissors::new(graph);
        scissors.start_search(handles[prev])?;
        scissors_next.start_search(handles[next])?;

        Ok(HandleRouting {
            transform,
            handle_index,
            seam,
            scissors,
            scissors_next,
            confirmed,
            confirmed_next,
        })
    }

    pub fn contains(&self, p: Pixel) -> bool {
        self.scissors.graph().contains(p)
    }

    /// The full open ring with the handle moved to `pos`, or `None` when
    /// either neighbour cannot reach it.
    pub fn route(&self, pos: Pixel) -> Option<LivewirePath> {
        let left = self.scissors.find_path_to_point(pos);
        let mut right = self.scissors_next.find_path_to_point(pos);
        if left.is_empty() || right.is_empty() {
            return None;
        }
        right.reverse();
        let mut path = match self.seam {
            Seam::Start => {
                let mut p = LivewirePath::from_points(vec![pos]);
                p.mark_last_as_control_point();
                p.join_points(&right);
                p.join_path(&self.confirmed_next);
                p.join_points(&left);
                p
            }
            Seam::Interior => {
                let mut p = self.confirmed.clone();
                p.join_points(&left);
                p.mark_last_as_control_point();
                p.join_points(&right);
                p.join_path(&self.confirmed_next);
                p
            }
        };
        path.pop_closing_point();
        Some(path)
    }
}
