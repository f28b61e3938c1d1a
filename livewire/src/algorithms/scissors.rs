//! Single-source shortest paths over a [`CostGraph`].
//!
//! `start_search` runs Dijkstra from the seed over the whole image so that
//! every later `find_path_to_point` is a predecessor chase. Searches are only
//! restarted when a control point is confirmed, never per pointer move.

use super::cost::{CostGraph, CostWeights, NEIGHBORS};
use crate::error::{LivewireError, Result};
use crate::model::Pixel;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use web_time::Instant;

const NO_PARENT: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct Frontier {
    cost: f32,
    node: u32,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // reversed: BinaryHeap pops the cheapest node first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

#[derive(Clone, Debug)]
struct SearchState {
    seed: Pixel,
    cost: Vec<f32>,
    parent: Vec<u32>,
}

#[derive(Clone, Debug)]
pub struct Scissors {
    graph: Rc<CostGraph>,
    search: Option<SearchState>,
}

impl Scissors {
    pub fn new(graph: Rc<CostGraph>) -> Self {
        Scissors { graph, search: None }
    }

    pub fn from_raw_pixel_data(
        pixels: &[f32],
        width: u32,
        height: u32,
        range: Option<(f32, f32)>,
        weights: CostWeights,
    ) -> Result<Self> {
        let graph = CostGraph::from_grayscale(pixels, width, height, range, weights)?;
        Ok(Scissors::new(Rc::new(graph)))
    }

    pub fn graph(&self) -> &Rc<CostGraph> {
        &self.graph
    }

    pub fn seed(&self) -> Option<Pixel> {
        self.search.as_ref().map(|s| s.seed)
    }

    pub fn start_search(&mut self, seed: Pixel) -> Result<()> {
        let g = &self.graph;
        if !g.contains(seed) {
            return Err(LivewireError::SeedOutOfBounds {
                x: seed.x,
                y: seed.y,
                width: g.width(),
                height: g.height(),
            });
        }
        let started = Instant::now();
        let n = g.len();
        let w = g.width() as i32;
        let h = g.height() as i32;
        let mut cost = vec![f32::INFINITY; n];
        let mut parent = vec![NO_PARENT; n];
        let mut done = vec![false; n];
        let mut heap = BinaryHeap::new();

        let s = g.index_of(seed);
        cost[s] = 0.0;
        heap.push(Frontier { cost: 0.0, node: s as u32 });

        while let Some(Frontier { cost: c, node }) = heap.pop() {
            let u = node as usize;
            if done[u] {
                continue;
            }
            done[u] = true;
            let ux = (u % w as usize) as i32;
            let uy = (u / w as usize) as i32;
            for &(dx, dy) in NEIGHBORS.iter() {
                let vx = ux + dx;
                let vy = uy + dy;
                if vx < 0 || vy < 0 || vx >= w || vy >= h {
                    continue;
                }
                let v = (vy * w + vx) as usize;
                if done[v] {
                    continue;
                }
                let nc = c + g.link_cost(u, v, dx, dy);
                if nc < cost[v] {
                    cost[v] = nc;
                    parent[v] = node;
                    heap.push(Frontier { cost: nc, node: v as u32 });
                }
            }
        }

        log::debug!(
            "livewire search from ({}, {}) over {}x{} took {:?}",
            seed.x,
            seed.y,
            w,
            h,
            started.elapsed()
        );
        self.search = Some(SearchState { seed, cost, parent });
        Ok(())
    }

    /// Seed-to-target pixels. Empty when no search ran, the target is outside
    /// the image or it cannot be reached.
    pub fn find_path_to_point(&self, target: Pixel) -> Vec<Pixel> {
        let Some(state) = &self.search else {
            return Vec::new();
        };
        if !self.graph.contains(target) {
            return Vec::new();
        }
        let s = self.graph.index_of(state.seed);
        let mut at = self.graph.index_of(target);
        if at != s && state.parent[at] == NO_PARENT {
            return Vec::new();
        }
        let mut path = vec![target];
        // a parent chain can never be longer than the node count
        let mut guard = self.graph.len();
        while at != s {
            let p = state.parent[at];
            if p == NO_PARENT || guard == 0 {
                return Vec::new();
            }
            guard -= 1;
            at = p as usize;
            path.push(self.graph.pixel_at(at));
        }
        path.reverse();
        path
    }

    /// Cumulative cost from the current seed, if a search ran and the pixel
    /// is reachable.
    pub fn path_cost(&self, target: Pixel) -> Option<f32> {
        let state = self.search.as_ref()?;
        if !self.graph.contains(target) {
            return None;
        }
        let c = state.cost[self.graph.index_of(target)];
        c.is_finite().then_some(c)
    }

    /// Pixel of minimum static cost within the `(2r+1)²` window around the
    /// (clamped) centre. The centre wins ties.
    pub fn find_min_nearby(&self, p: Pixel, radius: u32) -> Pixel {
        let g = &self.graph;
        let center = Pixel::new(
            p.x.clamp(0, g.width() as i32 - 1),
            p.y.clamp(0, g.height() as i32 - 1),
        );
        let r = radius.min(crate::geometry::limits::MAX_SNAP_RADIUS) as i32;
        let mut best = center;
        let mut best_cost = g.static_cost(center);
        for y in (center.y - r).max(0)..=(center.y + r).min(g.height() as i32 - 1) {
            for x in (center.x - r).max(0)..=(center.x + r).min(g.width() as i32 - 1) {
                let q = Pixel::new(x, y);
                let c = g.static_cost(q);
                if c < best_cost {
                    best_cost = c;
                    best = q;
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_pops_cheapest_first() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier { cost: 3.0, node: 0 });
        heap.push(Frontier { cost: 0.5, node: 1 });
        heap.push(Frontier { cost: 1.0, node: 2 });
        assert_eq!(heap.pop().map(|f| f.node), Some(1));
        assert_eq!(heap.pop().map(|f| f.node), Some(2));
    }

    #[test]
    fn no_search_means_no_path() {
        let s = Scissors::from_raw_pixel_data(&[0.0; 16], 4, 4, None, CostWeights::default()).unwrap();
        assert!(s.find_path_to_point(Pixel::new(1, 1)).is_empty());
        assert_eq!(s.seed(), None);
    }
}
