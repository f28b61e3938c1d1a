//! Livewire (intelligent scissors) contour tracing for 2D image slices.
//!
//! The crate has three layers:
//! - [`algorithms::scissors`]: a per-pixel cost graph and single-source
//!   shortest-path search over it,
//! - [`algorithms::path`]: the slice-space polyline with control points that
//!   traced segments are spliced into,
//! - [`tools::livewire_contour`]: the interaction state machine that draws,
//!   closes, edits and cancels one contour at a time.
//!
//! Rendering, storage, viewports and event delivery are host collaborators,
//! reached through the traits in [`viewport`], [`store`], [`events`] and
//! [`render`].

pub mod model;
pub mod error;
pub mod config;
pub mod image;
pub mod viewport;
pub mod store;
pub mod events;
pub mod render;
pub mod stats;
pub mod throttle;
pub mod json;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod simplify;
    pub mod tolerance;
    pub mod transform;
}
pub mod algorithms {
    pub mod cost;
    pub mod path;
    pub mod picking;
    pub mod scissors;
    pub mod winding;
}
pub mod tools {
    pub mod base;
    pub mod livewire_contour;
    pub mod session;
}

pub use algorithms::cost::{CostGraph, CostWeights};
pub use algorithms::path::LivewirePath;
pub use algorithms::scissors::Scissors;
pub use config::LivewireConfig;
pub use error::{LivewireError, Result};
pub use geometry::transform::{Affine3, SliceTransform};
pub use image::SliceImage;
pub use model::{AnnotationUid, ContourAnnotation, Pixel, Point3, Vec2};
pub use store::{AnnotationStore, MemoryAnnotationStore};
pub use tools::base::{Tool, ToolContext};
pub use tools::livewire_contour::{LivewireContourTool, TOOL_NAME};
pub use viewport::{StackViewport, Viewport, ViewportKind};
