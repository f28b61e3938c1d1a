use crate::geometry::transform::SliceTransform;
use crate::image::SliceImage;
use crate::model::{Point3, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportKind {
    Stack,
    Volume,
    Video,
}

impl ViewportKind {
    pub fn name(self) -> &'static str {
        match self {
            ViewportKind::Stack => "stack",
            ViewportKind::Volume => "volume",
            ViewportKind::Video => "video",
        }
    }

    /// Contours need a 2D scalar slice; video frames have none.
    pub fn supports_contours(self) -> bool {
        matches!(self, ViewportKind::Stack | ViewportKind::Volume)
    }
}

/// What the contour tool needs from a rendering viewport.
pub trait Viewport {
    fn id(&self) -> &str;
    fn kind(&self) -> ViewportKind;
    /// The plane currently shown, with its slice↔world transform.
    fn slice_image(&self) -> Option<SliceImage>;
    fn world_to_canvas(&self, p: Point3) -> Vec2;
    fn canvas_to_world(&self, p: Vec2) -> Point3;
    /// Key under which per-image statistics are cached.
    fn target_id(&self) -> Option<String>;
    fn modality(&self) -> Option<String> {
        None
    }
}

/// Plain 2D view of one image: canvas = slice · zoom + pan.
#[derive(Clone, Debug)]
pub struct StackViewport {
    id: String,
    image_id: String,
    image: Option<SliceImage>,
    pub zoom: f32,
    pub pan: Vec2,
}

impl StackViewport {
    pub fn new(id: &str) -> Self {
        StackViewport {
            id: id.to_string(),
            image_id: String::new(),
            image: None,
            zoom: 1.0,
            pan: Vec2::default(),
        }
    }

    pub fn set_image(&mut self, image_id: &str, image: SliceImage) {
        self.image_id = image_id.to_string();
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&SliceImage> {
        self.image.as_ref()
    }

    pub fn set_view(&mut self, zoom: f32, pan: Vec2) {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
        if pan.x.is_finite() && pan.y.is_finite() {
            self.pan = pan;
        }
    }

    fn transform(&self) -> Option<&SliceTransform> {
        self.image.as_ref().map(|i| &i.transform)
    }
}

impl Viewport for StackViewport {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ViewportKind {
        ViewportKind::Stack
    }

    fn slice_image(&self) -> Option<SliceImage> {
        self.image.clone()
    }

    fn world_to_canvas(&self, p: Point3) -> Vec2 {
        let s = match self.transform() {
            Some(t) => t.to_slice(p),
            None => Vec2::new(p.x, p.y),
        };
        Vec2::new(s.x * self.zoom + self.pan.x, s.y * self.zoom + self.pan.y)
    }

    fn canvas_to_world(&self, p: Vec2) -> Point3 {
        let s = Vec2::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom);
        match self.transform() {
            Some(t) => t.to_world(s),
            None => Point3::new(s.x, s.y, 0.0),
        }
    }

    fn target_id(&self) -> Option<String> {
        self.image.as_ref().map(|_| format!("imageId:{}", self.image_id))
    }

    fn modality(&self) -> Option<String> {
        self.image.as_ref().and_then(|i| i.modality.clone())
    }
}
