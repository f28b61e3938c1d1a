use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type AnnotationUid = u64;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Continuous 2D coordinate: canvas pixels or sub-pixel slice space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Point3 { x, y, z }
    }

    pub fn distance(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Integer pixel index on the active slice (column `x`, row `y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub fn new(x: i32, y: i32) -> Self {
        Pixel { x, y }
    }

    /// Nearest pixel centre to a sub-pixel slice coordinate.
    pub fn from_slice(p: Vec2) -> Self {
        Pixel {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x as f32,
            y: self.y as f32,
        }
    }

    /// True when `other` is this pixel or one of its 8 neighbours.
    pub fn touches(self, other: Pixel) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

/// Orientation of a closed contour in y-down slice space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindingDirection {
    Clockwise,
    CounterClockwise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Completed,
    HandlesUpdated,
    StatsUpdated,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub polyline: Vec<Point3>,
    pub closed: bool,
    pub winding: Option<WindingDirection>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub world_position: Option<Point3>,
    pub has_moved: bool,
    /// Corners: top-left, top-right, bottom-left, bottom-right.
    pub world_bounding_box: Option<[Point3; 4]>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Handles {
    pub points: Vec<Point3>,
    pub active_handle_index: Option<usize>,
    pub text_box: TextBox,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetStats {
    pub area: Option<f32>,
    pub area_unit: Option<String>,
    pub modality: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourData {
    pub contour: Contour,
    pub handles: Handles,
    pub cached_stats: BTreeMap<String, TargetStats>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourAnnotation {
    pub uid: AnnotationUid,
    pub tool_name: String,
    pub highlighted: bool,
    pub invalidated: bool,
    pub data: ContourData,
}

impl ContourAnnotation {
    pub fn new(tool_name: &str) -> Self {
        ContourAnnotation {
            uid: 0,
            tool_name: tool_name.to_string(),
            highlighted: false,
            invalidated: true,
            data: ContourData::default(),
        }
    }
}
