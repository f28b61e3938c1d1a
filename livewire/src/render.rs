use crate::model::{Color, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    pub color: Color,
    pub highlighted_color: Color,
    pub line_width: f32,
    pub handle_radius: f32,
    pub text_color: Color,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        AnnotationStyle {
            color: Color { r: 255, g: 255, b: 0, a: 255 },
            highlighted_color: Color { r: 0, g: 255, b: 0, a: 255 },
            line_width: 1.0,
            handle_radius: 3.0,
            text_color: Color { r: 255, g: 255, b: 0, a: 255 },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    /// Corners: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y),
            Vec2::new(self.x, self.y + self.height),
            Vec2::new(self.x + self.width, self.y + self.height),
        ]
    }
}

/// Canvas drawing primitives supplied by the host.
pub trait DrawingHelper {
    fn draw_handles(&mut self, uid: &str, points: &[Vec2], style: &AnnotationStyle, active: Option<usize>);
    fn draw_polyline(&mut self, uid: &str, points: &[Vec2], closed: bool, style: &AnnotationStyle);
    /// Returns the drawn box so the tool can cache it in world space.
    fn draw_text_box(&mut self, uid: &str, lines: &[String], anchor: Vec2, style: &AnnotationStyle) -> CanvasRect;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Handles { uid: String, points: Vec<Vec2>, active: Option<usize> },
    Polyline { uid: String, points: Vec<Vec2>, closed: bool, color: Color },
    TextBox { uid: String, lines: Vec<String>, anchor: Vec2 },
}

/// Records draw calls instead of painting; used by the wasm facade and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingHelper {
    pub commands: Vec<DrawCommand>,
    /// Approximate glyph box used to size text boxes.
    pub char_width: f32,
    pub line_height: f32,
}

impl RecordingHelper {
    pub fn new() -> Self {
        RecordingHelper {
            commands: Vec::new(),
            char_width: 7.0,
            line_height: 14.0,
        }
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawingHelper for RecordingHelper {
    fn draw_handles(&mut self, uid: &str, points: &[Vec2], _style: &AnnotationStyle, active: Option<usize>) {
        self.commands.push(DrawCommand::Handles {
            uid: uid.to_string(),
            points: points.to_vec(),
            active,
        });
    }

    fn draw_polyline(&mut self, uid: &str, points: &[Vec2], closed: bool, style: &AnnotationStyle) {
        self.commands.push(DrawCommand::Polyline {
            uid: uid.to_string(),
            points: points.to_vec(),
            closed,
            color: style.color,
        });
    }

    fn draw_text_box(&mut self, uid: &str, lines: &[String], anchor: Vec2, _style: &AnnotationStyle) -> CanvasRect {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let rect = CanvasRect {
            x: anchor.x,
            y: anchor.y,
            width: longest as f32 * self.char_width,
            height: lines.len() as f32 * self.line_height,
        };
        self.commands.push(DrawCommand::TextBox {
            uid: uid.to_string(),
            lines: lines.to_vec(),
            anchor,
        });
        rect
    }
}

/// Default text box anchor: right-most canvas point, vertically centred.
pub fn text_box_anchor(canvas_points: &[Vec2]) -> Option<Vec2> {
    let first = canvas_points.first()?;
    let (mut max_x, mut min_y, mut max_y) = (first.x, first.y, first.y);
    for p in &canvas_points[1..] {
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some(Vec2::new(max_x, (min_y + max_y) / 2.0))
}
