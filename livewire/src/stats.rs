use crate::model::{ContourData, TargetStats, Vec2};
use crate::viewport::Viewport;

pub const AREA_UNIT: &str = "mm\u{b2}";

/// Format with a number of decimals that shrinks as the magnitude grows.
pub fn round_number(value: f32, precision: i32) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    let abs = value.abs();
    if abs < 0.0001 {
        return format!("{}", value);
    }
    let fixed = if abs >= 100.0 {
        precision - 2
    } else if abs >= 10.0 {
        precision - 1
    } else if abs >= 1.0 {
        precision
    } else if abs >= 0.1 {
        precision + 1
    } else if abs >= 0.01 {
        precision + 2
    } else if abs >= 0.001 {
        precision + 3
    } else {
        precision + 4
    };
    format!("{:.*}", fixed.max(0) as usize, value)
}

/// Unsigned shoelace area of an implicitly closed canvas polygon.
pub fn canvas_area(points: &[Vec2]) -> f32 {
    crate::algorithms::winding::signed_area(points).abs()
}

/// Area of a closed contour in world units, measured in canvas space and
/// scaled by the world size of one canvas pixel. `None` for open contours.
pub fn contour_stats(data: &ContourData, viewport: &dyn Viewport) -> Option<TargetStats> {
    if !data.contour.closed || data.contour.polyline.is_empty() {
        return None;
    }
    let canvas: Vec<Vec2> = data.contour.polyline.iter().map(|p| viewport.world_to_canvas(*p)).collect();
    let origin = canvas[0];
    let w0 = viewport.canvas_to_world(origin);
    let wx = viewport.canvas_to_world(Vec2::new(origin.x + 1.0, origin.y));
    let wy = viewport.canvas_to_world(Vec2::new(origin.x, origin.y + 1.0));
    let area = canvas_area(&canvas) * w0.distance(&wx) * w0.distance(&wy);
    Some(TargetStats {
        area: Some(area),
        area_unit: Some(AREA_UNIT.to_string()),
        modality: viewport.modality(),
    })
}

pub fn default_text_lines(data: &ContourData, target_id: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(TargetStats { area: Some(area), area_unit, .. }) = data.cached_stats.get(target_id) {
        if *area != 0.0 {
            lines.push(format!(
                "Area: {} {}",
                round_number(*area, 2),
                area_unit.as_deref().unwrap_or("")
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_number_scales_precision() {
        assert_eq!(round_number(1234.567, 2), "1235");
        assert_eq!(round_number(12.345, 2), "12.3");
        assert_eq!(round_number(1.2345, 2), "1.23");
        assert_eq!(round_number(0.12345, 2), "0.123");
        assert_eq!(round_number(f32::NAN, 2), "NaN");
    }

    #[test]
    fn text_lines_skip_missing_area() {
        let mut data = ContourData::default();
        assert!(default_text_lines(&data, "t").is_empty());
        data.cached_stats.insert(
            "t".into(),
            TargetStats { area: Some(225.0), area_unit: Some(AREA_UNIT.into()), modality: None },
        );
        assert_eq!(default_text_lines(&data, "t"), vec!["Area: 225 mm\u{b2}".to_string()]);
    }
}
