use crate::error::{LivewireError, Result};
use crate::geometry::limits;
use crate::model::{ContourAnnotation, Point3};
use crate::store::{AnnotationStore, MemoryAnnotationStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DOC_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Doc {
    version: u32,
    annotations: Vec<ContourAnnotation>,
}

pub fn to_json_value(store: &MemoryAnnotationStore) -> Value {
    let doc = Doc {
        version: DOC_VERSION,
        annotations: store.iter().cloned().collect(),
    };
    serde_json::to_value(&doc).unwrap_or(Value::Null)
}

pub fn to_json_string(store: &MemoryAnnotationStore) -> String {
    to_json_value(store).to_string()
}

fn check_point(p: &Point3, what: &str, uid: u64) -> Result<()> {
    if !limits::in_coord_bounds(p.x) || !limits::in_coord_bounds(p.y) || !limits::in_coord_bounds(p.z) {
        return Err(LivewireError::Document(format!("annotation {uid}: {what} coordinate out of bounds")));
    }
    Ok(())
}

pub fn from_json_value(v: Value) -> Result<MemoryAnnotationStore> {
    let doc: Doc = serde_json::from_value(v).map_err(|e| LivewireError::Document(e.to_string()))?;
    if doc.version != DOC_VERSION {
        return Err(LivewireError::Document(format!("unsupported version {}", doc.version)));
    }
    if doc.annotations.len() > limits::MAX_ANNOTATIONS {
        return Err(LivewireError::Document(format!(
            "{} annotations exceed the limit of {}",
            doc.annotations.len(),
            limits::MAX_ANNOTATIONS
        )));
    }
    let mut total = 0usize;
    let mut store = MemoryAnnotationStore::new();
    for a in doc.annotations {
        let uid = a.uid;
        if uid == 0 || uid > limits::MAX_ANNOTATION_UID || store.get(uid).is_some() {
            return Err(LivewireError::Document(format!("invalid or duplicate uid {uid}")));
        }
        let d = &a.data;
        if d.handles.points.len() > limits::MAX_HANDLES_PER_CONTOUR {
            return Err(LivewireError::Document(format!("annotation {uid}: too many handles")));
        }
        if d.contour.polyline.len() > limits::MAX_POLYLINE_POINTS {
            return Err(LivewireError::Document(format!("annotation {uid}: polyline too long")));
        }
        total += d.contour.polyline.len();
        if total > limits::MAX_POLYLINE_POINTS_TOTAL {
            return Err(LivewireError::Document("total polyline points exceed the limit".into()));
        }
        for p in &d.handles.points {
            check_point(p, "handle", uid)?;
        }
        for p in &d.contour.polyline {
            check_point(p, "polyline", uid)?;
        }
        if let Some(p) = &d.handles.text_box.world_position {
            check_point(p, "text box", uid)?;
        }
        if let Some(i) = d.handles.active_handle_index {
            if i >= d.handles.points.len() {
                return Err(LivewireError::Document(format!("annotation {uid}: active handle {i} out of range")));
            }
        }
        store.insert(a);
    }
    Ok(store)
}

pub fn from_json_str(s: &str) -> Result<MemoryAnnotationStore> {
    let v: Value = serde_json::from_str(s).map_err(|e| LivewireError::Document(e.to_string()))?;
    from_json_value(v)
}
