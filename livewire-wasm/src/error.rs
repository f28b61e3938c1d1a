use crate::interop::{new_obj, set_kv};
use livewire::LivewireError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn out_of_range(param: &str, min: f32, max: f32, got: f32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "min", &JsValue::from_f64(min as f64));
    set_kv(&d, "max", &JsValue::from_f64(max as f64));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("out_of_range", format!("parameter '{}' out of range", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u64) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

#[inline]
pub fn no_image() -> JsValue {
    err("no_image", "no image has been loaded", None)
}

/// Map an engine error onto a stable code for the host.
pub fn from_livewire(e: &LivewireError) -> JsValue {
    let code = match e {
        LivewireError::ImageSizeMismatch { .. }
        | LivewireError::InvalidDimensions { .. }
        | LivewireError::NonFiniteImage
        | LivewireError::SingularTransform => "invalid_image",
        LivewireError::MissingImageData => "no_image",
        LivewireError::UnsupportedViewport { .. } => "unsupported_viewport",
        LivewireError::SeedOutOfBounds { .. } | LivewireError::HandleOutOfRange { .. } => "out_of_range",
        LivewireError::PointNotOnPath { .. } | LivewireError::HandleNotFound { .. } | LivewireError::TooFewHandles { .. } => {
            "invalid_contour"
        }
        LivewireError::HandleMismatch { .. } => "handle_mismatch",
        LivewireError::ContourNotClosed(_) => "not_closed",
        LivewireError::UnknownAnnotation(uid) => return invalid_id("annotation", *uid),
        LivewireError::SessionBusy(_) => "session_busy",
        LivewireError::Config(_) => "invalid_config",
        LivewireError::Document(_) => "invalid_json",
    };
    err(code, e.to_string(), None)
}
