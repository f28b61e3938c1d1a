use crate::{error, interop, logging, LivewireEditor};
use js_sys::Float32Array;
use livewire::events::{Modifiers, PointerEvent};
use livewire::geometry::transform::{Affine3, SliceTransform};
use livewire::json;
use livewire::{AnnotationStore, LivewireConfig, Point3, SliceImage, Tool};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route engine logs to the console. Level is one of off/error/warn/info/debug/trace.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> JsValue {
    match logging::parse_level(level) {
        Some(filter) => {
            logging::init(filter);
            error::ok(JsValue::TRUE)
        }
        None => error::err("invalid_level", format!("unknown log level '{}'", level), None),
    }
}

/// Modifier bit mask: 1 shift, 2 ctrl, 4 alt, 8 meta.
fn modifiers_from_bits(bits: u8) -> Modifiers {
    Modifiers {
        shift: bits & 1 != 0,
        ctrl: bits & 2 != 0,
        alt: bits & 4 != 0,
        meta: bits & 8 != 0,
    }
}

fn check_xy(x: f32, y: f32) -> Option<JsValue> {
    if !x.is_finite() {
        return Some(error::non_finite("x"));
    }
    if !y.is_finite() {
        return Some(error::non_finite("y"));
    }
    None
}

fn handled(r: livewire::Result<bool>) -> JsValue {
    match r {
        Ok(consumed) => error::ok(JsValue::from_bool(consumed)),
        Err(e) => error::from_livewire(&e),
    }
}

fn uid_or_null(uid: Option<u64>) -> JsValue {
    uid.map_or(JsValue::NULL, |u| JsValue::from_f64(u as f64))
}

#[wasm_bindgen]
impl LivewireEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> LivewireEditor {
        crate::LivewireEditor::rs_new()
    }

    // Image and view

    /// Load a single-channel slice with pixel spacing (world units per pixel).
    pub fn load_image_res(&mut self, pixels: &Float32Array, width: u32, height: u32, spacing_x: f32, spacing_y: f32) -> JsValue {
        if !spacing_x.is_finite() {
            return error::non_finite("spacing_x");
        }
        if !spacing_y.is_finite() {
            return error::non_finite("spacing_y");
        }
        if spacing_x <= 0.0 {
            return error::out_of_range("spacing_x", f32::MIN_POSITIVE, f32::INFINITY, spacing_x);
        }
        if spacing_y <= 0.0 {
            return error::out_of_range("spacing_y", f32::MIN_POSITIVE, f32::INFINITY, spacing_y);
        }
        if self.inner.tool.is_drawing() || self.inner.tool.is_editing() {
            return error::err("session_busy", "finish or cancel the active contour first", None);
        }
        let index_to_world = Affine3::from_origin_spacing(Point3::default(), (spacing_x, spacing_y, 1.0));
        let image = SliceTransform::for_stack(index_to_world)
            .and_then(|t| SliceImage::new(pixels.to_vec(), width, height, 1, t));
        match image {
            Ok(image) => {
                self.inner.image_count += 1;
                let id = format!("image-{}", self.inner.image_count);
                self.inner.viewport.set_image(&id, image);
                error::ok(JsValue::from_str(&id))
            }
            Err(e) => error::from_livewire(&e),
        }
    }

    /// Window the intensities used for edge detection (VOI lower/upper).
    /// Applies to the next contour session.
    pub fn set_voi_range_res(&mut self, lower: f32, upper: f32) -> JsValue {
        if !lower.is_finite() {
            return error::non_finite("lower");
        }
        if !upper.is_finite() {
            return error::non_finite("upper");
        }
        if upper <= lower {
            return error::out_of_range("upper", lower, f32::INFINITY, upper);
        }
        let Some(image) = self.inner.viewport.image().cloned() else {
            return error::no_image();
        };
        let id = format!("image-{}", self.inner.image_count);
        self.inner.viewport.set_image(&id, image.with_voi_range(lower, upper));
        error::ok(JsValue::TRUE)
    }

    pub fn has_image(&self) -> bool {
        self.rs_has_image()
    }

    pub fn set_view_res(&mut self, zoom: f32, pan_x: f32, pan_y: f32) -> JsValue {
        if !zoom.is_finite() {
            return error::non_finite("zoom");
        }
        if let Some(e) = check_xy(pan_x, pan_y) {
            return e;
        }
        if zoom <= 0.0 {
            return error::out_of_range("zoom", f32::MIN_POSITIVE, f32::INFINITY, zoom);
        }
        self.inner.viewport.set_view(zoom, livewire::Vec2::new(pan_x, pan_y));
        error::ok(JsValue::TRUE)
    }

    // Configuration

    pub fn get_config(&self) -> JsValue {
        interop::to_js(self.inner.tool.config())
    }

    pub fn set_config_res(&mut self, v: JsValue) -> JsValue {
        let cfg = match serde_wasm_bindgen::from_value::<LivewireConfig>(v) {
            Ok(cfg) => cfg,
            Err(e) => return error::err("invalid_config", format!("{}", e), None),
        };
        match self.inner.tool.set_config(cfg) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_livewire(&e),
        }
    }

    // Pointer input, canvas coordinates

    pub fn pointer_down_res(&mut self, x: f32, y: f32, modifiers: u8, double_click: bool) -> JsValue {
        if let Some(e) = check_xy(x, y) {
            return e;
        }
        if !self.rs_has_image() {
            return error::no_image();
        }
        handled(self.inner.pointer_down(x, y, modifiers_from_bits(modifiers), double_click))
    }

    pub fn pointer_move_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = check_xy(x, y) {
            return e;
        }
        let points = self.inner.points(x, y);
        handled(self.inner.dispatch(PointerEvent::Move { points }))
    }

    pub fn pointer_drag_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = check_xy(x, y) {
            return e;
        }
        handled(self.inner.pointer_drag(x, y))
    }

    pub fn pointer_up_res(&mut self, x: f32, y: f32) -> JsValue {
        if let Some(e) = check_xy(x, y) {
            return e;
        }
        handled(self.inner.pointer_up(x, y))
    }

    /// Returns the uid of the affected annotation, or null when the key is unbound.
    pub fn key_down(&mut self, key: &str) -> JsValue {
        uid_or_null(self.inner.with_ctx(|tool, ctx| tool.handle_key(ctx, key)))
    }

    pub fn cancel(&mut self) -> JsValue {
        uid_or_null(self.inner.with_ctx(|tool, ctx| tool.cancel(ctx)))
    }

    pub fn is_drawing(&self) -> bool {
        self.inner.tool.is_drawing()
    }

    pub fn is_editing(&self) -> bool {
        self.inner.tool.is_editing()
    }

    pub fn is_interacting(&self) -> bool {
        self.inner.interaction.is_interacting()
    }

    // Output

    /// Draw commands for the current frame.
    pub fn render(&mut self) -> JsValue {
        let commands = self.inner.render();
        interop::to_js(&commands)
    }

    /// Notifications since the last call, oldest first.
    pub fn take_events(&mut self) -> JsValue {
        let events = self.inner.take_events();
        interop::to_js(&events)
    }

    // Annotations

    pub fn annotation_count(&self) -> u32 {
        self.inner.store.len() as u32
    }

    pub fn annotation_uids(&self) -> JsValue {
        interop::to_js(&self.inner.store.uids())
    }

    pub fn get_annotation_res(&self, uid: u32) -> JsValue {
        match self.inner.store.get(uid as u64) {
            Some(a) => error::ok(interop::to_js(a)),
            None => error::invalid_id("annotation", uid.into()),
        }
    }

    /// Contour polyline as flat world `[x, y, z, ...]`.
    pub fn get_polyline_res(&self, uid: u32) -> JsValue {
        match self.inner.store.get(uid as u64) {
            Some(a) => error::ok(interop::arr_points(&a.data.contour.polyline).into()),
            None => error::invalid_id("annotation", uid.into()),
        }
    }

    pub fn get_handles_res(&self, uid: u32) -> JsValue {
        match self.inner.store.get(uid as u64) {
            Some(a) => error::ok(interop::arr_points(&a.data.handles.points).into()),
            None => error::invalid_id("annotation", uid.into()),
        }
    }

    pub fn remove_annotation_res(&mut self, uid: u32) -> JsValue {
        if self.inner.tool.session().annotation() == Some(uid as u64) {
            return error::err("session_busy", "annotation is being edited", None);
        }
        match self.inner.store.remove(uid as u64) {
            Some(_) => error::ok(JsValue::TRUE),
            None => error::invalid_id("annotation", uid.into()),
        }
    }

    pub fn to_json(&self) -> JsValue {
        interop::to_js(&json::to_json_value(&self.inner.store))
    }

    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        if self.inner.tool.is_drawing() || self.inner.tool.is_editing() {
            return error::err("session_busy", "finish or cancel the active contour first", None);
        }
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match json::from_json_value(val) {
                Ok(store) => {
                    let n = store.len();
                    self.inner.store = store;
                    error::ok(JsValue::from_f64(n as f64))
                }
                Err(e) => error::from_livewire(&e),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }

    pub fn clear(&mut self) {
        self.inner.with_ctx(|tool, ctx| tool.cancel(ctx));
        self.inner.store = livewire::MemoryAnnotationStore::new();
    }
}

impl Default for LivewireEditor {
    fn default() -> Self {
        Self::new()
    }
}
