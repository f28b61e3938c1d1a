use js_sys::{Float32Array, Object, Reflect};
use livewire::Point3;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_f32(slice: &[f32]) -> Float32Array {
    let arr = Float32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}
/// World points as a flat `[x0, y0, z0, x1, ...]` array.
pub fn arr_points(points: &[Point3]) -> Float32Array {
    let flat: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
    arr_f32(&flat)
}
/// Plain JS objects rather than `Map`s, so the result also survives `JSON.stringify`.
pub fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap_or(JsValue::NULL)
}
