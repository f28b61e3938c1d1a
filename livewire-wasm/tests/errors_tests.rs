use js_sys::{Float32Array, Reflect};
use livewire_wasm::LivewireEditor;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_err(v: &JsValue, code: &str) -> bool {
    if let Ok(ok) =
        Reflect::get(v, &JsValue::from_str("ok")).and_then(|x| x.as_bool().ok_or(JsValue::NULL))
    {
        if ok {
            return false;
        }
        if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
            if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
                return c.as_string().map_or(false, |s| s == code);
            }
        }
    }
    false
}

fn flat(w: u32, h: u32) -> Float32Array {
    let v = vec![10.0f32; (w * h) as usize];
    Float32Array::from(&v[..])
}

#[wasm_bindgen_test]
fn pointer_input_needs_an_image() {
    let mut ed = LivewireEditor::new();
    assert!(is_err(&ed.pointer_down_res(5.0, 5.0, 0, false), "no_image"));
    assert_eq!(ed.annotation_count(), 0);
    assert!(!ed.is_drawing());
}

#[wasm_bindgen_test]
fn non_finite_and_range_errors() {
    let mut ed = LivewireEditor::new();
    assert!(is_err(&ed.load_image_res(&flat(4, 4), 4, 4, f32::NAN, 1.0), "non_finite"));
    assert!(is_err(&ed.load_image_res(&flat(4, 4), 4, 4, 1.0, 0.0), "out_of_range"));
    assert!(is_err(&ed.set_view_res(0.0, 0.0, 0.0), "out_of_range"));
    assert!(is_err(&ed.set_view_res(1.0, f32::INFINITY, 0.0), "non_finite"));
    assert!(is_err(&ed.pointer_move_res(f32::NAN, 0.0), "non_finite"));
    assert!(is_err(&ed.pointer_drag_res(0.0, f32::NAN), "non_finite"));
}

#[wasm_bindgen_test]
fn voi_range_needs_an_image_and_an_ordered_window() {
    let mut ed = LivewireEditor::new();
    assert!(is_err(&ed.set_voi_range_res(0.0, 100.0), "no_image"));
    assert!(Reflect::get(&ed.load_image_res(&flat(4, 4), 4, 4, 1.0, 1.0), &JsValue::from_str("ok")).unwrap().is_truthy());
    assert!(is_err(&ed.set_voi_range_res(50.0, 50.0), "out_of_range"));
    assert!(is_err(&ed.set_voi_range_res(f32::NAN, 50.0), "non_finite"));
    let ok = ed.set_voi_range_res(0.0, 40.0);
    assert!(Reflect::get(&ok, &JsValue::from_str("ok")).unwrap().is_truthy());
    assert!(ed.has_image());
}

#[wasm_bindgen_test]
fn bad_images_are_rejected() {
    let mut ed = LivewireEditor::new();
    assert!(is_err(&ed.load_image_res(&flat(4, 4), 5, 4, 1.0, 1.0), "invalid_image"));
    assert!(is_err(&ed.load_image_res(&flat(0, 0), 0, 0, 1.0, 1.0), "invalid_image"));
    let nan = Float32Array::from(&[f32::NAN; 4][..]);
    assert!(is_err(&ed.load_image_res(&nan, 2, 2, 1.0, 1.0), "invalid_image"));
    assert!(!ed.has_image());
}

#[wasm_bindgen_test]
fn unknown_annotations_and_bad_json() {
    let mut ed = LivewireEditor::new();
    assert!(is_err(&ed.get_polyline_res(7), "invalid_id"));
    assert!(is_err(&ed.get_annotation_res(7), "invalid_id"));
    assert!(is_err(&ed.remove_annotation_res(7), "invalid_id"));

    let doc = js_sys::JSON::parse(r#"{"version": 99, "annotations": []}"#).unwrap();
    assert!(is_err(&ed.from_json_res(doc), "invalid_json"));
    assert!(is_err(&ed.from_json_res(JsValue::from_f64(3.0)), "invalid_json"));
    let wide = js_sys::JSON::parse(r#"{"version": 1, "annotations": [{"uid": 4294967296}]}"#).unwrap();
    assert!(is_err(&ed.from_json_res(wide), "invalid_json"));
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected_without_change() {
    let mut ed = LivewireEditor::new();
    let before = js_sys::JSON::stringify(&ed.get_config()).unwrap();
    let cfg = js_sys::JSON::parse(r#"{"snap_handle_nearby": 100000}"#).unwrap();
    assert!(is_err(&ed.set_config_res(cfg), "invalid_config"));
    let cfg = js_sys::JSON::parse(r#"{"close_threshold_sq": -1}"#).unwrap();
    assert!(is_err(&ed.set_config_res(cfg), "invalid_config"));
    assert!(is_err(&ed.set_config_res(JsValue::from_str("nope")), "invalid_config"));
    assert_eq!(js_sys::JSON::stringify(&ed.get_config()).unwrap(), before);
}

#[wasm_bindgen_test]
fn unknown_log_level() {
    assert!(is_err(&livewire_wasm::init_logging("chatty"), "invalid_level"));
}
