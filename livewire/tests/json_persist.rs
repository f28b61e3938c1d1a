mod common;

use common::*;
use livewire::json::{from_json_str, from_json_value, to_json_string, to_json_value, DOC_VERSION};
use livewire::render::RecordingHelper;
use livewire::{AnnotationStore, LivewireError, Tool};
use serde_json::json;

fn is_document_error(r: livewire::Result<livewire::MemoryAnnotationStore>) -> bool {
    matches!(r, Err(LivewireError::Document(_)))
}

#[test]
fn drawn_contours_survive_a_round_trip() {
    let mut h = Harness::new(no_snap());
    let uid = h.draw_closed(&[A, B, C, D]);
    let mut helper = RecordingHelper::new();
    h.with_ctx(0, |tool, ctx| tool.render(ctx, &mut helper));

    let text = to_json_string(&h.store);
    let restored = from_json_str(&text).unwrap();
    assert_eq!(restored.uids(), vec![uid]);
    assert_eq!(restored.get(uid), h.store.get(uid));
    assert_eq!(to_json_value(&restored), to_json_value(&h.store));
}

#[test]
fn restored_store_continues_uid_sequence() {
    let mut h = Harness::new(no_snap());
    h.draw_closed(&[A, B, C, D]);
    let mut restored = from_json_value(to_json_value(&h.store)).unwrap();
    let next = restored.add(livewire::ContourAnnotation::new(livewire::TOOL_NAME));
    assert_eq!(next, 2);
}

#[test]
fn restored_contours_are_editable() {
    let mut h = Harness::new(no_snap());
    let uid = h.draw_closed(&[A, B, C, D]);
    let text = to_json_string(&h.store);

    let mut fresh = Harness::new(no_snap());
    fresh.store = from_json_str(&text).unwrap();
    fresh.down(C).unwrap();
    fresh.drag_to((26.0, 20.0)).unwrap();
    fresh.up((26.0, 20.0)).unwrap();
    assert_eq!(fresh.handles(uid)[2], livewire::Pixel::new(26, 20));
    assert!(is_ring_contiguous(&fresh.ring(uid)));
}

#[test]
fn rejects_malformed_documents() {
    assert!(is_document_error(from_json_str("not json")));
    assert!(is_document_error(from_json_value(json!({ "version": DOC_VERSION + 1, "annotations": [] }))));
    assert!(is_document_error(from_json_value(json!({ "annotations": [] }))));
}

#[test]
fn rejects_out_of_range_content() {
    let mut h = Harness::new(no_snap());
    let uid = h.draw_closed(&[A, B, C, D]);
    let base = to_json_value(&h.store);

    let mut far = base.clone();
    far["annotations"][0]["data"]["contour"]["polyline"][0]["x"] = json!(1.0e9);
    assert!(is_document_error(from_json_value(far)));

    let mut active = base.clone();
    active["annotations"][0]["data"]["handles"]["active_handle_index"] = json!(4);
    assert!(is_document_error(from_json_value(active)));

    let mut zero = base.clone();
    zero["annotations"][0]["uid"] = json!(0);
    assert!(is_document_error(from_json_value(zero)));

    let mut huge = base.clone();
    huge["annotations"][0]["uid"] = json!(u64::MAX);
    assert!(is_document_error(from_json_value(huge)));

    let mut wide = base.clone();
    wide["annotations"][0]["uid"] = json!(u64::from(u32::MAX) + 1);
    assert!(is_document_error(from_json_value(wide)));

    let mut dup = base.clone();
    let first = dup["annotations"][0].clone();
    dup["annotations"].as_array_mut().unwrap().push(first);
    assert!(is_document_error(from_json_value(dup)));

    let mut many = base;
    let handle = json!({ "x": 1.0, "y": 1.0, "z": 0.0 });
    many["annotations"][0]["data"]["handles"]["points"] = json!(vec![handle; 5000]);
    assert!(is_document_error(from_json_value(many)));

    assert!(h.store.get(uid).is_some());
}
