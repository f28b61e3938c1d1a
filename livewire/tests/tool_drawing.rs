mod common;

use common::*;
use livewire::algorithms::winding::pixel_signed_area;
use livewire::events::{Modifiers, PointerEvent};
use livewire::image::SliceImage;
use livewire::model::{Point3, Vec2, WindingDirection};
use livewire::tools::session::Session;
use livewire::viewport::{Viewport, ViewportKind};
use livewire::{AnnotationStore, LivewireConfig, LivewireError, Tool};

#[test]
fn clockwise_clicks_close_into_clockwise_ring() {
    let mut h = Harness::new(no_snap());
    let uid = h.draw_closed(&[A, B, C, D]);
    let a = h.annotation(uid);
    assert!(a.data.contour.closed);
    assert_eq!(a.data.contour.winding, Some(WindingDirection::Clockwise));
    let poly = &a.data.contour.polyline;
    assert_eq!(poly.first(), poly.last());
    assert_eq!(h.handles(uid), vec![px(A), px(B), px(C), px(D)]);

    let ring = h.ring(uid);
    assert_eq!(ring[0], px(A));
    assert!(is_ring_contiguous(&ring));
    assert!(pixel_signed_area(&ring) > 0.0);
    assert_eq!(h.completed(), vec![(uid, false)]);
    assert!(!h.interaction.is_interacting());
    assert!(matches!(h.tool.session(), Session::Idle));
}

#[test]
fn counter_clockwise_clicks_are_reversed() {
    let mut h = Harness::new(no_snap());
    let uid = h.draw_closed(&[A, D, C, B]);
    assert_eq!(h.annotation(uid).data.contour.winding, Some(WindingDirection::Clockwise));
    // first handle stays, the rest flip
    assert_eq!(h.handles(uid), vec![px(A), px(B), px(C), px(D)]);
    let ring = h.ring(uid);
    assert_eq!(ring[0], px(A));
    assert!(pixel_signed_area(&ring) > 0.0);
    assert!(is_ring_contiguous(&ring));
}

#[test]
fn every_control_point_lies_on_the_ring() {
    let mut h = Harness::new(no_snap());
    let uid = h.draw_closed(&[A, B, C, D]);
    let ring = h.ring(uid);
    for handle in h.handles(uid) {
        assert!(ring.contains(&handle), "handle {:?} not on ring", handle);
    }
}

#[test]
fn double_click_closes_with_two_or_more_controls() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    h.down(B).unwrap();
    h.down(C).unwrap();
    assert!(h.tool.is_drawing());
    h.double_click(C).unwrap();
    assert!(!h.tool.is_drawing());
    let uid = h.only_uid();
    assert!(h.annotation(uid).data.contour.closed);
    assert_eq!(h.handles(uid).len(), 3);
}

#[test]
fn failed_close_keeps_the_contour_drawable() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    h.down(B).unwrap();
    h.down(C).unwrap();
    let uid = h.only_uid();
    h.store.remove(uid);

    let err = h.double_click(C).unwrap_err();
    assert_eq!(err, LivewireError::UnknownAnnotation(uid));
    match h.tool.session() {
        Session::Drawing(s) => assert!(!s.closed),
        other => panic!("unexpected session {}", other.name()),
    }
    assert!(h.move_to(D).unwrap());
    assert_eq!(h.key("Escape"), Some(uid));
    assert!(matches!(h.tool.session(), Session::Idle));
}

#[test]
fn click_inside_close_radius_closes_outside_adds_point() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    h.down(B).unwrap();
    h.down(C).unwrap();
    // 11 px below A: squared distance 121
    h.down((8.0, 19.0)).unwrap();
    assert!(h.tool.is_drawing());
    let uid = h.only_uid();
    assert_eq!(h.handles(uid).len(), 4);
    // exactly 10 px from A and farther from every other control point
    h.down((2.0, 0.0)).unwrap();
    assert!(!h.tool.is_drawing());
    assert!(h.annotation(uid).data.contour.closed);
    assert_eq!(h.handles(uid).len(), 4);
}

#[test]
fn close_radius_is_measured_on_canvas() {
    let mut h = Harness::new(no_snap());
    // zoomed in 4x: 3 slice px = 12 canvas px
    h.viewport.set_view(4.0, Vec2::default());
    let at = |p: (f32, f32)| (p.0 * 4.0, p.1 * 4.0);
    let ev = |p: (f32, f32), world: (f32, f32)| PointerEvent::Down {
        points: livewire::events::PointerPoints { canvas: Vec2::new(p.0, p.1), world: Point3::new(world.0, world.1, 0.0) },
        modifiers: Modifiers::default(),
        double_click: false,
    };
    for p in [A, B, C] {
        h.send(ev(at(p), p)).unwrap();
    }
    h.send(ev(at((8.0, 11.0)), (8.0, 11.0))).unwrap();
    assert!(h.tool.is_drawing());
    // 2.2 slice px from A, about 9 canvas px
    h.send(ev(at((6.0, 7.0)), (6.0, 7.0))).unwrap();
    assert!(!h.tool.is_drawing());
}

#[test]
fn move_tracks_live_segment_without_confirming() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    let uid = h.only_uid();
    assert!(h.move_to(B).unwrap());
    let poly = h.annotation(uid).data.contour.polyline.clone();
    assert_eq!(poly.first().map(|p| (p.x, p.y)), Some(A));
    assert_eq!(poly.last().map(|p| (p.x, p.y)), Some(B));
    assert_eq!(h.handles(uid).len(), 1);

    // outside the image: ignored, last path kept
    assert!(!h.move_to((-4.0, 10.0)).unwrap());
    assert!(!h.move_to((10.0, 32.0)).unwrap());
    assert_eq!(h.annotation(uid).data.contour.polyline, poly);
}

#[test]
fn repeated_click_on_last_control_adds_nothing() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    h.down(B).unwrap();
    h.down(B).unwrap();
    let uid = h.only_uid();
    assert_eq!(h.handles(uid), vec![px(A), px(B)]);
}

#[test]
fn snapped_click_stays_within_radius() {
    let mut h = Harness::new(LivewireConfig::default());
    h.down(A).unwrap();
    h.down((21.0, 6.0)).unwrap();
    let uid = h.only_uid();
    let handles = h.handles(uid);
    assert_eq!(handles.len(), 2);
    let snapped = handles[1];
    assert!((snapped.x - 21).abs() <= 2 && (snapped.y - 6).abs() <= 2);
    // the top edge of the square is at rows 7/8
    assert!(snapped.y >= 7, "snapped to {:?}", snapped);
}

#[test]
fn escape_removes_unfinished_contour() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    h.down(B).unwrap();
    let uid = h.only_uid();
    assert!(h.interaction.is_interacting());
    assert_eq!(h.key("Escape"), Some(uid));
    assert!(h.store.get(uid).is_none());
    assert!(!h.interaction.is_interacting());
    assert!(matches!(h.tool.session(), Session::Idle));
    assert_eq!(h.key("Escape"), None);
    assert_eq!(h.key("Enter"), None);
}

#[test]
fn hole_modifier_is_reported_on_completion() {
    let mut h = Harness::new(no_snap());
    let shift = Modifiers { shift: true, ..Modifiers::default() };
    h.send(PointerEvent::Down { points: pts(A.0, A.1), modifiers: shift, double_click: false }).unwrap();
    h.down(B).unwrap();
    h.down(C).unwrap();
    h.down((9.0, 9.0)).unwrap();
    let uid = h.only_uid();
    assert_eq!(h.completed(), vec![(uid, true)]);
}

#[test]
fn starting_twice_is_rejected() {
    let mut h = Harness::new(no_snap());
    h.down(A).unwrap();
    let err = h
        .with_ctx(0, |tool, ctx| tool.add_new_annotation(ctx, pts(20.0, 20.0), Modifiers::default()))
        .unwrap_err();
    assert_eq!(err, LivewireError::SessionBusy("drawing"));
    assert_eq!(h.store.uids().len(), 1);
}

#[test]
fn decimation_keeps_handles() {
    let mut cfg = no_snap();
    cfg.decimate.enabled = true;
    cfg.decimate.epsilon = 0.5;
    let mut h = Harness::new(cfg);
    let uid = h.draw_closed(&[A, B, C, D]);
    let ring = h.ring(uid);
    for handle in h.handles(uid) {
        assert!(ring.contains(&handle));
    }
    let mut plain = Harness::new(no_snap());
    let puid = plain.draw_closed(&[A, B, C, D]);
    assert!(ring.len() < plain.ring(puid).len());
}

struct VideoViewport;

impl Viewport for VideoViewport {
    fn id(&self) -> &str {
        "video"
    }
    fn kind(&self) -> ViewportKind {
        ViewportKind::Video
    }
    fn slice_image(&self) -> Option<SliceImage> {
        Some(square_image())
    }
    fn world_to_canvas(&self, p: Point3) -> Vec2 {
        Vec2::new(p.x, p.y)
    }
    fn canvas_to_world(&self, p: Vec2) -> Point3 {
        Point3::new(p.x, p.y, 0.0)
    }
    fn target_id(&self) -> Option<String> {
        None
    }
}

#[test]
fn unsupported_viewport_is_an_error() {
    let mut h = Harness::new(no_snap());
    let vp = VideoViewport;
    let mut ctx = livewire::ToolContext::new(&vp, &mut h.store, &mut h.events, &mut h.interaction, h.t0);
    let ev = PointerEvent::Down { points: pts(A.0, A.1), modifiers: Modifiers::default(), double_click: false };
    let err = h.tool.handle_pointer_event(&mut ctx, &ev).unwrap_err();
    assert_eq!(err, LivewireError::UnsupportedViewport { kind: "video" });
    assert!(h.store.uids().is_empty());
    assert!(!h.interaction.is_interacting());
}

#[test]
fn viewport_without_image_is_an_error() {
    let mut h = Harness::new(no_snap());
    h.viewport = livewire::StackViewport::new("empty");
    assert_eq!(h.down(A).unwrap_err(), LivewireError::MissingImageData);
}
