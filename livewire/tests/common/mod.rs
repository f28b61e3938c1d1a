#![allow(dead_code)]

use livewire::events::{EventQueue, InteractionState, Modifiers, Notification, PointerEvent, PointerPoints};
use livewire::geometry::transform::{Affine3, SliceTransform};
use livewire::model::{ChangeType, ContourAnnotation, Pixel, Point3, Vec2};
use livewire::tools::base::{Tool, ToolContext};
use livewire::{AnnotationStore, LivewireConfig, LivewireContourTool, MemoryAnnotationStore, SliceImage, StackViewport};
use std::time::Duration;
use web_time::Instant;

pub const SIZE: u32 = 32;
pub const A: (f32, f32) = (8.0, 8.0);
pub const B: (f32, f32) = (23.0, 8.0);
pub const C: (f32, f32) = (23.0, 23.0);
pub const D: (f32, f32) = (8.0, 23.0);

/// 32x32 dark image with a bright square covering 8..=23 on both axes.
pub fn square_image() -> SliceImage {
    let mut v = vec![0.0f32; (SIZE * SIZE) as usize];
    for y in 8..24 {
        for x in 8..24 {
            v[(y * SIZE + x) as usize] = 200.0;
        }
    }
    let t = SliceTransform::for_stack(Affine3::IDENTITY).unwrap();
    SliceImage::new(v, SIZE, SIZE, 1, t).unwrap().with_modality("CT")
}

pub fn pts(x: f32, y: f32) -> PointerPoints {
    PointerPoints {
        canvas: Vec2::new(x, y),
        world: Point3::new(x, y, 0.0),
    }
}

pub fn no_snap() -> LivewireConfig {
    LivewireConfig {
        snap_handle_nearby: 0,
        ..LivewireConfig::default()
    }
}

pub struct Harness {
    pub tool: LivewireContourTool,
    pub store: MemoryAnnotationStore,
    pub viewport: StackViewport,
    pub events: EventQueue,
    pub interaction: InteractionState,
    pub t0: Instant,
    last_drag: Option<Point3>,
}

impl Harness {
    pub fn new(config: LivewireConfig) -> Self {
        let mut viewport = StackViewport::new("vp1");
        viewport.set_image("img", square_image());
        Harness {
            tool: LivewireContourTool::new(config),
            store: MemoryAnnotationStore::new(),
            viewport,
            events: EventQueue::new(),
            interaction: InteractionState::new(),
            t0: Instant::now(),
            last_drag: None,
        }
    }

    pub fn with_ctx<R>(&mut self, ms: u64, f: impl FnOnce(&mut LivewireContourTool, &mut ToolContext<'_>) -> R) -> R {
        let now = self.t0 + Duration::from_millis(ms);
        let mut ctx = ToolContext::new(&self.viewport, &mut self.store, &mut self.events, &mut self.interaction, now);
        f(&mut self.tool, &mut ctx)
    }

    pub fn send(&mut self, ev: PointerEvent) -> livewire::Result<bool> {
        self.with_ctx(0, |tool, ctx| tool.handle_pointer_event(ctx, &ev))
    }

    pub fn down(&mut self, p: (f32, f32)) -> livewire::Result<bool> {
        self.send(PointerEvent::Down { points: pts(p.0, p.1), modifiers: Modifiers::default(), double_click: false })
    }

    pub fn double_click(&mut self, p: (f32, f32)) -> livewire::Result<bool> {
        self.send(PointerEvent::Down { points: pts(p.0, p.1), modifiers: Modifiers::default(), double_click: true })
    }

    pub fn move_to(&mut self, p: (f32, f32)) -> livewire::Result<bool> {
        self.send(PointerEvent::Move { points: pts(p.0, p.1) })
    }

    pub fn drag_to(&mut self, p: (f32, f32)) -> livewire::Result<bool> {
        self.drag_at(0, p)
    }

    pub fn drag_at(&mut self, ms: u64, p: (f32, f32)) -> livewire::Result<bool> {
        let world = Point3::new(p.0, p.1, 0.0);
        let prev = self.last_drag.unwrap_or(world);
        self.last_drag = Some(world);
        let delta_world = Point3::new(world.x - prev.x, world.y - prev.y, 0.0);
        let ev = PointerEvent::Drag { points: pts(p.0, p.1), delta_world };
        self.with_ctx(ms, |tool, ctx| tool.handle_pointer_event(ctx, &ev))
    }

    pub fn up(&mut self, p: (f32, f32)) -> livewire::Result<bool> {
        self.last_drag = None;
        self.send(PointerEvent::Up { points: pts(p.0, p.1) })
    }

    pub fn key(&mut self, key: &str) -> Option<u64> {
        self.with_ctx(0, |tool, ctx| tool.handle_key(ctx, key))
    }

    /// Click A, B, C, D in the given order and close near the first one.
    pub fn draw_closed(&mut self, order: &[(f32, f32)]) -> u64 {
        for p in order {
            self.move_to(*p).unwrap();
            self.down(*p).unwrap();
        }
        let first = order[0];
        self.down((first.0 + 1.0, first.1 + 1.0)).unwrap();
        assert!(!self.tool.is_drawing(), "contour should be closed");
        self.only_uid()
    }

    pub fn only_uid(&self) -> u64 {
        let uids = self.store.uids();
        assert_eq!(uids.len(), 1, "expected exactly one annotation");
        uids[0]
    }

    pub fn annotation(&self, uid: u64) -> &ContourAnnotation {
        self.store.get(uid).expect("annotation exists")
    }

    pub fn ring(&self, uid: u64) -> Vec<Pixel> {
        let poly = &self.annotation(uid).data.contour.polyline;
        let mut ring: Vec<Pixel> = poly.iter().map(|p| Pixel::new(p.x.round() as i32, p.y.round() as i32)).collect();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        ring
    }

    pub fn handles(&self, uid: u64) -> Vec<Pixel> {
        self.annotation(uid)
            .data
            .handles
            .points
            .iter()
            .map(|p| Pixel::new(p.x.round() as i32, p.y.round() as i32))
            .collect()
    }

    pub fn count_changes(&self, change: ChangeType) -> usize {
        self.events.modified().filter(|e| e.change_type == change).count()
    }

    pub fn completed(&self) -> Vec<(u64, bool)> {
        self.events
            .items()
            .iter()
            .filter_map(|n| match n {
                Notification::Completed { annotation_uid, hole_processing } => Some((*annotation_uid, *hole_processing)),
                _ => None,
            })
            .collect()
    }
}

pub fn px(p: (f32, f32)) -> Pixel {
    Pixel::new(p.0 as i32, p.1 as i32)
}

pub fn is_ring_contiguous(ring: &[Pixel]) -> bool {
    ring.windows(2).all(|w| w[0].touches(w[1])) && ring.first().zip(ring.last()).map_or(true, |(a, b)| a.touches(*b))
}
