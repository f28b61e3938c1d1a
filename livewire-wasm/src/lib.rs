use livewire::events::{EventQueue, InteractionState, Modifiers, Notification, PointerEvent, PointerPoints};
use livewire::render::{DrawCommand, RecordingHelper};
use livewire::tools::base::ToolContext;
use livewire::{LivewireContourTool, MemoryAnnotationStore, Point3, StackViewport, Tool, Vec2, Viewport};
use wasm_bindgen::prelude::*;
use web_time::Instant;

mod api;
mod error;
mod interop;
mod logging;

pub use api::{init_logging, set_panic_hook};

pub const VIEWPORT_ID: &str = "viewport-0";

/// Host-side state around one contour tool: the viewport it draws on, the
/// annotations it writes and the notifications waiting to be drained.
pub(crate) struct Editor {
    pub tool: LivewireContourTool,
    pub store: MemoryAnnotationStore,
    pub viewport: StackViewport,
    pub events: EventQueue,
    pub interaction: InteractionState,
    pub image_count: u32,
    last_world: Option<Point3>,
}

impl Editor {
    pub fn new() -> Self {
        Editor {
            tool: LivewireContourTool::default(),
            store: MemoryAnnotationStore::new(),
            viewport: StackViewport::new(VIEWPORT_ID),
            events: EventQueue::new(),
            interaction: InteractionState::new(),
            image_count: 0,
            last_world: None,
        }
    }

    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut LivewireContourTool, &mut ToolContext<'_>) -> R) -> R {
        let mut ctx = ToolContext::new(
            &self.viewport,
            &mut self.store,
            &mut self.events,
            &mut self.interaction,
            Instant::now(),
        );
        f(&mut self.tool, &mut ctx)
    }

    pub fn points(&self, x: f32, y: f32) -> PointerPoints {
        let canvas = Vec2::new(x, y);
        PointerPoints { canvas, world: self.viewport.canvas_to_world(canvas) }
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> livewire::Result<bool> {
        self.with_ctx(|tool, ctx| tool.handle_pointer_event(ctx, &event))
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers, double_click: bool) -> livewire::Result<bool> {
        let points = self.points(x, y);
        self.last_world = Some(points.world);
        self.dispatch(PointerEvent::Down { points, modifiers, double_click })
    }

    pub fn pointer_drag(&mut self, x: f32, y: f32) -> livewire::Result<bool> {
        let points = self.points(x, y);
        let prev = self.last_world.replace(points.world).unwrap_or(points.world);
        let delta_world = Point3::new(points.world.x - prev.x, points.world.y - prev.y, points.world.z - prev.z);
        self.dispatch(PointerEvent::Drag { points, delta_world })
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> livewire::Result<bool> {
        let points = self.points(x, y);
        self.last_world = None;
        self.dispatch(PointerEvent::Up { points })
    }

    pub fn render(&mut self) -> Vec<DrawCommand> {
        let mut helper = RecordingHelper::new();
        self.with_ctx(|tool, ctx| tool.render(ctx, &mut helper));
        helper.take()
    }

    pub fn take_events(&mut self) -> Vec<Notification> {
        self.events.drain()
    }
}

#[wasm_bindgen]
pub struct LivewireEditor {
    pub(crate) inner: Editor,
}

impl LivewireEditor {
    pub fn rs_new() -> LivewireEditor {
        LivewireEditor { inner: Editor::new() }
    }

    pub fn rs_has_image(&self) -> bool {
        self.inner.viewport.image().is_some()
    }
}
