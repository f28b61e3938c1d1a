use crate::error::Result;
use crate::events::{EventSink, InteractionState, PointerEvent};
use crate::model::AnnotationUid;
use crate::render::DrawingHelper;
use crate::store::AnnotationStore;
use crate::viewport::Viewport;
use web_time::Instant;

/// Everything a tool may touch while handling one event.
pub struct ToolContext<'a> {
    pub viewport: &'a dyn Viewport,
    pub store: &'a mut dyn AnnotationStore,
    pub events: &'a mut dyn EventSink,
    pub interaction: &'a mut InteractionState,
    pub now: Instant,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        viewport: &'a dyn Viewport,
        store: &'a mut dyn AnnotationStore,
        events: &'a mut dyn EventSink,
        interaction: &'a mut InteractionState,
        now: Instant,
    ) -> Self {
        ToolContext {
            viewport,
            store,
            events,
            interaction,
            now,
        }
    }

    pub fn render_viewport(&mut self) {
        let ids = [self.viewport.id().to_string()];
        self.events.request_render(&ids);
    }
}

pub trait Tool {
    fn name(&self) -> &'static str;
    /// Returns `true` when the event was consumed.
    fn handle_pointer_event(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> Result<bool>;
    /// Draw this tool's annotations; returns `true` if anything was drawn.
    fn render(&mut self, ctx: &mut ToolContext<'_>, helper: &mut dyn DrawingHelper) -> bool;
    /// Abort the active session, if any, and return the affected annotation.
    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> Option<AnnotationUid>;
    fn handle_key(&mut self, ctx: &mut ToolContext<'_>, key: &str) -> Option<AnnotationUid>;
}

pub type KeyAction<T> = fn(&mut T, &mut ToolContext<'_>) -> Option<AnnotationUid>;

pub struct KeyBinding<T> {
    pub key: &'static str,
    pub action: KeyAction<T>,
}

/// Run the action bound to `key`, if there is one.
pub fn dispatch_key<T>(tool: &mut T, table: &[KeyBinding<T>], ctx: &mut ToolContext<'_>, key: &str) -> Option<AnnotationUid> {
    let binding = table.iter().find(|b| b.key == key)?;
    (binding.action)(tool, ctx)
}
