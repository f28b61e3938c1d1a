//! Pointer input, annotation notifications and the interaction context.

use crate::model::{AnnotationUid, ChangeType, Point3, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEvent {
    pub annotation_uid: AnnotationUid,
    pub viewport_id: String,
    pub change_type: ChangeType,
}

/// Outbound notifications. Implemented by the host's event bus.
pub trait EventSink {
    fn annotation_modified(&mut self, event: AnnotationEvent);
    fn contour_completed(&mut self, uid: AnnotationUid, hole_processing: bool);
    fn request_render(&mut self, viewport_ids: &[String]);
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Modified(AnnotationEvent),
    Completed { annotation_uid: AnnotationUid, hole_processing: bool },
    Render { viewport_ids: Vec<String> },
}

/// Collecting sink; the host drains it after each dispatched event.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    items: Vec<Notification>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn modified(&self) -> impl Iterator<Item = &AnnotationEvent> {
        self.items.iter().filter_map(|n| match n {
            Notification::Modified(e) => Some(e),
            _ => None,
        })
    }
}

impl EventSink for EventQueue {
    fn annotation_modified(&mut self, event: AnnotationEvent) {
        self.items.push(Notification::Modified(event));
    }

    fn contour_completed(&mut self, uid: AnnotationUid, hole_processing: bool) {
        self.items.push(Notification::Completed {
            annotation_uid: uid,
            hole_processing,
        });
    }

    fn request_render(&mut self, viewport_ids: &[String]) {
        // consecutive render requests for the same viewports collapse
        if let Some(Notification::Render { viewport_ids: last }) = self.items.last() {
            if last.as_slice() == viewport_ids {
                return;
            }
        }
        self.items.push(Notification::Render {
            viewport_ids: viewport_ids.to_vec(),
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn has(&self, m: Modifier) -> bool {
        match m {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Meta => self.meta,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPoints {
    pub canvas: Vec2,
    pub world: Point3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down {
        points: PointerPoints,
        modifiers: Modifiers,
        double_click: bool,
    },
    Move {
        points: PointerPoints,
    },
    Drag {
        points: PointerPoints,
        delta_world: Point3,
    },
    Up {
        points: PointerPoints,
    },
}

/// Which pointer streams the active tool is listening to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Listeners {
    /// move / down / double-click while tracing
    pub draw: bool,
    /// drag / up while editing
    pub modify: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActiveInteraction {
    pub viewport_id: String,
    pub tool: &'static str,
    pub listeners: Listeners,
}

/// Shared "a tool is interacting" context owned by the dispatch layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    active: Option<ActiveInteraction>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, viewport_id: &str, tool: &'static str, listeners: Listeners) {
        self.active = Some(ActiveInteraction {
            viewport_id: viewport_id.to_string(),
            tool,
            listeners,
        });
    }

    pub fn end(&mut self) {
        self.active = None;
    }

    pub fn is_interacting(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveInteraction> {
        self.active.as_ref()
    }

    pub fn listeners(&self) -> Listeners {
        self.active.as_ref().map(|a| a.listeners).unwrap_or_default()
    }
}
