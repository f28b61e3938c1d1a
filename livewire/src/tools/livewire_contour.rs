//! Livewire contour tool: traces closed contours along image edges and lets
//! their handles be dragged afterwards.
//!
//! New contour: the first click seeds a search, every move queries the path
//! from the last confirmed control point to the cursor, every click confirms
//! the live segment and re-seeds. Clicking the first control point (or a
//! double click) closes the ring, which is normalised to clockwise and
//! committed.
//!
//! Handle edit: dragging handle `i` seeds two searches at handles `i-1` and
//! `i+1`; only the two segments around `i` are re-traced.

use super::base::{dispatch_key, KeyBinding, Tool, ToolContext};
use super::session::{handle_ring_index, ring_pixels, DrawSession, Grab, HandleRouting, HandleSession, Session};
use crate::algorithms::path::LivewirePath;
use crate::algorithms::picking::{nearest_point, polyline_within};
use crate::algorithms::scissors::Scissors;
use crate::algorithms::winding::{pixel_signed_area, reverse_keep_first, winding_direction};
use crate::config::LivewireConfig;
use crate::error::{LivewireError, Result};
use crate::events::{AnnotationEvent, Listeners, Modifiers, PointerEvent, PointerPoints};
use crate::geometry::simplify::decimate_between_handles;
use crate::geometry::transform::SliceTransform;
use crate::model::{AnnotationUid, ChangeType, ContourAnnotation, Pixel, Point3, TargetStats, Vec2, WindingDirection};
use crate::render::{text_box_anchor, AnnotationStyle, DrawingHelper};
use crate::stats::{contour_stats, default_text_lines};
use crate::store::AnnotationStore;
use crate::throttle::Throttle;
use crate::viewport::Viewport;
use std::time::Duration;

pub const TOOL_NAME: &str = "LivewireContour";

const KEY_BINDINGS: &[KeyBinding<LivewireContourTool>] = &[KeyBinding {
    key: "Escape",
    action: LivewireContourTool::cancel_in_progress,
}];

pub struct LivewireContourTool {
    config: LivewireConfig,
    pub style: AnnotationStyle,
    session: Session,
    stats_throttle: Throttle<AnnotationUid>,
}

impl Default for LivewireContourTool {
    fn default() -> Self {
        LivewireContourTool::new(LivewireConfig::default())
    }
}

fn ring_to_world(ring: &[Pixel], t: &SliceTransform, close: bool) -> Vec<Point3> {
    let mut out: Vec<Point3> = ring.iter().map(|p| t.pixel_to_world(*p)).collect();
    if close && ring.len() > 1 {
        out.push(t.pixel_to_world(ring[0]));
    }
    out
}

fn checked_image(viewport: &dyn Viewport) -> Result<crate::image::SliceImage> {
    let kind = viewport.kind();
    if !kind.supports_contours() {
        return Err(LivewireError::UnsupportedViewport { kind: kind.name() });
    }
    viewport.slice_image().ok_or(LivewireError::MissingImageData)
}

impl LivewireContourTool {
    pub fn new(config: LivewireConfig) -> Self {
        let interval = Duration::from_millis(config.stats_throttle_ms);
        LivewireContourTool {
            config,
            style: AnnotationStyle::default(),
            session: Session::Idle,
            stats_throttle: Throttle::new(interval),
        }
    }

    pub fn config(&self) -> &LivewireConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect for the next session.
    pub fn set_config(&mut self, config: LivewireConfig) -> Result<()> {
        config.validate()?;
        self.stats_throttle.set_interval(Duration::from_millis(config.stats_throttle_ms));
        self.config = config;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.session, Session::Drawing(_))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.session, Session::HandleEditing(_))
    }

    // ---- new contour ----

    pub fn add_new_annotation(
        &mut self,
        ctx: &mut ToolContext<'_>,
        points: PointerPoints,
        modifiers: Modifiers,
    ) -> Result<AnnotationUid> {
        if !matches!(self.session, Session::Idle) {
            return Err(LivewireError::SessionBusy(self.session.name()));
        }
        let image = checked_image(ctx.viewport)?;
        let gray = image.grayscale();
        let mut scissors = Scissors::from_raw_pixel_data(
            &gray,
            image.width,
            image.height,
            image.voi_range,
            self.config.cost_weights,
        )?;
        let transform = image.transform;
        let start = transform.to_pixel(points.world);
        scissors.start_search(start)?;

        let mut confirmed = LivewirePath::from_points(vec![start]);
        confirmed.mark_last_as_control_point();
        let start_world = transform.pixel_to_world(start);

        let mut annotation = ContourAnnotation::new(TOOL_NAME);
        annotation.highlighted = true;
        annotation.data.handles.points.push(start_world);
        annotation.data.contour.polyline.push(start_world);
        let uid = ctx.store.add(annotation);

        let hole_processing = modifiers.has(self.config.hole_modifier);
        let viewport_id = ctx.viewport.id().to_string();
        ctx.interaction.begin(&viewport_id, TOOL_NAME, Listeners { draw: true, modify: false });
        log::debug!("livewire: new contour {} at ({}, {}) hole={}", uid, start.x, start.y, hole_processing);

        self.session = Session::Drawing(DrawSession {
            annotation: uid,
            viewport_id,
            transform,
            scissors,
            current: confirmed.clone(),
            confirmed,
            closed: false,
            hole_processing,
        });
        ctx.render_viewport();
        Ok(uid)
    }

    /// Live segment to the cursor. Positions outside the image are ignored.
    pub fn mouse_move(&mut self, ctx: &mut ToolContext<'_>, points: PointerPoints) -> bool {
        let Session::Drawing(s) = &mut self.session else {
            return false;
        };
        if s.closed {
            return false;
        }
        let target = s.transform.to_pixel(points.world);
        if !s.scissors.graph().contains(target) {
            return false;
        }
        let tail = s.scissors.find_path_to_point(target);
        if tail.is_empty() {
            return false;
        }
        let mut current = s.confirmed.clone();
        current.join_points(&tail);
        s.current = current;
        publish_open_path(ctx.store, s);
        ctx.render_viewport();
        true
    }

    pub fn mouse_down(&mut self, ctx: &mut ToolContext<'_>, points: PointerPoints, double_click: bool) -> Result<bool> {
        let Session::Drawing(s) = &mut self.session else {
            return Ok(false);
        };
        if s.closed {
            return Ok(false);
        }
        let controls = s.current.control_points();
        let mut close = controls.len() >= 2 && double_click;
        if controls.len() >= 2 {
            let canvas: Vec<Vec2> = controls
                .iter()
                .map(|p| ctx.viewport.world_to_canvas(s.transform.pixel_to_world(*p)))
                .collect();
            let tol = self.config.close_threshold_sq.sqrt();
            if let Some((0, _)) = nearest_point(&canvas, points.canvas.x, points.canvas.y, tol) {
                close = true;
            }
        }
        if close {
            self.close_contour(ctx)?;
            return Ok(true);
        }

        let click = s.transform.to_pixel(points.world);
        let target = if self.config.snap_handle_nearby > 0 {
            s.scissors.find_min_nearby(click, self.config.snap_handle_nearby)
        } else {
            click
        };
        if s.scissors.graph().contains(target) {
            let tail = s.scissors.find_path_to_point(target);
            if !tail.is_empty() {
                let mut current = s.confirmed.clone();
                current.join_points(&tail);
                s.current = current;
            }
        }
        let Some(terminus) = s.current.last_point() else {
            return Ok(false);
        };
        if s.confirmed.last_control_point() == Some(terminus) {
            return Ok(false);
        }
        s.confirmed = s.current.clone();
        s.confirmed.mark_last_as_control_point();
        s.scissors.start_search(terminus)?;
        if let Some(a) = ctx.store.get_mut(s.annotation) {
            a.data.handles.points.push(s.transform.pixel_to_world(terminus));
        }
        publish_open_path(ctx.store, s);
        ctx.render_viewport();
        Ok(true)
    }

    /// Route the last segment back to the first control point and commit.
    pub fn close_contour(&mut self, ctx: &mut ToolContext<'_>) -> Result<()> {
        let Session::Drawing(s) = &mut self.session else {
            return Ok(());
        };
        let Some(first) = s.confirmed.first_point() else {
            return Ok(());
        };
        let mut path = s.confirmed.clone();
        path.join_points(&s.scissors.find_path_to_point(first));
        path.pop_closing_point();

        let t = s.transform;
        let uid = s.annotation;
        let hole = s.hole_processing;
        let mut ring = path.into_points();
        let annotation = ctx.store.get_mut(uid).ok_or(LivewireError::UnknownAnnotation(uid))?;
        s.closed = true;
        let mut handles: Vec<Pixel> = annotation.data.handles.points.iter().map(|p| t.to_pixel(*p)).collect();

        if winding_direction(pixel_signed_area(&ring)) == WindingDirection::CounterClockwise {
            reverse_keep_first(&mut ring);
            reverse_keep_first(&mut handles);
        }
        if self.config.decimate.enabled {
            ring = decimate_ring(&ring, &handles, self.config.decimate.epsilon);
        }

        annotation.data.contour.polyline = ring_to_world(&ring, &t, true);
        annotation.data.contour.closed = true;
        annotation.data.contour.winding = Some(WindingDirection::Clockwise);
        annotation.data.handles.points = handles.iter().map(|p| t.pixel_to_world(*p)).collect();
        annotation.data.handles.active_handle_index = None;
        annotation.invalidated = true;
        log::debug!("livewire: closed contour {} with {} points, {} handles", uid, ring.len(), handles.len());

        ctx.interaction.end();
        self.session = Session::Idle;
        ctx.events.contour_completed(uid, hole);
        ctx.render_viewport();
        Ok(())
    }

    // ---- editing existing contours ----

    pub fn handle_selected(&mut self, ctx: &mut ToolContext<'_>, uid: AnnotationUid, grab: Grab) -> Result<()> {
        if !matches!(self.session, Session::Idle) {
            return Err(LivewireError::SessionBusy(self.session.name()));
        }
        let annotation = ctx.store.get_mut(uid).ok_or(LivewireError::UnknownAnnotation(uid))?;
        if let Grab::Handle(i) = grab {
            let count = annotation.data.handles.points.len();
            if i >= count {
                return Err(LivewireError::HandleOutOfRange { index: i, count });
            }
        }
        annotation.highlighted = true;
        let original = annotation.data.clone();
        let viewport_id = ctx.viewport.id().to_string();
        ctx.interaction.begin(&viewport_id, TOOL_NAME, Listeners { draw: false, modify: true });
        self.session = Session::HandleEditing(HandleSession {
            annotation: uid,
            viewport_id,
            grab,
            original,
            routing: None,
            has_moved: false,
            outside_image: false,
        });
        ctx.render_viewport();
        Ok(())
    }

    pub fn tool_selected(&mut self, ctx: &mut ToolContext<'_>, uid: AnnotationUid) -> Result<()> {
        self.handle_selected(ctx, uid, Grab::Annotation)
    }

    /// Move handle `index` of a closed contour to `world` and re-trace the two
    /// segments next to it.
    pub fn edit_handle(&mut self, ctx: &mut ToolContext<'_>, uid: AnnotationUid, index: usize, world: Point3) -> Result<()> {
        if let Session::Drawing(_) = self.session {
            return Err(LivewireError::SessionBusy(self.session.name()));
        }
        let existing = ctx.store.get(uid).ok_or(LivewireError::UnknownAnnotation(uid))?;
        if !existing.data.contour.closed {
            return Err(LivewireError::ContourNotClosed(uid));
        }
        let was_highlighted = existing.highlighted;
        if !matches!(self.session, Session::Idle) {
            return self.move_handle(ctx, uid, index, world);
        }
        self.handle_selected(ctx, uid, Grab::Handle(index))?;
        let moved = self.move_handle(ctx, uid, index, world);
        if moved.is_err() {
            // a session opened here does not outlive its first failure
            self.session = Session::Idle;
            ctx.interaction.end();
            if let Some(a) = ctx.store.get_mut(uid) {
                a.highlighted = was_highlighted;
            }
        }
        moved
    }

    fn move_handle(&mut self, ctx: &mut ToolContext<'_>, uid: AnnotationUid, index: usize, world: Point3) -> Result<()> {
        let weights = self.config.cost_weights;
        let s = match &mut self.session {
            Session::HandleEditing(s) if s.annotation == uid => s,
            other => return Err(LivewireError::SessionBusy(other.name())),
        };
        let annotation = ctx.store.get_mut(uid).ok_or(LivewireError::UnknownAnnotation(uid))?;
        match annotation.data.handles.active_handle_index {
            Some(active) if active != index => {
                return Err(LivewireError::HandleMismatch { requested: index, active });
            }
            _ => {}
        }
        if let Grab::Handle(g) = s.grab {
            if g != index {
                return Err(LivewireError::HandleMismatch { requested: index, active: g });
            }
        }
        if s.routing.is_none() {
            let image = checked_image(ctx.viewport)?;
            s.routing = Some(HandleRouting::build(&image, weights, &s.original, index)?);
        }
        annotation.data.handles.active_handle_index = Some(index);
        let Some(routing) = &s.routing else {
            return Ok(());
        };

        let pos = routing.transform.to_pixel(world);
        if !routing.contains(pos) {
            s.outside_image = true;
            return Ok(());
        }
        s.outside_image = false;
        let Some(path) = routing.route(pos) else {
            return Ok(());
        };
        let t = routing.transform;
        if let Some(h) = annotation.data.handles.points.get_mut(index) {
            *h = t.pixel_to_world(pos);
        }
        annotation.data.contour.polyline = ring_to_world(path.points(), &t, true);
        annotation.invalidated = true;
        s.has_moved = true;
        Ok(())
    }

    pub fn drag(&mut self, ctx: &mut ToolContext<'_>, points: PointerPoints, delta_world: Point3) -> Result<bool> {
        let (uid, grab) = match &self.session {
            Session::HandleEditing(s) => (s.annotation, s.grab),
            _ => return Ok(false),
        };
        match grab {
            Grab::TextBox => {
                let annotation = ctx.store.get_mut(uid).ok_or(LivewireError::UnknownAnnotation(uid))?;
                let text_box = &mut annotation.data.handles.text_box;
                let base = text_box.world_position.unwrap_or(points.world);
                text_box.world_position = Some(Point3::new(
                    base.x + delta_world.x,
                    base.y + delta_world.y,
                    base.z + delta_world.z,
                ));
                text_box.has_moved = true;
            }
            Grab::Annotation => {
                log::warn!("livewire: dragging a whole contour is not supported");
                return Ok(false);
            }
            Grab::Handle(i) => self.edit_handle(ctx, uid, i, points.world)?,
        }
        if let Session::HandleEditing(s) = &mut self.session {
            s.has_moved = true;
        }
        ctx.render_viewport();
        Ok(true)
    }

    /// Finish the active handle session (pointer up). With `clear` the
    /// annotation is removed instead of committed.
    pub fn end_interaction(&mut self, ctx: &mut ToolContext<'_>, clear: bool) -> Option<AnnotationUid> {
        let Session::HandleEditing(s) = std::mem::take(&mut self.session) else {
            return None;
        };
        ctx.interaction.end();
        let uid = s.annotation;
        if (s.outside_image && self.config.prevent_handle_outside_image) || clear {
            ctx.store.remove(uid);
            log::debug!("livewire: removed contour {}", uid);
            ctx.render_viewport();
            return Some(uid);
        }
        if let Some(annotation) = ctx.store.get_mut(uid) {
            annotation.data.handles.active_handle_index = None;
            if let (true, true, Some(routing)) = (s.has_moved, self.config.decimate.enabled, &s.routing) {
                let t = routing.transform;
                let ring = ring_pixels(&annotation.data.contour.polyline, &t);
                let handles: Vec<Pixel> = annotation.data.handles.points.iter().map(|p| t.to_pixel(*p)).collect();
                let ring = decimate_ring(&ring, &handles, self.config.decimate.epsilon);
                annotation.data.contour.polyline = ring_to_world(&ring, &t, true);
            }
        }
        ctx.render_viewport();
        if s.has_moved {
            ctx.events.annotation_modified(AnnotationEvent {
                annotation_uid: uid,
                viewport_id: s.viewport_id,
                change_type: ChangeType::HandlesUpdated,
            });
        }
        Some(uid)
    }

    /// Bound to Escape. Drops an unfinished contour or reverts an edit.
    pub fn cancel_in_progress(&mut self, ctx: &mut ToolContext<'_>) -> Option<AnnotationUid> {
        self.cancel(ctx)
    }

    // ---- picking ----

    /// Whether `canvas` lies within `proximity` of the contour outline.
    pub fn is_point_near_tool(viewport: &dyn Viewport, annotation: &ContourAnnotation, canvas: Vec2, proximity: f32) -> bool {
        let pts: Vec<Vec2> = annotation.data.contour.polyline.iter().map(|p| viewport.world_to_canvas(*p)).collect();
        polyline_within(&pts, true, canvas.x, canvas.y, proximity)
    }

    /// Handle or text box under `canvas`, if any.
    pub fn handle_near(viewport: &dyn Viewport, annotation: &ContourAnnotation, canvas: Vec2, proximity: f32) -> Option<Grab> {
        let handles: Vec<Vec2> = annotation.data.handles.points.iter().map(|p| viewport.world_to_canvas(*p)).collect();
        if let Some((i, _)) = nearest_point(&handles, canvas.x, canvas.y, proximity) {
            return Some(Grab::Handle(i));
        }
        let corners = annotation.data.handles.text_box.world_bounding_box?;
        let c: Vec<Vec2> = corners.iter().map(|p| viewport.world_to_canvas(*p)).collect();
        let (minx, miny, maxx, maxy) = crate::geometry::math::aabb(&c)?;
        (canvas.x >= minx && canvas.x <= maxx && canvas.y >= miny && canvas.y <= maxy).then_some(Grab::TextBox)
    }

    fn pick(&self, ctx: &ToolContext<'_>, canvas: Vec2) -> Option<(AnnotationUid, Grab)> {
        let proximity = self.config.handle_proximity;
        let ours: Vec<&ContourAnnotation> = ctx
            .store
            .uids()
            .into_iter()
            .filter_map(|uid| ctx.store.get(uid))
            .filter(|a| a.tool_name == TOOL_NAME && a.data.contour.closed)
            .collect();
        for a in &ours {
            if let Some(grab) = Self::handle_near(ctx.viewport, a, canvas, proximity) {
                return Some((a.uid, grab));
            }
        }
        ours.iter()
            .find(|a| Self::is_point_near_tool(ctx.viewport, a, canvas, proximity))
            .map(|a| (a.uid, Grab::Annotation))
    }

    // ---- statistics ----

    /// Recompute area stats for the viewport's target. Emits StatsUpdated if
    /// the annotation was invalidated.
    pub fn calculate_cached_stats(&mut self, ctx: &mut ToolContext<'_>, uid: AnnotationUid) -> Option<TargetStats> {
        if !self.config.calculate_stats {
            return None;
        }
        let target = ctx.viewport.target_id()?;
        let annotation = ctx.store.get_mut(uid)?;
        let stats = contour_stats(&annotation.data, ctx.viewport)?;
        annotation.data.cached_stats.insert(target, stats.clone());
        let invalidated = std::mem::replace(&mut annotation.invalidated, false);
        if invalidated {
            ctx.events.annotation_modified(AnnotationEvent {
                annotation_uid: uid,
                viewport_id: ctx.viewport.id().to_string(),
                change_type: ChangeType::StatsUpdated,
            });
        }
        Some(stats)
    }

    /// Release a throttled stats computation whose interval has elapsed.
    pub fn tick(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(uid) = self.stats_throttle.poll(ctx.now) {
            self.calculate_cached_stats(ctx, uid);
        }
    }

    fn render_stats(&mut self, ctx: &mut ToolContext<'_>, helper: &mut dyn DrawingHelper, uid: AnnotationUid) {
        let Some(target) = ctx.viewport.target_id() else {
            return;
        };
        if self.config.calculate_stats {
            let (missing, invalidated) = match ctx.store.get_mut(uid) {
                Some(a) => {
                    let missing = a.data.cached_stats.get(&target).map_or(true, |s| s.area_unit.is_none());
                    if missing {
                        a.data.cached_stats.insert(target.clone(), TargetStats::default());
                    }
                    (missing, a.invalidated)
                }
                None => return,
            };
            if missing {
                self.calculate_cached_stats(ctx, uid);
            } else if invalidated {
                self.stats_throttle.call(ctx.now, uid);
            }
        }

        let viewport = ctx.viewport;
        let Some(annotation) = ctx.store.get_mut(uid) else {
            return;
        };
        let lines = default_text_lines(&annotation.data, &target);
        if lines.is_empty() {
            return;
        }
        let canvas_handles: Vec<Vec2> = annotation.data.handles.points.iter().map(|p| viewport.world_to_canvas(*p)).collect();
        let text_box = &mut annotation.data.handles.text_box;
        if !text_box.has_moved || text_box.world_position.is_none() {
            if let Some(anchor) = text_box_anchor(&canvas_handles) {
                text_box.world_position = Some(viewport.canvas_to_world(anchor));
            }
        }
        let Some(world) = text_box.world_position else {
            return;
        };
        let rect = helper.draw_text_box(&uid.to_string(), &lines, viewport.world_to_canvas(world), &self.style);
        let [tl, tr, bl, br] = rect.corners();
        text_box.world_bounding_box = Some([
            viewport.canvas_to_world(tl),
            viewport.canvas_to_world(tr),
            viewport.canvas_to_world(bl),
            viewport.canvas_to_world(br),
        ]);
    }
}

/// Write the in-progress path of a drawing session as an open polyline.
fn publish_open_path(store: &mut dyn AnnotationStore, s: &DrawSession) {
    if let Some(a) = store.get_mut(s.annotation) {
        a.data.contour.polyline = ring_to_world(s.current.points(), &s.transform, false);
        a.data.contour.closed = false;
        a.invalidated = true;
    }
}

/// Simplify a clockwise ring between its handles. Leaves the ring alone when
/// the handles cannot be located in ring order.
fn decimate_ring(ring: &[Pixel], handles: &[Pixel], epsilon: f32) -> Vec<Pixel> {
    let idx: Vec<usize> = handles.iter().filter_map(|h| handle_ring_index(ring, *h)).collect();
    if idx.len() != handles.len() || idx.first() != Some(&0) || idx.windows(2).any(|w| w[0] >= w[1]) {
        log::warn!("livewire: handles out of ring order, skipping decimation");
        return ring.to_vec();
    }
    let pts: Vec<Vec2> = ring.iter().map(|p| p.to_vec2()).collect();
    let (out, _) = decimate_between_handles(&pts, &idx, epsilon);
    out.iter().map(|p| Pixel::from_slice(*p)).collect()
}

impl Tool for LivewireContourTool {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }

    fn handle_pointer_event(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> Result<bool> {
        match *event {
            PointerEvent::Down { points, modifiers, double_click } => match self.session {
                Session::Idle => {
                    match self.pick(ctx, points.canvas) {
                        Some((uid, Grab::Annotation)) => self.tool_selected(ctx, uid)?,
                        Some((uid, grab)) => self.handle_selected(ctx, uid, grab)?,
                        None if double_click => return Ok(false),
                        None => {
                            self.add_new_annotation(ctx, points, modifiers)?;
                        }
                    }
                    Ok(true)
                }
                Session::Drawing(_) => self.mouse_down(ctx, points, double_click),
                Session::HandleEditing(_) => Ok(false),
            },
            PointerEvent::Move { points } => Ok(self.mouse_move(ctx, points)),
            PointerEvent::Drag { points, delta_world } => self.drag(ctx, points, delta_world),
            PointerEvent::Up { .. } => Ok(self.end_interaction(ctx, false).is_some()),
        }
    }

    fn render(&mut self, ctx: &mut ToolContext<'_>, helper: &mut dyn DrawingHelper) -> bool {
        self.tick(ctx);
        let drawing = match &self.session {
            Session::Drawing(s) => Some(s.annotation),
            _ => None,
        };
        let uids: Vec<AnnotationUid> = ctx
            .store
            .uids()
            .into_iter()
            .filter(|uid| ctx.store.get(*uid).map_or(false, |a| a.tool_name == TOOL_NAME))
            .collect();
        let mut drawn = false;
        for uid in uids {
            let Some(a) = ctx.store.get(uid) else {
                continue;
            };
            let key = uid.to_string();
            let line: Vec<Vec2> = a.data.contour.polyline.iter().map(|p| ctx.viewport.world_to_canvas(*p)).collect();
            let closed = a.data.contour.closed;
            helper.draw_polyline(&key, &line, closed, &self.style);
            if a.highlighted || drawing == Some(uid) {
                let handles: Vec<Vec2> = a.data.handles.points.iter().map(|p| ctx.viewport.world_to_canvas(*p)).collect();
                helper.draw_handles(&key, &handles, &self.style, a.data.handles.active_handle_index);
            }
            if closed {
                self.render_stats(ctx, helper, uid);
            }
            drawn = true;
        }
        drawn
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> Option<AnnotationUid> {
        let uid = match std::mem::take(&mut self.session) {
            Session::Idle => return None,
            Session::Drawing(s) => {
                ctx.store.remove(s.annotation);
                s.annotation
            }
            Session::HandleEditing(s) => {
                if let Some(a) = ctx.store.get_mut(s.annotation) {
                    a.data = s.original;
                    a.data.handles.active_handle_index = None;
                    a.invalidated = true;
                }
                s.annotation
            }
        };
        ctx.interaction.end();
        log::debug!("livewire: cancelled session on contour {}", uid);
        ctx.render_viewport();
        Some(uid)
    }

    fn handle_key(&mut self, ctx: &mut ToolContext<'_>, key: &str) -> Option<AnnotationUid> {
        dispatch_key(self, KEY_BINDINGS, ctx, key)
    }
}
