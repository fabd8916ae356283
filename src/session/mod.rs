//! Pointer-driven editing session over a [`Document`].
//!
//! The session owns the shape under construction until it is committed, the
//! current tool and style, and an outbox of [`Notification`]s for the UI shell.

mod event;
mod state;

use std::path::Path;

pub use event::{PointerButton, PointerEvent, ViewportSize};
pub use state::{DrawEvent, DrawingStateMachine, SessionError, SessionResult, SessionState};

use crate::config::{clamp_tool_pen_width, EditorConfig};
use crate::document::Document;
use crate::geometry::{Color, Point};
use crate::notification::{ContextAction, Notification, NotificationOutbox};
use crate::render::Surface;
use crate::shapes::{RegularPolygonShape, Shape, ShapeKind, ShapeStyle, MAX_SIDES, MIN_SIDES};
use crate::storage::{self, LoadReport, StorageResult};

#[derive(Debug)]
pub struct CanvasSession {
    document: Document,
    machine: DrawingStateMachine,
    in_progress: Option<Shape>,
    active_tool: ShapeKind,
    pen_color: Color,
    pen_width: u32,
    fill_color: Color,
    regular_polygon_sides: u32,
    viewport: Option<ViewportSize>,
    needs_redraw: bool,
    reported_modified: bool,
    outbox: NotificationOutbox,
}

impl CanvasSession {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            document: Document::new(),
            machine: DrawingStateMachine::new(),
            in_progress: None,
            active_tool: ShapeKind::Line,
            pen_color: config.pen_color(),
            pen_width: config.pen_width(),
            fill_color: config.fill_color(),
            regular_polygon_sides: config.regular_polygon_sides(),
            viewport: None,
            needs_redraw: false,
            reported_modified: false,
            outbox: NotificationOutbox::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn state(&self) -> SessionState {
        self.machine.state()
    }

    pub fn in_progress(&self) -> Option<&Shape> {
        self.in_progress.as_ref()
    }

    pub fn active_tool(&self) -> ShapeKind {
        self.active_tool
    }

    pub fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn regular_polygon_sides(&self) -> u32 {
        self.regular_polygon_sides
    }

    /// Switching away from an open polygon finalizes it first.
    pub fn set_active_tool(&mut self, tool: ShapeKind) {
        if self.active_tool == tool {
            return;
        }
        if self.state() == SessionState::DrawingPolygonOpen {
            self.finish_polygon();
        }
        tracing::debug!(from = %self.active_tool, to = %tool, "select tool");
        self.active_tool = tool;
    }

    /// Also restyles the selected committed shape. The shape being drawn keeps
    /// the style it was created with.
    pub fn set_pen_color(&mut self, color: Color) {
        self.pen_color = color;
        self.restyle_selected(|style| style.set_pen_color(color));
    }

    /// Clamped to the tool range `1..=20`.
    pub fn set_pen_width(&mut self, width: u32) {
        let width = clamp_tool_pen_width(width);
        self.pen_width = width;
        self.restyle_selected(|style| style.set_pen_width(width));
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
        self.restyle_selected(|style| style.set_fill_color(color));
    }

    pub fn set_regular_polygon_sides(&mut self, sides: u32) {
        self.regular_polygon_sides = sides.clamp(MIN_SIDES, MAX_SIDES);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed {
                position,
                button: PointerButton::Primary,
            } => self.on_primary_pressed(position),
            PointerEvent::Pressed {
                position,
                button: PointerButton::Secondary,
            } => self.on_secondary_pressed(position),
            PointerEvent::Moved {
                position,
                primary_held: true,
            } => self.on_primary_dragged(position),
            PointerEvent::Released {
                button: PointerButton::Primary,
                ..
            } => self.on_primary_released(),
            _ => {}
        }
    }

    fn on_primary_pressed(&mut self, position: Point) {
        match self.state() {
            SessionState::Idle => self.begin_shape(position),
            SessionState::DrawingPolygonOpen => {
                if let Some(polygon) = self.in_progress.as_mut().and_then(Shape::as_polygon_mut) {
                    polygon.add_point(position);
                    self.advance(DrawEvent::AddVertex);
                    self.request_redraw();
                }
            }
            state => {
                tracing::debug!(?state, ?position, "ignoring primary press mid-gesture");
            }
        }
    }

    fn begin_shape(&mut self, position: Point) {
        let style = self.new_shape_style();
        let tool = self.active_tool;
        let (shape, event) = match tool {
            ShapeKind::Freehand => {
                let mut shape = Shape::create(tool, position, style);
                if let Some(freehand) = shape.as_freehand_mut() {
                    freehand.add_point(position);
                }
                (shape, DrawEvent::BeginFreehand)
            }
            ShapeKind::Polygon => {
                let mut shape = Shape::create(tool, position, style);
                if let Some(polygon) = shape.as_polygon_mut() {
                    polygon.add_point(position);
                }
                (shape, DrawEvent::BeginPolygon)
            }
            ShapeKind::RegularPolygon => (
                Shape::RegularPolygon(RegularPolygonShape::new(
                    position,
                    0,
                    self.regular_polygon_sides,
                    style,
                )),
                DrawEvent::BeginDrag,
            ),
            _ => (Shape::create(tool, position, style), DrawEvent::BeginDrag),
        };
        if self.advance(event) {
            tracing::debug!(%tool, ?position, "begin shape");
            self.in_progress = Some(shape);
            self.request_redraw();
        }
    }

    fn on_primary_dragged(&mut self, position: Point) {
        if !self.state().is_drawing() {
            return;
        }
        if let Some(shape) = self.in_progress.as_mut() {
            if shape.update(position) {
                self.request_redraw();
            }
        }
    }

    fn on_primary_released(&mut self) {
        if matches!(&self.in_progress, Some(Shape::Freehand(freehand)) if !freehand.has_extent())
        {
            tracing::debug!("discarding freehand stroke without extent");
            self.cancel_drawing();
            return;
        }
        if matches!(
            self.state(),
            SessionState::DrawingFreehand | SessionState::DrawingSingleDragShape
        ) && self.advance(DrawEvent::Commit)
        {
            self.commit_in_progress();
        }
    }

    fn on_secondary_pressed(&mut self, position: Point) {
        let hit = self.document.select_at(position);
        self.request_redraw();
        let Some(index) = hit else {
            return;
        };
        let Some(shape) = self.document.get(index) else {
            return;
        };
        let description = format!("{} selected", shape.name());
        tracing::debug!(index, ?position, "shape selected");
        self.outbox.push(Notification::SelectionChanged(description));
        self.outbox.push(Notification::ContextMenuRequested {
            at: position,
            actions: ContextAction::ALL.to_vec(),
        });
    }

    /// Finalizes the open polygon: closed when it has three or more vertices,
    /// committed when it has at least two, discarded otherwise.
    ///
    /// Returns whether a shape was committed.
    pub fn finish_polygon(&mut self) -> bool {
        if self.state() != SessionState::DrawingPolygonOpen || !self.advance(DrawEvent::FinishPolygon)
        {
            return false;
        }
        let Some(mut shape) = self.in_progress.take() else {
            return false;
        };
        self.request_redraw();
        let Some(polygon) = shape.as_polygon_mut() else {
            return false;
        };
        polygon.close();
        if polygon.point_count() < 2 {
            tracing::debug!(points = polygon.point_count(), "discarding degenerate polygon");
            return false;
        }
        self.in_progress = Some(shape);
        self.commit_in_progress();
        true
    }

    /// Drops the shape under construction without committing it.
    pub fn cancel_drawing(&mut self) -> bool {
        if !self.state().is_drawing() || !self.advance(DrawEvent::Cancel) {
            return false;
        }
        self.in_progress = None;
        self.request_redraw();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(shape) = self.document.delete_selected() else {
            return false;
        };
        tracing::debug!(shape = shape.name(), "deleted selected shape");
        self.after_structural_change();
        true
    }

    pub fn bring_selected_to_front(&mut self) -> bool {
        let moved = self.document.bring_selected_to_front();
        if moved {
            self.after_structural_change();
        }
        moved
    }

    pub fn send_selected_to_back(&mut self) -> bool {
        let moved = self.document.send_selected_to_back();
        if moved {
            self.after_structural_change();
        }
        moved
    }

    /// Flags the selected shape as animating and asks the shell to play it.
    pub fn animate_selected(&mut self) -> bool {
        let Some(shape) = self.document.selected_mut() else {
            return false;
        };
        shape.style_mut().set_animating(true);
        let name = shape.name().to_string();
        self.outbox.push(Notification::AnimationRequested(name));
        self.request_redraw();
        true
    }

    pub fn apply_context_action(&mut self, action: ContextAction) -> bool {
        tracing::debug!(%action, "apply context action");
        match action {
            ContextAction::Delete => self.delete_selected(),
            ContextAction::Animate => self.animate_selected(),
            ContextAction::BringToFront => self.bring_selected_to_front(),
            ContextAction::SendToBack => self.send_selected_to_back(),
        }
    }

    /// Empties the canvas, discarding any shape under construction.
    pub fn clear(&mut self) {
        self.in_progress = None;
        self.machine.reset();
        self.document.clear();
        self.publish_modified();
        self.request_redraw();
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> StorageResult<()> {
        storage::save_document(path, self.document.shapes())?;
        self.document.set_modified(false);
        self.publish_modified();
        Ok(())
    }

    /// Replaces the document only after the whole file has been read and parsed.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StorageResult<LoadReport> {
        let (shapes, report) = storage::load_document(path)?;
        self.in_progress = None;
        self.machine.reset();
        self.document.replace_shapes(shapes);
        self.publish_modified();
        self.request_redraw();
        Ok(report)
    }

    pub fn save_to_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.save(path) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to save document");
                false
            }
        }
    }

    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.load(path) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to load document");
                false
            }
        }
    }

    /// The first size only records the viewport; later sizes rescale every
    /// shape by the smaller axis ratio. Zero-area sizes are ignored.
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        let next = ViewportSize::new(width, height);
        if next.is_empty() {
            tracing::debug!(?next, "ignoring empty viewport");
            return;
        }
        let previous = self.viewport.replace(next);
        let Some(factor) = previous
            .filter(|previous| *previous != next)
            .and_then(|previous| previous.fit_factor(next))
        else {
            return;
        };
        tracing::debug!(?previous, ?next, factor, "rescale shapes for viewport");
        self.document.scale_all(factor);
        self.request_redraw();
    }

    /// Simplifies every committed freehand path. Returns how many changed.
    pub fn simplify_freehand(&mut self, tolerance: f64) -> usize {
        let mut changed = 0;
        self.document.for_each_mut(|shape| {
            if let Some(freehand) = shape.as_freehand_mut() {
                if freehand.simplify(tolerance) {
                    changed += 1;
                }
            }
        });
        if changed > 0 {
            self.document.set_modified(true);
            self.publish_modified();
            self.request_redraw();
        }
        changed
    }

    /// Document shapes in z-order, then the shape under construction.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.document.draw(surface);
        if let Some(shape) = &self.in_progress {
            shape.draw(surface);
        }
    }

    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.outbox.drain()
    }

    fn new_shape_style(&self) -> ShapeStyle {
        ShapeStyle::new(self.pen_color, self.pen_width, self.fill_color)
    }

    fn advance(&mut self, event: DrawEvent) -> bool {
        self.machine.transition(event).is_ok()
    }

    fn commit_in_progress(&mut self) {
        let Some(shape) = self.in_progress.take() else {
            return;
        };
        tracing::debug!(shape = shape.name(), count = self.document.len() + 1, "commit shape");
        self.document.add(shape);
        self.after_structural_change();
    }

    fn restyle_selected(&mut self, apply: impl FnOnce(&mut ShapeStyle) -> bool) {
        let Some(shape) = self.document.selected_mut() else {
            return;
        };
        if apply(shape.style_mut()) {
            self.document.set_modified(true);
            self.publish_modified();
            self.request_redraw();
        }
    }

    fn after_structural_change(&mut self) {
        self.publish_modified();
        self.request_redraw();
    }

    fn publish_modified(&mut self) {
        let modified = self.document.is_modified();
        if modified != self.reported_modified {
            self.reported_modified = modified;
            self.outbox.push(Notification::ModifiedChanged(modified));
        }
    }

    fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::render::DisplayList;

    fn session() -> CanvasSession {
        CanvasSession::default()
    }

    fn drag(session: &mut CanvasSession, from: (i32, i32), to: (i32, i32)) {
        session.handle_pointer(PointerEvent::press(from.0, from.1, PointerButton::Primary));
        session.handle_pointer(PointerEvent::drag(to.0, to.1));
        session.handle_pointer(PointerEvent::release(to.0, to.1, PointerButton::Primary));
    }

    fn click(session: &mut CanvasSession, x: i32, y: i32, button: PointerButton) {
        session.handle_pointer(PointerEvent::press(x, y, button));
        session.handle_pointer(PointerEvent::release(x, y, button));
    }

    #[test]
    fn rectangle_survives_save_clear_and_load() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("scenario.json");
        let mut session = session();
        session.set_active_tool(ShapeKind::Rectangle);
        drag(&mut session, (10, 10), (110, 60));

        assert_eq!(session.document().len(), 1);
        assert!(session.save_to_path(&path));
        assert!(!session.document().is_modified());

        session.clear();
        assert_eq!(session.document().len(), 0);
        assert!(!session.document().is_modified());

        assert!(session.load_from_path(&path));
        let shapes = session.document().shapes();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].kind(), ShapeKind::Rectangle);
        assert_eq!(shapes[0].bounding_rect(), Rect::new(10, 10, 100, 50));
    }

    #[test]
    fn single_drag_commits_on_release_with_session_style() {
        let mut session = session();
        session.set_pen_color(Color::RED);
        session.set_pen_width(4);
        session.set_active_tool(ShapeKind::Ellipse);

        session.handle_pointer(PointerEvent::press(0, 0, PointerButton::Primary));
        assert_eq!(session.state(), SessionState::DrawingSingleDragShape);
        session.handle_pointer(PointerEvent::drag(40, 20));
        assert!(session.document().is_empty());
        assert!(session.in_progress().is_some());

        session.handle_pointer(PointerEvent::release(40, 20, PointerButton::Primary));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.in_progress().is_none());
        let shape = &session.document().shapes()[0];
        assert_eq!(shape.bounding_rect(), Rect::new(0, 0, 40, 20));
        assert_eq!(shape.style().pen_color(), Color::RED);
        assert_eq!(shape.style().pen_width(), 4);
    }

    #[test]
    fn freehand_collects_every_dragged_point() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Freehand);
        session.handle_pointer(PointerEvent::press(0, 0, PointerButton::Primary));
        assert_eq!(session.state(), SessionState::DrawingFreehand);
        for x in 1..=4 {
            session.handle_pointer(PointerEvent::drag(x * 10, 0));
        }
        session.handle_pointer(PointerEvent::release(40, 0, PointerButton::Primary));

        let Shape::Freehand(freehand) = &session.document().shapes()[0] else {
            panic!("expected a freehand shape");
        };
        assert_eq!(freehand.points().len(), 5);
    }

    #[test]
    fn freehand_click_without_drag_is_not_committed() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Freehand);
        click(&mut session, 20, 20, PointerButton::Primary);
        drag(&mut session, (30, 30), (30, 30));

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.in_progress().is_none());
        assert!(session.document().is_empty());
        assert!(!session.document().is_modified());
    }

    #[test]
    fn polygon_stays_open_across_releases_until_finished() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Polygon);
        click(&mut session, 0, 0, PointerButton::Primary);
        click(&mut session, 100, 0, PointerButton::Primary);
        click(&mut session, 0, 100, PointerButton::Primary);
        assert_eq!(session.state(), SessionState::DrawingPolygonOpen);
        assert!(session.document().is_empty());

        assert!(session.finish_polygon());
        assert_eq!(session.state(), SessionState::Idle);
        let Shape::Polygon(polygon) = &session.document().shapes()[0] else {
            panic!("expected a polygon");
        };
        assert!(polygon.is_closed());
        assert_eq!(polygon.point_count(), 3);
    }

    #[test]
    fn finishing_short_polygons_commits_open_or_discards() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Polygon);
        click(&mut session, 0, 0, PointerButton::Primary);
        assert!(!session.finish_polygon());
        assert!(session.document().is_empty());
        assert_eq!(session.state(), SessionState::Idle);

        click(&mut session, 0, 0, PointerButton::Primary);
        click(&mut session, 10, 0, PointerButton::Primary);
        session.set_active_tool(ShapeKind::Line);
        let Shape::Polygon(polygon) = &session.document().shapes()[0] else {
            panic!("expected a polygon");
        };
        assert!(!polygon.is_closed());
        assert_eq!(polygon.point_count(), 2);
    }

    #[test]
    fn cancel_drawing_discards_the_shape_in_progress() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Polygon);
        click(&mut session, 0, 0, PointerButton::Primary);
        assert!(session.cancel_drawing());
        assert!(session.in_progress().is_none());
        assert!(session.document().is_empty());
        assert!(!session.cancel_drawing());
    }

    #[test]
    fn secondary_click_selects_topmost_and_requests_context_menu() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Rectangle);
        drag(&mut session, (0, 0), (50, 50));
        drag(&mut session, (20, 20), (80, 80));
        session.drain_notifications();

        click(&mut session, 30, 30, PointerButton::Secondary);
        assert_eq!(session.document().selected_index(), Some(1));
        assert_eq!(
            session.drain_notifications(),
            vec![
                Notification::SelectionChanged("Rectangle selected".to_string()),
                Notification::ContextMenuRequested {
                    at: Point::new(30, 30),
                    actions: ContextAction::ALL.to_vec(),
                },
            ]
        );

        click(&mut session, 500, 500, PointerButton::Secondary);
        assert_eq!(session.document().selected_index(), None);
        assert!(session.drain_notifications().is_empty());
    }

    #[test]
    fn context_actions_reorder_and_delete_the_selection() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Rectangle);
        drag(&mut session, (0, 0), (50, 50));
        drag(&mut session, (100, 100), (150, 150));

        click(&mut session, 10, 10, PointerButton::Secondary);
        assert!(session.apply_context_action(ContextAction::BringToFront));
        assert_eq!(session.document().selected_index(), Some(1));
        assert!(session.apply_context_action(ContextAction::SendToBack));
        assert_eq!(session.document().selected_index(), Some(0));
        assert!(session.apply_context_action(ContextAction::Animate));
        assert!(session.document().shapes()[0].style().is_animating());
        assert!(session.apply_context_action(ContextAction::Delete));
        assert_eq!(session.document().len(), 1);
        assert!(!session.apply_context_action(ContextAction::Delete));
    }

    #[test]
    fn style_setters_restyle_only_the_selected_shape() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Line);
        drag(&mut session, (0, 0), (100, 0));
        drag(&mut session, (0, 50), (100, 50));
        click(&mut session, 50, 0, PointerButton::Secondary);

        session.set_pen_width(50);
        session.set_fill_color(Color::WHITE);
        assert_eq!(session.pen_width(), 20);
        let shapes = session.document().shapes();
        assert_eq!(shapes[0].style().pen_width(), 20);
        assert_eq!(shapes[0].style().fill_color(), Color::WHITE);
        assert_eq!(shapes[1].style().pen_width(), 1);

        session.set_pen_width(0);
        assert_eq!(session.pen_width(), 1);
    }

    #[test]
    fn modified_notifications_fire_on_transitions_only() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let mut session = session();
        session.set_active_tool(ShapeKind::Line);
        drag(&mut session, (0, 0), (10, 0));
        drag(&mut session, (0, 5), (10, 5));
        assert!(session.save_to_path(dir.path().join("lines.json")));
        session.clear();

        assert_eq!(
            session.drain_notifications(),
            vec![
                Notification::ModifiedChanged(true),
                Notification::ModifiedChanged(false),
            ]
        );
    }

    #[test]
    fn failed_load_leaves_the_document_untouched() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("object.json");
        std::fs::write(&path, r#"{"type": "line"}"#).expect("fixture should be written");

        let mut session = session();
        session.set_active_tool(ShapeKind::Line);
        drag(&mut session, (0, 0), (10, 0));

        assert!(!session.load_from_path(&path));
        assert!(!session.load_from_path(dir.path().join("missing.json")));
        assert_eq!(session.document().len(), 1);
        assert!(session.document().is_modified());
    }

    #[test]
    fn viewport_resize_rescales_after_the_first_size() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Rectangle);
        drag(&mut session, (0, 0), (100, 50));

        session.resize_viewport(800, 600);
        assert_eq!(
            session.document().shapes()[0].bounding_rect(),
            Rect::new(0, 0, 100, 50)
        );

        session.resize_viewport(1600, 900);
        assert_eq!(
            session.document().shapes()[0].bounding_rect(),
            Rect::new(-25, -13, 150, 75)
        );
    }

    #[test]
    fn collapsed_viewport_leaves_shapes_intact() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Rectangle);
        drag(&mut session, (10, 10), (110, 60));

        session.resize_viewport(800, 600);
        session.resize_viewport(0, 600);
        session.resize_viewport(800, 600);
        assert_eq!(
            session.document().shapes()[0].bounding_rect(),
            Rect::new(10, 10, 100, 50)
        );
    }

    #[test]
    fn regular_polygon_tool_uses_configured_side_count() {
        let mut session = CanvasSession::new(&EditorConfig {
            regular_polygon_sides: 7,
            ..EditorConfig::default()
        });
        session.set_active_tool(ShapeKind::RegularPolygon);
        drag(&mut session, (50, 50), (50, 80));

        let Shape::RegularPolygon(regular) = &session.document().shapes()[0] else {
            panic!("expected a regular polygon");
        };
        assert_eq!(regular.sides(), 7);
        assert_eq!(regular.radius(), 30);
    }

    #[test]
    fn draw_renders_document_then_shape_in_progress() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Line);
        drag(&mut session, (0, 0), (10, 0));
        assert!(session.take_redraw());
        assert!(!session.take_redraw());

        session.handle_pointer(PointerEvent::press(0, 5, PointerButton::Primary));
        session.handle_pointer(PointerEvent::drag(10, 5));
        let mut list = DisplayList::new();
        session.draw(&mut list);
        assert_eq!(list.commands().len(), 2);
        assert!(session.take_redraw());
    }

    #[test]
    fn simplify_freehand_marks_the_document_modified() {
        let mut session = session();
        session.set_active_tool(ShapeKind::Freehand);
        session.handle_pointer(PointerEvent::press(0, 0, PointerButton::Primary));
        session.handle_pointer(PointerEvent::drag(5, 0));
        session.handle_pointer(PointerEvent::drag(10, 0));
        session.handle_pointer(PointerEvent::release(10, 0, PointerButton::Primary));
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert!(session.save_to_path(dir.path().join("path.json")));
        assert!(!session.document().is_modified());

        assert_eq!(session.simplify_freehand(1.0), 1);
        assert!(session.document().is_modified());
        assert_eq!(session.simplify_freehand(1.0), 0);
    }
}
