use super::{edge_midpoints, rotated_corners, Point, PointF, Rect, ShapeOps, ShapeStyle};
use crate::geometry::polygon_contains;
use crate::render::{draw_selection, Surface};

/// Axis-aligned rectangle with a rotation applied at draw and hit-test time.
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    pub(crate) style: ShapeStyle,
    rect: Rect,
    anchor: Point,
}

impl RectangleShape {
    pub fn new(rect: Rect, style: ShapeStyle) -> Self {
        Self {
            style,
            rect,
            anchor: rect.top_left(),
        }
    }

    /// `first` stays fixed while later `update` calls drag the opposite corner.
    pub fn from_corners(first: Point, second: Point, style: ShapeStyle) -> Self {
        Self {
            style,
            rect: Rect::from_corners(first, second),
            anchor: first,
        }
    }

    pub const fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) -> bool {
        if self.rect == rect {
            return false;
        }
        self.rect = rect;
        self.anchor = rect.top_left();
        true
    }

    pub const fn width(&self) -> i32 {
        self.rect.width
    }

    pub const fn height(&self) -> i32 {
        self.rect.height
    }

    pub fn set_width(&mut self, width: i32) -> bool {
        let width = width.max(0);
        if self.rect.width == width {
            return false;
        }
        self.rect.width = width;
        true
    }

    pub fn set_height(&mut self, height: i32) -> bool {
        let height = height.max(0);
        if self.rect.height == height {
            return false;
        }
        self.rect.height = height;
        true
    }

    pub fn rotation_center(&self) -> PointF {
        self.rect.center()
    }

    pub fn rotated_polygon(&self) -> [PointF; 4] {
        rotated_corners(self.rect, self.style.rotation_angle())
    }
}

impl ShapeOps for RectangleShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_rect(
            self.rect,
            self.style.rotation_angle(),
            &self.style.pen(),
            self.style.fill(),
        );
        if self.style.is_selected() {
            draw_selection(
                surface,
                self.selection_outline(),
                &self.handles(),
                self.rotation_handle(),
            );
        }
    }

    fn update(&mut self, to: Point) -> bool {
        let rect = Rect::from_corners(self.anchor, to);
        if self.rect == rect {
            return false;
        }
        self.rect = rect;
        true
    }

    fn body_contains(&self, point: Point) -> bool {
        if self.style.is_rotated() {
            polygon_contains(&self.rotated_polygon(), point.to_f())
        } else {
            self.rect.contains(point)
        }
    }

    fn move_by(&mut self, offset: Point) {
        self.rect = self.rect.translated(offset);
        self.anchor = self.anchor + offset;
    }

    fn rotate(&mut self, degrees: f64) {
        self.style.set_rotation_angle(degrees);
    }

    fn scale(&mut self, factor: f64) {
        self.rect = self.rect.scaled_about_center(factor);
        self.anchor = self.rect.top_left();
    }

    fn bounding_rect(&self) -> Rect {
        if self.style.is_rotated() {
            Rect::from_points_f(&self.rotated_polygon()).unwrap_or(self.rect)
        } else {
            self.rect
        }
    }

    fn position(&self) -> Point {
        self.rect.top_left()
    }

    fn handles(&self) -> Vec<PointF> {
        edge_midpoints(&self.rotated_polygon())
    }

    fn rotation_handle(&self) -> Option<PointF> {
        self.style.is_rotated().then(|| self.rotation_center())
    }
}
