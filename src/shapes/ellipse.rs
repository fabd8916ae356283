use std::f64::consts::TAU;

use super::{edge_midpoints, rotated_corners, Point, PointF, Rect, ShapeOps, ShapeStyle};
use crate::geometry::{polygon_contains, rotate_point};
use crate::render::{draw_selection, Surface};

/// Fixed precision used when a rotated ellipse is approximated by a polygon.
pub const ELLIPSE_TESSELLATION_POINTS: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct EllipseShape {
    pub(crate) style: ShapeStyle,
    rect: Rect,
    anchor: Point,
}

impl EllipseShape {
    pub fn new(rect: Rect, style: ShapeStyle) -> Self {
        Self {
            style,
            rect,
            anchor: rect.top_left(),
        }
    }

    pub fn from_corners(first: Point, second: Point, style: ShapeStyle) -> Self {
        Self {
            style,
            rect: Rect::from_corners(first, second),
            anchor: first,
        }
    }

    pub fn from_center(center: Point, radius_x: i32, radius_y: i32, style: ShapeStyle) -> Self {
        let (radius_x, radius_y) = (radius_x.max(0), radius_y.max(0));
        Self::new(
            Rect::new(
                center.x.saturating_sub(radius_x),
                center.y.saturating_sub(radius_y),
                radius_x.saturating_mul(2),
                radius_y.saturating_mul(2),
            ),
            style,
        )
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

    pub fn center(&self) -> PointF {
        self.rect.center()
    }

    pub const fn radius_x(&self) -> i32 {
        self.rect.width / 2
    }

    pub const fn radius_y(&self) -> i32 {
        self.rect.height / 2
    }

    pub fn set_radius_x(&mut self, radius: i32) -> bool {
        let width = radius.max(0).saturating_mul(2);
        if self.rect.width == width {
            return false;
        }
        self.rect.width = width;
        true
    }

    pub fn set_radius_y(&mut self, radius: i32) -> bool {
        let height = radius.max(0).saturating_mul(2);
        if self.rect.height == height {
            return false;
        }
        self.rect.height = height;
        true
    }

    /// Boundary tessellated into [`ELLIPSE_TESSELLATION_POINTS`] vertices, radii
    /// multiplied by `radius_factor`, then rotated about the center.
    pub fn outline_polygon(&self, radius_factor: f64) -> Vec<PointF> {
        let center = self.center();
        let radius_x = f64::from(self.rect.width) / 2.0 * radius_factor;
        let radius_y = f64::from(self.rect.height) / 2.0 * radius_factor;
        let angle = self.style.rotation_angle();
        (0..ELLIPSE_TESSELLATION_POINTS)
            .map(|index| {
                let theta = TAU * index as f64 / ELLIPSE_TESSELLATION_POINTS as f64;
                let point = PointF::new(
                    center.x + radius_x * theta.cos(),
                    center.y + radius_y * theta.sin(),
                );
                rotate_point(point, center, angle)
            })
            .collect()
    }

    /// Relative half-thickness of the stroke band, `w / (2 * min(rx, ry))`.
    /// `None` for a degenerate ellipse.
    fn stroke_band(&self) -> Option<f64> {
        let radius_x = f64::from(self.rect.width) / 2.0;
        let radius_y = f64::from(self.rect.height) / 2.0;
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return None;
        }
        Some(self.style.pen_width_f() / (2.0 * radius_x.min(radius_y)))
    }

    fn is_point_on_ellipse(&self, point: Point) -> bool {
        let Some(band) = self.stroke_band() else {
            return false;
        };
        let center = self.center();
        let radius_x = f64::from(self.rect.width) / 2.0;
        let radius_y = f64::from(self.rect.height) / 2.0;
        let dx = f64::from(point.x) - center.x;
        let dy = f64::from(point.y) - center.y;
        let distance = (dx / radius_x).powi(2) + (dy / radius_y).powi(2);
        distance >= (1.0 - band).powi(2) && distance <= (1.0 + band).powi(2)
    }

    fn is_point_on_rotated_ellipse(&self, point: Point) -> bool {
        let Some(band) = self.stroke_band() else {
            return false;
        };
        let query = point.to_f();
        if !polygon_contains(&self.outline_polygon(1.0 + band), query) {
            return false;
        }
        let inner = 1.0 - band;
        inner <= 0.0 || !polygon_contains(&self.outline_polygon(inner), query)
    }
}

impl ShapeOps for EllipseShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_ellipse(
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
            self.is_point_on_rotated_ellipse(point)
        } else {
            self.is_point_on_ellipse(point)
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
            Rect::from_points_f(&self.outline_polygon(1.0)).unwrap_or(self.rect)
        } else {
            self.rect
        }
    }

    fn position(&self) -> Point {
        self.rect.top_left()
    }

    fn handles(&self) -> Vec<PointF> {
        edge_midpoints(&rotated_corners(self.rect, self.style.rotation_angle()))
    }

    fn rotation_handle(&self) -> Option<PointF> {
        self.style.is_rotated().then(|| self.center())
    }
}
