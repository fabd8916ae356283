use std::f64::consts::TAU;

use super::{Point, PointF, Rect, ShapeOps, ShapeStyle};
use crate::geometry::{handle_contains, polygon_contains, round_to_i32};
use crate::render::{draw_selection, Surface};

pub const DEFAULT_SIDES: u32 = 5;
pub const MIN_SIDES: u32 = 3;
/// Upper bound on the side count; vertices are regenerated on every query.
pub const MAX_SIDES: u32 = 1024;
pub const MIN_RADIUS: i32 = 1;

/// Regular n-gon described by center, circumradius and side count.
///
/// Vertices are derived from these fields and the rotation angle on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularPolygonShape {
    pub(crate) style: ShapeStyle,
    center: Point,
    radius: i32,
    sides: u32,
}

impl RegularPolygonShape {
    /// Stores the values as given apart from capping `sides` at [`MAX_SIDES`].
    /// The interactive tool seeds a zero radius and grows it through `update`;
    /// use the setters for fully clamped assignment.
    pub fn new(center: Point, radius: i32, sides: u32, style: ShapeStyle) -> Self {
        Self {
            style,
            center,
            radius,
            sides: sides.min(MAX_SIDES),
        }
    }

    pub const fn center(&self) -> Point {
        self.center
    }

    pub const fn radius(&self) -> i32 {
        self.radius
    }

    pub const fn sides(&self) -> u32 {
        self.sides
    }

    pub fn set_center(&mut self, center: Point) -> bool {
        if self.center == center {
            return false;
        }
        self.center = center;
        true
    }

    pub fn set_radius(&mut self, radius: i32) -> bool {
        let radius = radius.max(MIN_RADIUS);
        if self.radius == radius {
            return false;
        }
        self.radius = radius;
        true
    }

    pub fn set_sides(&mut self, sides: u32) -> bool {
        let sides = sides.clamp(MIN_SIDES, MAX_SIDES);
        if self.sides == sides {
            return false;
        }
        self.sides = sides;
        true
    }

    fn is_drawable(&self) -> bool {
        self.sides >= MIN_SIDES && self.radius > 0
    }

    pub fn vertices(&self) -> Vec<PointF> {
        if self.sides == 0 {
            return Vec::new();
        }
        let center = self.center.to_f();
        let radius = f64::from(self.radius);
        let start = self.style.rotation_angle().to_radians();
        let step = TAU / f64::from(self.sides);
        (0..self.sides)
            .map(|index| {
                let theta = start + f64::from(index) * step;
                PointF::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
            })
            .collect()
    }
}

impl ShapeOps for RegularPolygonShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_drawable() {
            return;
        }
        let vertices = self.vertices();
        surface.draw_polygon(&vertices, &self.style.pen(), self.style.fill());
        if self.style.is_selected() {
            draw_selection(
                surface,
                self.selection_outline(),
                &vertices,
                self.rotation_handle(),
            );
        }
    }

    fn update(&mut self, to: Point) -> bool {
        let distance = self.center.to_f().distance_to(to.to_f());
        let radius = round_to_i32(distance).max(MIN_RADIUS);
        if self.radius == radius {
            return false;
        }
        self.radius = radius;
        true
    }

    fn body_contains(&self, point: Point) -> bool {
        self.is_drawable() && polygon_contains(&self.vertices(), point.to_f())
    }

    fn hits_handle(&self, point: Point) -> bool {
        if !self.is_drawable() || !self.style.is_selected() {
            return false;
        }
        let point = point.to_f();
        self.vertices()
            .into_iter()
            .chain(self.rotation_handle())
            .any(|handle| handle_contains(handle, point))
    }

    fn move_by(&mut self, offset: Point) {
        self.center = self.center + offset;
    }

    fn rotate(&mut self, degrees: f64) {
        self.style.set_rotation_angle(degrees);
    }

    fn scale(&mut self, factor: f64) {
        self.radius = round_to_i32(f64::from(self.radius) * factor).max(MIN_RADIUS);
    }

    fn bounding_rect(&self) -> Rect {
        Rect::from_points_f(&self.vertices())
            .unwrap_or_else(|| Rect::new(self.center.x, self.center.y, 0, 0))
    }

    fn position(&self) -> Point {
        self.center - Point::new(self.radius, self.radius)
    }

    fn handles(&self) -> Vec<PointF> {
        self.vertices()
    }

    fn rotation_handle(&self) -> Option<PointF> {
        Some(self.center.to_f())
    }
}
