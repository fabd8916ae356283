use super::{map_points, polyline_hit, Point, PointF, Rect, ShapeOps, ShapeStyle};
use crate::geometry::{rotate_point, scale_point};
use crate::render::{draw_selection, Surface};

const MAX_INTERIOR_HANDLES: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct FreehandShape {
    pub(crate) style: ShapeStyle,
    points: Vec<Point>,
    bounds: Option<Rect>,
}

impl FreehandShape {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
            bounds: None,
        }
    }

    pub fn with_points(points: Vec<Point>, style: ShapeStyle) -> Self {
        let mut freehand = Self::new(style);
        freehand.set_points(points);
        freehand
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.refresh_bounds();
    }

    /// Whether the path covers more than a single location. Paths that do not
    /// neither draw nor hit.
    pub fn has_extent(&self) -> bool {
        self.points.windows(2).any(|pair| pair[0] != pair[1])
    }

    pub fn clear_points(&mut self) {
        self.points.clear();
        self.refresh_bounds();
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        self.refresh_bounds();
    }

    /// Drops interior points whose deviation from the chord through their
    /// neighbours is at most `tolerance`. Single pass; endpoints always survive.
    ///
    /// Returns whether any point was removed.
    pub fn simplify(&mut self, tolerance: f64) -> bool {
        if self.points.len() < 3 {
            return false;
        }
        let last = self.points.len() - 1;
        let mut simplified = Vec::with_capacity(self.points.len());
        simplified.push(self.points[0]);
        for index in 1..last {
            let deviation = chord_deviation(
                self.points[index - 1].to_f(),
                self.points[index].to_f(),
                self.points[index + 1].to_f(),
            );
            if deviation > tolerance {
                simplified.push(self.points[index]);
            }
        }
        simplified.push(self.points[last]);

        let removed = simplified.len() != self.points.len();
        if removed {
            tracing::debug!(
                before = self.points.len(),
                after = simplified.len(),
                tolerance,
                "freehand path simplified"
            );
        }
        self.set_points(simplified);
        removed
    }

    fn refresh_bounds(&mut self) {
        self.bounds = Rect::from_points(&self.points);
    }

    fn transform_points(&mut self, transform: impl Fn(PointF, PointF) -> PointF) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let center = bounds.center();
        map_points(&mut self.points, |point| transform(point, center));
        self.refresh_bounds();
    }
}

/// Height of the triangle `(previous, current, next)` over the base `previous`–`next`,
/// computed from Heron's area formula.
fn chord_deviation(previous: PointF, current: PointF, next: PointF) -> f64 {
    let a = previous.distance_to(next);
    let b = previous.distance_to(current);
    let c = current.distance_to(next);
    if a <= f64::EPSILON {
        return b;
    }
    let p = (a + b + c) / 2.0;
    let area = (p * (p - a) * (p - b) * (p - c)).max(0.0).sqrt();
    2.0 * area / a
}

impl ShapeOps for FreehandShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.points.len() < 2 {
            return;
        }
        let points = self.points.iter().map(|point| point.to_f()).collect::<Vec<_>>();
        surface.draw_polyline(&points, &self.style.pen());
        if self.style.is_selected() {
            draw_selection(surface, self.selection_outline(), &self.handles(), None);
        }
    }

    fn update(&mut self, to: Point) -> bool {
        self.add_point(to);
        true
    }

    fn body_contains(&self, point: Point) -> bool {
        polyline_hit(&self.points, self.style.pen_width_f(), point)
    }

    fn move_by(&mut self, offset: Point) {
        for point in &mut self.points {
            *point = *point + offset;
        }
        self.refresh_bounds();
    }

    fn rotate(&mut self, degrees: f64) {
        self.transform_points(|point, center| rotate_point(point, center, degrees));
    }

    fn scale(&mut self, factor: f64) {
        self.transform_points(|point, center| scale_point(point, center, factor));
    }

    fn bounding_rect(&self) -> Rect {
        self.bounds.unwrap_or_default()
    }

    fn position(&self) -> Point {
        self.bounding_rect().top_left()
    }

    /// First and last points plus up to five evenly spaced interior points.
    fn handles(&self) -> Vec<PointF> {
        let count = self.points.len();
        if count <= MAX_INTERIOR_HANDLES + 2 {
            return self.points.iter().map(|point| point.to_f()).collect();
        }
        let last = count - 1;
        let mut handles = Vec::with_capacity(MAX_INTERIOR_HANDLES + 2);
        handles.push(self.points[0].to_f());
        handles.extend(
            (1..=MAX_INTERIOR_HANDLES)
                .map(|step| self.points[step * last / (MAX_INTERIOR_HANDLES + 1)].to_f()),
        );
        handles.push(self.points[last].to_f());
        handles
    }
}
