use super::{map_points, polyline_hit, Point, PointF, Rect, ShapeOps, ShapeStyle};
use crate::geometry::{polygon_contains, rotate_point, scale_point};
use crate::render::{draw_selection, Surface};

/// Minimum vertex count before a polygon may be closed.
pub const MIN_CLOSED_POINTS: usize = 3;

/// Click-by-click polygon. Open polygons hit-test like a polyline, closed ones by area.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub(crate) style: ShapeStyle,
    points: Vec<Point>,
    closed: bool,
    bounds: Option<Rect>,
}

impl PolygonShape {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
            closed: false,
            bounds: None,
        }
    }

    pub fn with_points(points: Vec<Point>, closed: bool, style: ShapeStyle) -> Self {
        let mut polygon = Self::new(style);
        polygon.set_points(points);
        polygon.set_closed(closed);
        polygon
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.refresh_bounds();
    }

    /// Closes the outline. Refused while fewer than three vertices exist.
    pub fn close(&mut self) -> bool {
        if self.closed || self.points.len() < MIN_CLOSED_POINTS {
            return false;
        }
        self.closed = true;
        true
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
        if self.points.len() < MIN_CLOSED_POINTS {
            self.closed = false;
        }
        self.refresh_bounds();
    }

    pub(crate) fn set_closed(&mut self, closed: bool) {
        self.closed = closed && self.points.len() >= MIN_CLOSED_POINTS;
    }

    fn refresh_bounds(&mut self) {
        self.bounds = Rect::from_points(&self.points);
    }

    fn vertices(&self) -> Vec<PointF> {
        self.points.iter().map(|point| point.to_f()).collect()
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

impl ShapeOps for PolygonShape {
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
        let vertices = self.vertices();
        let pen = self.style.miter_pen();
        if self.closed {
            surface.draw_polygon(&vertices, &pen, self.style.fill());
        } else {
            surface.draw_polyline(&vertices, &pen);
        }
        if self.style.is_selected() {
            draw_selection(surface, self.selection_outline(), &vertices, None);
        }
    }

    fn update(&mut self, to: Point) -> bool {
        self.add_point(to);
        true
    }

    fn body_contains(&self, point: Point) -> bool {
        if self.closed {
            polygon_contains(&self.vertices(), point.to_f())
        } else {
            polyline_hit(&self.points, self.style.pen_width_f(), point)
        }
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

    fn handles(&self) -> Vec<PointF> {
        self.vertices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    fn triangle() -> PolygonShape {
        PolygonShape::with_points(
            vec![Point::new(0, 0), Point::new(100, 0), Point::new(0, 100)],
            false,
            ShapeStyle::default(),
        )
    }

    #[test]
    fn close_requires_three_points() {
        let mut polygon = PolygonShape::new(ShapeStyle::default());
        polygon.add_point(Point::new(0, 0));
        polygon.add_point(Point::new(10, 0));
        assert!(!polygon.close());
        assert!(!polygon.is_closed());
        polygon.add_point(Point::new(0, 10));
        assert!(polygon.close());
        assert!(!polygon.close());
        assert_eq!(polygon.point_count(), 3);
    }

    #[test]
    fn open_polygon_hits_only_along_its_edges() {
        let polygon = triangle();
        assert!(polygon.contains(Point::new(50, 1)));
        assert!(!polygon.contains(Point::new(20, 20)));
    }

    #[test]
    fn closed_polygon_hits_its_interior() {
        let mut polygon = triangle();
        assert!(polygon.close());
        assert!(polygon.contains(Point::new(20, 20)));
        assert!(!polygon.contains(Point::new(80, 80)));
    }

    #[test]
    fn shrinking_below_three_points_reopens() {
        let mut polygon = triangle();
        polygon.close();
        polygon.set_points(vec![Point::new(0, 0), Point::new(5, 5)]);
        assert!(!polygon.is_closed());
        polygon.set_closed(true);
        assert!(!polygon.is_closed());
    }

    #[test]
    fn draw_picks_outline_kind_from_closed_flag() {
        let mut polygon = triangle();
        let mut list = DisplayList::new();
        polygon.draw(&mut list);
        assert!(matches!(list.commands()[0], DrawCommand::Polyline { .. }));

        polygon.close();
        list.clear();
        polygon.draw(&mut list);
        assert!(matches!(list.commands()[0], DrawCommand::Polygon { .. }));

        let mut single = PolygonShape::new(ShapeStyle::default());
        single.add_point(Point::new(1, 1));
        list.clear();
        single.draw(&mut list);
        assert!(list.commands().is_empty());
    }

    #[test]
    fn update_appends_a_vertex() {
        let mut polygon = PolygonShape::new(ShapeStyle::default());
        assert!(polygon.update(Point::new(3, 4)));
        assert!(polygon.update(Point::new(3, 4)));
        assert_eq!(polygon.point_count(), 2);
        assert_eq!(polygon.bounding_rect(), Rect::new(3, 4, 0, 0));
    }

    #[test]
    fn move_and_scale_keep_bounds_current() {
        let mut polygon = triangle();
        polygon.move_by(Point::new(10, 10));
        assert_eq!(polygon.bounding_rect(), Rect::new(10, 10, 100, 100));
        polygon.scale(0.5);
        assert_eq!(polygon.bounding_rect(), Rect::new(35, 35, 50, 50));
        assert_eq!(polygon.position(), Point::new(35, 35));
    }
}
