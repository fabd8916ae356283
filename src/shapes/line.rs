use super::{map_points, Point, PointF, Rect, ShapeOps, ShapeStyle};
use crate::geometry::{distance_to_segment, normalize_degrees, rotate_point, scale_point};
use crate::render::{draw_selection, Surface};

const LINE_HIT_MARGIN: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub(crate) style: ShapeStyle,
    start: Point,
    end: Point,
}

impl LineShape {
    pub fn new(start: Point, end: Point, style: ShapeStyle) -> Self {
        let mut line = Self { style, start, end };
        line.sync_angle();
        line
    }

    pub const fn start(&self) -> Point {
        self.start
    }

    pub const fn end(&self) -> Point {
        self.end
    }

    pub fn set_start(&mut self, point: Point) -> bool {
        if self.start == point {
            return false;
        }
        self.start = point;
        self.sync_angle();
        true
    }

    pub fn set_end(&mut self, point: Point) -> bool {
        if self.end == point {
            return false;
        }
        self.end = point;
        self.sync_angle();
        true
    }

    pub fn length(&self) -> f64 {
        self.start.to_f().distance_to(self.end.to_f())
    }

    /// Direction of the line in degrees, `[0, 360)`, derived from the endpoints.
    pub fn angle(&self) -> f64 {
        self.style.rotation_angle()
    }

    pub fn distance_to(&self, point: Point) -> f64 {
        distance_to_segment(point.to_f(), self.start.to_f(), self.end.to_f())
    }

    pub(crate) fn set_endpoints(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
        self.sync_angle();
    }

    fn sync_angle(&mut self) {
        let dx = f64::from(self.end.x) - f64::from(self.start.x);
        let dy = f64::from(self.end.y) - f64::from(self.start.y);
        self.style
            .set_rotation_angle(normalize_degrees(dy.atan2(dx).to_degrees()));
    }

    fn transform_endpoints(&mut self, transform: impl Fn(PointF) -> PointF) {
        let mut endpoints = [self.start, self.end];
        map_points(&mut endpoints, transform);
        self.set_endpoints(endpoints[0], endpoints[1]);
    }
}

impl ShapeOps for LineShape {
    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_line(self.start.to_f(), self.end.to_f(), &self.style.pen());
        if self.style.is_selected() {
            draw_selection(surface, self.selection_outline(), &self.handles(), None);
        }
    }

    fn update(&mut self, to: Point) -> bool {
        self.set_end(to)
    }

    fn body_contains(&self, point: Point) -> bool {
        self.distance_to(point) <= self.style.pen_width_f() / 2.0 + LINE_HIT_MARGIN
    }

    fn move_by(&mut self, offset: Point) {
        self.start = self.start + offset;
        self.end = self.end + offset;
    }

    fn rotate(&mut self, degrees: f64) {
        let center = self.bounding_rect().center();
        self.transform_endpoints(|point| rotate_point(point, center, degrees));
    }

    fn scale(&mut self, factor: f64) {
        let center = self.bounding_rect().center();
        self.transform_endpoints(|point| scale_point(point, center, factor));
    }

    fn bounding_rect(&self) -> Rect {
        Rect::from_corners(self.start, self.end)
    }

    fn position(&self) -> Point {
        self.start
    }

    fn handles(&self) -> Vec<PointF> {
        vec![self.start.to_f(), self.end.to_f()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    fn line(start: (i32, i32), end: (i32, i32), pen_width: u32) -> LineShape {
        let mut style = ShapeStyle::default();
        style.set_pen_width(pen_width);
        LineShape::new(Point::new(start.0, start.1), Point::new(end.0, end.1), style)
    }

    #[test]
    fn contains_hits_the_stroke_band_only() {
        let line = line((0, 0), (100, 0), 4);
        assert!(line.contains(Point::new(50, 0)));
        assert!(line.contains(Point::new(50, 5)));
        assert!(!line.contains(Point::new(50, 10)));
        assert!(!line.contains(Point::new(110, 0)));
    }

    #[test]
    fn angle_tracks_endpoints_in_degrees() {
        let mut line = line((0, 0), (10, 0), 1);
        assert_eq!(line.angle(), 0.0);
        assert!(line.update(Point::new(0, 10)));
        assert!((line.angle() - 90.0).abs() < 1e-9);
        assert!(line.set_end(Point::new(-10, 0)));
        assert!((line.angle() - 180.0).abs() < 1e-9);
        assert!(!line.update(Point::new(-10, 0)));
    }

    #[test]
    fn rotate_is_incremental_about_the_center() {
        let mut line = line((0, 0), (100, 0), 1);
        line.rotate(90.0);
        assert_eq!(line.start(), Point::new(50, -50));
        assert_eq!(line.end(), Point::new(50, 50));
        assert!((line.angle() - 90.0).abs() < 1e-9);
        line.rotate(90.0);
        assert_eq!(line.start(), Point::new(100, 0));
        assert_eq!(line.end(), Point::new(0, 0));
    }

    #[test]
    fn scale_keeps_midpoint() {
        let mut line = line((0, 0), (100, 0), 1);
        line.scale(0.5);
        assert_eq!(line.start(), Point::new(25, 0));
        assert_eq!(line.end(), Point::new(75, 0));
        assert_eq!(line.length(), 50.0);
    }

    #[test]
    fn selected_handles_take_priority_over_the_stroke() {
        let mut line = line((0, 0), (100, 0), 1);
        let beside_end = Point::new(104, 4);
        assert!(!line.contains(beside_end));
        line.style_mut().set_selected(true);
        assert!(line.contains(beside_end));
    }

    #[test]
    fn draw_adds_outline_and_endpoint_handles_when_selected() {
        let mut line = line((0, 0), (100, 0), 2);
        let mut list = DisplayList::new();
        line.draw(&mut list);
        assert_eq!(list.commands().len(), 1);

        line.style_mut().set_selected(true);
        list.clear();
        line.draw(&mut list);
        assert!(matches!(list.commands()[0], DrawCommand::Line { .. }));
        assert!(matches!(
            list.commands()[1],
            DrawCommand::Rect { rect, .. } if rect == Rect::new(-2, -2, 104, 4)
        ));
        assert_eq!(list.handle_count(), 2);
    }
}
