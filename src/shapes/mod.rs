mod codec;
mod ellipse;
mod freehand;
mod line;
mod polygon;
mod rectangle;
mod regular_polygon;
mod style;

use std::fmt;
use std::str::FromStr;

pub use crate::geometry::{Color, Point, PointF, Rect};
use crate::geometry::{handle_contains, project_onto_segment, rotate_point};
use crate::render::Surface;
pub use codec::{shape_from_json, PointRecord, ShapeRecord, SkipReason};
pub use ellipse::{EllipseShape, ELLIPSE_TESSELLATION_POINTS};
pub use freehand::FreehandShape;
pub use line::LineShape;
pub use polygon::PolygonShape;
pub use rectangle::RectangleShape;
pub use regular_polygon::{
    RegularPolygonShape, DEFAULT_SIDES, MAX_SIDES, MIN_RADIUS, MIN_SIDES,
};
pub use style::{PenStyle, ShapeStyle, MIN_PEN_WIDTH};

/// Capability set every shape variant provides.
pub trait ShapeOps {
    fn style(&self) -> &ShapeStyle;
    fn style_mut(&mut self) -> &mut ShapeStyle;

    fn draw(&self, surface: &mut dyn Surface);

    /// Advances the shape during interactive construction. Returns whether geometry changed.
    fn update(&mut self, to: Point) -> bool;

    /// Hit test against the body of the shape, ignoring handles.
    fn body_contains(&self, point: Point) -> bool;

    fn move_by(&mut self, offset: Point);
    fn rotate(&mut self, degrees: f64);
    fn scale(&mut self, factor: f64);
    fn bounding_rect(&self) -> Rect;
    fn position(&self) -> Point;

    /// Control points marked while the shape is selected.
    fn handles(&self) -> Vec<PointF>;

    fn rotation_handle(&self) -> Option<PointF> {
        None
    }

    fn hits_handle(&self, point: Point) -> bool {
        if !self.style().is_selected() {
            return false;
        }
        let point = point.to_f();
        self.handles()
            .into_iter()
            .chain(self.rotation_handle())
            .any(|handle| handle_contains(handle, point))
    }

    fn contains(&self, point: Point) -> bool {
        self.hits_handle(point) || self.body_contains(point)
    }

    fn selection_outline(&self) -> Rect {
        self.bounding_rect()
            .inflated(self.style().outline_margin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Ellipse,
    Freehand,
    Polygon,
    RegularPolygon,
}

impl ShapeKind {
    pub const ALL: [Self; 6] = [
        Self::Line,
        Self::Rectangle,
        Self::Ellipse,
        Self::Freehand,
        Self::Polygon,
        Self::RegularPolygon,
    ];

    /// Human label used in status messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Ellipse => "Ellipse",
            Self::Freehand => "Freehand",
            Self::Polygon => "Polygon",
            Self::RegularPolygon => "Regular polygon",
        }
    }

    /// Discriminator written to the `type` key of a saved shape.
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Freehand => "freehand",
            Self::Polygon => "polygon",
            Self::RegularPolygon => "regular_polygon",
        }
    }

    pub fn from_type_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_tag() == tag)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShapeKind(pub String);

impl fmt::Display for UnknownShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape kind `{}`", self.0)
    }
}

impl std::error::Error for UnknownShapeKind {}

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    /// Accepts persisted type tags, labels, and toolbar names such as `RegularPolygon`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(kind) = Self::from_type_tag(trimmed) {
            return Ok(kind);
        }
        let folded = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_tag().replace('_', "") == folded)
            .ok_or_else(|| UnknownShapeKind(value.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Rectangle(RectangleShape),
    Ellipse(EllipseShape),
    Freehand(FreehandShape),
    Polygon(PolygonShape),
    RegularPolygon(RegularPolygonShape),
}

impl Shape {
    /// Builds a degenerate shape of `kind` anchored at `at`.
    ///
    /// Freehand and polygon shapes start without points; the caller seeds them.
    pub fn create(kind: ShapeKind, at: Point, style: ShapeStyle) -> Self {
        match kind {
            ShapeKind::Line => Self::Line(LineShape::new(at, at, style)),
            ShapeKind::Rectangle => Self::Rectangle(RectangleShape::from_corners(at, at, style)),
            ShapeKind::Ellipse => Self::Ellipse(EllipseShape::from_corners(at, at, style)),
            ShapeKind::Freehand => Self::Freehand(FreehandShape::new(style)),
            ShapeKind::Polygon => Self::Polygon(PolygonShape::new(style)),
            ShapeKind::RegularPolygon => {
                Self::RegularPolygon(RegularPolygonShape::new(at, 0, DEFAULT_SIDES, style))
            }
        }
    }

    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Line(_) => ShapeKind::Line,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Freehand(_) => ShapeKind::Freehand,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::RegularPolygon(_) => ShapeKind::RegularPolygon,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.kind().label()
    }

    fn ops(&self) -> &dyn ShapeOps {
        match self {
            Self::Line(line) => line,
            Self::Rectangle(rectangle) => rectangle,
            Self::Ellipse(ellipse) => ellipse,
            Self::Freehand(freehand) => freehand,
            Self::Polygon(polygon) => polygon,
            Self::RegularPolygon(regular) => regular,
        }
    }

    fn ops_mut(&mut self) -> &mut dyn ShapeOps {
        match self {
            Self::Line(line) => line,
            Self::Rectangle(rectangle) => rectangle,
            Self::Ellipse(ellipse) => ellipse,
            Self::Freehand(freehand) => freehand,
            Self::Polygon(polygon) => polygon,
            Self::RegularPolygon(regular) => regular,
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        self.ops().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.ops_mut().style_mut()
    }

    pub fn is_selected(&self) -> bool {
        self.style().is_selected()
    }

    pub fn set_selected(&mut self, selected: bool) -> bool {
        self.style_mut().set_selected(selected)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.ops().draw(surface);
    }

    pub fn update(&mut self, to: Point) -> bool {
        self.ops_mut().update(to)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.ops().contains(point)
    }

    pub fn move_by(&mut self, offset: Point) {
        self.ops_mut().move_by(offset);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.ops_mut().rotate(degrees);
    }

    pub fn scale(&mut self, factor: f64) {
        self.ops_mut().scale(factor);
    }

    pub fn bounding_rect(&self) -> Rect {
        self.ops().bounding_rect()
    }

    pub fn position(&self) -> Point {
        self.ops().position()
    }

    pub fn handles(&self) -> Vec<PointF> {
        self.ops().handles()
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut PolygonShape> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    pub fn as_freehand_mut(&mut self) -> Option<&mut FreehandShape> {
        match self {
            Self::Freehand(freehand) => Some(freehand),
            _ => None,
        }
    }
}

/// Stroke proximity test shared by freehand paths and open polygons.
///
/// A segment hits when the clamped projection of `point` lies inside the segment's
/// box grown by the pen width and is within `pen_width / 2 + 2` of `point`.
pub(crate) fn polyline_hit(points: &[Point], pen_width: f64, point: Point) -> bool {
    let query = point.to_f();
    let tolerance = pen_width / 2.0 + 2.0;
    points.windows(2).any(|segment| {
        let (a, b) = (segment[0].to_f(), segment[1].to_f());
        let Some(projected) = project_onto_segment(query, a, b) else {
            return false;
        };
        let within_box = projected.x >= a.x.min(b.x) - pen_width
            && projected.x <= a.x.max(b.x) + pen_width
            && projected.y >= a.y.min(b.y) - pen_width
            && projected.y <= a.y.max(b.y) + pen_width;
        within_box && projected.distance_to(query) <= tolerance
    })
}

/// Corners of `rect` rotated by `degrees` about its center, in TL, TR, BR, BL order.
pub(crate) fn rotated_corners(rect: Rect, degrees: f64) -> [PointF; 4] {
    let center = rect.center();
    rect.corners()
        .map(|corner| rotate_point(corner, center, degrees))
}

/// Top, right, bottom and left edge midpoints of a TL, TR, BR, BL quad.
pub(crate) fn edge_midpoints(corners: &[PointF; 4]) -> Vec<PointF> {
    (0..4)
        .map(|index| corners[index].midpoint(corners[(index + 1) % 4]))
        .collect()
}

/// Rounds transformed points back onto the integer grid.
pub(crate) fn map_points(points: &mut [Point], transform: impl Fn(PointF) -> PointF) {
    for point in points {
        *point = transform(point.to_f()).round();
    }
}
