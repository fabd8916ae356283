//! JSON representation of a single shape.
//!
//! [`ShapeRecord`] mirrors the on-disk object. Every field is optional and read
//! leniently: a key that is missing or holds a value of the wrong JSON type is
//! treated as absent, so decoding onto an existing shape only touches the keys
//! that decode cleanly.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{
    FreehandShape, LineShape, PenStyle, PolygonShape, RegularPolygonShape, Shape, ShapeKind,
    ShapeOps, ShapeStyle,
};
use crate::geometry::{round_to_i32, Color, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
}

impl From<Point> for PointRecord {
    fn from(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl From<PointRecord> for Point {
    fn from(record: PointRecord) -> Self {
        Point::new(record.x, record.y)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient"
    )]
    pub shape_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub pen_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub pen_width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub pen_style: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub rotation_angle: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub start_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub start_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub end_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub end_y: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub height: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub points: Option<Vec<PointRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub closed: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub center_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub center_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub radius: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub sides: Option<i32>,
    /// Legacy regular polygon angle. Read after `rotationAngle`, never written.
    #[serde(default, skip_serializing, deserialize_with = "lenient")]
    pub rotation: Option<f64>,
}

/// Why an element of a saved document was not turned into a shape.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("element is not a JSON object")]
    NotAnObject,
    #[error("element has no `type` key")]
    MissingType,
    #[error("unknown shape type `{0}`")]
    UnknownType(String),
    #[error("element could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

trait Lenient: Sized {
    fn from_json_value(value: &Value) -> Option<Self>;
}

impl Lenient for i32 {
    fn from_json_value(value: &Value) -> Option<Self> {
        value.as_f64().map(round_to_i32)
    }
}

impl Lenient for f64 {
    fn from_json_value(value: &Value) -> Option<Self> {
        value.as_f64().filter(|number| number.is_finite())
    }
}

impl Lenient for bool {
    fn from_json_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Lenient for String {
    fn from_json_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Lenient for Vec<PointRecord> {
    /// Entries lacking a numeric `x` or `y` are dropped.
    fn from_json_value(value: &Value) -> Option<Self> {
        let entries = value.as_array()?;
        Some(
            entries
                .iter()
                .filter_map(|entry| {
                    Some(PointRecord {
                        x: i32::from_json_value(entry.get("x")?)?,
                        y: i32::from_json_value(entry.get("y")?)?,
                    })
                })
                .collect(),
        )
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Lenient,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::from_json_value(&value))
}

/// Builds a shape from one element of a saved document.
pub fn shape_from_json(value: &Value) -> Result<Shape, SkipReason> {
    if !value.is_object() {
        return Err(SkipReason::NotAnObject);
    }
    let record = ShapeRecord::deserialize(value)?;
    let tag = record.shape_type.as_deref().ok_or(SkipReason::MissingType)?;
    let kind =
        ShapeKind::from_type_tag(tag).ok_or_else(|| SkipReason::UnknownType(tag.to_owned()))?;
    let mut shape = Shape::create(kind, Point::default(), ShapeStyle::default());
    shape.apply_record(&record);
    Ok(shape)
}

impl Shape {
    pub fn to_record(&self) -> ShapeRecord {
        let style = self.style();
        let mut record = ShapeRecord {
            shape_type: Some(self.kind().type_tag().to_owned()),
            pen_color: Some(style.pen_color().name()),
            pen_width: Some(i32::try_from(style.pen_width()).unwrap_or(i32::MAX)),
            fill_color: Some(style.fill_color().name()),
            pen_style: i32::try_from(style.pen_style().ordinal()).ok(),
            rotation_angle: Some(style.rotation_angle()),
            ..ShapeRecord::default()
        };
        match self {
            Self::Line(line) => {
                record.start_x = Some(line.start().x);
                record.start_y = Some(line.start().y);
                record.end_x = Some(line.end().x);
                record.end_y = Some(line.end().y);
            }
            Self::Rectangle(rectangle) => write_rect(&mut record, rectangle.rect()),
            Self::Ellipse(ellipse) => write_rect(&mut record, ellipse.rect()),
            Self::Freehand(freehand) => {
                record.points = Some(point_records(freehand.points()));
            }
            Self::Polygon(polygon) => {
                record.points = Some(point_records(polygon.points()));
                record.closed = Some(polygon.is_closed());
            }
            Self::RegularPolygon(regular) => {
                record.center_x = Some(regular.center().x);
                record.center_y = Some(regular.center().y);
                record.radius = Some(regular.radius());
                record.sides = Some(i32::try_from(regular.sides()).unwrap_or(i32::MAX));
            }
        }
        record
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self.to_record())
    }

    /// Partial update: keys absent from `value` keep their current values.
    pub fn update_from_json(&mut self, value: &Value) -> Result<(), SkipReason> {
        if !value.is_object() {
            return Err(SkipReason::NotAnObject);
        }
        let record = ShapeRecord::deserialize(value)?;
        self.apply_record(&record);
        Ok(())
    }

    /// Applies the decoded keys of `record`; the `type` key is not consulted.
    pub fn apply_record(&mut self, record: &ShapeRecord) {
        apply_style(self.style_mut(), record);
        match self {
            Self::Line(line) => apply_line(line, record),
            Self::Rectangle(rectangle) => {
                rectangle.set_rect(merge_rect(rectangle.rect(), record));
            }
            Self::Ellipse(ellipse) => {
                ellipse.set_rect(merge_rect(ellipse.rect(), record));
            }
            Self::Freehand(freehand) => apply_freehand(freehand, record),
            Self::Polygon(polygon) => apply_polygon(polygon, record),
            Self::RegularPolygon(regular) => apply_regular_polygon(regular, record),
        }
    }
}

fn point_records(points: &[Point]) -> Vec<PointRecord> {
    points.iter().copied().map(PointRecord::from).collect()
}

fn write_rect(record: &mut ShapeRecord, rect: Rect) {
    record.x = Some(rect.x);
    record.y = Some(rect.y);
    record.width = Some(rect.width);
    record.height = Some(rect.height);
}

fn merge_rect(current: Rect, record: &ShapeRecord) -> Rect {
    Rect::new(
        record.x.unwrap_or(current.x),
        record.y.unwrap_or(current.y),
        record.width.map_or(current.width, |width| width.max(0)),
        record.height.map_or(current.height, |height| height.max(0)),
    )
}

fn apply_style(style: &mut ShapeStyle, record: &ShapeRecord) {
    if let Some(color) = record.pen_color.as_deref().and_then(Color::from_name) {
        style.set_pen_color(color);
    }
    if let Some(width) = record.pen_width {
        style.set_pen_width(u32::try_from(width).unwrap_or(0));
    }
    if let Some(color) = record.fill_color.as_deref().and_then(Color::from_name) {
        style.set_fill_color(color);
    }
    if let Some(pen_style) = record
        .pen_style
        .and_then(|ordinal| PenStyle::from_ordinal(i64::from(ordinal)))
    {
        style.set_pen_style(pen_style);
    }
    if let Some(angle) = record.rotation_angle {
        style.set_rotation_angle(angle);
    }
}

fn apply_line(line: &mut LineShape, record: &ShapeRecord) {
    let (start, end) = (line.start(), line.end());
    line.set_endpoints(
        Point::new(record.start_x.unwrap_or(start.x), record.start_y.unwrap_or(start.y)),
        Point::new(record.end_x.unwrap_or(end.x), record.end_y.unwrap_or(end.y)),
    );
}

fn apply_freehand(freehand: &mut FreehandShape, record: &ShapeRecord) {
    if let Some(points) = &record.points {
        freehand.set_points(points.iter().copied().map(Point::from).collect());
    }
}

fn apply_polygon(polygon: &mut PolygonShape, record: &ShapeRecord) {
    if let Some(points) = &record.points {
        polygon.set_points(points.iter().copied().map(Point::from).collect());
    }
    if let Some(closed) = record.closed {
        polygon.set_closed(closed);
    }
}

fn apply_regular_polygon(regular: &mut RegularPolygonShape, record: &ShapeRecord) {
    if let (Some(x), Some(y)) = (record.center_x, record.center_y) {
        regular.set_center(Point::new(x, y));
    }
    if let Some(radius) = record.radius {
        regular.set_radius(radius);
    }
    if let Some(sides) = record.sides {
        regular.set_sides(u32::try_from(sides).unwrap_or(0));
    }
    if let Some(angle) = record.rotation {
        regular.style_mut().set_rotation_angle(angle);
    }
}
