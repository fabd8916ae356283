/// Shared geometric and color primitives used by shapes, the document and the session.
use std::ops::{Add, Sub};

/// Half the side of the square hit-box around a selection handle.
pub const HANDLE_HALF_EXTENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_f(self) -> PointF {
        PointF::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_sub(rhs.x), self.y.saturating_sub(rhs.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rounds to the nearest integer point, halves away from zero.
    pub fn round(self) -> Point {
        Point::new(round_to_i32(self.x), round_to_i32(self.y))
    }
}

impl From<Point> for PointF {
    fn from(point: Point) -> Self {
        point.to_f()
    }
}

impl Add for PointF {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for PointF {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned integer rectangle. `width` and `height` are never negative once normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the normalized rectangle spanned by two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(
            left,
            top,
            a.x.max(b.x).saturating_sub(left),
            a.y.max(b.y).saturating_sub(top),
        )
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::from_corners(
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
        ))
    }

    pub fn from_points_f(points: &[PointF]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Some(Self::from_corners(
            PointF::new(min_x, min_y).round(),
            PointF::new(max_x, max_y).round(),
        ))
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [PointF; 4] {
        let (left, top) = (f64::from(self.left()), f64::from(self.top()));
        let (right, bottom) = (f64::from(self.right()), f64::from(self.bottom()));
        [
            PointF::new(left, top),
            PointF::new(right, top),
            PointF::new(right, bottom),
            PointF::new(left, bottom),
        ]
    }

    /// Edge contact counts as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    pub fn contains_f(&self, point: PointF) -> bool {
        point.x >= f64::from(self.left())
            && point.x <= f64::from(self.right())
            && point.y >= f64::from(self.top())
            && point.y <= f64::from(self.bottom())
    }

    pub fn inflated(&self, amount: i32) -> Self {
        Self::new(
            self.x.saturating_sub(amount),
            self.y.saturating_sub(amount),
            self.width.saturating_add(amount.saturating_mul(2)).max(0),
            self.height.saturating_add(amount.saturating_mul(2)).max(0),
        )
    }

    pub fn translated(&self, offset: Point) -> Self {
        Self::new(
            self.x.saturating_add(offset.x),
            self.y.saturating_add(offset.y),
            self.width,
            self.height,
        )
    }

    /// Scales width and height by `factor`, keeping the center fixed.
    pub fn scaled_about_center(&self, factor: f64) -> Self {
        let center = self.center();
        let width = round_to_i32(f64::from(self.width) * factor).max(0);
        let height = round_to_i32(f64::from(self.height) * factor).max(0);
        Self::new(
            round_to_i32(center.x - f64::from(width) / 2.0),
            round_to_i32(center.y - f64::from(height) / 2.0),
            width,
            height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Hex name: `#rrggbb` when opaque, `#aarrggbb` otherwise.
    pub fn name(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
        }
    }

    /// Parses `#rgb`, `#rrggbb`, `#aarrggbb` or the keyword `transparent`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        let hex = name.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                let nibble = |index: usize| byte(index..index + 1).map(|value| value * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Some(Self::rgba(
                byte(2..4)?,
                byte(4..6)?,
                byte(6..8)?,
                byte(0..2)?,
            )),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

pub fn round_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rotates `point` about `center` by `degrees` in screen coordinates (y grows downward).
pub fn rotate_point(point: PointF, center: PointF, degrees: f64) -> PointF {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    PointF::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Scales `point` away from `center` by `factor`.
pub fn scale_point(point: PointF, center: PointF, factor: f64) -> PointF {
    PointF::new(
        center.x + (point.x - center.x) * factor,
        center.y + (point.y - center.y) * factor,
    )
}

/// Even-odd point-in-polygon test. Polygons with fewer than three vertices contain nothing.
pub fn polygon_contains(vertices: &[PointF], point: PointF) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut previous = vertices[vertices.len() - 1];
    for &current in vertices {
        if (current.y > point.y) != (previous.y > point.y) {
            let crossing_x =
                current.x + (point.y - current.y) * (previous.x - current.x) / (previous.y - current.y);
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Projects `point` onto segment `a`–`b` with the parameter clamped to `[0, 1]`.
/// Returns `None` for a zero-length segment.
pub fn project_onto_segment(point: PointF, a: PointF, b: PointF) -> Option<PointF> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_squared = dx * dx + dy * dy;
    if length_squared <= f64::EPSILON {
        return None;
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_squared).clamp(0.0, 1.0);
    Some(PointF::new(a.x + t * dx, a.y + t * dy))
}

/// Distance from `point` to segment `a`–`b`; a degenerate segment measures to `a`.
pub fn distance_to_segment(point: PointF, a: PointF, b: PointF) -> f64 {
    project_onto_segment(point, a, b).map_or_else(
        || point.distance_to(a),
        |projected| point.distance_to(projected),
    )
}

/// Whether `point` falls in the square handle hit-box centered on `handle`.
pub fn handle_contains(handle: PointF, point: PointF) -> bool {
    (point.x - handle.x).abs() <= HANDLE_HALF_EXTENT && (point.y - handle.y).abs() <= HANDLE_HALF_EXTENT
}
