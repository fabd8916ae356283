use crate::geometry::{normalize_degrees, Color};
use crate::render::{fill_brush, CapStyle, Pen};

pub const MIN_PEN_WIDTH: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
    None,
}

impl PenStyle {
    pub const fn ordinal(self) -> i64 {
        match self {
            Self::Solid => 0,
            Self::Dash => 1,
            Self::Dot => 2,
            Self::DashDot => 3,
            Self::DashDotDot => 4,
            Self::None => 5,
        }
    }

    pub const fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Solid),
            1 => Some(Self::Dash),
            2 => Some(Self::Dot),
            3 => Some(Self::DashDot),
            4 => Some(Self::DashDotDot),
            5 => Some(Self::None),
            _ => None,
        }
    }
}

/// Style and interaction state carried by every shape variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub(crate) pen_color: Color,
    pub(crate) pen_width: u32,
    pub(crate) fill_color: Color,
    pub(crate) pen_style: PenStyle,
    pub(crate) rotation_angle: f64,
    pub(crate) selected: bool,
    pub(crate) animating: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            pen_color: Color::BLACK,
            pen_width: MIN_PEN_WIDTH,
            fill_color: Color::TRANSPARENT,
            pen_style: PenStyle::Solid,
            rotation_angle: 0.0,
            selected: false,
            animating: false,
        }
    }
}

impl ShapeStyle {
    pub fn new(pen_color: Color, pen_width: u32, fill_color: Color) -> Self {
        let mut style = Self {
            pen_color,
            fill_color,
            ..Self::default()
        };
        style.set_pen_width(pen_width);
        style
    }

    pub const fn pen_color(&self) -> Color {
        self.pen_color
    }

    pub const fn pen_width(&self) -> u32 {
        self.pen_width
    }

    pub const fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub const fn pen_style(&self) -> PenStyle {
        self.pen_style
    }

    pub const fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    pub const fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn set_pen_color(&mut self, color: Color) -> bool {
        replace_if_changed(&mut self.pen_color, color)
    }

    pub fn set_pen_width(&mut self, width: u32) -> bool {
        replace_if_changed(&mut self.pen_width, width.max(MIN_PEN_WIDTH))
    }

    pub fn set_fill_color(&mut self, color: Color) -> bool {
        replace_if_changed(&mut self.fill_color, color)
    }

    pub fn set_pen_style(&mut self, style: PenStyle) -> bool {
        replace_if_changed(&mut self.pen_style, style)
    }

    pub fn set_rotation_angle(&mut self, degrees: f64) -> bool {
        let angle = normalize_degrees(degrees);
        if (self.rotation_angle - angle).abs() > f64::EPSILON {
            self.rotation_angle = angle;
            true
        } else {
            false
        }
    }

    pub fn set_selected(&mut self, selected: bool) -> bool {
        replace_if_changed(&mut self.selected, selected)
    }

    pub fn set_animating(&mut self, animating: bool) -> bool {
        replace_if_changed(&mut self.animating, animating)
    }

    pub(crate) fn is_rotated(&self) -> bool {
        self.rotation_angle.abs() > 1e-12
    }

    pub(crate) fn pen_width_f(&self) -> f64 {
        f64::from(self.pen_width)
    }

    pub(crate) fn pen(&self) -> Pen {
        Pen::new(self.pen_color, self.pen_width, self.pen_style)
    }

    pub(crate) fn miter_pen(&self) -> Pen {
        self.pen().with_cap(CapStyle::Miter)
    }

    pub(crate) fn fill(&self) -> Option<Color> {
        fill_brush(self.fill_color)
    }

    pub(crate) fn outline_margin(&self) -> i32 {
        i32::try_from(self.pen_width).unwrap_or(i32::MAX)
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
