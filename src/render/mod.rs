//! Drawing contract between shapes and whatever backend paints them.
//!
//! Shapes describe themselves through [`Surface`]; the backend decides how pixels
//! are produced. [`DisplayList`] records the calls for headless callers
//! and tests.

use crate::geometry::{Color, PointF, Rect};
use crate::shapes::PenStyle;

pub const HANDLE_RADIUS: f64 = 4.0;
pub const ROTATION_HANDLE_RADIUS: f64 = 6.0;

const SELECTION_OUTLINE_WIDTH: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapStyle {
    Round,
    Miter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub color: Color,
    pub width: u32,
    pub style: PenStyle,
    pub cap: CapStyle,
}

impl Pen {
    pub const fn new(color: Color, width: u32, style: PenStyle) -> Self {
        Self {
            color,
            width,
            style,
            cap: CapStyle::Round,
        }
    }

    pub const fn with_cap(mut self, cap: CapStyle) -> Self {
        self.cap = cap;
        self
    }

    pub const fn selection_outline() -> Self {
        Self::new(Color::BLUE, SELECTION_OUTLINE_WIDTH, PenStyle::Dash)
    }
}

/// `None` means no fill; fully transparent colors map to `None`.
pub fn fill_brush(color: Color) -> Option<Color> {
    if color.is_transparent() {
        None
    } else {
        Some(color)
    }
}

pub trait Surface {
    fn draw_line(&mut self, from: PointF, to: PointF, pen: &Pen);
    fn draw_polyline(&mut self, points: &[PointF], pen: &Pen);
    fn draw_polygon(&mut self, points: &[PointF], pen: &Pen, fill: Option<Color>);
    /// `rotation` is in degrees about the rectangle's center.
    fn draw_rect(&mut self, rect: Rect, rotation: f64, pen: &Pen, fill: Option<Color>);
    fn draw_ellipse(&mut self, rect: Rect, rotation: f64, pen: &Pen, fill: Option<Color>);
    fn draw_handle(&mut self, center: PointF, radius: f64);
}

/// Dashed outline plus handle markers shared by every selected shape.
pub(crate) fn draw_selection(
    surface: &mut dyn Surface,
    outline: Rect,
    handles: &[PointF],
    rotation_center: Option<PointF>,
) {
    surface.draw_rect(outline, 0.0, &Pen::selection_outline(), None);
    for &handle in handles {
        surface.draw_handle(handle, HANDLE_RADIUS);
    }
    if let Some(center) = rotation_center {
        surface.draw_handle(center, ROTATION_HANDLE_RADIUS);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: PointF,
        to: PointF,
        pen: Pen,
    },
    Polyline {
        points: Vec<PointF>,
        pen: Pen,
    },
    Polygon {
        points: Vec<PointF>,
        pen: Pen,
        fill: Option<Color>,
    },
    Rect {
        rect: Rect,
        rotation: f64,
        pen: Pen,
        fill: Option<Color>,
    },
    Ellipse {
        rect: Rect,
        rotation: f64,
        pen: Pen,
        fill: Option<Color>,
    },
    Handle {
        center: PointF,
        radius: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn handle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Handle { .. }))
            .count()
    }
}

impl Surface for DisplayList {
    fn draw_line(&mut self, from: PointF, to: PointF, pen: &Pen) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            pen: *pen,
        });
    }

    fn draw_polyline(&mut self, points: &[PointF], pen: &Pen) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            pen: *pen,
        });
    }

    fn draw_polygon(&mut self, points: &[PointF], pen: &Pen, fill: Option<Color>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            pen: *pen,
            fill,
        });
    }

    fn draw_rect(&mut self, rect: Rect, rotation: f64, pen: &Pen, fill: Option<Color>) {
        self.commands.push(DrawCommand::Rect {
            rect,
            rotation,
            pen: *pen,
            fill,
        });
    }

    fn draw_ellipse(&mut self, rect: Rect, rotation: f64, pen: &Pen, fill: Option<Color>) {
        self.commands.push(DrawCommand::Ellipse {
            rect,
            rotation,
            pen: *pen,
            fill,
        });
    }

    fn draw_handle(&mut self, center: PointF, radius: f64) {
        self.commands.push(DrawCommand::Handle { center, radius });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_brush_drops_fully_transparent_colors() {
        assert_eq!(fill_brush(Color::TRANSPARENT), None);
        assert_eq!(fill_brush(Color::WHITE), Some(Color::WHITE));
    }

    #[test]
    fn draw_selection_records_outline_then_handles() {
        let mut list = DisplayList::new();
        draw_selection(
            &mut list,
            Rect::new(0, 0, 10, 10),
            &[PointF::new(0.0, 0.0), PointF::new(10.0, 10.0)],
            Some(PointF::new(5.0, 5.0)),
        );
        assert_eq!(list.commands().len(), 4);
        assert!(matches!(
            list.commands()[0],
            DrawCommand::Rect { pen, fill: None, .. } if pen.style == PenStyle::Dash
        ));
        assert_eq!(list.handle_count(), 3);
    }
}
