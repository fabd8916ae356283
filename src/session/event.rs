use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw pointer input forwarded by the UI shell, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed {
        position: Point,
        button: PointerButton,
    },
    Moved {
        position: Point,
        primary_held: bool,
    },
    Released {
        position: Point,
        button: PointerButton,
    },
}

impl PointerEvent {
    pub const fn press(x: i32, y: i32, button: PointerButton) -> Self {
        Self::Pressed {
            position: Point::new(x, y),
            button,
        }
    }

    pub const fn drag(x: i32, y: i32) -> Self {
        Self::Moved {
            position: Point::new(x, y),
            primary_held: true,
        }
    }

    pub const fn release(x: i32, y: i32, button: PointerButton) -> Self {
        Self::Released {
            position: Point::new(x, y),
            button,
        }
    }

    pub const fn position(&self) -> Point {
        match self {
            Self::Pressed { position, .. }
            | Self::Moved { position, .. }
            | Self::Released { position, .. } => *position,
        }
    }
}

/// Canvas size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Uniform factor that fits content sized for `self` into `next`.
    pub fn fit_factor(&self, next: ViewportSize) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let x_factor = f64::from(next.width) / f64::from(self.width);
        let y_factor = f64::from(next.height) / f64::from(self.height);
        Some(x_factor.min(y_factor))
    }
}
