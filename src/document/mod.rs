use crate::geometry::Point;
use crate::render::Surface;
use crate::shapes::Shape;

/// Ordered list of committed shapes. Index 0 is drawn first (bottom of the z-order).
///
/// At most one shape carries the selected flag at a time.
#[derive(Debug, Clone, Default)]
pub struct Document {
    shapes: Vec<Shape>,
    modified: bool,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns whether the flag changed.
    pub fn set_modified(&mut self, modified: bool) -> bool {
        if self.modified == modified {
            return false;
        }
        self.modified = modified;
        true
    }

    /// Appends on top of the z-order.
    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
        self.modified = true;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.shapes.iter().position(Shape::is_selected)
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.is_selected())
    }

    pub fn selected_mut(&mut self) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.is_selected())
    }

    /// Topmost shape containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.shapes.iter().rposition(|shape| shape.contains(point))
    }

    /// Clears the selection, then selects the topmost shape under `point`.
    ///
    /// Handles of the previously selected shape still count for the hit test,
    /// so the lookup runs before the flags are reset.
    pub fn select_at(&mut self, point: Point) -> Option<usize> {
        let hit = self.hit_test(point);
        self.clear_selection();
        if let Some(index) = hit {
            self.shapes[index].set_selected(true);
        }
        hit
    }

    pub fn clear_selection(&mut self) -> bool {
        self.shapes
            .iter_mut()
            .fold(false, |changed, shape| shape.set_selected(false) || changed)
    }

    pub fn delete_selected(&mut self) -> Option<Shape> {
        let index = self.selected_index()?;
        self.modified = true;
        Some(self.shapes.remove(index))
    }

    pub fn bring_selected_to_front(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        let shape = self.shapes.remove(index);
        self.shapes.push(shape);
        self.modified = true;
        true
    }

    pub fn send_selected_to_back(&mut self) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        let shape = self.shapes.remove(index);
        self.shapes.insert(0, shape);
        self.modified = true;
        true
    }

    /// Drops every shape and resets the modified flag.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.modified = false;
    }

    /// Installs a freshly loaded shape list as an unmodified document.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.modified = false;
    }

    /// Scales every shape about its own center. Viewport-driven, so the
    /// modified flag is left alone.
    pub fn scale_all(&mut self, factor: f64) {
        for shape in &mut self.shapes {
            shape.scale(factor);
        }
    }

    pub fn for_each_mut(&mut self, mut apply: impl FnMut(&mut Shape)) {
        self.shapes.iter_mut().for_each(|shape| apply(shape));
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for shape in &self.shapes {
            shape.draw(surface);
        }
    }
}
