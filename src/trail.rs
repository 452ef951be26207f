use crate::render::{Color, Drawable, Renderer, Vertex};

/// Breadcrumb path of an entity in disk coordinates. Append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: Vec<Vertex>,
    color: Color,
}

impl Trail {
    pub fn new(color: Color) -> Self {
        Self {
            points: Vec::new(),
            color,
        }
    }

    pub fn push(&mut self, point: [f64; 2]) {
        self.points.push([point[0] as f32, point[1] as f32]);
    }

    pub fn points(&self) -> &[Vertex] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(feature = "ndarray")]
    pub fn vertex_array(&self) -> ndarray::Array2<f32> {
        ndarray::Array2::from(self.points.clone())
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl Drawable for Trail {
    fn draw(&self, renderer: &mut dyn Renderer) {
        // a strip needs two points
        if self.points.len() >= 2 {
            renderer.line_strip(&self.points, self.color);
        }
    }
}
