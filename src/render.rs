//! Render-facing contract.
//!
//! The kernel never talks to a graphics API. Drawables hand planar vertex
//! lists to whatever [`Renderer`] the caller injects; a GPU backend uploads
//! them, [`FrameRecorder`] just keeps them for inspection.

use serde::{Deserialize, Serialize};

/// A Poincaré-disk coordinate in `[-1, 1]²`, ready for a vertex buffer.
pub type Vertex = [f32; 2];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Drawing capability injected into drawables.
pub trait Renderer {
    /// `vertices[0]` is the hub, the rest the rim in order.
    fn triangle_fan(&mut self, vertices: &[Vertex], color: Color);
    fn line_strip(&mut self, vertices: &[Vertex], color: Color);
}

/// Anything that can submit itself to a [`Renderer`].
pub trait Drawable {
    fn draw(&self, renderer: &mut dyn Renderer);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    TriangleFan,
    LineStrip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub color: Color,
    pub vertices: Vec<Vertex>,
}

/// A [`Renderer`] that records every call of a frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    calls: Vec<DrawCall>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget the previous frame.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// True if every recorded vertex is finite and inside `[-1, 1]²`.
    pub fn all_in_view(&self) -> bool {
        self.calls
            .iter()
            .flat_map(|c| c.vertices.iter())
            .all(|&[x, y]| x.is_finite() && y.is_finite() && x.abs() <= 1.0 && y.abs() <= 1.0)
    }
}

impl Renderer for FrameRecorder {
    fn triangle_fan(&mut self, vertices: &[Vertex], color: Color) {
        self.calls.push(DrawCall {
            primitive: Primitive::TriangleFan,
            color,
            vertices: vertices.to_vec(),
        });
    }

    fn line_strip(&mut self, vertices: &[Vertex], color: Color) {
        self.calls.push(DrawCall {
            primitive: Primitive::LineStrip,
            color,
            vertices: vertices.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_calls_in_order() {
        let mut recorder = FrameRecorder::new();
        recorder.triangle_fan(&[[0.0, 0.0], [0.5, 0.0], [0.0, 0.5]], Color::RED);
        recorder.line_strip(&[[0.1, 0.1], [0.2, 0.2]], Color::WHITE);

        let kinds: Vec<Primitive> = recorder.calls().iter().map(|c| c.primitive).collect();
        assert_eq!(kinds, [Primitive::TriangleFan, Primitive::LineStrip]);
        assert_eq!(recorder.calls()[0].color, Color::RED);
        assert!(recorder.all_in_view());

        recorder.clear();
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_out_of_view_vertices_are_flagged() {
        let mut recorder = FrameRecorder::new();
        recorder.line_strip(&[[0.0, 0.0], [1.5, 0.0]], Color::BLUE);
        assert!(!recorder.all_in_view());

        recorder.clear();
        recorder.line_strip(&[[f32::NAN, 0.0]], Color::BLUE);
        assert!(!recorder.all_in_view());
    }

    #[test]
    fn test_rgb_is_opaque() {
        assert_eq!(Color::rgb(0.2, 0.4, 0.6).a, 1.0);
        assert_eq!(Color::default(), Color::BLACK);
    }
}
