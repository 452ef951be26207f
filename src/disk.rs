//! Disks and their triangle-fan outlines.
//!
//! Both disk kinds keep the same vertex layout, `N + 2` points:
//!
//! ```text
//! [hub, rim_1, rim_2, …, rim_N, rim_1]
//! ```
//!
//! which a renderer draws as one triangle fan. The fan is a cache derived from
//! the disk's centre and radius; every setter rebuilds it.

use std::f32::consts::TAU;

use crate::error::GeometryError;
use crate::point::HyperbolicPoint;
use crate::render::{Color, Drawable, Renderer, Vertex};

/// Rim samples per disk unless asked otherwise.
pub const DEFAULT_SEGMENTS: usize = 100;

fn to_vertex([x, y]: [f64; 2]) -> Vertex {
    [x as f32, y as f32]
}

fn check_radius(radius: f64) -> Result<f64, GeometryError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(GeometryError::InvalidRadius(radius))
    }
}

/// A geodesic disk: all points within hyperbolic distance `radius` of a centre.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperbolicDisk {
    center: HyperbolicPoint,
    radius: f64,
    segments: usize,
    color: Color,
    fan: Vec<Vertex>,
}

impl HyperbolicDisk {
    pub fn new(radius: f64, center: HyperbolicPoint, color: Color) -> Result<Self, GeometryError> {
        Self::with_segments(radius, center, color, DEFAULT_SEGMENTS)
    }

    pub fn with_segments(
        radius: f64,
        center: HyperbolicPoint,
        color: Color,
        segments: usize,
    ) -> Result<Self, GeometryError> {
        if segments == 0 {
            return Err(GeometryError::NoSegments);
        }
        let mut disk = Self {
            center,
            radius: check_radius(radius)?,
            segments,
            color,
            fan: Vec::with_capacity(segments + 2),
        };
        disk.recompute();
        Ok(disk)
    }

    pub fn center(&self) -> &HyperbolicPoint {
        &self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The cached fan, `segments + 2` vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.fan
    }

    /// Rim samples on the hyperboloid, in fan order (without the closing repeat).
    pub fn boundary_points(&self) -> impl Iterator<Item = HyperbolicPoint> + '_ {
        self.center.circle(self.radius, self.segments)
    }

    /// Rebuild the fan from the current centre and radius.
    pub fn recompute(&mut self) {
        self.fan.clear();
        self.fan.push(to_vertex(self.center.to_plane()));
        let rim = self.center.circle(self.radius, self.segments);
        self.fan.extend(rim.map(|p| to_vertex(p.to_plane())));
        let first = self.fan[1];
        self.fan.push(first);
    }

    pub fn set_center(&mut self, center: HyperbolicPoint) {
        self.center = center;
        self.recompute();
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), GeometryError> {
        self.radius = check_radius(radius)?;
        self.recompute();
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn move_forward(&mut self, distance: f64) {
        self.set_center(self.center.advance(distance));
    }

    pub fn move_backward(&mut self, distance: f64) {
        self.set_center(self.center.advance(-distance));
    }

    /// Counter-clockwise turn.
    pub fn rotate_left(&mut self, angle: f64) {
        self.center.rotate(angle);
        self.recompute();
    }

    /// Clockwise turn.
    pub fn rotate_right(&mut self, angle: f64) {
        self.center.rotate(-angle);
        self.recompute();
    }

    /// The fan as an `(N + 2) × 2` array.
    #[cfg(feature = "ndarray")]
    pub fn vertex_array(&self) -> ndarray::Array2<f32> {
        ndarray::Array2::from(self.fan.clone())
    }
}

impl Drawable for HyperbolicDisk {
    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.triangle_fan(&self.fan, self.color);
    }
}

/// A Euclidean disk drawn straight in disk coordinates, e.g. the backdrop
/// marking the unit circle.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatDisk {
    radius: f32,
    center: Vertex,
    offset: Vertex,
    segments: usize,
    color: Color,
    fan: Vec<Vertex>,
}

impl FlatDisk {
    pub fn new(radius: f32, center: Vertex, color: Color) -> Self {
        let mut disk = Self {
            radius,
            center,
            offset: [0.0, 0.0],
            segments: DEFAULT_SEGMENTS,
            color,
            fan: Vec::with_capacity(DEFAULT_SEGMENTS + 2),
        };
        disk.recompute();
        disk
    }

    /// The unit circle itself: the edge of the hyperbolic plane.
    pub fn horizon(color: Color) -> Self {
        Self::new(1.0, [0.0, 0.0], color)
    }

    pub fn center(&self) -> Vertex {
        self.center
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.fan
    }

    pub fn set_center(&mut self, center: Vertex) {
        self.center = center;
        self.recompute();
    }

    /// Shift the whole fan without moving the nominal centre.
    pub fn set_offset(&mut self, offset: Vertex) {
        self.offset = offset;
        self.recompute();
    }

    fn recompute(&mut self) {
        let [cx, cy] = [self.center[0] + self.offset[0], self.center[1] + self.offset[1]];
        let step = TAU / self.segments as f32;
        self.fan.clear();
        self.fan.push([cx, cy]);
        self.fan.extend((1..=self.segments).map(|i| {
            let (sin, cos) = (step * i as f32).sin_cos();
            [cx + self.radius * cos, cy + self.radius * sin]
        }));
        let first = self.fan[1];
        self.fan.push(first);
    }
}

impl Drawable for FlatDisk {
    fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.triangle_fan(&self.fan, self.color);
    }
}
