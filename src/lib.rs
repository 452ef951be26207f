//! Hyperbolic-plane kernel on the hyperboloid, with figures that keep an eye
//! on each other.
//!
//! Positions live on the upper sheet of `x² + y² − z² = −1`; the Poincaré
//! disk is only used to put them on screen.
//!
//! # Which Representation Does What?
//!
//! | Task | Type | Why |
//! |------|------|-----|
//! | **Motion, rotation, measuring** | [`HyperbolicPoint`] | Geodesics are `cosh`/`sinh` combinations, no boundary blow-up |
//! | **Display** | [`PoincareDisk`], `to_plane` | Bounded, conformal |
//! | **Shapes** | [`HyperbolicDisk`] | Geodesic circle sampled into a triangle fan |
//! | **Figures** | [`AlignedEntity`] | Body plus eyes gazing at a peer |
//!
//! # Layers
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`lorentz`] | `(x, y, z)` vectors, Euclidean and Lorentz forms, Lorentz cross |
//! | [`point`] | position + heading, `advance`, `rotate`, `distance_and_direction` |
//! | [`disk`] | geodesic disks and flat backdrop disks, fan vertices |
//! | [`entity`] | gaze realignment, breathing mouth, trail |
//! | [`scene`] | entity table, peer wiring, tick loop |
//!
//! # Drift
//!
//! Every transform is a handful of `cosh`/`sinh`/`cos`/`sin` products, and
//! after thousands of frames the pair `(p, v)` would wander off the
//! hyperboloid. Each mutator therefore ends by projecting back:
//!
//! ```text
//! p ← p · sqrt(−1/⟨p,p⟩)
//! v ← v + p ⟨v,p⟩ / (p.z² − p.x² − p.y²),  then  v ← v / |v|
//! ```
//!
//! Far from the origin those sums cancel numbers of size `cosh²(d)`, so the
//! correction there rebuilds `z` from `(x, y)` and `v.z` from tangency
//! instead (see [`point`]). Moves ending beyond [`point::MAX_DISTANCE`] are
//! refused.
//!
//! # Example
//!
//! ```
//! use hypsaucer::{HyperbolicPoint, NORTH};
//!
//! let start = HyperbolicPoint::from_plane([0.0, 0.0], NORTH).unwrap();
//! let there = start.advance(1.0);
//! let [x, y] = there.to_plane();
//! assert!(x.abs() < 1e-12);
//! assert!((y - 0.5f64.tanh()).abs() < 1e-12);
//! ```
//!
//! # References
//!
//! - Cannon, Floyd, Kenyon, Parry (1997): "Hyperbolic Geometry"
//! - Nickel & Kiela (2018): "Learning Continuous Hierarchies in the Lorentz Model"

use num_traits::Float;

pub mod clock;
pub mod config;
pub mod disk;
pub mod entity;
pub mod error;
pub mod input;
pub mod lorentz;
pub mod point;
pub mod render;
pub mod scene;
pub mod trail;

pub use clock::TickClock;
pub use config::{FigureConfig, SimulationConfig};
pub use disk::{FlatDisk, HyperbolicDisk, DEFAULT_SEGMENTS};
pub use entity::{AlignedEntity, MouthOscillator};
pub use error::{ConfigError, GeometryError, SceneError};
pub use input::{Intent, Intents, KeyBindings, KeyboardState};
pub use lorentz::LorentzVector;
pub use point::{Bearing, HyperbolicPoint, Residuals, Vec3, MAX_DISTANCE, NORTH};
pub use render::{Color, Drawable, FrameRecorder, Renderer, Vertex};
pub use scene::{EntityId, Scene};
pub use trail::Trail;

/// Poincaré disk of curvature −1.
///
/// The open unit disk `{x : ||x|| < 1}` with metric
///
/// ```text
/// ds² = (2/(1-||x||²))² ||dx||²
/// ```
///
/// Only used to measure and compose things already in display coordinates;
/// the kernel itself works on the hyperboloid.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoincareDisk;

impl PoincareDisk {
    /// Strictly inside the unit circle.
    pub fn contains<T: Float>(x: [T; 2]) -> bool {
        x[0] * x[0] + x[1] * x[1] < T::one()
    }

    /// Mobius addition: x ⊕ y = ((1 + 2<x,y> + ||y||²)x + (1 − ||x||²)y) / (1 + 2<x,y> + ||x||²||y||²)
    pub fn mobius_add<T: Float>(x: [T; 2], y: [T; 2]) -> [T; 2] {
        let one = T::one();
        let two = one + one;
        let x_norm_sq = x[0] * x[0] + x[1] * x[1];
        let y_norm_sq = y[0] * y[0] + y[1] * y[1];
        let xy = x[0] * y[0] + x[1] * y[1];

        let denom = one + two * xy + x_norm_sq * y_norm_sq;
        let a = one + two * xy + y_norm_sq;
        let b = one - x_norm_sq;

        [(a * x[0] + b * y[0]) / denom, (a * x[1] + b * y[1]) / denom]
    }

    /// Hyperbolic distance, `2 atanh ||(−x) ⊕ y||`.
    pub fn distance<T: Float>(x: [T; 2], y: [T; 2]) -> T {
        let diff = Self::mobius_add([-x[0], -x[1]], y);
        let diff_norm = (diff[0] * diff[0] + diff[1] * diff[1]).sqrt();
        let two = T::one() + T::one();
        two * diff_norm.atanh()
    }
}
