use thiserror::Error;

use crate::scene::EntityId;

/// Failures of the geometry kernel. All of them are recoverable at the call
/// site: the offending input is rejected and nothing is mutated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// A planar coordinate on or outside the unit circle has no hyperboloid lift.
    #[error("planar point ({x}, {y}) lies outside the open unit disk (x² + y² = {norm_sq})")]
    OutsideDisk { x: f64, y: f64, norm_sq: f64 },
    /// Raw Minkowski coordinates that are not a point of the upper sheet.
    #[error("{0:?} is not a time-like vector on the upper sheet")]
    OffSheet([f64; 3]),
    /// A direction with no usable tangent component at the given point.
    #[error("direction {0:?} has no tangent component at the point")]
    DegenerateDirection([f64; 3]),
    /// A move whose end point lies too far out for its coordinates to be
    /// multiplied without overflowing.
    #[error("advancing by {0} leaves the representable plane (farther than {max} from the origin)", max = crate::point::MAX_DISTANCE)]
    OutOfReach(f64),
    /// Disk radii must be finite and non-negative.
    #[error("disk radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    /// A disk needs at least one boundary segment.
    #[error("disk needs at least one boundary segment")]
    NoSegments,
}

/// Errors raised while building or driving a [`Scene`](crate::scene::Scene).
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("entity {0:?} has no peer; wire it before realigning")]
    UnwiredPeer(EntityId),
    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityId),
    #[error("an entity cannot be its own peer")]
    SelfPeer,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors loading or validating a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
