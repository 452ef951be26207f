//! Position-plus-heading pairs on the hyperboloid.
//!
//! A [`HyperbolicPoint`] couples a position `p` on the upper sheet with a unit
//! tangent direction `v` at `p`:
//!
//! ```text
//! ⟨p,p⟩ = −1,  p.z > 0        (on the sheet)
//! ⟨v,v⟩ =  1                  (unit speed)
//! ⟨p,v⟩ =  0                  (tangent at p)
//! ```
//!
//! Floating-point error pulls a pair off this manifold a little with every
//! transform. Rather than proving the invariants, every mutator ends with a
//! correction step that projects the pair back:
//!
//! ```text
//! p ← p · sqrt(−1/⟨p,p⟩)
//! v ← v + p · ⟨v,p⟩ / (p.z² − p.x² − p.y²)
//! ```
//!
//! # Far from the origin
//!
//! Coordinates grow like `e^d / 2` with the distance `d` from the origin, and
//! `⟨p,p⟩ = x² + y² − z²` cancels terms of size `z²` down to `−1`. Past
//! `z ≈ 10³` the rescaling above would move the point by more than rounding,
//! and past `d ≈ 19` the sum cancels to zero. There the correction switches to
//! forms that never subtract large terms:
//!
//! ```text
//! z   ← sqrt(1 + x² + y²)                         (time part from space part)
//! v.z ← (p.x v.x + p.y v.y) / p.z                 (tangency solved for v.z)
//! ⟨v,v⟩ = (v.x² + v.y² + (p.x v.y − p.y v.x)²) / p.z²
//! ```
//!
//! [`residuals`](HyperbolicPoint::residuals) are measured relative to the size
//! of the terms they cancel, so they stay comparable at every distance.
//! Moves that would end beyond [`MAX_DISTANCE`] are refused.
//!
//! The fields are private, so the only way to change a point is through those
//! mutators.

use std::f64::consts::TAU;

use tracing::warn;

use crate::error::GeometryError;
use crate::lorentz::LorentzVector;

/// Minkowski vector used by the kernel.
pub type Vec3 = LorentzVector<f64>;

/// Below this distance two points count as coincident and carry no bearing.
pub const DEGENERATE_DISTANCE: f64 = 1e-7;

/// Default heading of freshly placed points: planar +y.
pub const NORTH: Vec3 = LorentzVector::new(0.0, 1.0, 0.0);

/// Farthest a point may sit from the origin. Beyond it the products of two
/// points' coordinates (`~ e^{2d}`) approach the `f64` range.
pub const MAX_DISTANCE: f64 = 340.0;

/// Above this `z`, `⟨p,p⟩` carries too few correct digits to rescale by.
const RESCALE_LIMIT: f64 = 1e3;

/// `⟨v,p⟩` below this fraction of `|v| |p|` is rounding noise.
const TANGENT_SLACK: f64 = 1e-9;

/// A point on the hyperbolic plane together with a unit heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyperbolicPoint {
    position: Vec3,
    direction: Vec3,
}

/// Result of [`HyperbolicPoint::distance_and_direction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bearing {
    /// Hyperbolic arc length to the target.
    pub distance: f64,
    /// Unit tangent at the query point, aimed at the target. Zero when the
    /// query was degenerate.
    pub direction: Vec3,
}

impl Bearing {
    fn degenerate() -> Self {
        Self {
            distance: 0.0,
            direction: Vec3::zero(),
        }
    }

    /// True when the two points were too close to define a direction.
    pub fn is_degenerate(&self) -> bool {
        self.distance < DEGENERATE_DISTANCE
    }
}

/// How far a point has drifted from each of its three invariants.
///
/// Each residual is divided by the Euclidean size of the terms it sums, so a
/// value near `f64::EPSILON` means "exact up to rounding" at any distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residuals {
    /// `|⟨p,p⟩ + 1| / |p|²`
    pub on_sheet: f64,
    /// `|⟨v,v⟩ − 1| / |v|²`
    pub unit_direction: f64,
    /// `|⟨p,v⟩| / (|p| |v|)`
    pub tangency: f64,
}

impl Residuals {
    pub fn max(&self) -> f64 {
        self.on_sheet.max(self.unit_direction).max(self.tangency)
    }
}

/// `sqrt(−1/⟨p,p⟩)`: the factor that rescales a time-like `p` onto the sheet.
fn point_lambda(p: &Vec3) -> f64 {
    (-1.0 / p.lorentz_norm_sq()).sqrt()
}

/// `⟨v,p⟩ / (p.z² − p.x² − p.y²)`: adding `p` times this to `v` removes the
/// component of `v` along `p`. Far out `p` is on the sheet and the divisor,
/// which would only be cancellation noise, is its exact value 1.
fn vector_lambda(v: &Vec3, p: &Vec3) -> f64 {
    let divisor = p.z * p.z - p.x * p.x - p.y * p.y;
    if p.z < RESCALE_LIMIT && divisor > 0.0 {
        v.lorentz_dot(p) / divisor
    } else {
        v.lorentz_dot(p)
    }
}

/// Put `p` back on the sheet.
fn onto_sheet(p: Vec3) -> Vec3 {
    if p.z < RESCALE_LIMIT && p.lorentz_norm_sq() < 0.0 {
        p * point_lambda(&p)
    } else {
        Vec3::new(p.x, p.y, p.planar_norm().hypot(1.0))
    }
}

/// The tangent vector at `p` with the space part of `v`.
fn snap_to_tangent(v: &Vec3, p: &Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, p.x / p.z * v.x + p.y / p.z * v.y)
}

/// `sqrt(⟨v,v⟩)` of a tangent `v` at `p`, as a sum of squares.
fn tangent_norm(v: &Vec3, p: &Vec3) -> f64 {
    let (a, b) = (v.x / p.z, v.y / p.z);
    let w = p.x / p.z * v.y - p.y / p.z * v.x;
    (a * a + b * b + w * w).sqrt()
}

/// Unit tangent at `p` along the space part of `v`, if there is one.
fn normalized_tangent(v: &Vec3, p: &Vec3) -> Option<Vec3> {
    let tangent = snap_to_tangent(v, p);
    let norm = tangent_norm(&tangent, p);
    if norm.is_finite() && norm * norm > f64::EPSILON {
        Some(tangent / norm)
    } else {
        None
    }
}

/// Project `v` onto the tangent plane at `p`.
fn tangent_part(v: &Vec3, p: &Vec3) -> Vec3 {
    let along = vector_lambda(v, p);
    let scale = v.dot(v).sqrt() * p.dot(p).sqrt();
    // an already tangent `v` far out would only pick up cancellation noise
    let v = if along.abs() > TANGENT_SLACK * scale {
        *v + *p * along
    } else {
        *v
    };
    snap_to_tangent(&v, p)
}

/// `v.lorentz_cross(p)` for a tangent `v` at an on-sheet `p`, expanded with
/// `w = p.x v.y − p.y v.x` so the `z²`-sized products cancel symbolically.
fn quarter_turn(v: &Vec3, p: &Vec3) -> Vec3 {
    let w = p.x * v.y - p.y * v.x;
    let (ux, uy) = (p.x / p.z, p.y / p.z);
    Vec3::new(-v.y / p.z - ux * w, v.x / p.z - uy * w, -w)
}

/// `x² + y²` if the coordinate lies in the open unit disk.
fn check_in_disk([x, y]: [f64; 2]) -> Result<f64, GeometryError> {
    let norm_sq = x * x + y * y;
    if norm_sq < 1.0 {
        Ok(norm_sq)
    } else {
        Err(GeometryError::OutsideDisk { x, y, norm_sq })
    }
}

/// Project an approximate `(p, v)` pair back onto the invariant manifold.
fn correct(p: Vec3, v: Vec3) -> Option<(Vec3, Vec3)> {
    let p = onto_sheet(p);
    let v = normalized_tangent(&tangent_part(&v, &p), &p)?;
    Some((p, v))
}

impl HyperbolicPoint {
    /// The apex `(0, 0, 1)` heading along planar +y.
    pub fn origin() -> Self {
        Self {
            position: Vec3::apex(),
            direction: NORTH,
        }
    }

    /// Lift a Poincaré-disk coordinate onto the hyperboloid, the inverse of
    /// [`to_plane`](Self::to_plane): `(2x, 2y, 1 + r²) / (1 − r²)`.
    ///
    /// This is not the Klein-style lift `(x, y, 1) / sqrt(1 − r²)`, which
    /// does not invert `to_plane`; that one is [`from_klein`](Self::from_klein).
    ///
    /// `direction` is only a guess: its tangent part at the lifted position is
    /// kept and rescaled to unit length.
    ///
    /// ```
    /// use hypsaucer::{HyperbolicPoint, NORTH};
    ///
    /// let disk = HyperbolicPoint::from_plane([0.6, 0.0], NORTH).unwrap();
    /// let klein = HyperbolicPoint::from_klein([0.6, 0.0], NORTH).unwrap();
    /// assert!((disk.to_plane()[0] - 0.6).abs() < 1e-12);
    /// assert!((klein.to_plane()[0] - 0.6).abs() > 0.1);
    /// ```
    pub fn from_plane(xy: [f64; 2], direction: Vec3) -> Result<Self, GeometryError> {
        let norm_sq = check_in_disk(xy)?;
        let [x, y] = xy;
        let position = Vec3::new(2.0 * x, 2.0 * y, 1.0 + norm_sq) / (1.0 - norm_sq);
        Self::with_direction(position, direction)
    }

    /// Lift a Beltrami–Klein coordinate: `(x, y, 1) / sqrt(1 − r²)`.
    ///
    /// Klein and Poincaré coordinates agree only at the origin; a Klein point
    /// `k` shows up in the disk at `k / (1 + sqrt(1 − |k|²))`.
    pub fn from_klein(xy: [f64; 2], direction: Vec3) -> Result<Self, GeometryError> {
        let norm_sq = check_in_disk(xy)?;
        let [x, y] = xy;
        let position = Vec3::new(x, y, 1.0) / (1.0 - norm_sq).sqrt();
        Self::with_direction(position, direction)
    }

    /// Beltrami–Klein coordinate of the position, inverse of [`from_klein`](Self::from_klein).
    pub fn to_klein(&self) -> [f64; 2] {
        let p = &self.position;
        [p.x / p.z, p.y / p.z]
    }

    /// Build a point from raw Minkowski coordinates.
    ///
    /// `position` must be time-like with `z > 0`; it is moved onto the sheet.
    /// `direction` is treated as in [`from_plane`](Self::from_plane).
    pub fn from_hyperboloid(position: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        if !position.is_finite() || !(position.z > 0.0) || !(position.lorentz_norm_sq() < 0.0) {
            return Err(GeometryError::OffSheet([position.x, position.y, position.z]));
        }
        Self::with_direction(onto_sheet(position), direction)
    }

    fn with_direction(position: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        let mut point = Self {
            position,
            direction: NORTH,
        };
        point.set_direction(direction)?;
        Ok(point)
    }

    /// Poincaré-disk coordinate of the position.
    pub fn to_plane(&self) -> [f64; 2] {
        let p = &self.position;
        [p.x / (p.z + 1.0), p.y / (p.z + 1.0)]
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn residuals(&self) -> Residuals {
        let (p, v) = (&self.position, &self.direction);
        // both are at least 1 for a valid pair
        let p_size = p.dot(p).max(1.0);
        let v_size = v.dot(v).max(1.0);
        Residuals {
            on_sheet: (p.lorentz_norm_sq() + 1.0).abs() / p_size,
            unit_direction: (v.lorentz_norm_sq() - 1.0).abs() / v_size,
            tangency: p.lorentz_dot(v).abs() / (p_size * v_size).sqrt(),
        }
    }

    /// Follow the geodesic along the current heading for arc length `t`.
    ///
    /// Negative `t` walks backwards. The returned heading is the parallel
    /// transport of the current one, so repeated calls trace one geodesic.
    /// A move that would end beyond [`MAX_DISTANCE`] is refused and `self`
    /// is returned unchanged; [`try_advance`](Self::try_advance) reports it.
    pub fn advance(&self, t: f64) -> Self {
        self.try_advance(t).unwrap_or_else(|err| {
            warn!(%err, "advance refused");
            *self
        })
    }

    /// [`advance`](Self::advance), failing with [`GeometryError::OutOfReach`]
    /// instead of standing still.
    pub fn try_advance(&self, t: f64) -> Result<Self, GeometryError> {
        let (cosh, sinh) = (t.cosh(), t.sinh());
        let p = self.position * cosh + self.direction * sinh;
        let v = self.position * sinh + self.direction * cosh;
        if !p.is_finite() || !v.is_finite() || p.z > MAX_DISTANCE.cosh() {
            return Err(GeometryError::OutOfReach(t));
        }
        let (position, direction) = correct(p, v).ok_or(GeometryError::OutOfReach(t))?;
        Ok(Self {
            position,
            direction,
        })
    }

    /// Turn the heading by `angle` radians about the position.
    /// Positive angles turn counter-clockwise as seen in the disk.
    pub fn rotate(&mut self, angle: f64) {
        let p = self.position;
        let v = self.direction;
        let perp = quarter_turn(&v, &p);
        let perp = normalized_tangent(&perp, &p).unwrap_or(perp);
        let (sin, cos) = angle.sin_cos();
        let turned = v * cos + perp * sin;
        if let Some(direction) = normalized_tangent(&tangent_part(&turned, &p), &p) {
            self.direction = direction;
        }
    }

    /// Copy of `self` turned by `angle`.
    pub fn rotated(&self, angle: f64) -> Self {
        let mut copy = *self;
        copy.rotate(angle);
        copy
    }

    /// The point `distance` away along the heading turned by `angle`.
    pub fn advance_rotated(&self, distance: f64, angle: f64) -> Self {
        self.rotated(angle).advance(distance)
    }

    /// Distance to `other` and the unit heading at `self` that points at it.
    ///
    /// Coincident points (closer than [`DEGENERATE_DISTANCE`]) yield a zero
    /// distance and a zero direction instead of dividing by `sinh(0)`.
    pub fn distance_and_direction(&self, other: &HyperbolicPoint) -> Bearing {
        let p = self.position;
        let q = other.position;
        // cosh(d); rounding can push it a hair below 1
        let cosh = (-q).lorentz_dot(&p).max(1.0);
        let distance = cosh.acosh();
        if distance < DEGENERATE_DISTANCE || !distance.is_finite() {
            return Bearing::degenerate();
        }
        let sinh = distance.sinh();
        match normalized_tangent(&(q / sinh - p * (cosh / sinh)), &p) {
            Some(direction) => Bearing {
                distance,
                direction,
            },
            None => Bearing::degenerate(),
        }
    }

    /// Hyperbolic distance to `other`.
    pub fn distance(&self, other: &HyperbolicPoint) -> f64 {
        let cosh = (-other.position).lorentz_dot(&self.position);
        // acosh loses precision near 1; use the series d ≈ sqrt(2(cosh − 1))
        if cosh <= 1.0 {
            return 0.0;
        }
        if cosh < 1.0 + 1e-7 {
            return (2.0 * (cosh - 1.0)).sqrt();
        }
        cosh.acosh()
    }

    /// Replace the heading. Only the tangent part of `direction` is kept.
    pub fn set_direction(&mut self, direction: Vec3) -> Result<(), GeometryError> {
        let degenerate =
            || GeometryError::DegenerateDirection([direction.x, direction.y, direction.z]);
        if !direction.is_finite() {
            return Err(degenerate());
        }
        let tangent = tangent_part(&direction, &self.position);
        self.direction = normalized_tangent(&tangent, &self.position).ok_or_else(degenerate)?;
        Ok(())
    }

    /// Copy whose heading is the planar part `(v.x, v.y)` of the current one,
    /// made tangent again.
    ///
    /// Away from the apex this differs from the heading itself; it is the
    /// reference frame satellites are laid out in.
    pub fn lateral(&self) -> Self {
        self.lateral_rotated(0.0)
    }

    /// Copy whose heading is the flat vector `(v.x, v.y, 0)`, turned by
    /// `angle` about the position while still flat and only then made
    /// tangent.
    ///
    /// Off the apex the projection squeezes the angle: far out every flat
    /// heading lands close to the radial one.
    pub fn lateral_rotated(&self, angle: f64) -> Self {
        let (p, v) = (self.position, self.direction);
        let planar = v.planar_norm();
        if !(planar > f64::EPSILON) {
            return self.rotated(angle);
        }
        let flat = Vec3::new(v.x / planar, v.y / planar, 0.0);
        // ⟨flat,p⟩; the cross product below has ⟨·,·⟩ = 1 + radial², no cancellation
        let radial = flat.x * p.x + flat.y * p.y;
        let perp = flat.lorentz_cross(&p) / (1.0 + radial * radial).sqrt();
        let (sin, cos) = angle.sin_cos();
        let turned = flat * cos + perp * sin;
        // ⟨perp,p⟩ = 0, so ⟨turned,p⟩ is exactly cos · radial
        let tangent = turned + p * (cos * radial);
        match normalized_tangent(&tangent, &p) {
            Some(direction) => Self {
                position: p,
                direction,
            },
            None => *self,
        }
    }

    /// Points at distance `radius` around `self`, starting one step past the
    /// heading and ending on it: `2π i / n` for `i = 1..=n`.
    pub fn circle(&self, radius: f64, n: usize) -> impl Iterator<Item = HyperbolicPoint> + '_ {
        (1..=n).map(move |i| self.advance_rotated(radius, TAU * i as f64 / n as f64))
    }
}

impl Default for HyperbolicPoint {
    fn default() -> Self {
        Self::origin()
    }
}
