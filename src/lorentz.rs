//! Three-component vectors in Minkowski space R^{2,1}.
//!
//! The hyperboloid model places the hyperbolic plane on the upper sheet of
//!
//! ```text
//! x² + y² − z² = −1,   z > 0
//! ```
//!
//! Two bilinear forms live on the same representation and are easy to mix
//! up, so they get distinct names:
//!
//! | Form | Method | Used for |
//! |------|--------|----------|
//! | Euclidean `a·b` | [`LorentzVector::dot`] | planar geometry, display |
//! | Lorentz `⟨a,b⟩ = a.x b.x + a.y b.y − a.z b.z` | [`LorentzVector::lorentz_dot`] | hyperboloid geometry |
//!
//! Note the sign convention: the *last* coordinate is time-like. Much of the
//! literature (Nickel & Kiela 2018) puts it first; here it stays last so the
//! Poincaré projection reads `(x, y) / (z + 1)`.

use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A vector `(x, y, z)` in Minkowski space, `z` time-like.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LorentzVector<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Float> LorentzVector<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// The hyperboloid's vertex `(0, 0, 1)`, image of the planar origin.
    pub fn apex() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    /// Euclidean dot product.
    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Lorentz form `a.x b.x + a.y b.y − a.z b.z`.
    pub fn lorentz_dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y - self.z * other.z
    }

    /// `⟨v,v⟩`. Negative for time-like vectors (points), positive for
    /// space-like ones (tangent directions).
    pub fn lorentz_norm_sq(&self) -> T {
        self.lorentz_dot(self)
    }

    /// Magnitude under the Lorentz form, `sqrt(|⟨v,v⟩|)`.
    pub fn lorentz_norm(&self) -> T {
        self.lorentz_norm_sq().abs().sqrt()
    }

    /// Rescale to unit Lorentz magnitude. A null vector is returned as is.
    pub fn lorentz_normalized(&self) -> Self {
        let norm = self.lorentz_norm();
        if norm <= T::epsilon() {
            return *self;
        }
        *self / norm
    }

    /// Cross product adapted to the Lorentz form.
    ///
    /// The result is Lorentz-orthogonal to both operands, i.e.
    /// `⟨a × b, a⟩ = ⟨a × b, b⟩ = 0`. It equals the Euclidean cross product
    /// with the two space-like components negated.
    pub fn lorentz_cross(&self, other: &Self) -> Self {
        Self::new(
            self.z * other.y - self.y * other.z,
            self.x * other.z - self.z * other.x,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length of the space-like part `(x, y)`.
    pub fn planar_norm(&self) -> T {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<T: Float> Add for LorentzVector<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Float> AddAssign for LorentzVector<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Float> Sub for LorentzVector<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Float> Neg for LorentzVector<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Float> Mul<T> for LorentzVector<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Float> Div<T> for LorentzVector<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
