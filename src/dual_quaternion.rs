//! Dual quaternions as rigid motions (rotation followed by translation).

use crate::quaternion::Quaternion;
use core::fmt::{self, Display, Formatter};
use core::ops::{Add, Mul};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which parts of a [`DualQuaternion`] [`DualQuaternion::conjugate`] conjugates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Conjugate {
    /// Quaternion-conjugate both parts: `(r*, d*)`.
    Quaternion,
    /// Negate the dual part: `(r, -d)`.
    Dual,
    /// Both of the above: `(r*, -d*)`.
    DualAndQuaternion,
}

/// A dual quaternion `real + ε·dual` with `ε² = 0`.
///
/// When `real` is a unit quaternion `r` and `dual` is `½·t·r` for a pure quaternion `t`, this
/// represents the rigid motion that first rotates by `r` and then translates by `t`. All of the
/// constructors other than [`DualQuaternion::from_parts`] produce dual quaternions of that form.
///
/// Like [`Quaternion`], multiplication does not commute, and equality is exact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DualQuaternion {
    real: Quaternion,
    dual: Quaternion,
}

impl DualQuaternion {
    /// The rigid motion that does nothing.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_parts(Quaternion::identity(), Quaternion::zero())
    }

    /// Constructs a dual quaternion directly from its real and dual parts.
    ///
    /// <div class="warning">
    ///
    /// No relationship between the two parts is checked, so the result need not be a rigid
    /// motion. Prefer [`DualQuaternion::from_rotation_and_translation`].
    ///
    /// </div>
    #[must_use]
    pub fn from_parts(real: Quaternion, dual: Quaternion) -> Self {
        Self { real, dual }
    }

    /// Constructs the rigid motion that rotates by the unit quaternion `rotation` and then
    /// translates by the pure quaternion `translation`.
    #[must_use]
    pub fn from_rotation_and_translation(rotation: Quaternion, translation: Quaternion) -> Self {
        Self::from_parts(rotation, 0.5 * (translation * rotation))
    }

    /// Constructs a pure rotation.
    #[must_use]
    pub fn from_rotation(rotation: Quaternion) -> Self {
        Self::from_parts(rotation, Quaternion::zero())
    }

    /// Constructs a pure translation by the pure quaternion `translation`.
    #[must_use]
    pub fn from_translation(translation: Quaternion) -> Self {
        Self::from_parts(Quaternion::identity(), 0.5 * translation)
    }

    #[must_use]
    pub fn real(&self) -> Quaternion {
        self.real
    }

    #[must_use]
    pub fn dual(&self) -> Quaternion {
        self.dual
    }

    /// The norm of the real part.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.real.norm()
    }

    /// Scales both parts by the inverse of [`DualQuaternion::norm`].
    ///
    /// Returns `None` if the real part is zero.
    #[must_use]
    pub fn normalize(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0. {
            return None;
        }
        Some(Self::from_parts(
            Quaternion::from_raw(self.real.inner / norm),
            Quaternion::from_raw(self.dual.inner / norm),
        ))
    }

    /// Normalizes in place; returns `false` and leaves `self` untouched if the real part is zero.
    pub fn normalized(&mut self) -> bool {
        match self.normalize() {
            Some(unit) => {
                *self = unit;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn conjugate(&self, kind: Conjugate) -> Self {
        match kind {
            Conjugate::Quaternion => {
                Self::from_parts(self.real.conjugate(), self.dual.conjugate())
            }
            Conjugate::Dual => Self::from_parts(self.real, -self.dual),
            Conjugate::DualAndQuaternion => {
                Self::from_parts(self.real.conjugate(), -self.dual.conjugate())
            }
        }
    }

    /// Returns the inverse rigid motion.
    ///
    /// This is only the inverse if the real part is a unit quaternion, which holds for every
    /// dual quaternion not built with [`DualQuaternion::from_parts`].
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.conjugate(Conjugate::Quaternion)
    }

    /// Applies `offset` after `self`, ie, computes `offset * self`.
    #[must_use]
    pub fn compose(&self, offset: &Self) -> Self {
        *offset * *self
    }

    /// Applies this rigid motion to the point represented by the pure quaternion `point`.
    ///
    /// This is `r·p·r* + t` for rotation `r` and translation `t`.
    #[must_use]
    pub fn transform_translation(&self, point: &Quaternion) -> Quaternion {
        let point = Self::from_parts(Quaternion::identity(), *point);
        (*self * point * self.conjugate(Conjugate::DualAndQuaternion)).dual
    }

    /// Applies the rotational part of this rigid motion to the rotation `rotation`.
    ///
    /// This is `r·q·r*` for rotation `r`; translation does not affect rotations.
    #[must_use]
    pub fn transform_rotation(&self, rotation: &Quaternion) -> Quaternion {
        let rotation = Self::from_rotation(*rotation);
        (*self * rotation * self.conjugate(Conjugate::DualAndQuaternion)).real
    }

    /// The rotation part of this rigid motion.
    #[must_use]
    pub fn as_rotation(&self) -> Quaternion {
        self.real
    }

    /// The translation part of this rigid motion as a pure quaternion, ie, `2·dual·real*`.
    #[must_use]
    pub fn as_translation(&self) -> Quaternion {
        2. * (self.dual * self.real.conjugate())
    }

    #[must_use]
    pub fn as_rotation_and_translation(&self) -> (Quaternion, Quaternion) {
        (self.as_rotation(), self.as_translation())
    }

    /// Returns `r*·d + d*·r`, which is zero exactly when the dual part encodes a pure translation
    /// relative to the real part.
    #[must_use]
    pub fn unit_condition(&self) -> Quaternion {
        self.real.conjugate() * self.dual + self.dual.conjugate() * self.real
    }
}

impl Default for DualQuaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for DualQuaternion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DualQuaternion(real: {}, dual: {})", self.real, self.dual)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for DualQuaternion {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Quaternion::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.real.abs_diff_eq(&other.real, epsilon) && self.dual.abs_diff_eq(&other.dual, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for DualQuaternion {
    fn default_max_relative() -> Self::Epsilon {
        Quaternion::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.real.relative_eq(&other.real, epsilon, max_relative)
            && self.dual.relative_eq(&other.dual, epsilon, max_relative)
    }
}

impl Add for DualQuaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_parts(self.real + rhs.real, self.dual + rhs.dual)
    }
}

// (a.r + ε·a.d) * (b.r + ε·b.d) = a.r·b.r + ε·(a.r·b.d + a.d·b.r) since ε² = 0
impl Mul for DualQuaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_parts(
            self.real * rhs.real,
            self.real * rhs.dual + self.dual * rhs.real,
        )
    }
}

impl Mul<f64> for DualQuaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::from_parts(self.real * rhs, self.dual * rhs)
    }
}
