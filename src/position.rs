use crate::error::FrameError;
use crate::frame::{Frame, FrameId, FrameTree};
use crate::orientation::Orientation;
use crate::quaternion::Quaternion;
use crate::traits::{Composable, Framed, Invertable, Rotatable, Transformable, Translatable};
use crate::units::LengthUnit;
use crate::Vector3;
use core::fmt::{self, Display, Formatter};
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point relative to the origin of a frame.
///
/// The coordinates are stored in meters; `unit` is only the unit the position prefers to be
/// reported in, and it is carried along unchanged through transforms. Two positions are equal
/// if they are in the same frame and describe the same point, whatever their units.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    frame: FrameId,
    unit: LengthUnit,
    inner: Vector3,
}

impl Position {
    /// Constructs the point `(x, y, z)`, with each coordinate given in `unit`.
    ///
    /// This does not check that `frame` belongs to any particular tree; use
    /// [`FrameTree::make_translation`] for that.
    #[must_use]
    pub fn new(frame: FrameId, unit: LengthUnit, x: f64, y: f64, z: f64) -> Self {
        let to_meters = |v| LengthUnit::convert(v, unit, LengthUnit::Meter);
        Self {
            frame,
            unit,
            inner: Vector3::new(to_meters(x), to_meters(y), to_meters(z)),
        }
    }

    /// Constructs a point from typed lengths. The result reports in meters.
    #[must_use]
    pub fn from_cartesian(
        frame: FrameId,
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Self {
        Self {
            frame,
            unit: LengthUnit::Meter,
            inner: Vector3::new(
                x.into().get::<meter>(),
                y.into().get::<meter>(),
                z.into().get::<meter>(),
            ),
        }
    }

    /// `translation` is a pure quaternion in meters.
    pub(crate) fn from_quaternion(frame: FrameId, unit: LengthUnit, translation: Quaternion) -> Self {
        Self {
            frame,
            unit,
            inner: translation.vector3(),
        }
    }

    /// The same point, reported in `unit` instead.
    #[must_use]
    pub fn with_unit(self, unit: LengthUnit) -> Self {
        Self { unit, ..self }
    }

    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.inner.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.inner.y)
    }

    #[must_use]
    pub fn z(&self) -> Length {
        Length::new::<meter>(self.inner.z)
    }

    /// The coordinates as typed lengths.
    #[must_use]
    pub fn to_cartesian(&self) -> [Length; 3] {
        [self.x(), self.y(), self.z()]
    }

    /// The coordinates as plain numbers in this position's [unit](Position::unit).
    #[must_use]
    pub fn components(&self) -> [f64; 3] {
        let from_meters = |v| LengthUnit::convert(v, LengthUnit::Meter, self.unit);
        [
            from_meters(self.inner.x),
            from_meters(self.inner.y),
            from_meters(self.inner.z),
        ]
    }

    /// The distance from the origin of this position's frame.
    #[must_use]
    pub fn norm(&self) -> Length {
        Length::new::<meter>(self.inner.norm())
    }

    /// The distance between this point and `other`, which may be in any frame of `tree`.
    pub fn distance_to(&self, tree: &FrameTree, other: &Self) -> Result<Length, FrameError> {
        let other = other.transform_to(tree, self.frame)?;
        Ok(Length::new::<meter>((self.inner - other.inner).norm()))
    }

    /// This point as a pure quaternion, in meters.
    #[must_use]
    pub fn quaternion(&self) -> Quaternion {
        Quaternion::from_vector3(self.inner)
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.frame == other.frame && self.inner == other.inner
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.components();
        write!(f, "({x}, {y}, {z}) {} in {}", self.unit, self.frame)
    }
}

impl Framed for Position {
    fn frame(&self) -> FrameId {
        self.frame
    }
}

impl Invertable for Position {
    fn inverse(&self) -> Self {
        Self {
            inner: -self.inner,
            ..*self
        }
    }
}

impl Transformable for Position {
    fn transform_to(&self, tree: &FrameTree, frame: FrameId) -> Result<Self, FrameError> {
        let there = tree.transform_value(&Frame::from_position(self), frame)?;
        Ok(Self::from_quaternion(
            frame,
            self.unit,
            there.offset().as_translation(),
        ))
    }

    fn transform_by(&self, tree: &FrameTree, by: &Frame) -> Result<Self, FrameError> {
        Ok(Frame::from_position(self).transform_by(tree, by)?.position())
    }
}

impl Translatable for Position {
    fn translate(&self, tree: &FrameTree, offset: &Position) -> Result<Self, FrameError> {
        self.transform_by(tree, &Frame::from_position(offset))
    }
}

impl Rotatable for Position {
    fn rotate(&self, tree: &FrameTree, offset: &Orientation) -> Result<Self, FrameError> {
        self.transform_by(tree, &Frame::from_orientation(offset))
    }
}

impl Composable for Position {
    fn compose(&self, tree: &FrameTree, offset: &Self) -> Result<Self, FrameError> {
        let offset = offset.transform_to(tree, self.frame)?;
        Ok(Self {
            inner: self.inner + offset.inner,
            ..*self
        })
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Position {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.frame == other.frame && self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Position {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.frame == other.frame && self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}
