//! Runtime-selectable length and angle units.
//!
//! [`uom`] tracks units in the type system, which is what you want for quantities, but a frame
//! also needs to remember which unit its user _prefers_ to see positions in. These enums are that
//! runtime choice, and every conversion between them goes through the corresponding `uom`
//! quantity so that the conversion factors are never written down twice.

use core::fmt::{self, Display, Formatter};
use uom::si::f64::{Angle, Length};
use uom::si::{angle, length};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit of length that frames and positions can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthUnit {
    #[default]
    Meter,
    Kilometer,
    Centimeter,
    Millimeter,
    Foot,
    Mile,
    /// The astronomical unit as `uom` defines it, 1.495979 × 10¹¹ m.
    ///
    /// That is rounded: the IAU 2012 value is exactly 149 597 870 700 m, so this unit is
    /// about 29.3 km longer.
    AstronomicalUnit,
}

impl LengthUnit {
    /// Interprets `value` as a length in this unit.
    #[must_use]
    pub fn length(self, value: f64) -> Length {
        match self {
            Self::Meter => Length::new::<length::meter>(value),
            Self::Kilometer => Length::new::<length::kilometer>(value),
            Self::Centimeter => Length::new::<length::centimeter>(value),
            Self::Millimeter => Length::new::<length::millimeter>(value),
            Self::Foot => Length::new::<length::foot>(value),
            Self::Mile => Length::new::<length::mile>(value),
            Self::AstronomicalUnit => Length::new::<length::astronomical_unit>(value),
        }
    }

    /// Returns the numeric value of `length` when expressed in this unit.
    #[must_use]
    pub fn value_of(self, length: Length) -> f64 {
        match self {
            Self::Meter => length.get::<length::meter>(),
            Self::Kilometer => length.get::<length::kilometer>(),
            Self::Centimeter => length.get::<length::centimeter>(),
            Self::Millimeter => length.get::<length::millimeter>(),
            Self::Foot => length.get::<length::foot>(),
            Self::Mile => length.get::<length::mile>(),
            Self::AstronomicalUnit => length.get::<length::astronomical_unit>(),
        }
    }

    /// Converts `value` from unit `from` into unit `to`.
    #[must_use]
    pub fn convert(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.value_of(from.length(value))
    }
}

impl Display for LengthUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let abbreviation = match self {
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
            Self::Foot => "ft",
            Self::Mile => "mi",
            Self::AstronomicalUnit => "au",
        };
        f.write_str(abbreviation)
    }
}

/// A unit of plane angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AngleUnit {
    #[default]
    Radian,
    Degree,
    Revolution,
}

impl AngleUnit {
    /// Interprets `value` as an angle in this unit.
    #[must_use]
    pub fn angle(self, value: f64) -> Angle {
        match self {
            Self::Radian => Angle::new::<angle::radian>(value),
            Self::Degree => Angle::new::<angle::degree>(value),
            Self::Revolution => Angle::new::<angle::revolution>(value),
        }
    }

    /// Returns the numeric value of `angle` when expressed in this unit.
    #[must_use]
    pub fn value_of(self, angle: Angle) -> f64 {
        match self {
            Self::Radian => angle.get::<angle::radian>(),
            Self::Degree => angle.get::<angle::degree>(),
            Self::Revolution => angle.get::<angle::revolution>(),
        }
    }

    /// Converts `value` from unit `from` into unit `to`.
    #[must_use]
    pub fn convert(value: f64, from: Self, to: Self) -> f64 {
        if from == to {
            return value;
        }
        to.value_of(from.angle(value))
    }
}

impl Display for AngleUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let abbreviation = match self {
            Self::Radian => "rad",
            Self::Degree => "°",
            Self::Revolution => "rev",
        };
        f.write_str(abbreviation)
    }
}
