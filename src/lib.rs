//! This library keeps track of where things are relative to each other, for geometry problems
//! where every object (a spacecraft, an instrument on it, the body it orbits) brings its own
//! frame of reference.
//!
//! Frames live in a [`FrameTree`]. Every frame except the tree's root is defined by its pose
//! relative to a parent frame, and that pose is stored as a unit [`DualQuaternion`] (a rotation
//! followed by a translation). To answer "where is X as seen from Y", the tree finds how X and Y
//! are related (same frame, one above the other, or both below some common frame) and composes
//! the poses along the way.
//!
//! On top of the tree sit small framed values: [`Position`]s, [`Orientation`]s, and
//! [`Direction`]s. They all know which frame they are expressed in, and they share a common
//! vocabulary of operations through the traits [`Framed`], [`Transformable`], [`Translatable`],
//! [`Rotatable`], [`Invertable`], and [`Composable`].
//!
//! The underlying [`Quaternion`] and [`DualQuaternion`] algebra is exposed too, for those who
//! want to work with the numbers directly.
//!
//! # Examples
//!
//! A camera is mounted two meters along the X axis of a spacecraft and looks along the
//! spacecraft's Y axis. The spacecraft itself is one kilometer out along the root frame's Z axis,
//! and turned a quarter turn about it. Where is a point ten meters in front of the camera?
//!
//! ```
//! use reframe::{Axis, FrameTree, LengthUnit, Orientation, Transformable};
//! use approx::assert_relative_eq;
//! use uom::si::angle::degree;
//! use uom::si::f64::Angle;
//! use uom::si::length::meter;
//!
//! let mut tree = FrameTree::new();
//! let root = tree.root();
//!
//! let spacecraft = tree.insert_pose(
//!     &tree.make_translation(root, LengthUnit::Kilometer, 0., 0., 1.)?,
//!     &Orientation::from_axis_angle(root, Angle::new::<degree>(90.), Axis::Z),
//! )?;
//! let camera = tree.insert_pose(
//!     &tree.make_translation(spacecraft, LengthUnit::Meter, 2., 0., 0.)?,
//!     &Orientation::from_axis_angle(spacecraft, Angle::new::<degree>(90.), Axis::Z),
//! )?;
//!
//! // the camera looks along its own X axis
//! let target = tree.make_translation(camera, LengthUnit::Meter, 10., 0., 0.)?;
//!
//! // relative to the spacecraft, that is 2m along X and 10m along Y
//! let on_spacecraft = target.transform_to(&tree, spacecraft)?;
//! assert_relative_eq!(on_spacecraft.x().get::<meter>(), 2., epsilon = 1e-9);
//! assert_relative_eq!(on_spacecraft.y().get::<meter>(), 10., epsilon = 1e-9);
//!
//! // and the spacecraft is turned, so in the root frame X and Y swap around
//! let in_root = target.transform_to(&tree, root)?;
//! assert_relative_eq!(in_root.x().get::<meter>(), -10., epsilon = 1e-9);
//! assert_relative_eq!(in_root.y().get::<meter>(), 2., epsilon = 1e-9);
//! assert_relative_eq!(in_root.z().get::<meter>(), 1000., epsilon = 1e-9);
//! # Ok::<(), reframe::FrameError>(())
//! ```
//!
//! When the spacecraft moves, [`FrameTree::replace`] swaps in its new pose. Everything that
//! refers to the spacecraft (or the camera) by [`FrameId`] sees the new pose on its next read,
//! and [`FrameTree::generation`] tells dependents that something changed.

mod direction;
mod dual_quaternion;
mod error;
mod frame;
mod orientation;
mod position;
mod quaternion;
mod traits;
mod units;

pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type RawQuaternion = nalgebra::Quaternion<f64>;
#[cfg(test)]
pub(crate) type UnitQuaternion = nalgebra::UnitQuaternion<f64>;

pub use direction::Direction;
pub use dual_quaternion::{Conjugate, DualQuaternion};
pub use error::FrameError;
pub use frame::{Ancestors, Axis, Frame, FrameId, FrameTree};
pub use orientation::{Orientation, RotationConvention};
pub use position::Position;
pub use quaternion::{Quaternion, DEFAULT_EPSILON};
pub use traits::{Composable, Framed, Invertable, Rotatable, Transformable, Translatable};
pub use units::{AngleUnit, LengthUnit};
