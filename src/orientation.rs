use crate::direction::Direction;
use crate::error::FrameError;
use crate::frame::{Axis, Frame, FrameId, FrameTree};
use crate::quaternion::Quaternion;
use crate::traits::{Composable, Framed, Invertable, Rotatable, Transformable};
use crate::units::AngleUnit;
use core::fmt::{self, Display, Formatter};
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The order in which [`Orientation::from_angles`] applies its three angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RotationConvention {
    /// About X, then Y, then Z, all of the original frame (roll, pitch, yaw).
    FixedXyz,
    /// About Z, then the rotated Y, then the twice-rotated X (yaw, pitch, roll).
    ///
    /// Gives the same rotation as [`RotationConvention::FixedXyz`] with the angles reversed.
    EulerZyx,
}

/// The rotation of a set of axes relative to the axes of a frame.
///
/// Always a unit quaternion. Deserializing normalizes the stored quaternion, and fails if it
/// is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "UncheckedOrientation"))]
pub struct Orientation {
    frame: FrameId,
    quat: Quaternion,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct UncheckedOrientation {
    frame: FrameId,
    quat: Quaternion,
}

#[cfg(feature = "serde")]
impl TryFrom<UncheckedOrientation> for Orientation {
    type Error = &'static str;

    fn try_from(unchecked: UncheckedOrientation) -> Result<Self, Self::Error> {
        Self::from_quaternion(unchecked.frame, unchecked.quat)
            .ok_or("the zero quaternion is not an orientation")
    }
}

impl Orientation {
    /// The rotation by `angle` about `direction` (right-hand rule).
    ///
    /// `direction` is taken as given in `frame`, whatever frame it is attached to. Use
    /// [`FrameTree::make_rotation`] to reframe it first.
    #[must_use]
    pub fn new(frame: FrameId, angle: impl Into<Angle>, direction: &Direction) -> Self {
        Self::from_unit_quaternion(
            frame,
            Quaternion::from_angle_direction(angle, direction.to_array()),
        )
    }

    #[must_use]
    pub fn from_axis_angle(frame: FrameId, angle: impl Into<Angle>, axis: Axis) -> Self {
        Self::from_unit_quaternion(
            frame,
            Quaternion::from_angle_direction(angle, axis.unit_vector()),
        )
    }

    /// No rotation at all: axes aligned with those of `frame`.
    #[must_use]
    pub fn aligned(frame: FrameId) -> Self {
        Self::from_unit_quaternion(frame, Quaternion::identity())
    }

    /// Normalizes `quaternion` into an orientation, or returns `None` if it is zero.
    ///
    /// Quaternions that are already unit are taken as they are.
    #[must_use]
    pub fn from_quaternion(frame: FrameId, quaternion: Quaternion) -> Option<Self> {
        if quaternion.is_unit() {
            return Some(Self::from_unit_quaternion(frame, quaternion));
        }
        Some(Self::from_unit_quaternion(frame, quaternion.normalize()?))
    }

    pub(crate) fn from_unit_quaternion(frame: FrameId, quat: Quaternion) -> Self {
        Self { frame, quat }
    }

    /// Constructs an orientation from three angles in `unit`, applied per `convention`.
    ///
    /// ```
    /// use reframe::{AngleUnit, FrameId, Orientation, RotationConvention};
    /// use approx::assert_relative_eq;
    ///
    /// let roll_pitch_yaw = Orientation::from_angles(
    ///     FrameId::ROOT, RotationConvention::FixedXyz, AngleUnit::Degree, 10., 20., 30.,
    /// );
    /// let yaw_pitch_roll = Orientation::from_angles(
    ///     FrameId::ROOT, RotationConvention::EulerZyx, AngleUnit::Degree, 30., 20., 10.,
    /// );
    /// assert_relative_eq!(roll_pitch_yaw, yaw_pitch_roll);
    /// ```
    #[must_use]
    pub fn from_angles(
        frame: FrameId,
        convention: RotationConvention,
        unit: AngleUnit,
        first: f64,
        second: f64,
        third: f64,
    ) -> Self {
        let (first, second, third) = (unit.angle(first), unit.angle(second), unit.angle(third));
        let quat = match convention {
            RotationConvention::FixedXyz => Quaternion::from_fixed_xyz_angles(first, second, third),
            RotationConvention::EulerZyx => Quaternion::from_euler_zyx_angles(first, second, third),
        };
        Self::from_unit_quaternion(frame, quat)
    }

    /// See [`Quaternion::to_fixed_xyz_angles`].
    #[must_use]
    pub fn to_fixed_xyz_angles(&self) -> (Angle, Angle, Angle) {
        self.quat.to_fixed_xyz_angles()
    }

    /// See [`Quaternion::to_euler_zyx_angles`].
    #[must_use]
    pub fn to_euler_zyx_angles(&self) -> (Angle, Angle, Angle) {
        self.quat.to_euler_zyx_angles()
    }

    /// The angle of this rotation, and the axis it is about.
    ///
    /// The axis is `None` when the angle is zero.
    #[must_use]
    pub fn to_angle_direction(&self) -> (Angle, Option<Direction>) {
        let (angle, [x, y, z]) = self
            .quat
            .as_angle_direction()
            .expect("orientations are always unit quaternions");
        (angle, Direction::new(self.frame, x, y, z))
    }

    /// The smallest angle through which this orientation must be turned to reach `other`,
    /// which may be in any frame of `tree`.
    pub fn angle_to(&self, tree: &FrameTree, other: &Self) -> Result<Angle, FrameError> {
        let other = other.transform_to(tree, self.frame)?;
        let between = other.quat * self.quat.conjugate();
        // q and -q are the same rotation; take the short way round
        let between = if between.q0() < 0. { -between } else { between };
        let (angle, _) = between
            .as_angle_direction()
            .expect("products of unit quaternions are non-zero");
        Ok(angle)
    }

    #[must_use]
    pub fn quaternion(&self) -> Quaternion {
        self.quat
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.quat, self.frame)
    }
}

impl Framed for Orientation {
    fn frame(&self) -> FrameId {
        self.frame
    }
}

impl Invertable for Orientation {
    fn inverse(&self) -> Self {
        Self::from_unit_quaternion(self.frame, self.quat.conjugate())
    }
}

impl Transformable for Orientation {
    fn transform_to(&self, tree: &FrameTree, frame: FrameId) -> Result<Self, FrameError> {
        let there = tree.transform_value(&Frame::from_orientation(self), frame)?;
        Ok(Self::from_unit_quaternion(frame, there.offset().as_rotation()))
    }

    fn transform_by(&self, tree: &FrameTree, by: &Frame) -> Result<Self, FrameError> {
        let moved = Frame::from_orientation(self).transform_by(tree, by)?;
        Ok(Self::from_unit_quaternion(self.frame, moved.offset().as_rotation()))
    }
}

impl Rotatable for Orientation {
    fn rotate(&self, tree: &FrameTree, offset: &Orientation) -> Result<Self, FrameError> {
        self.transform_by(tree, &Frame::from_orientation(offset))
    }
}

impl Composable for Orientation {
    fn compose(&self, tree: &FrameTree, offset: &Self) -> Result<Self, FrameError> {
        let offset = offset.transform_to(tree, self.frame)?;
        Ok(Self::from_unit_quaternion(
            self.frame,
            self.quat.compose(&offset.quat),
        ))
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Orientation {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.frame == other.frame && self.quat.abs_diff_eq(&other.quat, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Orientation {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.frame == other.frame && self.quat.relative_eq(&other.quat, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::{Orientation, RotationConvention};
    use crate::direction::Direction;
    use crate::frame::{Axis, FrameTree};
    use crate::position::Position;
    use crate::quaternion::Quaternion;
    use crate::traits::{Composable, Framed, Invertable, Rotatable, Transformable};
    use crate::units::{AngleUnit, LengthUnit};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rstest::rstest;
    use uom::si::angle::degree;
    use uom::si::f64::Angle;

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[rstest]
    #[case(AngleUnit::Degree, [90., 0., 0.])]
    #[case(AngleUnit::Radian, [core::f64::consts::FRAC_PI_2, 0., 0.])]
    #[case(AngleUnit::Revolution, [0.25, 0., 0.])]
    fn from_angles_in_any_unit(#[case] unit: AngleUnit, #[case] angles: [f64; 3]) {
        let root = FrameTree::new().root();
        let [first, second, third] = angles;
        let orientation =
            Orientation::from_angles(root, RotationConvention::FixedXyz, unit, first, second, third);
        assert_relative_eq!(
            orientation,
            Orientation::from_axis_angle(root, d(90.), Axis::X),
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(10., 20., 30.)]
    #[case(-170., 45., 5.)]
    #[case(0., -89., 120.)]
    fn angles_round_trip(#[case] roll: f64, #[case] pitch: f64, #[case] yaw: f64) {
        let root = FrameTree::new().root();
        let orientation = Orientation::from_angles(
            root,
            RotationConvention::EulerZyx,
            AngleUnit::Degree,
            yaw,
            pitch,
            roll,
        );
        let (z, y, x) = orientation.to_euler_zyx_angles();
        assert_abs_diff_eq!(z.get::<degree>(), yaw, epsilon = 1e-9);
        assert_abs_diff_eq!(y.get::<degree>(), pitch, epsilon = 1e-9);
        assert_abs_diff_eq!(x.get::<degree>(), roll, epsilon = 1e-9);

        let (x, _, z) = orientation.to_fixed_xyz_angles();
        assert_abs_diff_eq!(x.get::<degree>(), roll, epsilon = 1e-9);
        assert_abs_diff_eq!(z.get::<degree>(), yaw, epsilon = 1e-9);
    }

    #[test]
    fn constructors_agree() {
        let root = FrameTree::new().root();
        let up = Direction::from_axis(root, Axis::Z);
        assert_eq!(
            Orientation::new(root, d(30.), &up),
            Orientation::from_axis_angle(root, d(30.), Axis::Z)
        );
        assert_eq!(
            Orientation::from_quaternion(root, Quaternion::new(2., 0., 0., 0.)),
            Some(Orientation::aligned(root))
        );
        assert_eq!(Orientation::from_quaternion(root, Quaternion::zero()), None);
    }

    #[test]
    fn angle_direction() {
        let root = FrameTree::new().root();
        let (angle, axis) = Orientation::from_axis_angle(root, d(60.), Axis::Y).to_angle_direction();
        assert_abs_diff_eq!(angle.get::<degree>(), 60., epsilon = 1e-9);
        let axis = axis.expect("non-zero rotation has an axis");
        assert_abs_diff_eq!(axis, Direction::from_axis(root, Axis::Y), epsilon = 1e-12);

        let (angle, axis) = Orientation::aligned(root).to_angle_direction();
        assert_eq!(angle.get::<degree>(), 0.);
        assert!(axis.is_none());
    }

    #[test]
    fn rotate_and_compose_apply_offset_last() {
        let tree = FrameTree::new();
        let root = tree.root();
        let about_x = Orientation::from_axis_angle(root, d(90.), Axis::X);
        let about_z = Orientation::from_axis_angle(root, d(90.), Axis::Z);

        let rotated = about_x.rotate(&tree, &about_z).unwrap();
        let composed = about_x.compose(&tree, &about_z).unwrap();
        let expected = about_z.quaternion() * about_x.quaternion();
        assert_abs_diff_eq!(rotated.quaternion(), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(composed.quaternion(), expected, epsilon = 1e-12);

        // first X then Z sends Y to Z, then Z stays put
        let y = Quaternion::from_vector(0., 1., 0.);
        assert_abs_diff_eq!(
            y.rotate(&composed.quaternion()),
            Quaternion::from_vector(0., 0., 1.),
            epsilon = 1e-12
        );

        let mut in_place = about_x;
        in_place.rotated(&tree, &about_z).unwrap();
        assert_eq!(in_place, rotated);
    }

    #[test]
    fn inverse_composes_to_aligned() {
        let tree = FrameTree::new();
        let root = tree.root();
        let orientation = Orientation::from_angles(
            root,
            RotationConvention::FixedXyz,
            AngleUnit::Degree,
            12.,
            -40.,
            77.,
        );
        let undone = orientation.compose(&tree, &orientation.inverse()).unwrap();
        assert_relative_eq!(undone, Orientation::aligned(root), epsilon = 1e-12);
    }

    #[test]
    fn transform_through_rotated_frame() {
        let mut tree = FrameTree::new();
        let root = tree.root();
        let turned = tree
            .insert_pose(
                &Position::new(root, LengthUnit::Meter, 5., 5., 5.),
                &Orientation::from_axis_angle(root, d(90.), Axis::Z),
            )
            .unwrap();

        // being aligned with a turned frame means being turned relative to its parent;
        // translations don't matter
        let aligned = Orientation::aligned(turned);
        let in_root = aligned.transform_to(&tree, root).unwrap();
        assert_eq!(in_root.frame(), root);
        assert_relative_eq!(
            in_root,
            Orientation::from_axis_angle(root, d(90.), Axis::Z),
            epsilon = 1e-12
        );

        let mut back = in_root;
        back.transformed_to(&tree, turned).unwrap();
        assert_relative_eq!(back, aligned, epsilon = 1e-12);
    }

    #[test]
    fn angle_between_orientations() {
        let mut tree = FrameTree::new();
        let root = tree.root();
        let up = Direction::from_axis(root, Axis::Z);
        let turned = tree.insert_rotation(root, d(30.), &up).unwrap();

        let here = Orientation::aligned(root);
        let there = Orientation::from_axis_angle(turned, d(30.), Axis::Z);
        assert_abs_diff_eq!(
            here.angle_to(&tree, &there).unwrap().get::<degree>(),
            60.,
            epsilon = 1e-9
        );
        // going the long way round is never reported
        let far = Orientation::from_axis_angle(root, d(300.), Axis::Z);
        assert_abs_diff_eq!(
            here.angle_to(&tree, &far).unwrap().get::<degree>(),
            60.,
            epsilon = 1e-9
        );
    }

    #[test]
    fn display() {
        let root = FrameTree::new().root();
        insta::assert_snapshot!(Orientation::aligned(root), @"Quaternion(1, 0, 0, 0) in root frame");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let root = FrameTree::new().root();
        let orientation = Orientation::from_axis_angle(root, d(45.), Axis::X);
        let ser = serde_yaml::to_string(&orientation).unwrap();
        let de = serde_yaml::from_str::<Orientation>(&ser).unwrap();
        assert_eq!(de, orientation);

        let ser = serde_yaml::to_string(&RotationConvention::EulerZyx).unwrap();
        assert_eq!(ser.trim(), "euler_zyx");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_normalizes_or_rejects() {
        let root = FrameTree::new().root();
        let scaled = serde_yaml::from_str::<Orientation>("frame: 0\nquat: [2.0, 2.0, 2.0, 2.0]")
            .unwrap();
        assert_eq!(
            Some(scaled),
            Orientation::from_quaternion(root, Quaternion::new(2., 2., 2., 2.))
        );
        assert!(scaled.quaternion().is_unit());

        assert!(
            serde_yaml::from_str::<Orientation>("frame: 0\nquat: [0.0, 0.0, 0.0, 0.0]").is_err()
        );
    }
}
