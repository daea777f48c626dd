use crate::dual_quaternion::DualQuaternion;
use crate::error::FrameError;
use crate::frame::{Axis, Frame, FrameId, FrameTree};
use crate::orientation::Orientation;
use crate::quaternion::Quaternion;
use crate::traits::{Framed, Invertable, Rotatable, Transformable};
use crate::units::LengthUnit;
use crate::Vector3;
use core::fmt::{self, Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit vector relative to the axes of a frame.
///
/// Directions have no origin, so moving one with a rigid motion only applies the motion's
/// rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Direction {
    frame: FrameId,
    inner: Vector3,
}

impl Direction {
    /// The direction of the vector `(x, y, z)`.
    ///
    /// Returns `None` if the vector is zero or not finite, since it then has no direction.
    #[must_use]
    pub fn new(frame: FrameId, x: f64, y: f64, z: f64) -> Option<Self> {
        let v = Vector3::new(x, y, z);
        let norm = v.norm();
        if norm == 0. || !norm.is_finite() {
            return None;
        }
        Some(Self {
            frame,
            inner: v / norm,
        })
    }

    #[must_use]
    pub fn from_axis(frame: FrameId, axis: Axis) -> Self {
        Self {
            frame,
            inner: Vector3::from(axis.unit_vector()),
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.inner.x, self.inner.y, self.inner.z]
    }

    /// The angle between this direction and `other`, which may be in any frame of `tree`.
    pub fn angle_to(&self, tree: &FrameTree, other: &Self) -> Result<Angle, FrameError> {
        let other = other.transform_to(tree, self.frame)?;
        let cos = self.inner.dot(&other.inner).clamp(-1., 1.);
        Ok(Angle::new::<radian>(cos.acos()))
    }

    fn rotated_by(&self, frame: FrameId, rotation: &Quaternion) -> Self {
        let v = Quaternion::from_vector3(self.inner).rotate(rotation);
        Self {
            frame,
            inner: v.vector3(),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.to_array();
        write!(f, "[{x}, {y}, {z}] in {}", self.frame)
    }
}

impl Framed for Direction {
    fn frame(&self) -> FrameId {
        self.frame
    }
}

impl Invertable for Direction {
    fn inverse(&self) -> Self {
        Self {
            frame: self.frame,
            inner: -self.inner,
        }
    }
}

impl Transformable for Direction {
    fn transform_to(&self, tree: &FrameTree, frame: FrameId) -> Result<Self, FrameError> {
        let axes = Frame::new(self.frame, LengthUnit::Meter, DualQuaternion::identity());
        let there = tree.transform_value(&axes, frame)?;
        Ok(self.rotated_by(frame, &there.offset().as_rotation()))
    }

    fn transform_by(&self, tree: &FrameTree, by: &Frame) -> Result<Self, FrameError> {
        let that = tree.transform_value(by, self.frame)?;
        Ok(self.rotated_by(self.frame, &that.offset().as_rotation()))
    }
}

impl Rotatable for Direction {
    fn rotate(&self, tree: &FrameTree, offset: &Orientation) -> Result<Self, FrameError> {
        self.transform_by(tree, &Frame::from_orientation(offset))
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Direction {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.frame == other.frame && self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Direction {
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

#[cfg(test)]
mod tests {
    use super::Direction;
    use crate::dual_quaternion::DualQuaternion;
    use crate::frame::{Axis, Frame, FrameTree};
    use crate::orientation::Orientation;
    use crate::quaternion::Quaternion;
    use crate::traits::{Framed, Invertable, Rotatable, Transformable};
    use crate::units::LengthUnit;
    use approx::assert_abs_diff_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::angle::degree;
    use uom::si::f64::Angle;

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[rstest]
    #[case([3., 0., 4.], Some([0.6, 0., 0.8]))]
    #[case([0., -2., 0.], Some([0., -1., 0.]))]
    #[case([0., 0., 0.], None)]
    #[case([f64::NAN, 0., 1.], None)]
    #[case([f64::INFINITY, 0., 1.], None)]
    fn construction(#[case] xyz: [f64; 3], #[case] expected: Option<[f64; 3]>) {
        let root = FrameTree::new().root();
        let [x, y, z] = xyz;
        assert_eq!(Direction::new(root, x, y, z).map(|d| d.to_array()), expected);
    }

    #[test]
    fn inverse_points_the_other_way() {
        let root = FrameTree::new().root();
        let east = Direction::from_axis(root, Axis::Y);
        let west = east.inverse();
        assert_eq!(west.frame(), root);
        assert_eq!(west.to_array(), [0., -1., 0.]);
    }

    #[test]
    fn rigid_motions_only_rotate() {
        let mut tree = FrameTree::new();
        let root = tree.root();
        let moved = tree
            .insert(Frame::new(
                root,
                LengthUnit::Meter,
                DualQuaternion::from_rotation_and_translation(
                    Quaternion::from_angle_direction(d(90.), [0., 0., 1.]),
                    Quaternion::from_vector(100., -50., 3.),
                ),
            ))
            .unwrap();

        let forward = Direction::from_axis(moved, Axis::X);
        let in_root = forward.transform_to(&tree, root).unwrap();
        assert_abs_diff_eq!(in_root, Direction::from_axis(root, Axis::Y), epsilon = 1e-12);

        let mut back = in_root;
        back.transformed_to(&tree, moved).unwrap();
        assert_abs_diff_eq!(back, forward, epsilon = 1e-12);

        // moving by a rigid motion ignores its translation too
        let north = Direction::from_axis(root, Axis::X);
        let by = *tree.get(moved).unwrap();
        assert_abs_diff_eq!(
            north.transform_by(&tree, &by).unwrap(),
            Direction::from_axis(root, Axis::Y),
            epsilon = 1e-12
        );
    }

    #[test]
    fn rotate() {
        let tree = FrameTree::new();
        let root = tree.root();
        let quarter = Orientation::from_axis_angle(root, d(90.), Axis::X);
        let mut up = Direction::from_axis(root, Axis::Y);
        up.rotated(&tree, &quarter).unwrap();
        assert_abs_diff_eq!(up, Direction::from_axis(root, Axis::Z), epsilon = 1e-12);
    }

    #[rstest]
    #[case(Axis::X, Axis::X, 0.)]
    #[case(Axis::X, Axis::Y, 90.)]
    #[case(Axis::Z, Axis::Y, 90.)]
    fn angle_between_axes(#[case] a: Axis, #[case] b: Axis, #[case] degrees: f64) {
        let tree = FrameTree::new();
        let root = tree.root();
        let a = Direction::from_axis(root, a);
        let b = Direction::from_axis(root, b);
        assert_abs_diff_eq!(
            a.angle_to(&tree, &b).unwrap().get::<degree>(),
            degrees,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            a.angle_to(&tree, &b.inverse()).unwrap().get::<degree>(),
            180. - degrees,
            epsilon = 1e-12
        );
    }

    quickcheck! {
        fn stays_unit_length(v: Quaternion, q: Quaternion) -> bool {
            let tree = FrameTree::new();
            let root = tree.root();
            let (Some(direction), Some(rotation)) = (
                Direction::new(root, v.q1(), v.q2(), v.q3()),
                Orientation::from_quaternion(root, q),
            ) else {
                return true;
            };
            let rotated = direction.rotate(&tree, &rotation).unwrap();
            let [x, y, z] = rotated.to_array();
            ((x * x + y * y + z * z).sqrt() - 1.).abs() < 1e-12
        }
    }

    #[test]
    fn display() {
        let root = FrameTree::new().root();
        insta::assert_snapshot!(Direction::from_axis(root, Axis::Z), @"[0, 0, 1] in root frame");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let root = FrameTree::new().root();
        let direction = Direction::new(root, 1., 2., 3.).unwrap();
        let ser = serde_yaml::to_string(&direction).unwrap();
        let de = serde_yaml::from_str::<Direction>(&ser).unwrap();
        assert_eq!(de, direction);
    }
}
