//! Hamilton quaternions as used for rotations and pure spatial vectors.

use crate::{RawQuaternion, Vector3};
use core::fmt::{self, Display, Formatter};
use core::ops::{Add, Mul, Neg, Sub};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The tolerance used by [`Quaternion::is_unit`], [`Quaternion::is_zero`], and
/// [`Quaternion::is_pure`].
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// A quaternion `q0 + q1·i + q2·j + q3·k`.
///
/// A quaternion with unit norm represents a rotation, and a quaternion with a zero scalar part
/// (`q0`) represents a spatial vector (a "pure" quaternion). Multiplication is the
/// non-commutative [Hamilton product].
///
/// Equality (`==`) compares components exactly. Use the `is_*` predicates or the `approx` traits
/// when numerical error is expected.
///
/// [Hamilton product]: https://en.wikipedia.org/wiki/Quaternion#Hamilton_product
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Quaternion {
    pub(crate) inner: RawQuaternion,
}

impl Quaternion {
    /// Constructs a quaternion from its scalar part `q0` and its vector part `[q1, q2, q3]`.
    #[must_use]
    pub fn new(q0: f64, q1: f64, q2: f64, q3: f64) -> Self {
        Self {
            inner: RawQuaternion::new(q0, q1, q2, q3),
        }
    }

    /// The multiplicative identity, which is also the "no rotation" rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1., 0., 0., 0.)
    }

    /// The additive identity.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0., 0., 0., 0.)
    }

    /// Constructs the pure quaternion `(0, x, y, z)` representing a spatial vector.
    #[must_use]
    pub fn from_vector(x: f64, y: f64, z: f64) -> Self {
        Self::new(0., x, y, z)
    }

    pub(crate) fn from_raw(inner: RawQuaternion) -> Self {
        Self { inner }
    }

    pub(crate) fn from_vector3(v: Vector3) -> Self {
        Self::from_vector(v.x, v.y, v.z)
    }

    #[must_use]
    pub fn q0(&self) -> f64 {
        self.inner.w
    }

    #[must_use]
    pub fn q1(&self) -> f64 {
        self.inner.i
    }

    #[must_use]
    pub fn q2(&self) -> f64 {
        self.inner.j
    }

    #[must_use]
    pub fn q3(&self) -> f64 {
        self.inner.k
    }

    /// The scalar (real) part, `q0`.
    #[must_use]
    pub fn scalar(&self) -> f64 {
        self.inner.w
    }

    /// The vector (imaginary) part, `[q1, q2, q3]`.
    #[must_use]
    pub fn vector(&self) -> [f64; 3] {
        [self.inner.i, self.inner.j, self.inner.k]
    }

    pub(crate) fn vector3(&self) -> Vector3 {
        self.inner.imag()
    }

    /// Returns the components as `[q0, q1, q2, q3]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 4] {
        [self.q0(), self.q1(), self.q2(), self.q3()]
    }

    /// The Euclidean norm over all four components.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    /// The four-dimensional dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(&other.inner)
    }

    /// Negates the vector part.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::from_raw(self.inner.conjugate())
    }

    /// Returns the multiplicative inverse `conjugate / dot(self, self)`.
    ///
    /// Returns `None` for the zero quaternion, which has no inverse.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let dot = self.dot(self);
        if dot == 0. {
            return None;
        }
        Some(Self::from_raw(self.conjugate().inner / dot))
    }

    /// Returns this quaternion scaled to unit norm.
    ///
    /// Returns `None` if the norm is zero.
    #[must_use]
    pub fn normalize(&self) -> Option<Self> {
        let norm = self.norm();
        if norm == 0. {
            return None;
        }
        Some(Self::from_raw(self.inner / norm))
    }

    /// Normalizes this quaternion in place.
    ///
    /// Returns `false`, and leaves `self` untouched, if the norm is zero.
    pub fn normalized(&mut self) -> bool {
        match self.normalize() {
            Some(unit) => {
                *self = unit;
                true
            }
            None => false,
        }
    }

    /// Is the norm within [`DEFAULT_EPSILON`] of one?
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.is_unit_within(DEFAULT_EPSILON)
    }

    #[must_use]
    pub fn is_unit_within(&self, epsilon: f64) -> bool {
        let norm = self.norm();
        1. - epsilon <= norm && norm <= 1. + epsilon
    }

    /// Is the norm within [`DEFAULT_EPSILON`] of zero?
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.is_zero_within(DEFAULT_EPSILON)
    }

    #[must_use]
    pub fn is_zero_within(&self, epsilon: f64) -> bool {
        self.norm() <= epsilon
    }

    /// Is the scalar part within [`DEFAULT_EPSILON`] of zero?
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.is_pure_within(DEFAULT_EPSILON)
    }

    #[must_use]
    pub fn is_pure_within(&self, epsilon: f64) -> bool {
        self.q0().abs() <= epsilon
    }

    /// Applies `offset` after `self`, ie, computes `offset * self`.
    ///
    /// For rotations, this yields the rotation that first rotates by `self` and then by `offset`.
    #[must_use]
    pub fn compose(&self, offset: &Self) -> Self {
        *offset * *self
    }

    /// Rotates the vector represented by this pure quaternion by the rotation `by`.
    ///
    /// Computes `by * self * conjugate(by)`. `self` is expected to be pure (have a zero scalar
    /// part) and `by` is expected to be a unit quaternion; neither is enforced in release builds,
    /// and violating either gives a result that is not a rotated vector.
    #[must_use]
    pub fn rotate(&self, by: &Self) -> Self {
        debug_assert!(
            self.is_pure_within(1e-6 * self.norm().max(1.)),
            "only pure quaternions can be rotated, got {self}"
        );
        *by * *self * by.conjugate()
    }

    /// Translates the vector represented by this pure quaternion by the vector `by`.
    #[must_use]
    pub fn translate(&self, by: &Self) -> Self {
        *self + *by
    }

    /// Returns the rotation angle and unit rotation axis of this quaternion.
    ///
    /// The quaternion is normalized first; `None` is returned only if that fails (ie, for the
    /// zero quaternion). The angle is `2 * atan2(|vector|, q0)` and so lies in `[0, 2π]`. A zero
    /// angle has no meaningful axis, and so the returned direction is `[0, 0, 0]` in that case.
    #[doc(alias = "to_axis_angle")]
    #[must_use]
    pub fn as_angle_direction(&self) -> Option<(Angle, [f64; 3])> {
        let unit = self.normalize()?;
        let vector = unit.vector3();
        let sin_half = vector.norm();
        let angle = 2. * sin_half.atan2(unit.q0());

        if angle == 0. || sin_half == 0. {
            return Some((Angle::new::<radian>(angle), [0., 0., 0.]));
        }

        let direction = vector / sin_half;
        Some((
            Angle::new::<radian>(angle),
            [direction.x, direction.y, direction.z],
        ))
    }

    /// Constructs the rotation by `angle` about `direction` (right-hand rule).
    ///
    /// `direction` need not be of unit length. If it is the zero vector, there is no axis to
    /// rotate about, and the identity is returned.
    #[doc(alias = "from_axis_angle")]
    #[must_use]
    pub fn from_angle_direction(angle: impl Into<Angle>, direction: [f64; 3]) -> Self {
        let direction = Vector3::from(direction);
        let norm = direction.norm();
        if norm == 0. {
            return Self::identity();
        }
        let direction = direction / norm;

        let half = angle.into().get::<radian>() / 2.;
        let (sin_half, cos_half) = half.sin_cos();
        Self::new(
            cos_half,
            sin_half * direction.x,
            sin_half * direction.y,
            sin_half * direction.z,
        )
    }

    /// Constructs a rotation from fixed-axis angles: first `phi` about X, then `theta` about Y,
    /// then `psi` about Z, all about the axes of the _original_ (fixed) frame.
    ///
    /// This is the same rotation as [`Quaternion::from_euler_zyx_angles`] with its arguments in
    /// reverse order, and as what is commonly called roll (`phi`), pitch (`theta`), and yaw
    /// (`psi`).
    #[must_use]
    pub fn from_fixed_xyz_angles(
        phi: impl Into<Angle>,
        theta: impl Into<Angle>,
        psi: impl Into<Angle>,
    ) -> Self {
        let (s1, c1) = (phi.into().get::<radian>() / 2.).sin_cos();
        let (s2, c2) = (theta.into().get::<radian>() / 2.).sin_cos();
        let (s3, c3) = (psi.into().get::<radian>() / 2.).sin_cos();

        Self::new(
            c1 * c2 * c3 + s1 * s2 * s3,
            s1 * c2 * c3 - c1 * s2 * s3,
            c1 * s2 * c3 + s1 * c2 * s3,
            c1 * c2 * s3 - s1 * s2 * c3,
        )
    }

    /// Constructs a rotation from intrinsic Euler angles: first `z` about Z, then `y` about the
    /// rotated Y, then `x` about the twice-rotated X.
    #[must_use]
    pub fn from_euler_zyx_angles(
        z: impl Into<Angle>,
        y: impl Into<Angle>,
        x: impl Into<Angle>,
    ) -> Self {
        Self::from_fixed_xyz_angles(x, y, z)
    }

    /// Returns the `(phi, theta, psi)` angles of [`Quaternion::from_fixed_xyz_angles`].
    ///
    /// `theta` is in `[-90°, 90°]`, the other two are in `[-180°, 180°]`. At `theta = ±90°`
    /// (gimbal lock), `phi` and `psi` are not individually recoverable.
    #[must_use]
    pub fn to_fixed_xyz_angles(&self) -> (Angle, Angle, Angle) {
        let [q0, q1, q2, q3] = self.to_array();

        let phi = (2. * (q0 * q1 + q2 * q3)).atan2(1. - 2. * (q1 * q1 + q2 * q2));
        let theta = (2. * (q0 * q2 - q3 * q1)).clamp(-1., 1.).asin();
        let psi = (2. * (q0 * q3 + q1 * q2)).atan2(1. - 2. * (q2 * q2 + q3 * q3));

        (
            Angle::new::<radian>(phi),
            Angle::new::<radian>(theta),
            Angle::new::<radian>(psi),
        )
    }

    /// Returns the `(z, y, x)` angles of [`Quaternion::from_euler_zyx_angles`].
    #[must_use]
    pub fn to_euler_zyx_angles(&self) -> (Angle, Angle, Angle) {
        let (x, y, z) = self.to_fixed_xyz_angles();
        (z, y, x)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Display for Quaternion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.q0(),
            self.q1(),
            self.q2(),
            self.q3()
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Quaternion {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        RawQuaternion::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Quaternion {
    fn default_max_relative() -> Self::Epsilon {
        RawQuaternion::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_raw(self.inner + rhs.inner)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_raw(self.inner - rhs.inner)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_raw(-self.inner)
    }
}

// Quaternion * Quaternion -> Quaternion (Hamilton product)
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_raw(self.inner * rhs.inner)
    }
}

// Quaternion * f64 -> Quaternion
impl Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::from_raw(self.inner * rhs)
    }
}

// f64 * Quaternion -> Quaternion
impl Mul<Quaternion> for f64 {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Self::Output {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::{Quaternion, DEFAULT_EPSILON};
    use crate::UnitQuaternion;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core::f64::consts::{FRAC_1_SQRT_2, PI};
    use quickcheck::{quickcheck, Arbitrary};
    use rstest::rstest;
    use uom::si::angle::{degree, radian};
    use uom::si::f64::Angle;

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }
    fn r(radians: f64) -> Angle {
        Angle::new::<radian>(radians)
    }

    impl Arbitrary for Quaternion {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            // quickcheck will give us awkward f64 values -- we ignore those
            let mut component = || loop {
                match f64::arbitrary(g) {
                    0. => break 0.,
                    f if f.is_normal() => break f.rem_euclid(20.) - 10.,
                    _ => {}
                }
            };
            Self::new(component(), component(), component(), component())
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            let [q0, q1, q2, q3] = self.to_array();
            Box::new(
                q0.shrink()
                    .map(move |q0| Self::new(q0, q1, q2, q3))
                    .chain(q3.shrink().map(move |q3| Self::new(q0, q1, q2, q3))),
            )
        }
    }

    #[test]
    fn hamilton_product() {
        let a = Quaternion::new(1., 0.5, -3., 4.);
        let b = Quaternion::new(6., 2., 1., -9.);
        assert_eq!(a * b, Quaternion::new(44., 28., -4.5, 21.5));
    }

    #[test]
    fn product_does_not_commute() {
        let i = Quaternion::new(0., 1., 0., 0.);
        let j = Quaternion::new(0., 0., 1., 0.);
        assert_eq!(i * j, Quaternion::new(0., 0., 0., 1.));
        assert_eq!(j * i, Quaternion::new(0., 0., 0., -1.));
        assert_ne!(i * j, j * i);
    }

    quickcheck! {
        // small integers keep every product exact, so associativity must hold with `==`
        fn product_associates(a: (i8, i8, i8, i8), b: (i8, i8, i8, i8), c: (i8, i8, i8, i8)) -> () {
            let q = |(q0, q1, q2, q3): (i8, i8, i8, i8)| {
                Quaternion::new(q0.into(), q1.into(), q2.into(), q3.into())
            };
            let (a, b, c) = (q(a), q(b), q(c));
            assert_eq!((a * b) * c, a * (b * c));
        }
    }

    quickcheck! {
        fn rotation_preserves_norm(rotation: Quaternion, v: Quaternion) -> () {
            let Some(rotation) = rotation.normalize() else {
                return;
            };
            let v = Quaternion::from_vector(v.q1(), v.q2(), v.q3());
            let rotated = v.rotate(&rotation);
            assert_relative_eq!(rotated.norm(), v.norm(), epsilon = 1e-10, max_relative = 1e-12);
            assert!(rotated.is_pure_within(1e-9));
        }
    }

    quickcheck! {
        fn inverse_is_multiplicative_inverse(q: Quaternion) -> () {
            let Some(inverse) = q.inverse() else {
                assert_eq!(q, Quaternion::zero());
                return;
            };
            if q.norm() < 1e-3 {
                // too ill-conditioned to compare against a fixed epsilon
                return;
            }
            assert_abs_diff_eq!(q * inverse, Quaternion::identity(), epsilon = 1e-10);
            assert_abs_diff_eq!(inverse * q, Quaternion::identity(), epsilon = 1e-10);
        }
    }

    #[test]
    fn quarter_turns_about_z() {
        let q1 = Quaternion::from_angle_direction(r(PI / 2.), [0., 0., 1.]);
        let v = Quaternion::new(0., 1., 0., 0.);

        let once = v.rotate(&q1);
        assert_abs_diff_eq!(once, Quaternion::new(0., 0., 1., 0.), epsilon = 1e-10);
        let twice = once.rotate(&q1);
        assert_abs_diff_eq!(twice, Quaternion::new(0., -1., 0., 0.), epsilon = 1e-10);
        let thrice = twice.rotate(&q1);
        assert_abs_diff_eq!(thrice, Quaternion::new(0., 0., -1., 0.), epsilon = 1e-10);
        let full = thrice.rotate(&q1);
        assert_abs_diff_eq!(full, v, epsilon = 1e-10);

        // and the conjugate undoes it
        assert_abs_diff_eq!(once.rotate(&q1.conjugate()), v, epsilon = 1e-10);
    }

    #[test]
    fn angle_direction_round_trip() {
        let q = Quaternion::from_angle_direction(r(PI / 2.), [1., 1., 1.]);
        assert!(q.is_unit());

        let (angle, direction) = q.as_angle_direction().expect("q is a unit quaternion");
        assert_relative_eq!(angle.get::<radian>(), PI / 2., epsilon = 1e-10);
        let third = 1. / 3f64.sqrt();
        assert_relative_eq!(direction[0], third, epsilon = 1e-10);
        assert_relative_eq!(direction[1], third, epsilon = 1e-10);
        assert_relative_eq!(direction[2], third, epsilon = 1e-10);
    }

    #[test]
    fn zero_angle_has_zero_direction() {
        let (angle, direction) = Quaternion::identity()
            .as_angle_direction()
            .expect("identity is a unit quaternion");
        assert_eq!(angle.get::<radian>(), 0.);
        assert_eq!(direction, [0., 0., 0.]);

        assert_eq!(Quaternion::zero().as_angle_direction(), None);
        assert_eq!(
            Quaternion::from_angle_direction(d(30.), [0., 0., 0.]),
            Quaternion::identity()
        );
    }

    #[test]
    fn composition_accumulates_angles() {
        let q1 = Quaternion::from_angle_direction(r(PI / 2.), [1., 1., 1.]);

        let (angle, _) = q1.compose(&q1).as_angle_direction().unwrap();
        assert_relative_eq!(angle.get::<radian>(), PI, epsilon = 1e-10);

        let (angle, _) = q1.compose(&q1.conjugate()).as_angle_direction().unwrap();
        assert_abs_diff_eq!(angle.get::<radian>(), 0., epsilon = 1e-10);

        let q4 = q1.compose(&q1).compose(&q1).compose(&q1);
        assert!(q4.is_unit());
        let (angle, _) = q4.as_angle_direction().unwrap();
        assert_relative_eq!(angle.get::<radian>(), 2. * PI, epsilon = 1e-10);
    }

    #[test]
    fn compose_is_offset_times_self() {
        let a = Quaternion::new(1., 0.5, -3., 4.);
        let b = Quaternion::new(6., 2., 1., -9.);
        assert_eq!(b.compose(&a), a * b);
        assert_eq!(Quaternion::identity().compose(&a), a);
    }

    #[test]
    fn scaling() {
        let q = Quaternion::new(1., -2., 3., 0.5);
        assert_eq!(q * 2., Quaternion::new(2., -4., 6., 1.));
        assert_eq!(2. * q, q * 2.);
        assert_eq!(q * 0., Quaternion::zero());
    }

    #[test]
    fn translate_adds() {
        let a = Quaternion::new(0., 1., 1., 3.);
        let b = Quaternion::new(0., 3., 1., 1.);
        assert_eq!(a.translate(&b), Quaternion::new(0., 4., 2., 4.));
        assert_eq!(a - a, Quaternion::zero());
        assert_eq!(-a + a, Quaternion::zero());
    }

    #[test]
    fn degenerate_inputs_have_no_result() {
        assert_eq!(Quaternion::zero().inverse(), None);
        assert_eq!(Quaternion::zero().normalize(), None);

        let mut zero = Quaternion::zero();
        assert!(!zero.normalized());
        assert_eq!(zero, Quaternion::zero());

        let mut q = Quaternion::new(0., 3., 0., 4.);
        assert!(q.normalized());
        assert_eq!(q, Quaternion::new(0., 0.6, 0., 0.8));
    }

    #[test]
    fn conjugate_and_norm() {
        let q = Quaternion::new(1., 2., -2., 4.);
        assert_eq!(q.conjugate(), Quaternion::new(1., -2., 2., -4.));
        assert_eq!(q.norm(), 5.);
        assert_eq!(q.dot(&q), 25.);
        assert_eq!(
            q.inverse(),
            Some(Quaternion::new(1. / 25., -2. / 25., 2. / 25., -4. / 25.))
        );
    }

    #[rstest]
    #[case(Quaternion::identity(), true, false, false)]
    #[case(Quaternion::zero(), false, true, true)]
    #[case(Quaternion::from_vector(0., 0.6, 0.8), true, false, true)]
    #[case(Quaternion::new(FRAC_1_SQRT_2, 0., FRAC_1_SQRT_2, 0.), true, false, false)]
    #[case(Quaternion::new(1e-11, 0., 0., 1e-11), false, true, true)]
    #[case(Quaternion::new(1. + 1e-11, 0., 0., 0.), true, false, false)]
    #[case(Quaternion::new(2., 0., 0., 0.), false, false, false)]
    fn predicates(
        #[case] q: Quaternion,
        #[case] unit: bool,
        #[case] zero: bool,
        #[case] pure: bool,
    ) {
        assert_eq!(q.is_unit(), unit, "is_unit({q})");
        assert_eq!(q.is_zero(), zero, "is_zero({q})");
        assert_eq!(q.is_pure(), pure, "is_pure({q})");
    }

    #[test]
    fn predicates_with_explicit_epsilon() {
        let q = Quaternion::new(1e-6, 0., 0., 1.);
        assert!(!q.is_pure());
        assert!(q.is_pure_within(1e-5));
        assert!(q.is_unit_within(DEFAULT_EPSILON));
        assert!(Quaternion::new(1e-6, 0., 0., 0.).is_zero_within(1e-5));
    }

    #[rstest]
    #[case(d(0.), d(0.), d(0.))]
    #[case(d(90.), d(0.), d(0.))]
    #[case(d(0.), d(45.), d(0.))]
    #[case(d(0.), d(0.), d(-120.))]
    #[case(d(10.), d(20.), d(30.))]
    #[case(d(-170.), d(-80.), d(95.))]
    fn fixed_xyz_matches_roll_pitch_yaw(#[case] phi: Angle, #[case] theta: Angle, #[case] psi: Angle) {
        let ours = Quaternion::from_fixed_xyz_angles(phi, theta, psi);
        let nalgebras = UnitQuaternion::from_euler_angles(
            phi.get::<radian>(),
            theta.get::<radian>(),
            psi.get::<radian>(),
        );
        assert_relative_eq!(ours.inner, *nalgebras.quaternion(), epsilon = 1e-12);

        let (phi2, theta2, psi2) = ours.to_fixed_xyz_angles();
        assert_relative_eq!(phi2.get::<radian>(), phi.get::<radian>(), epsilon = 1e-10);
        assert_relative_eq!(theta2.get::<radian>(), theta.get::<radian>(), epsilon = 1e-10);
        assert_relative_eq!(psi2.get::<radian>(), psi.get::<radian>(), epsilon = 1e-10);
    }

    #[test]
    fn euler_zyx_reverses_fixed_xyz() {
        let zyx = Quaternion::from_euler_zyx_angles(d(30.), d(20.), d(10.));
        let xyz = Quaternion::from_fixed_xyz_angles(d(10.), d(20.), d(30.));
        assert_eq!(zyx, xyz);

        let (z, y, x) = zyx.to_euler_zyx_angles();
        assert_relative_eq!(z.get::<degree>(), 30., epsilon = 1e-10);
        assert_relative_eq!(y.get::<degree>(), 20., epsilon = 1e-10);
        assert_relative_eq!(x.get::<degree>(), 10., epsilon = 1e-10);
    }

    #[test]
    fn fixed_xyz_is_x_then_y_then_z() {
        let x = Quaternion::from_angle_direction(d(10.), [1., 0., 0.]);
        let y = Quaternion::from_angle_direction(d(20.), [0., 1., 0.]);
        let z = Quaternion::from_angle_direction(d(30.), [0., 0., 1.]);
        assert_relative_eq!(
            x.compose(&y).compose(&z),
            Quaternion::from_fixed_xyz_angles(d(10.), d(20.), d(30.)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(Quaternion::new(1., 0.5, -3., 4.), @"Quaternion(1, 0.5, -3, 4)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde() {
        let q = Quaternion::from_fixed_xyz_angles(d(10.), d(20.), d(30.));
        let ser = serde_yaml::to_string(&q).unwrap();
        let de = serde_yaml::from_str::<Quaternion>(&ser).unwrap();
        assert_eq!(q, de);
    }
}
