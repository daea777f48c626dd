//! A spacecraft orbiting the sun carries a camera. Where is the sun in the camera's view, and
//! what changes when the spacecraft turns?
//!
//! Run with `RUST_LOG=trace` to see how each transform is resolved.

use reframe::{
    Axis, Direction, FrameError, FrameTree, Framed, LengthUnit, Orientation, Rotatable,
    Transformable,
};
use uom::si::angle::degree;
use uom::si::f64::Angle;
use uom::si::length::kilometer;

fn main() -> Result<(), FrameError> {
    env_logger::init();

    // the root frame is centered on the sun
    let mut tree = FrameTree::new();
    let sun = tree.root();

    let spacecraft = tree.insert_pose(
        &tree.make_translation(sun, LengthUnit::AstronomicalUnit, 1., 0., 0.)?,
        &Orientation::aligned(sun),
    )?;

    // the camera sits on a boom and looks along the spacecraft's -X axis
    let camera = tree.insert_pose(
        &tree.make_translation(spacecraft, LengthUnit::Meter, 0., 1.5, 0.)?,
        &Orientation::from_axis_angle(spacecraft, Angle::new::<degree>(180.), Axis::Z),
    )?;
    let boresight = Direction::from_axis(camera, Axis::X);

    let report = |tree: &FrameTree| -> Result<(), FrameError> {
        let sun_in_camera = tree
            .make_translation(sun, LengthUnit::Kilometer, 0., 0., 0.)?
            .transform_to(tree, camera)?;
        let [x, y, z] = sun_in_camera.to_cartesian().map(|l| l.get::<kilometer>());
        let toward_sun = Direction::new(camera, x, y, z)
            .expect("the camera is not at the center of the sun");
        println!(
            "sun is {:.0} km from the camera, {:.3}° off boresight (spacecraft generation {})",
            sun_in_camera.norm().get::<kilometer>(),
            boresight.angle_to(tree, &toward_sun)?.get::<degree>(),
            tree.generation(spacecraft)?,
        );
        Ok(())
    };

    report(&tree)?;

    // the spacecraft turns by 30° about its Z axis; the camera comes along for the ride
    let turn = Orientation::from_axis_angle(sun, Angle::new::<degree>(30.), Axis::Z);
    let pose = tree
        .get(spacecraft)?
        .orientation()
        .ok_or(FrameError::DegenerateOffset { parent: sun })?;
    let turned = tree.frame_from_position_and_orientation(
        &tree.get(spacecraft)?.position(),
        &pose.rotate(&tree, &turn)?,
    )?;
    tree.replace(spacecraft, turned)?;
    report(&tree)?;

    // re-hang the camera directly off the sun; nothing about where it looks changes
    tree.transformed(camera, sun)?;
    assert!(tree.get(camera)?.has_frame(sun));
    report(&tree)?;

    Ok(())
}
