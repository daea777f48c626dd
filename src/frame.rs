//! Reference frames and the tree that relates them.
//!
//! Every frame except the root is defined by its pose (a [`DualQuaternion`]) relative to a parent
//! frame. The frames themselves live in a [`FrameTree`] and are addressed by [`FrameId`] handles;
//! two frames are the same frame exactly when their handles are equal, regardless of their
//! numeric content.
//!
//! A [`Frame`] value is the record stored for a node (parent, unit, offset), but it is also what
//! every transform returns: "the pose of X, expressed in Y" is a `Frame` whose parent is `Y`.
//! Such a _detached_ frame is not part of the tree until it is [inserted](FrameTree::insert).

use crate::direction::Direction;
use crate::dual_quaternion::DualQuaternion;
use crate::error::FrameError;
use crate::orientation::Orientation;
use crate::position::Position;
use crate::traits::{Composable, Framed, Invertable, Rotatable, Transformable, Translatable};
use crate::units::LengthUnit;
use core::fmt::{self, Display, Formatter};
use log::{debug, trace, warn};
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A handle to a frame in a [`FrameTree`].
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FrameId(usize);

impl FrameId {
    /// The root frame, present in every tree.
    pub const ROOT: Self = Self(0);

    /// The position of this frame in its tree's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if *self == Self::ROOT {
            write!(f, "root frame")
        } else {
            write!(f, "frame #{}", self.0)
        }
    }
}

/// One of the three axes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[must_use]
    pub fn unit_vector(self) -> [f64; 3] {
        match self {
            Self::X => [1., 0., 0.],
            Self::Y => [0., 1., 0.],
            Self::Z => [0., 0., 1.],
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        };
        f.write_str(name)
    }
}

/// A pose (position and orientation) expressed in a parent frame.
///
/// The offset is the rigid motion that takes coordinates in this frame to coordinates in the
/// parent, with translations in meters. `unit` is only the unit in which positions relative to
/// this frame are preferably reported.
///
/// `Frame` deliberately does not implement `PartialEq`: frame identity is [`FrameId`] identity,
/// and two records with the same numbers are still different frames once inserted.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    parent: FrameId,
    unit: LengthUnit,
    offset: DualQuaternion,
}

impl Frame {
    #[must_use]
    pub fn new(parent: FrameId, unit: LengthUnit, offset: DualQuaternion) -> Self {
        Self {
            parent,
            unit,
            offset,
        }
    }

    /// The frame this pose is expressed in.
    #[must_use]
    pub fn parent(&self) -> FrameId {
        self.parent
    }

    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    #[must_use]
    pub fn offset(&self) -> DualQuaternion {
        self.offset
    }

    /// A frame translated by `position` (and not rotated) relative to `position`'s frame.
    #[must_use]
    pub fn from_position(position: &Position) -> Self {
        Self::new(
            position.frame(),
            position.unit(),
            DualQuaternion::from_translation(position.quaternion()),
        )
    }

    /// A frame rotated by `orientation` (and not translated) relative to `orientation`'s frame.
    ///
    /// There is no position to take a unit from, so the frame reports in meters.
    #[must_use]
    pub fn from_orientation(orientation: &Orientation) -> Self {
        Self::new(
            orientation.frame(),
            LengthUnit::Meter,
            DualQuaternion::from_rotation(orientation.quaternion()),
        )
    }

    /// The origin of this frame, in its parent.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::from_quaternion(self.parent, self.unit, self.offset.as_translation())
    }

    /// The orientation of this frame's axes, in its parent.
    ///
    /// Returns `None` if the rotation part of the offset is zero, which only frames built with
    /// [`DualQuaternion::from_parts`] can have.
    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::from_quaternion(self.parent, self.offset.as_rotation())
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {} [{}]", self.offset, self.parent, self.unit)
    }
}

impl Framed for Frame {
    fn frame(&self) -> FrameId {
        self.parent
    }
}

impl Invertable for Frame {
    fn inverse(&self) -> Self {
        Self::new(self.parent, self.unit, self.offset.inverse())
    }
}

impl Transformable for Frame {
    fn transform_to(&self, tree: &FrameTree, frame: FrameId) -> Result<Self, FrameError> {
        tree.transform_value(self, frame)
    }

    fn transform_by(&self, tree: &FrameTree, by: &Frame) -> Result<Self, FrameError> {
        let this = tree.validate(*self)?;
        let that = tree.transform_value(by, self.parent)?;
        Ok(Self::new(
            self.parent,
            self.unit,
            that.offset * this.offset,
        ))
    }
}

impl Translatable for Frame {
    fn translate(&self, tree: &FrameTree, offset: &Position) -> Result<Self, FrameError> {
        self.transform_by(tree, &Frame::from_position(offset))
    }
}

impl Rotatable for Frame {
    fn rotate(&self, tree: &FrameTree, offset: &Orientation) -> Result<Self, FrameError> {
        self.transform_by(tree, &Frame::from_orientation(offset))
    }
}

impl Composable for Frame {
    fn compose(&self, tree: &FrameTree, offset: &Self) -> Result<Self, FrameError> {
        self.transform_by(tree, offset)
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    frame: Frame,
    generation: u64,
}

/// An arena of frames rooted at [`FrameId::ROOT`].
///
/// Frames are added with [`FrameTree::insert`] and are never removed, so a [`FrameId`] stays
/// valid for the lifetime of its tree. A frame's record can be swapped out wholesale with
/// [`FrameTree::replace`] (or [`FrameTree::transformed`]); everything that refers to the frame
/// by handle sees the new pose on its next read. Each replacement bumps the frame's
/// [generation](FrameTree::generation), which dependents can poll to learn that it moved.
///
/// # Examples
///
/// ```
/// use reframe::{FrameTree, LengthUnit, Transformable};
/// use uom::si::length::meter;
///
/// let mut tree = FrameTree::new();
/// let a = tree.insert_translation(tree.root(), LengthUnit::Meter, 0., 0., 0.)?;
/// let b = tree.insert_translation(a, LengthUnit::Meter, 3., 0., 0.)?;
/// let c = tree.insert_translation(b, LengthUnit::Meter, 1., 0., 0.)?;
///
/// let origin_of_c = tree.make_translation(c, LengthUnit::Meter, 0., 0., 0.)?;
/// let in_a = origin_of_c.transform_to(&tree, a)?;
/// assert_eq!(in_a.x().get::<meter>(), 4.);
/// # Ok::<(), reframe::FrameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FrameTree {
    slots: Vec<Slot>,
}

impl Default for FrameTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTree {
    /// Creates a tree holding only the root frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                frame: Frame::new(FrameId::ROOT, LengthUnit::Meter, DualQuaternion::identity()),
                generation: 0,
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> FrameId {
        FrameId::ROOT
    }

    /// The number of frames, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Does the tree hold nothing but the root?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.len() == 1
    }

    #[must_use]
    pub fn contains(&self, id: FrameId) -> bool {
        id.0 < self.slots.len()
    }

    /// All frames in the tree, in insertion order, starting with the root.
    pub fn ids(&self) -> impl Iterator<Item = FrameId> + '_ {
        (0..self.slots.len()).map(FrameId)
    }

    /// The frames whose parent is `id`.
    pub fn children(&self, id: FrameId) -> impl Iterator<Item = FrameId> + '_ {
        self.ids()
            .filter(move |&child| child != FrameId::ROOT && self.slots[child.0].frame.parent == id)
    }

    fn slot(&self, id: FrameId) -> Result<&Slot, FrameError> {
        self.slots.get(id.0).ok_or(FrameError::UnknownFrame(id))
    }

    /// The record of frame `id`: its parent, unit, and pose in that parent.
    pub fn get(&self, id: FrameId) -> Result<&Frame, FrameError> {
        self.slot(id).map(|slot| &slot.frame)
    }

    pub fn parent(&self, id: FrameId) -> Result<FrameId, FrameError> {
        self.get(id).map(|frame| frame.parent)
    }

    pub fn unit(&self, id: FrameId) -> Result<LengthUnit, FrameError> {
        self.get(id).map(|frame| frame.unit)
    }

    /// How many times frame `id` has been replaced.
    pub fn generation(&self, id: FrameId) -> Result<u64, FrameError> {
        self.slot(id).map(|slot| slot.generation)
    }

    /// Is `id` the root frame?
    #[must_use]
    pub fn is_base(&self, id: FrameId) -> bool {
        id == FrameId::ROOT
    }

    /// Walks from `id`'s parent up to, and including, the root.
    ///
    /// The root's only ancestor is the root itself. Unknown frames have no ancestors.
    #[must_use]
    pub fn ancestors(&self, id: FrameId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: Some(id),
            remaining: self.slots.len(),
        }
    }

    /// Is `ancestor` the parent of `id`, or an ancestor of that parent?
    #[must_use]
    pub fn has_ancestor(&self, id: FrameId, ancestor: FrameId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// The number of parent links between `id` and the root.
    pub fn depth(&self, id: FrameId) -> Result<usize, FrameError> {
        self.slot(id)?;
        if self.is_base(id) {
            return Ok(0);
        }
        Ok(self.ancestors(id).count())
    }

    /// The frame that transforms between `a` and `b` pivot through.
    ///
    /// This is `b`'s parent if that is an ancestor of `a` (including when `a` and `b` are
    /// siblings), otherwise `a`'s parent if that is an ancestor of `b`, and otherwise the root.
    /// The last case means this is _not_ always the nearest common ancestor: for two frames in
    /// different subtrees of some non-root frame, the result is still the root. Use
    /// [`FrameTree::nearest_common_ancestor`] if you need the nearest one.
    pub fn common_ancestor(&self, a: FrameId, b: FrameId) -> Result<FrameId, FrameError> {
        let a = self.get(a)?;
        let b = self.get(b)?;
        Ok(a.common(self, b))
    }

    /// The deepest frame that is `a` or one of its ancestors and also `b` or one of its
    /// ancestors.
    pub fn nearest_common_ancestor(&self, a: FrameId, b: FrameId) -> Result<FrameId, FrameError> {
        let (mut a, mut b) = (a, b);
        let (mut depth_a, mut depth_b) = (self.depth(a)?, self.depth(b)?);
        while depth_a > depth_b {
            a = self.parent(a)?;
            depth_a -= 1;
        }
        while depth_b > depth_a {
            b = self.parent(b)?;
            depth_b -= 1;
        }
        // both are now equally deep, so they reach the root in the same number of steps
        while a != b {
            a = self.parent(a)?;
            b = self.parent(b)?;
        }
        Ok(a)
    }

    /// Adds `frame` to the tree as a child of its parent.
    ///
    /// The offset is stored normalized. Fails if the parent is not in this tree or if the offset
    /// cannot be normalized.
    pub fn insert(&mut self, frame: Frame) -> Result<FrameId, FrameError> {
        let frame = self.validate(frame)?;
        let id = FrameId(self.slots.len());
        self.slots.push(Slot {
            frame,
            generation: 0,
        });
        debug!("inserted {id} under {}", frame.parent);
        Ok(id)
    }

    /// Adds a frame that is translated (but not rotated) by `(x, y, z)` in `unit` relative to
    /// `parent`. The new frame reports in `unit`.
    pub fn insert_translation(
        &mut self,
        parent: FrameId,
        unit: LengthUnit,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<FrameId, FrameError> {
        let position = self.make_translation(parent, unit, x, y, z)?;
        self.insert(Frame::from_position(&position))
    }

    /// Adds a frame that is rotated by `angle` about `direction` (and not translated) relative
    /// to `parent`.
    pub fn insert_rotation(
        &mut self,
        parent: FrameId,
        angle: impl Into<Angle>,
        direction: &Direction,
    ) -> Result<FrameId, FrameError> {
        let orientation = self.make_rotation(parent, angle, direction)?;
        self.insert(Frame::from_orientation(&orientation))
    }

    /// Adds a frame with origin at `position` and axes along `orientation`, in `position`'s
    /// frame.
    pub fn insert_pose(
        &mut self,
        position: &Position,
        orientation: &Orientation,
    ) -> Result<FrameId, FrameError> {
        let frame = self.frame_from_position_and_orientation(position, orientation)?;
        self.insert(frame)
    }

    /// Swaps in a new record for frame `id`.
    ///
    /// Every frame below `id` moves along with it, since their poses are relative to `id`. Fails
    /// if `id` is the root, or if the new parent is `id` itself or one of `id`'s descendants.
    pub fn replace(&mut self, id: FrameId, frame: Frame) -> Result<(), FrameError> {
        if self.is_base(id) {
            return Err(FrameError::RootIsImmutable);
        }
        self.slot(id)?;
        let frame = self.validate(frame)?;
        if frame.parent == id || self.has_ancestor(frame.parent, id) {
            return Err(FrameError::Cycle {
                frame: id,
                parent: frame.parent,
            });
        }

        let slot = &mut self.slots[id.0];
        slot.frame = frame;
        slot.generation += 1;
        debug!(
            "replaced {id} (now under {}, generation {})",
            frame.parent, slot.generation
        );
        Ok(())
    }

    /// Re-expresses frame `id` relative to `to`, in place.
    ///
    /// The frame keeps its physical pose (and so do all frames below it); only its parent, unit,
    /// and offset change.
    pub fn transformed(&mut self, id: FrameId, to: FrameId) -> Result<(), FrameError> {
        let frame = self.transform(id, to)?;
        self.replace(id, frame)
    }

    /// Returns the pose of frame `id` expressed in frame `to`.
    pub fn transform(&self, id: FrameId, to: FrameId) -> Result<Frame, FrameError> {
        let frame = *self.get(id)?;
        self.resolve(Some(id), &frame, to, 0)
    }

    /// Returns the detached pose `frame` expressed in frame `to`.
    ///
    /// The offset of `frame` is normalized first, just like [`FrameTree::insert`] does, and a
    /// pose whose offset cannot be normalized is rejected.
    pub fn transform_value(&self, frame: &Frame, to: FrameId) -> Result<Frame, FrameError> {
        let frame = self.validate(*frame)?;
        self.resolve(None, &frame, to, 0)
    }

    /// A position `(x, y, z)` in `unit` relative to the origin of `frame`.
    pub fn make_translation(
        &self,
        frame: FrameId,
        unit: LengthUnit,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Position, FrameError> {
        self.slot(frame)?;
        Ok(Position::new(frame, unit, x, y, z))
    }

    /// An orientation rotated by `angle` about `direction`, relative to the axes of `frame`.
    ///
    /// `direction` may be given in any frame of this tree.
    pub fn make_rotation(
        &self,
        frame: FrameId,
        angle: impl Into<Angle>,
        direction: &Direction,
    ) -> Result<Orientation, FrameError> {
        self.slot(frame)?;
        let direction = direction.transform_to(self, frame)?;
        Ok(Orientation::new(frame, angle, &direction))
    }

    /// A frame with origin at `position` and axes along `orientation`, in `position`'s frame.
    pub fn frame_from_position_and_orientation(
        &self,
        position: &Position,
        orientation: &Orientation,
    ) -> Result<Frame, FrameError> {
        self.frame_from_position_and_orientation_in(position.frame(), position, orientation)
    }

    /// A frame with origin at `position` and axes along `orientation`, in `frame`.
    pub fn frame_from_position_and_orientation_in(
        &self,
        frame: FrameId,
        position: &Position,
        orientation: &Orientation,
    ) -> Result<Frame, FrameError> {
        let position = position.transform_to(self, frame)?;
        let orientation = orientation.transform_to(self, frame)?;
        Ok(Frame::new(
            frame,
            position.unit(),
            DualQuaternion::from_rotation_and_translation(
                orientation.quaternion(),
                position.quaternion(),
            ),
        ))
    }

    /// Checks that `frame`'s parent is in this tree and that its offset is a rigid motion.
    ///
    /// Offsets that are already unit are kept bit-for-bit, so that a pose handed back to the
    /// frame it is expressed in comes back unchanged.
    fn validate(&self, frame: Frame) -> Result<Frame, FrameError> {
        self.slot(frame.parent)?;
        if frame.offset.real().is_unit() {
            return Ok(frame);
        }
        let offset = frame
            .offset
            .normalize()
            .ok_or(FrameError::DegenerateOffset {
                parent: frame.parent,
            })?;
        Ok(Frame { offset, ..frame })
    }

    /// `subject` is the node whose record `frame` is, if any. Detached frames have no identity,
    /// so they can never be the target or an ancestor of the target.
    fn resolve(
        &self,
        subject: Option<FrameId>,
        frame: &Frame,
        target: FrameId,
        depth: usize,
    ) -> Result<Frame, FrameError> {
        let parent = frame.parent;
        if depth > self.slots.len() {
            warn!("gave up transforming from {parent} to {target} after {depth} steps");
            return Err(FrameError::DepthExceeded {
                from: subject.unwrap_or(parent),
                to: target,
            });
        }

        let into = *self.get(target)?;
        let within = *self.get(parent)?;
        let reframed = |offset| Frame::new(target, into.unit, offset);

        if subject == Some(target) {
            trace!("{target} is the frame itself");
            return Ok(reframed(DualQuaternion::identity()));
        }

        if parent == target {
            trace!("{target} is the parent");
            return Ok(reframed(frame.offset));
        }

        if !self.is_base(parent) {
            if within.parent == target {
                trace!("{target} is the grandparent");
                return Ok(reframed(within.offset * frame.offset));
            }
            if self.has_ancestor(parent, target) {
                trace!("{target} is above the grandparent, stepping up from {parent}");
                let in_grandparent =
                    Frame::new(within.parent, within.unit, within.offset * frame.offset);
                return self.resolve(None, &in_grandparent, target, depth + 1);
            }
        }

        if let Some(this) = subject {
            if into.parent == this {
                trace!("{target} is a child of {this}");
                return Ok(reframed(into.offset.inverse()));
            }
            if self.has_ancestor(target, this) {
                trace!("{target} is a descendant of {this}, inverting the upward transform");
                let target_in_this = self.resolve(Some(target), &into, this, depth + 1)?;
                return Ok(reframed(target_in_this.offset.inverse()));
            }
        }

        let common = frame.common(self, &into);
        trace!("pivoting from {parent} to {target} through {common}");
        let to_common = self.resolve(subject, frame, common, depth + 1)?;
        let pivot = *self.get(common)?;
        let from_common = self.resolve(Some(common), &pivot, target, depth + 1)?;
        Ok(reframed(from_common.offset * to_common.offset))
    }
}

/// Iterator over the ancestors of a frame; see [`FrameTree::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    tree: &'a FrameTree,
    current: Option<FrameId>,
    // bounds the walk should the parent links ever loop
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = FrameId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        if self.remaining == 0 {
            warn!("parent links above {current} are longer than the tree; stopping");
            return None;
        }
        self.remaining -= 1;

        let parent = self.tree.slots.get(current.0)?.frame.parent;
        if !self.tree.is_base(parent) {
            self.current = Some(parent);
        }
        Some(parent)
    }
}
