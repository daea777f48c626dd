//! Capabilities shared by the frame-bound types.
//!
//! Everything that lives "in" a frame ([`Frame`], [`Position`](crate::Position),
//! [`Orientation`](crate::Orientation), [`Direction`](crate::Direction)) implements [`Framed`],
//! and then whichever of the other traits make sense for it. Operations that need to look at
//! other frames take the [`FrameTree`] those frames live in.

use crate::error::FrameError;
use crate::frame::{Frame, FrameId, FrameTree};
use crate::orientation::Orientation;
use crate::position::Position;

/// A value that is expressed relative to some frame.
pub trait Framed {
    /// The frame this value is expressed in.
    fn frame(&self) -> FrameId;

    /// The outermost frame this value's frame descends from, ie, the tree's root.
    fn base(&self, tree: &FrameTree) -> FrameId {
        tree.ancestors(self.frame())
            .last()
            .unwrap_or_else(|| tree.root())
    }

    fn has_frame(&self, frame: FrameId) -> bool {
        self.frame() == frame
    }

    /// Is `ancestor` this value's frame, or one of that frame's ancestors?
    fn has_ancestor(&self, tree: &FrameTree, ancestor: FrameId) -> bool {
        self.frame() == ancestor
            || (!tree.is_base(self.frame()) && tree.has_ancestor(self.frame(), ancestor))
    }

    /// The frame through which to relate this value to `other`.
    ///
    /// This is `other`'s frame if this value descends from it, this value's frame if `other`
    /// descends from that, and otherwise the root. It is not necessarily the _nearest_ common
    /// ancestor; see [`FrameTree::nearest_common_ancestor`].
    fn common(&self, tree: &FrameTree, other: &Self) -> FrameId
    where
        Self: Sized,
    {
        if self.has_ancestor(tree, other.frame()) {
            other.frame()
        } else if other.has_ancestor(tree, self.frame()) {
            self.frame()
        } else {
            tree.root()
        }
    }
}

/// A value with an inverse in its own frame.
pub trait Invertable: Framed {
    #[must_use]
    fn inverse(&self) -> Self;
}

pub trait Translatable: Framed + Sized {
    /// Moves this value by `offset`, which may be expressed in any frame of `tree`.
    fn translate(&self, tree: &FrameTree, offset: &Position) -> Result<Self, FrameError>;

    /// Like [`Translatable::translate`], but in place.
    fn translated(&mut self, tree: &FrameTree, offset: &Position) -> Result<(), FrameError> {
        *self = self.translate(tree, offset)?;
        Ok(())
    }
}

pub trait Rotatable: Framed + Sized {
    /// Rotates this value by `offset`, which may be expressed in any frame of `tree`.
    fn rotate(&self, tree: &FrameTree, offset: &Orientation) -> Result<Self, FrameError>;

    /// Like [`Rotatable::rotate`], but in place.
    fn rotated(&mut self, tree: &FrameTree, offset: &Orientation) -> Result<(), FrameError> {
        *self = self.rotate(tree, offset)?;
        Ok(())
    }
}

pub trait Transformable: Framed + Sized {
    /// Re-expresses this value in `frame`.
    ///
    /// The value is the same physical quantity before and after; only the frame it is described
    /// relative to changes.
    fn transform_to(&self, tree: &FrameTree, frame: FrameId) -> Result<Self, FrameError>;

    /// Moves this value by the rigid motion `by`, which may be expressed in any frame of `tree`.
    ///
    /// Unlike [`Transformable::transform_to`], this changes the physical quantity and keeps the
    /// frame.
    fn transform_by(&self, tree: &FrameTree, by: &Frame) -> Result<Self, FrameError>;

    /// Like [`Transformable::transform_to`], but in place.
    fn transformed_to(&mut self, tree: &FrameTree, frame: FrameId) -> Result<(), FrameError> {
        *self = self.transform_to(tree, frame)?;
        Ok(())
    }
}

/// A value that can be combined with another of its kind.
pub trait Composable: Sized {
    /// Applies `offset` on top of `self`, after bringing `offset` into `self`'s frame.
    fn compose(&self, tree: &FrameTree, offset: &Self) -> Result<Self, FrameError>;
}
