use crate::frame::FrameId;

/// Ways in which operations on a [`FrameTree`](crate::FrameTree) can fail.
///
/// Numerically degenerate inputs (eg, normalizing a zero quaternion) are _not_ errors; those
/// operations return `Option` instead. The variants here all describe a structural problem with
/// how frames were addressed or arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("{0} does not belong to this frame tree")]
    UnknownFrame(FrameId),

    #[error("making {parent} the parent of {frame} would create a cycle")]
    Cycle { frame: FrameId, parent: FrameId },

    #[error("a frame offset under {parent} has a zero rotation part and cannot be normalized")]
    DegenerateOffset { parent: FrameId },

    #[error("the root frame cannot be replaced")]
    RootIsImmutable,

    #[error("no chain of transforms leads from {from} to {to} within the depth of the tree")]
    DepthExceeded { from: FrameId, to: FrameId },
}
