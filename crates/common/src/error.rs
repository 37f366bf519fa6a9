use crate::NodeId;

/// Errors from structural operations on the transform hierarchy.
///
/// Transform math itself is total; only graph edits that name a handle can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}
