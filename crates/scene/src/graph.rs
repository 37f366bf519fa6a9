use glam::{Mat4, Quat, Vec3};
use slotmap::SlotMap;
use treeline_common::{NodeId, SceneError};

/// One entry in the transform hierarchy.
///
/// `local_rotation` and `local_translation` are the source of truth. Everything
/// else is derived by [`SceneGraph::update`] and goes stale as soon as this
/// node or any ancestor changes its local state.
#[derive(Debug, Clone)]
pub struct TransformNode {
    /// Orientation relative to the parent. Expected to be a unit quaternion.
    pub local_rotation: Quat,
    /// Offset relative to the parent.
    pub local_translation: Vec3,

    parent: Option<NodeId>,
    children: Vec<NodeId>,

    local_matrix: Mat4,
    world_matrix: Mat4,
    world_orientation: Quat,
    world_position: Vec3,
}

/// Resolved world state of a parent, copied out so the child can be borrowed
/// mutably from the same arena.
#[derive(Debug, Clone, Copy)]
struct ParentFrame {
    matrix: Mat4,
    orientation: Quat,
    position: Vec3,
}

impl Default for TransformNode {
    fn default() -> Self {
        Self {
            local_rotation: Quat::IDENTITY,
            local_translation: Vec3::ZERO,
            parent: None,
            children: Vec::new(),
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            world_orientation: Quat::IDENTITY,
            world_position: Vec3::ZERO,
        }
    }
}

impl TransformNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent handle, `None` for roots.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles. Order carries no meaning.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn local_matrix(&self) -> Mat4 {
        self.local_matrix
    }

    /// Model matrix for this node, as of the last update.
    #[inline]
    pub fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    #[inline]
    pub fn world_orientation(&self) -> Quat {
        self.world_orientation
    }

    /// Resolved world-space position, as of the last update.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    fn frame(&self) -> ParentFrame {
        ParentFrame {
            matrix: self.world_matrix,
            orientation: self.world_orientation,
            position: self.world_position,
        }
    }

    /// Recompute the local matrix and the world caches from `parent`.
    fn resolve(&mut self, parent: Option<ParentFrame>) {
        // Rotate, then translate in the rotated frame.
        self.local_matrix =
            Mat4::from_quat(self.local_rotation) * Mat4::from_translation(self.local_translation);

        match parent {
            Some(parent) => {
                self.world_matrix = parent.matrix * self.local_matrix;
                self.world_orientation = (parent.orientation * self.local_rotation).normalize();

                // Direction is rotated by the parent, magnitude is carried over
                // exactly. A zero translation normalizes to zero and stays zero.
                let length = self.local_translation.length();
                let direction = self.local_translation.normalize_or_zero();
                self.world_position = parent.position + parent.orientation * direction * length;
            }
            None => {
                self.world_matrix = self.local_matrix;
                self.world_orientation = self.local_rotation;
                self.world_position = self.local_translation;
            }
        }
    }
}

/// Arena-backed forest of [`TransformNode`]s.
///
/// Nodes never own each other: the arena owns every node, and links between
/// them are [`NodeId`] handles. Removing a node therefore cannot leave a
/// dangling reference behind.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, TransformNode>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Create a node with identity local state and no links.
    pub fn create_node(&mut self) -> NodeId {
        let id = self.nodes.insert(TransformNode::new());
        tracing::debug!(?id, "node created");
        id
    }

    /// Create a root node with the given local translation and rotation.
    pub fn create_node_with(&mut self, translation: Vec3, rotation: Quat) -> NodeId {
        let id = self.create_node();
        let node = &mut self.nodes[id];
        node.local_translation = translation;
        node.local_rotation = rotation;
        id
    }

    /// Remove a node and return it.
    ///
    /// The node is detached from its parent. Its children are detached too and
    /// become roots; they are not removed.
    pub fn remove_node(&mut self, id: NodeId) -> Option<TransformNode> {
        let mut node = self.nodes.remove(id)?;
        if let Some(parent) = node.parent.take() {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != id);
            }
        }
        for child in node.children.drain(..) {
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
        }
        tracing::debug!(?id, "node removed");
        Some(node)
    }

    pub fn node(&self, id: NodeId) -> Option<&TransformNode> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut TransformNode> {
        self.nodes.get_mut(id)
    }

    /// Iterate every node in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &TransformNode)> {
        self.nodes.iter()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// All nodes without a parent, in arena order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of ancestors above `id` (0 for a root).
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut cursor = self.nodes.get(id)?.parent;
        while let Some(p) = cursor {
            depth += 1;
            cursor = self.nodes.get(p).and_then(|n| n.parent);
        }
        Some(depth)
    }

    /// True if `ancestor` is `id` itself or appears on `id`'s parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|n| n.parent);
        }
        false
    }

    /// Link `child` under `parent`, detaching it from any previous parent.
    ///
    /// Fails without touching the graph if either handle is stale or if
    /// `parent` lies inside `child`'s subtree.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.ensure(parent)?;
        self.ensure(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(SceneError::Cycle { parent, child });
        }

        if let Some(old) = self.nodes[child].parent {
            self.detach(old, child);
        }
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        tracing::debug!(?parent, ?child, "node attached");
        Ok(())
    }

    /// Unlink `child` from `parent`. Returns `false` and changes nothing if
    /// `child` is not currently a child of `parent`.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(p) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = p.children.iter().position(|&c| c == child) else {
            return false;
        };
        p.children.remove(index);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = None;
        }
        tracing::debug!(?parent, ?child, "node detached");
        true
    }

    /// Move `id` under `parent`, or make it a root when `parent` is `None`.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        match parent {
            Some(parent) => self.attach(parent, id),
            None => {
                self.ensure(id)?;
                if let Some(old) = self.nodes[id].parent {
                    self.detach(old, id);
                }
                Ok(())
            }
        }
    }

    /// Resolve `id` and its whole subtree into world space.
    ///
    /// The parent's cached world state is read as-is, so ancestors must already
    /// be up to date for this frame. Children are visited after their parent.
    pub fn update(&mut self, id: NodeId) -> Result<(), SceneError> {
        self.ensure(id)?;

        let mut stack: Vec<NodeId> = Vec::with_capacity(16);
        stack.push(id);
        let mut visited = 0usize;

        while let Some(handle) = stack.pop() {
            let parent = self
                .nodes
                .get(handle)
                .and_then(|n| n.parent)
                .and_then(|p| self.nodes.get(p))
                .map(TransformNode::frame);

            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            node.resolve(parent);
            visited += 1;

            // Reverse so the first child is popped first.
            stack.extend(node.children.iter().rev().copied());
        }

        tracing::trace!(root = ?id, visited, "transform update");
        Ok(())
    }

    /// Update every root and its subtree.
    pub fn update_all(&mut self) {
        for root in self.roots() {
            // Roots come straight from the arena, so they are always live.
            let _ = self.update(root);
        }
    }

    fn ensure(&self, id: NodeId) -> Result<(), SceneError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(SceneError::NodeNotFound(id))
        }
    }
}
