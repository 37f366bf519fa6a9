use treeline_common::NodeId;
use treeline_scene::SceneGraph;

/// Scene graph inspector for developer tooling.
///
/// Provides read-only queries against a graph for debugging and CLI output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the graph's shape.
    pub fn summary(graph: &SceneGraph) -> SceneSummary {
        let mut max_depth = 0;
        let mut leaf_count = 0;
        for (id, node) in graph.iter() {
            max_depth = max_depth.max(graph.depth(id).unwrap_or(0));
            if node.children().is_empty() {
                leaf_count += 1;
            }
        }
        SceneSummary {
            node_count: graph.len(),
            root_count: graph.roots().len(),
            leaf_count,
            max_depth,
        }
    }

    /// Local and resolved state of a single node.
    pub fn inspect_node(graph: &SceneGraph, id: NodeId) -> Option<NodeInfo> {
        let node = graph.node(id)?;
        let t = node.local_translation;
        let p = node.world_position();
        let o = node.world_orientation();
        Some(NodeInfo {
            id,
            depth: graph.depth(id).unwrap_or(0),
            child_count: node.children().len(),
            local_translation: [t.x, t.y, t.z],
            world_position: [p.x, p.y, p.z],
            world_orientation: [o.x, o.y, o.z, o.w],
        })
    }

    /// Every node in parent-before-children order, with its depth.
    pub fn outline(graph: &SceneGraph) -> Vec<(usize, NodeId)> {
        let mut out = Vec::with_capacity(graph.len());
        let mut stack: Vec<(usize, NodeId)> =
            graph.roots().into_iter().rev().map(|id| (0, id)).collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            stack.extend(graph.children(id).iter().rev().map(|&c| (depth + 1, c)));
        }
        out
    }
}

/// Shape of a scene graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSummary {
    pub node_count: usize,
    pub root_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} roots={} leaves={} max_depth={}",
            self.node_count, self.root_count, self.leaf_count, self.max_depth
        )
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone)]
pub struct NodeInfo {
    pub id: NodeId,
    pub depth: usize,
    pub child_count: usize,
    pub local_translation: [f32; 3],
    pub world_position: [f32; 3],
    pub world_orientation: [f32; 4],
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node {:?} depth={} children={} local=({:.2}, {:.2}, {:.2}) world=({:.2}, {:.2}, {:.2})",
            self.id,
            self.depth,
            self.child_count,
            self.local_translation[0],
            self.local_translation[1],
            self.local_translation[2],
            self.world_position[0],
            self.world_position[1],
            self.world_position[2],
        )
    }
}
