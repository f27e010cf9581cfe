use std::collections::{HashMap, HashSet};

use petgraph::{
    stable_graph::{NodeIndex, StableGraph},
    visit::EdgeRef,
    Direction,
};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Id of the node the hierarchy is conventionally rooted at.
pub const ROOT_ID: &str = "root";

pub type NodeId = String;

/// Mindmap node. Immutable once the model is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Immutable mindmap graph: nodes, the general edge set and the
/// parent -> ordered children hierarchy laid over it.
///
/// Node order is the load order and is used for every node listing the
/// crate produces.
#[derive(Debug, Clone)]
pub struct GraphModel {
    g: StableGraph<Node, Edge>,
    index: HashMap<NodeId, NodeIndex>,
    hierarchy: HashMap<NodeId, Vec<NodeId>>,
}

impl GraphModel {
    /// Builds the model, validating every edge and hierarchy reference.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] for duplicate node ids and for edges or
    /// hierarchy entries referencing ids that are not among `nodes`.
    pub fn new(
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        hierarchy: HashMap<NodeId, Vec<NodeId>>,
    ) -> Result<Self, LoadError> {
        let mut g = StableGraph::with_capacity(nodes.len(), edges.len());
        let mut index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if index.contains_key(&node.id) {
                return Err(LoadError::DuplicateNode(node.id));
            }
            let id = node.id.clone();
            let idx = g.add_node(node);
            index.insert(id, idx);
        }

        for edge in edges {
            let source = endpoint(&index, &edge, &edge.source)?;
            let target = endpoint(&index, &edge, &edge.target)?;
            g.add_edge(source, target, edge);
        }

        for (parent, children) in &hierarchy {
            if !index.contains_key(parent) {
                return Err(LoadError::UnknownHierarchyParent(parent.clone()));
            }
            if let Some(child) = children.iter().find(|c| !index.contains_key(*c)) {
                return Err(LoadError::UnknownHierarchyChild {
                    parent: parent.clone(),
                    child: child.clone(),
                });
            }
        }

        Ok(Self {
            g,
            index,
            hierarchy,
        })
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.g.node_weights()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.g.edge_weights()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|idx| &self.g[*idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    /// Direct children of `id` in hierarchy order. Empty for leaves and unknown ids.
    pub fn children_of(&self, id: &str) -> &[NodeId] {
        self.hierarchy.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `id` is a key of the hierarchy mapping, even with an empty child list.
    pub fn has_hierarchy_entry(&self, id: &str) -> bool {
        self.hierarchy.contains_key(id)
    }

    pub fn is_root(&self, id: &str) -> bool {
        id == ROOT_ID
    }

    /// Number of edges where `id` is source or target. A self loop counts once.
    pub fn connection_count(&self, id: &str) -> usize {
        let Some(idx) = self.index.get(id).copied() else {
            return 0;
        };
        let outgoing = self.g.edges_directed(idx, Direction::Outgoing).count();
        let incoming = self
            .g
            .edges_directed(idx, Direction::Incoming)
            .filter(|e| e.source() != e.target())
            .count();
        outgoing + incoming
    }

    /// Depth-first closure of `id` over the hierarchy, `id` first.
    ///
    /// Nodes reachable twice (malformed hierarchies with shared children or
    /// cycles) are listed once.
    pub fn subtree(&self, id: &str) -> Vec<NodeId> {
        let mut visited = HashSet::new();
        let mut out = Vec::new();
        self.collect_subtree(id, &mut visited, &mut out);
        out
    }

    /// All descendants of `id` at every depth, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> Vec<NodeId> {
        let mut closure = self.subtree(id);
        closure.retain(|n| n != id);
        closure
    }

    /// Hierarchy parent of `id`, if any entry lists it as a child.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.hierarchy
            .iter()
            .find(|(_, children)| children.iter().any(|c| c == id))
            .map(|(parent, _)| parent.as_str())
    }

    fn collect_subtree(&self, id: &str, visited: &mut HashSet<NodeId>, out: &mut Vec<NodeId>) {
        if !visited.insert(id.to_string()) {
            return;
        }
        out.push(id.to_string());
        for child in self.children_of(id) {
            self.collect_subtree(child, visited, out);
        }
    }
}

fn endpoint(
    index: &HashMap<NodeId, NodeIndex>,
    edge: &Edge,
    node: &str,
) -> Result<NodeIndex, LoadError> {
    index
        .get(node)
        .copied()
        .ok_or_else(|| LoadError::UnknownEdgeEndpoint {
            edge: edge.id.clone(),
            node: node.to_string(),
        })
}
