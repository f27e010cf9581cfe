use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::LoadError,
    model::{Edge, GraphModel, Node, NodeId},
};

/// Abstraction for loading the static mindmap definition from text.
pub trait GraphImport {
    /// # Errors
    ///
    /// Returns a [`LoadError`] when `text` cannot be parsed or references
    /// unknown node ids.
    fn import(&self, text: &str) -> Result<GraphModel, LoadError>;
}

/// Default importer for the JSON form:
///
/// ```json
/// {
///   "nodes": [{"id": "root", "data": {"label": "Root", "summary": "..."}}],
///   "edges": [{"source": "root", "target": "a"}],
///   "hierarchy": {"root": ["a"]}
/// }
/// ```
///
/// Edge ids are derived from position: `e-0`, `e-1`, ...
pub struct JsonImport;

impl GraphImport for JsonImport {
    fn import(&self, text: &str) -> Result<GraphModel, LoadError> {
        let data: GraphData = serde_json::from_str(text)?;
        data.into_model()
    }
}

/// Loads a model from the default JSON form.
///
/// # Errors
///
/// See [`GraphImport::import`].
pub fn import_graph_from_str(text: &str) -> Result<GraphModel, LoadError> {
    JsonImport.import(text)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
    #[serde(default)]
    pub hierarchy: HashMap<NodeId, Vec<NodeId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    pub id: NodeId,
    pub data: NodeFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeFields {
    pub label: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeData {
    pub source: NodeId,
    pub target: NodeId,
}

impl GraphData {
    /// # Errors
    ///
    /// Returns a [`LoadError`] for duplicate ids or dangling edge and
    /// hierarchy references.
    pub fn into_model(self) -> Result<GraphModel, LoadError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| Node {
                id: n.id,
                label: n.data.label,
                summary: n.data.summary,
            })
            .collect::<Vec<_>>();
        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, e)| Edge::new(format!("e-{i}"), e.source, e.target))
            .collect::<Vec<_>>();

        debug!("loading {} nodes, {} edges", nodes.len(), edges.len());
        GraphModel::new(nodes, edges, self.hierarchy)
    }
}

impl TryFrom<GraphData> for GraphModel {
    type Error = LoadError;

    fn try_from(data: GraphData) -> Result<Self, Self::Error> {
        data.into_model()
    }
}
