use thiserror::Error;

/// Faults detected while building a [`crate::GraphModel`] from static data.
///
/// Any of these aborts loading: no partial model is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid graph json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate node id `{0}`")]
    DuplicateNode(String),

    #[error("edge `{edge}` references unknown node `{node}`")]
    UnknownEdgeEndpoint { edge: String, node: String },

    #[error("hierarchy references unknown parent `{0}`")]
    UnknownHierarchyParent(String),

    #[error("hierarchy entry of `{parent}` references unknown child `{child}`")]
    UnknownHierarchyChild { parent: String, child: String },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
}
