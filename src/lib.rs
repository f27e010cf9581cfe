mod error;
mod import;
mod layouts;
mod metadata;
mod mindmap;
mod model;
mod selection;
mod settings;
mod sinks;
mod viewport;
mod visibility;

pub mod events;

#[cfg(test)]
mod testing;

pub use self::error::{LoadError, SettingsError};
pub use self::import::{
    import_graph_from_str, EdgeData, GraphData, GraphImport, JsonImport, NodeData, NodeFields,
};
pub use self::layouts::TreeLayout;
pub use self::metadata::Frame;
pub use self::mindmap::{Collaborators, Mindmap};
pub use self::model::{Edge, GraphModel, Node, NodeId, ROOT_ID};
pub use self::selection::{NodeDescriptor, NodeKind, SelectionController};
pub use self::settings::{
    InitialVisibility, Orientation, Settings, SettingsInteraction, SettingsLayout, SettingsMount,
    SettingsNavigation,
};
pub use self::sinks::{DetailPanel, NoTooltip, Renderer, TooltipPresenter};
pub use self::viewport::{Command, ViewportCommander};
pub use self::visibility::{Toggle, VisibilityEngine};
