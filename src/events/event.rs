use serde::{Deserialize, Serialize};

use crate::viewport::Command;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeHoverEnter {
    pub id: String,
    /// Cursor position in screen coordinates
    pub pos: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadNodeClick {
    pub id: String,
}

/// Input from the host UI, fed to [`crate::Mindmap::dispatch`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    NodeHoverEnter(PayloadNodeHoverEnter),
    NodeHoverLeave,
    NodeClick(PayloadNodeClick),
    Command(Command),
}
