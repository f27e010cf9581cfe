mod event;

pub use event::{Event, PayloadNodeClick, PayloadNodeHoverEnter};
