use egui::Pos2;

use crate::selection::NodeDescriptor;

/// Layout/rendering engine driven by the mindmap.
///
/// Calls carry the full current node set every time, implementations must
/// redraw idempotently.
pub trait Renderer {
    /// Recomputes positions for `visible` and redraws.
    fn relayout(&mut self, visible: &[String]);

    /// Fits the viewport to `visible` with `padding` graph units around it.
    fn fit(&mut self, visible: &[String], padding: f32);

    /// Moves the "selected" marker to `id`, clearing it everywhere else.
    fn set_selected_marker(&mut self, id: Option<&str>);
}

/// Detail panel showing the active node.
///
/// Implemented for closures `FnMut(Option<&NodeDescriptor>)` and, with the
/// `events` feature, for `crossbeam::channel::Sender<Option<NodeDescriptor>>`.
pub trait DetailPanel {
    fn on_active_node_changed(&mut self, descriptor: Option<&NodeDescriptor>);
}

impl<F> DetailPanel for F
where
    F: FnMut(Option<&NodeDescriptor>),
{
    fn on_active_node_changed(&mut self, descriptor: Option<&NodeDescriptor>) {
        self(descriptor);
    }
}

#[cfg(feature = "events")]
impl DetailPanel for crossbeam::channel::Sender<Option<NodeDescriptor>> {
    fn on_active_node_changed(&mut self, descriptor: Option<&NodeDescriptor>) {
        // a dropped receiver means the panel is gone, nothing left to update
        let _ = self.send(descriptor.cloned());
    }
}

/// Floating preview near the cursor.
pub trait TooltipPresenter {
    fn show_preview(&mut self, descriptor: &NodeDescriptor, cursor: Pos2);

    fn hide_preview(&mut self);
}

/// Tooltip that shows nothing, for hosts without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTooltip;

impl TooltipPresenter for NoTooltip {
    fn show_preview(&mut self, _: &NodeDescriptor, _: Pos2) {}

    fn hide_preview(&mut self) {}
}
