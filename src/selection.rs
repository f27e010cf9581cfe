use std::fmt;

use egui::Pos2;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::{
    model::{GraphModel, NodeId},
    settings::SettingsInteraction,
    sinks::{DetailPanel, Renderer, TooltipPresenter},
    viewport::ViewportCommander,
    visibility::VisibilityEngine,
};

const NO_SUMMARY: &str = "No description available.";

/// Role of a node in the hierarchy as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Root,
    /// Has an entry in the hierarchy mapping.
    Category,
    Concept,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Root => "Root",
            Self::Category => "Category",
            Self::Concept => "Concept",
        };
        f.write_str(s)
    }
}

/// Everything the detail panel and tooltip get to know about a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub id: NodeId,
    pub label: String,
    pub summary: Option<String>,
    pub kind: NodeKind,
    pub connection_count: usize,
}

impl NodeDescriptor {
    /// Describes `id`, `None` if the model has no such node.
    pub fn from_model(model: &GraphModel, id: &str) -> Option<Self> {
        let node = model.node(id)?;
        let kind = if model.is_root(id) {
            NodeKind::Root
        } else if model.has_hierarchy_entry(id) {
            NodeKind::Category
        } else {
            NodeKind::Concept
        };

        Some(Self {
            id: node.id.clone(),
            label: node.label.clone(),
            summary: node.summary.clone(),
            kind,
            connection_count: model.connection_count(id),
        })
    }

    pub fn summary_or_default(&self) -> &str {
        self.summary.as_deref().unwrap_or(NO_SUMMARY)
    }
}

/// Hover preview and click lock.
///
/// Owns the detail panel and tooltip it pushes descriptors to.
pub struct SelectionController<P, T>
where
    P: DetailPanel,
    T: TooltipPresenter,
{
    panel: P,
    tooltip: T,
    settings: SettingsInteraction,

    hovered: Option<NodeId>,
    selected: Option<NodeId>,
}

impl<P, T> SelectionController<P, T>
where
    P: DetailPanel,
    T: TooltipPresenter,
{
    pub fn new(panel: P, tooltip: T, settings: SettingsInteraction) -> Self {
        Self {
            panel,
            tooltip,
            settings,
            hovered: None,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn settings(&self) -> &SettingsInteraction {
        &self.settings
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn tooltip(&self) -> &T {
        &self.tooltip
    }

    /// Shows a preview of `id`. Never changes the selection.
    ///
    /// With [`SettingsInteraction::hover_updates_panel`] the preview also
    /// replaces whatever the panel shows, a locked node included, until the
    /// next click.
    pub fn on_hover(&mut self, model: &GraphModel, id: &str, cursor: Pos2) -> bool {
        let Some(descriptor) = NodeDescriptor::from_model(model, id) else {
            warn!("hover over unknown node `{id}` ignored");
            return false;
        };
        trace!("hover `{id}`");

        self.hovered = Some(descriptor.id.clone());
        self.tooltip.show_preview(&descriptor, cursor);
        if self.settings.hover_updates_panel {
            self.panel.on_active_node_changed(Some(&descriptor));
        }
        true
    }

    pub fn on_hover_end(&mut self) {
        self.hovered = None;
        self.tooltip.hide_preview();
        if self.settings.clear_panel_on_hover_end {
            self.panel.on_active_node_changed(None);
        }
    }

    /// Locks `id` as the selection, moves the marker, pins its descriptor to
    /// the panel, then toggles its children and relayouts if anything changed.
    pub fn on_click<R: Renderer>(
        &mut self,
        model: &GraphModel,
        visibility: &mut VisibilityEngine,
        viewport: &mut ViewportCommander<R>,
        id: &str,
    ) -> bool {
        let Some(descriptor) = NodeDescriptor::from_model(model, id) else {
            warn!("click on unknown node `{id}` ignored");
            return false;
        };
        debug!("select `{id}`");

        self.selected = Some(descriptor.id.clone());
        viewport.set_selected_marker(Some(id));
        self.panel.on_active_node_changed(Some(&descriptor));

        if visibility.toggle_children(model, id).is_some() {
            viewport.relayout(model, visibility);
        }
        true
    }

    /// Drops the preview and hands back the collaborators.
    pub fn release(mut self) -> (P, T) {
        if self.hovered.take().is_some() {
            self.tooltip.hide_preview();
        }
        (self.panel, self.tooltip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::tests::sample_model, settings::SettingsNavigation, testing::RecordingRenderer,
        testing::RecordingTooltip,
    };

    type Shown = Vec<Option<String>>;

    fn controller(
        settings: SettingsInteraction,
    ) -> SelectionController<impl FnMut(Option<&NodeDescriptor>), RecordingTooltip> {
        controller_with_log(settings, std::rc::Rc::default())
    }

    fn controller_with_log(
        settings: SettingsInteraction,
        log: std::rc::Rc<std::cell::RefCell<Shown>>,
    ) -> SelectionController<impl FnMut(Option<&NodeDescriptor>), RecordingTooltip> {
        let panel = move |d: Option<&NodeDescriptor>| {
            log.borrow_mut().push(d.map(|d| d.id.clone()));
        };
        SelectionController::new(panel, RecordingTooltip::default(), settings)
    }

    #[test]
    fn test_descriptor_kinds() {
        let m = sample_model();
        let root = NodeDescriptor::from_model(&m, "root").unwrap();
        assert_eq!(root.kind, NodeKind::Root);
        assert_eq!(root.connection_count, 2);
        assert_eq!(root.summary_or_default(), "Everything");

        let a = NodeDescriptor::from_model(&m, "A").unwrap();
        assert_eq!(a.kind, NodeKind::Category);
        assert_eq!(a.kind.to_string(), "Category");

        let a1 = NodeDescriptor::from_model(&m, "A1").unwrap();
        assert_eq!(a1.kind, NodeKind::Concept);
        assert_eq!(a1.summary_or_default(), "No description available.");

        assert!(NodeDescriptor::from_model(&m, "nope").is_none());
    }

    #[test]
    fn test_hover_does_not_select() {
        let m = sample_model();
        let mut s = controller(SettingsInteraction::default());
        assert!(s.on_hover(&m, "A", Pos2::new(3., 4.)));
        assert_eq!(s.hovered(), Some("A"));
        assert_eq!(s.selected(), None);
        assert_eq!(s.tooltip().shown, [("A".to_string(), Pos2::new(3., 4.))]);

        s.on_hover_end();
        assert_eq!(s.hovered(), None);
        assert_eq!(s.tooltip().hidden, 1);
    }

    #[test]
    fn test_hover_overwrites_locked_panel() {
        let m = sample_model();
        let log = std::rc::Rc::default();
        let mut s = controller_with_log(SettingsInteraction::default(), std::rc::Rc::clone(&log));
        let mut v = VisibilityEngine::new();
        let mut vp = ViewportCommander::new(RecordingRenderer::default(), SettingsNavigation::default());

        s.on_click(&m, &mut v, &mut vp, "B");
        s.on_hover(&m, "A", Pos2::ZERO);
        s.on_hover_end();

        assert_eq!(s.selected(), Some("B"));
        assert_eq!(
            *log.borrow(),
            [Some("B".to_string()), Some("A".to_string())]
        );
    }

    #[test]
    fn test_hover_can_leave_panel_alone() {
        let m = sample_model();
        let log = std::rc::Rc::default();
        let settings = SettingsInteraction {
            hover_updates_panel: false,
            clear_panel_on_hover_end: true,
        };
        let mut s = controller_with_log(settings, std::rc::Rc::clone(&log));

        s.on_hover(&m, "A", Pos2::ZERO);
        s.on_hover_end();
        assert_eq!(*log.borrow(), [None]);
    }

    #[test]
    fn test_click_selects_marks_and_toggles() {
        let m = sample_model();
        let mut s = controller(SettingsInteraction::default());
        let mut v = VisibilityEngine::new();
        let mut vp = ViewportCommander::new(RecordingRenderer::default(), SettingsNavigation::default());

        assert!(s.on_click(&m, &mut v, &mut vp, "root"));
        assert_eq!(s.selected(), Some("root"));
        assert_eq!(vp.renderer().markers, [Some("root".to_string())]);
        assert_eq!(vp.renderer().relayouts, [vec!["root".to_string()]]);

        // leaf: selection moves, no relayout
        assert!(s.on_click(&m, &mut v, &mut vp, "B"));
        assert_eq!(s.selected(), Some("B"));
        assert_eq!(vp.renderer().relayouts.len(), 1);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let m = sample_model();
        let mut s = controller(SettingsInteraction::default());
        let mut v = VisibilityEngine::new();
        let mut vp = ViewportCommander::new(RecordingRenderer::default(), SettingsNavigation::default());

        assert!(!s.on_hover(&m, "ghost", Pos2::ZERO));
        assert!(!s.on_click(&m, &mut v, &mut vp, "ghost"));
        assert_eq!(s.selected(), None);
        assert!(vp.renderer().markers.is_empty());
    }

    #[test]
    fn test_release_hides_preview() {
        let m = sample_model();
        let mut s = controller(SettingsInteraction::default());
        s.on_hover(&m, "A", Pos2::ZERO);
        let (_, tooltip) = s.release();
        assert_eq!(tooltip.hidden, 1);
    }
}
