use egui::Pos2;
use log::debug;

use crate::{
    events::{Event, PayloadNodeClick, PayloadNodeHoverEnter},
    model::GraphModel,
    selection::SelectionController,
    settings::{InitialVisibility, Settings},
    sinks::{DetailPanel, Renderer, TooltipPresenter},
    viewport::{Command, ViewportCommander},
    visibility::VisibilityEngine,
};

/// Collaborators a [`Mindmap`] drives. Handed over at mount, returned at unmount.
pub struct Collaborators<R, P, T> {
    pub renderer: R,
    pub panel: P,
    pub tooltip: T,
}

/// A mounted mindmap view.
///
/// Owns the loaded graph, the derived visibility and selection state and the
/// collaborators they report to. Every handler runs to completion before the
/// next one, in the order the host calls them.
pub struct Mindmap<R, P, T>
where
    R: Renderer,
    P: DetailPanel,
    T: TooltipPresenter,
{
    model: GraphModel,
    visibility: VisibilityEngine,
    selection: SelectionController<P, T>,
    viewport: ViewportCommander<R>,
}

impl<R, P, T> Mindmap<R, P, T>
where
    R: Renderer,
    P: DetailPanel,
    T: TooltipPresenter,
{
    /// Takes ownership of the collaborators, applies the initial visibility and
    /// lays out the result once.
    pub fn mount(model: GraphModel, collaborators: Collaborators<R, P, T>, settings: Settings) -> Self {
        let Collaborators {
            renderer,
            panel,
            tooltip,
        } = collaborators;

        let mut visibility = VisibilityEngine::new();
        if settings.mount.initial_visibility == InitialVisibility::Collapsed {
            visibility.collapse_all(&model);
        }

        let mut mindmap = Self {
            selection: SelectionController::new(panel, tooltip, settings.interaction),
            viewport: ViewportCommander::new(renderer, settings.navigation),
            visibility,
            model,
        };
        debug!("mounted with {} nodes", mindmap.model.node_count());
        mindmap.viewport.relayout(&mindmap.model, &mindmap.visibility);

        mindmap
    }

    /// Hides any open preview and gives the collaborators back.
    pub fn unmount(self) -> Collaborators<R, P, T> {
        let (panel, tooltip) = self.selection.release();
        debug!("unmounted");
        Collaborators {
            renderer: self.viewport.into_renderer(),
            panel,
            tooltip,
        }
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn visibility(&self) -> &VisibilityEngine {
        &self.visibility
    }

    pub fn visible_nodes(&self) -> Vec<String> {
        self.visibility.visible_nodes(&self.model)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.selection.hovered()
    }

    pub fn renderer(&self) -> &R {
        self.viewport.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        self.viewport.renderer_mut()
    }

    pub fn panel(&self) -> &P {
        self.selection.panel()
    }

    pub fn tooltip(&self) -> &T {
        self.selection.tooltip()
    }

    pub fn on_hover(&mut self, id: &str, cursor: Pos2) -> bool {
        self.selection.on_hover(&self.model, id, cursor)
    }

    pub fn on_hover_end(&mut self) {
        self.selection.on_hover_end();
    }

    pub fn on_click(&mut self, id: &str) -> bool {
        self.selection
            .on_click(&self.model, &mut self.visibility, &mut self.viewport, id)
    }

    pub fn expand_all(&mut self) {
        self.viewport.expand_all(&self.model, &mut self.visibility);
    }

    pub fn collapse_all(&mut self) {
        self.viewport.collapse_all(&self.model, &mut self.visibility);
    }

    /// Narrows the view to the selected node's subtree. No-op without a selection.
    pub fn drill_down(&mut self) -> bool {
        self.viewport
            .drill_down(&self.model, &mut self.visibility, self.selection.selected())
    }

    pub fn drill_up(&mut self) {
        self.viewport.drill_up(&self.model, &mut self.visibility);
    }

    pub fn fit_view(&mut self) {
        self.viewport.fit_view(&self.model, &self.visibility);
    }

    /// Runs a toolbar command. Returns `false` when it was a no-op.
    pub fn execute(&mut self, command: Command) -> bool {
        self.viewport.execute(
            command,
            &self.model,
            &mut self.visibility,
            self.selection.selected(),
        )
    }

    /// Routes a host event to its handler. Returns `false` when it was ignored.
    pub fn dispatch(&mut self, event: Event) -> bool {
        match event {
            Event::NodeHoverEnter(PayloadNodeHoverEnter { id, pos }) => {
                self.on_hover(&id, Pos2::new(pos[0], pos[1]))
            }
            Event::NodeHoverLeave => {
                self.on_hover_end();
                true
            }
            Event::NodeClick(PayloadNodeClick { id }) => self.on_click(&id),
            Event::Command(command) => self.execute(command),
        }
    }
}
