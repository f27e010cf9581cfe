use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    model::GraphModel, settings::SettingsNavigation, sinks::Renderer,
    visibility::VisibilityEngine,
};

/// User-facing view commands, as bound to the host's toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ExpandAll,
    CollapseAll,
    DrillDown,
    DrillUp,
    FitView,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expand_all" => Ok(Self::ExpandAll),
            "collapse_all" => Ok(Self::CollapseAll),
            "drill_down" => Ok(Self::DrillDown),
            "drill_up" => Ok(Self::DrillUp),
            "fit_view" => Ok(Self::FitView),
            other => Err(format!("unknown command `{other}`")),
        }
    }
}

/// Issues relayout and fit requests to the renderer it owns.
pub struct ViewportCommander<R: Renderer> {
    renderer: R,
    settings: SettingsNavigation,
}

impl<R: Renderer> ViewportCommander<R> {
    pub fn new(renderer: R, settings: SettingsNavigation) -> Self {
        Self { renderer, settings }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn settings(&self) -> &SettingsNavigation {
        &self.settings
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Lays out the currently visible nodes.
    pub fn relayout(&mut self, model: &GraphModel, visibility: &VisibilityEngine) {
        let visible = visibility.visible_nodes(model);
        debug!("relayout over {} nodes", visible.len());
        self.renderer.relayout(&visible);
    }

    pub fn set_selected_marker(&mut self, id: Option<&str>) {
        self.renderer.set_selected_marker(id);
    }

    pub fn expand_all(&mut self, model: &GraphModel, visibility: &mut VisibilityEngine) {
        visibility.expand_all();
        self.relayout(model, visibility);
    }

    pub fn collapse_all(&mut self, model: &GraphModel, visibility: &mut VisibilityEngine) {
        visibility.collapse_all(model);
        self.relayout(model, visibility);
    }

    /// Narrows the view to `selected`'s subtree. No-op without a selection.
    pub fn drill_down(
        &mut self,
        model: &GraphModel,
        visibility: &mut VisibilityEngine,
        selected: Option<&str>,
    ) -> bool {
        if !visibility.drill_down(model, selected) {
            return false;
        }
        self.relayout(model, visibility);
        true
    }

    pub fn drill_up(&mut self, model: &GraphModel, visibility: &mut VisibilityEngine) {
        visibility.drill_up();
        self.relayout(model, visibility);
    }

    /// Fits the view to the visible nodes. Never relayouts.
    pub fn fit_view(&mut self, model: &GraphModel, visibility: &VisibilityEngine) {
        let visible = visibility.visible_nodes(model);
        self.renderer.fit(&visible, self.settings.fit_padding);
    }

    /// Runs `command`. Returns `false` when it was a no-op.
    pub fn execute(
        &mut self,
        command: Command,
        model: &GraphModel,
        visibility: &mut VisibilityEngine,
        selected: Option<&str>,
    ) -> bool {
        debug!("command {command:?}");
        match command {
            Command::ExpandAll => self.expand_all(model, visibility),
            Command::CollapseAll => self.collapse_all(model, visibility),
            Command::DrillDown => return self.drill_down(model, visibility, selected),
            Command::DrillUp => self.drill_up(model, visibility),
            Command::FitView => self.fit_view(model, visibility),
        }
        true
    }
}
