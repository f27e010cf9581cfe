use egui::Pos2;

use crate::{
    selection::NodeDescriptor,
    sinks::{Renderer, TooltipPresenter},
};

#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub relayouts: Vec<Vec<String>>,
    pub fits: Vec<(Vec<String>, f32)>,
    pub markers: Vec<Option<String>>,
}

impl Renderer for RecordingRenderer {
    fn relayout(&mut self, visible: &[String]) {
        self.relayouts.push(visible.to_vec());
    }

    fn fit(&mut self, visible: &[String], padding: f32) {
        self.fits.push((visible.to_vec(), padding));
    }

    fn set_selected_marker(&mut self, id: Option<&str>) {
        self.markers.push(id.map(str::to_string));
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingTooltip {
    pub shown: Vec<(String, Pos2)>,
    pub hidden: usize,
}

impl TooltipPresenter for RecordingTooltip {
    fn show_preview(&mut self, descriptor: &NodeDescriptor, cursor: Pos2) {
        self.shown.push((descriptor.id.clone(), cursor));
    }

    fn hide_preview(&mut self) {
        self.hidden += 1;
    }
}
