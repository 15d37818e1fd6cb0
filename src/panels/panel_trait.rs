use egui::Ui;

use crate::color_scheme::DiagramPalette;
use crate::data::admin::AdminPickLog;
use crate::data::selection::SelectionController;
use crate::events::{EventController, EventKind, MapEvent};

/// Everything a panel may read or change during one frame.
pub struct MapView<'a> {
    pub controller: &'a mut SelectionController,
    pub picks: &'a mut AdminPickLog,
    pub palette: DiagramPalette,
    pub events: Option<&'a EventController>,
}

impl MapView<'_> {
    /// Publish a transition together with the resulting state.
    pub fn emit(&self, kinds: EventKind) {
        if kinds.is_empty() {
            return;
        }
        if let Some(events) = self.events {
            events.emit(MapEvent::new(kinds).with_state(self.controller.state()));
        }
    }

    /// Empty the pick log together with the readout of its last pick.
    pub fn clear_picks(&mut self) {
        self.picks.clear();
        self.controller.clear_admin_coordinate();
    }

    pub fn emit_event(&self, event: MapEvent) {
        if let Some(events) = self.events {
            events.emit(event);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub visible: bool,
}

impl PanelState {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            visible: true,
        }
    }
}

pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn render_panel(&mut self, _ui: &mut Ui, _view: &mut MapView<'_>) {}
}
