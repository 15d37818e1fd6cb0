//! Standalone ear map application.
//!
//! [`EarMapApp`] owns one session's [`SelectionController`] plus the panels
//! that draw it, and implements [`eframe::App`].

use std::sync::Arc;

use eframe::egui;

use crate::color_scheme::ColorScheme;
use crate::config::{EarMapConfig, FeatureFlags, ResponsiveLayout};
use crate::data::admin::AdminPickLog;
use crate::data::catalog::Catalog;
use crate::data::selection::SelectionController;
use crate::events::{EventController, EventKind, MapEvent};
use crate::panels::{AdminPanel, CatalogPanel, DiagramPanel, InfoPanel, MapView, Panel};

pub struct EarMapApp {
    // ── Session state ────────────────────────────────────────────────────────
    pub(crate) controller: SelectionController,
    pub(crate) picks: AdminPickLog,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub(crate) catalog_panel: CatalogPanel,
    pub(crate) info_panel: InfoPanel,
    pub(crate) admin_panel: AdminPanel,
    pub(crate) diagram: DiagramPanel,

    // ── Appearance / behaviour ───────────────────────────────────────────────
    pub(crate) color_scheme: ColorScheme,
    pub(crate) color_scheme_applied: bool,
    pub(crate) features: FeatureFlags,
    pub(crate) layout: ResponsiveLayout,

    pub(crate) events: Option<EventController>,
}

impl EarMapApp {
    /// Build the app for `catalog`. `outline` is the uploaded ear outline,
    /// or `None` to draw the overlay on a plain canvas.
    pub fn new(
        catalog: Arc<Catalog>,
        cfg: &EarMapConfig,
        outline: Option<egui::TextureHandle>,
    ) -> Self {
        if catalog.view_box() != &cfg.view_box {
            log::warn!(
                "catalog view box {} differs from configured {}; using the catalog's",
                catalog.view_box(),
                cfg.view_box
            );
        }
        let mut info_panel = InfoPanel::default();
        info_panel.state_mut().visible = cfg.features.info_panel;
        Self {
            controller: SelectionController::new(catalog).with_lang(cfg.default_lang),
            picks: AdminPickLog::with_capacity(cfg.admin_log_capacity),
            catalog_panel: CatalogPanel::default(),
            info_panel,
            admin_panel: AdminPanel::default(),
            diagram: DiagramPanel::new(
                outline,
                cfg.outline.clone(),
                &cfg.layout,
                cfg.features.legend,
            ),
            color_scheme: cfg.color_scheme,
            color_scheme_applied: false,
            features: cfg.features.clone(),
            layout: cfg.layout.clone(),
            events: cfg.events.clone(),
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn picks(&self) -> &AdminPickLog {
        &self.picks
    }

    /// Publish a transition made outside a panel (top bar, mode row, keys).
    pub(crate) fn emit(&self, kinds: EventKind) {
        if kinds.is_empty() {
            return;
        }
        if let Some(events) = &self.events {
            events.emit(MapEvent::new(kinds).with_state(self.controller.state()));
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            let kinds = self.controller.clear_selection();
            self.emit(kinds);
        }
    }
}

impl eframe::App for EarMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("earmap_top").show(ctx, |ui| {
            self.render_top_bar(ui);
            ui.separator();
            self.render_mode_row(ui);
            ui.add_space(4.0);
        });

        let palette = self.color_scheme.palette();

        if self.controller.state().admin {
            egui::TopBottomPanel::bottom(self.admin_panel.title())
                .resizable(true)
                .show(ctx, |ui| {
                    let mut view = MapView {
                        controller: &mut self.controller,
                        picks: &mut self.picks,
                        palette,
                        events: self.events.as_ref(),
                    };
                    self.admin_panel.render_panel(ui, &mut view);
                });
        }

        if self.show_side_panels(ctx) {
            self.render_side_panels(ctx, palette);
        } else {
            self.render_stacked_panels(ctx, palette);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut view = MapView {
                controller: &mut self.controller,
                picks: &mut self.picks,
                palette,
                events: self.events.as_ref(),
            };
            self.diagram.render_panel(ui, &mut view);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_panel_visibility_follows_features() {
        let catalog = Catalog::builtin().unwrap();
        let mut cfg = EarMapConfig::default();
        assert!(EarMapApp::new(Arc::clone(&catalog), &cfg, None).info_panel.state().visible);

        cfg.features.info_panel = false;
        let app = EarMapApp::new(catalog, &cfg, None);
        assert!(!app.info_panel.state().visible);
        assert_eq!(app.picks().capacity(), cfg.admin_log_capacity);
    }
}
