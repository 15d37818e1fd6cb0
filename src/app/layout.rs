//! Window chrome for [`EarMapApp`]: top bar, mode row and the responsive
//! placement of the list and info panels.

use eframe::egui;
use egui_phosphor::regular::{CROSSHAIR, MAGNIFYING_GLASS, PALETTE};

use crate::color_scheme::{ColorScheme, DiagramPalette};
use crate::data::admin::format_readout;
use crate::data::catalog::Standard;
use crate::data::selection::Mode;
use crate::data::text::Lang;
use crate::panels::{MapView, Panel};

use super::EarMapApp;

impl EarMapApp {
    /// Side panels need the full window width; below the threshold the
    /// list and info stack under the diagrams.
    pub(crate) fn show_side_panels(&self, ctx: &egui::Context) -> bool {
        let rect = ctx.input(|i| i.content_rect());
        rect.width() >= self.layout.min_width_for_side_panels
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Top bar
    // ─────────────────────────────────────────────────────────────────────────

    /// Title, subtitle, language switch, admin toggle and scheme picker.
    pub(crate) fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        let lang = self.controller.lang();
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(lang.pick(
                    "耳穴/功能区 科普互动图",
                    "Auricular Points & Zones (Educational)",
                ));
                ui.small(lang.pick(
                    "同一页面切换：穴位（点：NADA / GB/T）与 功能区（区域）。仅科普演示，不用于诊断或治疗。",
                    "One page with modes: Points (NADA / GB/T) and Zones (Areas). Educational only; not medical advice.",
                ));
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut scheme = self.color_scheme;
                egui::ComboBox::from_id_salt("earmap_scheme")
                    .selected_text(format!("{PALETTE} {}", scheme.label()))
                    .show_ui(ui, |ui| {
                        for s in ColorScheme::all() {
                            ui.selectable_value(&mut scheme, *s, s.label());
                        }
                    });
                if scheme != self.color_scheme {
                    self.color_scheme = scheme;
                    self.color_scheme_applied = false;
                }

                if self.features.admin {
                    let admin = self.controller.state().admin;
                    if ui
                        .selectable_label(admin, format!("{CROSSHAIR} {}", lang.pick("标点模式", "Admin")))
                        .on_hover_text(lang.pick(
                            "标点模式：点击图上位置读取坐标",
                            "Admin mode: click the map to read coordinates",
                        ))
                        .clicked()
                    {
                        let kinds = self.controller.toggle_admin();
                        self.emit(kinds);
                    }
                }

                // Right-to-left: add in reverse so they read 中文 | English.
                for l in Lang::all().iter().rev() {
                    if ui.selectable_label(lang == *l, l.native_label()).clicked() {
                        let kinds = self.controller.set_lang(*l);
                        self.emit(kinds);
                    }
                }
            });
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mode row
    // ─────────────────────────────────────────────────────────────────────────

    /// Mode and standard switches, search box and the admin readout badge.
    pub(crate) fn render_mode_row(&mut self, ui: &mut egui::Ui) {
        let lang = self.controller.lang();
        ui.horizontal_wrapped(|ui| {
            for mode in [Mode::Points, Mode::Areas] {
                if ui
                    .selectable_label(self.controller.mode() == mode, mode.label(lang))
                    .clicked()
                {
                    let kinds = self.controller.set_mode(mode);
                    self.emit(kinds);
                }
            }

            if self.controller.mode() == Mode::Points {
                ui.separator();
                for standard in Standard::all() {
                    let active = self.controller.state().standard == *standard;
                    if ui.selectable_label(active, standard.button_label()).clicked() {
                        let kinds = self.controller.set_standard(*standard);
                        self.emit(kinds);
                    }
                }
            }

            if self.features.search {
                ui.separator();
                ui.label(MAGNIFYING_GLASS);
                let mut query = self.controller.state().search_text.clone();
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .hint_text(lang.pick(
                            "搜索：神门 / 肺 / spine ...",
                            "Search: Shen Men / Lung / spine ...",
                        ))
                        .desired_width(260.0),
                );
                if resp.changed() {
                    let kinds = self.controller.set_search_text(query);
                    self.emit(kinds);
                }
            }

            if let Some(c) = self.controller.state().last_admin_coordinate {
                let badge = self.color_scheme.palette().admin_badge;
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::Frame::group(ui.style())
                        .stroke(egui::Stroke::new(1.5, badge))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(format_readout(c)).monospace().color(badge));
                        });
                });
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Side panels
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn render_side_panels(&mut self, ctx: &egui::Context, palette: DiagramPalette) {
        egui::SidePanel::left(self.catalog_panel.title())
            .resizable(true)
            .default_width(self.layout.list_panel_width)
            .show(ctx, |ui| {
                let mut view = MapView {
                    controller: &mut self.controller,
                    picks: &mut self.picks,
                    palette,
                    events: self.events.as_ref(),
                };
                self.catalog_panel.render_panel(ui, &mut view);
            });

        if self.info_panel.state().visible {
            egui::SidePanel::right(self.info_panel.title())
                .resizable(true)
                .default_width(self.layout.info_panel_width)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        let mut view = MapView {
                            controller: &mut self.controller,
                            picks: &mut self.picks,
                            palette,
                            events: self.events.as_ref(),
                        };
                        self.info_panel.render_panel(ui, &mut view);
                    });
                });
        }
    }

    /// Narrow windows: list and info side by side below the diagrams.
    pub(crate) fn render_stacked_panels(&mut self, ctx: &egui::Context, palette: DiagramPalette) {
        egui::TopBottomPanel::bottom("earmap_stacked")
            .resizable(true)
            .default_height(260.0)
            .show(ctx, |ui| {
                let columns = if self.info_panel.state().visible { 2 } else { 1 };
                ui.columns(columns, |cols| {
                    let mut view = MapView {
                        controller: &mut self.controller,
                        picks: &mut self.picks,
                        palette,
                        events: self.events.as_ref(),
                    };
                    self.catalog_panel.render_panel(&mut cols[0], &mut view);
                    if let Some(col) = cols.get_mut(1) {
                        egui::ScrollArea::vertical()
                            .id_salt(self.info_panel.title())
                            .show(col, |ui| self.info_panel.render_panel(ui, &mut view));
                    }
                });
            });
    }
}
