//! Point and zone list for the left side panel.

use egui::{RichText, Ui};

use super::panel_trait::{MapView, Panel, PanelState};
use crate::data::selection::Mode;

/// Left-hand list of the currently visible points or areas.
pub struct CatalogPanel {
    state: PanelState,
}

impl Default for CatalogPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Catalog"),
        }
    }
}

impl Panel for CatalogPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, view: &mut MapView<'_>) {
        let lang = view.controller.lang();
        let st = view.controller.state().clone();

        match st.mode {
            Mode::Points => {
                ui.horizontal(|ui| {
                    ui.label(lang.pick("当前标准：", "Standard: "));
                    ui.label(RichText::new(st.standard.tag()).strong());
                });
            }
            Mode::Areas => {
                ui.label(lang.pick("当前模式：功能区（区域）", "Mode: Zones (Areas)"));
            }
        }
        ui.separator();

        // Clicks are collected first; the controller is borrowed by the list.
        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height((ui.available_height() - 60.0).max(80.0))
            .show(ui, |ui| match st.mode {
                Mode::Points => {
                    let points = view.controller.visible_points();
                    if points.is_empty() {
                        ui.weak(lang.pick("没有匹配的点位。", "No matching points."));
                    }
                    for p in points {
                        let active = st.selected_point.as_deref() == Some(p.id.as_str());
                        let meta = format!(
                            "{} · {} · {}",
                            p.category.label(lang),
                            p.organ.get(lang),
                            p.standard
                        );
                        if list_item(ui, active, p.name.get(lang), &meta) {
                            clicked = Some(p.id.clone());
                        }
                    }
                }
                Mode::Areas => {
                    let areas = view.controller.visible_areas();
                    if areas.is_empty() {
                        ui.weak(lang.pick("目录中没有区域。", "The catalog has no zones."));
                    }
                    for a in areas {
                        let active = st.selected_area.as_deref() == Some(a.id.as_str());
                        if list_item(ui, active, a.name.get(lang), a.organ.get(lang)) {
                            clicked = Some(a.id.clone());
                        }
                    }
                }
            });

        if let Some(id) = clicked {
            let result = match st.mode {
                Mode::Points => view.controller.select_point(&id),
                Mode::Areas => view.controller.select_area(&id),
            };
            match result {
                Ok(kinds) => view.emit(kinds),
                Err(e) => log::warn!("list selection ignored: {e}"),
            }
        }

        ui.separator();
        let hint = if st.admin {
            lang.pick(
                "标点模式开启：点击耳朵空白处可读取坐标（右上角显示）。用来快速补充/修正 GB/T 点位。",
                "Admin on: click empty map to read coordinates (shown top right). Use to re-mark GB/T points quickly.",
            )
        } else {
            lang.pick(
                "提示：右耳为镜像显示。点位/功能区示意用于教学演示。",
                "Tip: Right ear is mirrored. Points/zones are schematic for education.",
            )
        };
        ui.small(hint);
    }
}

/// One selectable row: title plus a muted meta line. Returns `true` when clicked.
fn list_item(ui: &mut Ui, active: bool, title: &str, meta: &str) -> bool {
    let text = RichText::new(title).strong();
    let resp = ui
        .vertical(|ui| {
            let r = ui.selectable_label(active, text);
            ui.weak(meta);
            r
        })
        .inner;
    ui.add_space(4.0);
    resp.clicked()
}
