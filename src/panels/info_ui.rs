//! Details of the current selection.

use egui::{RichText, Ui};

use super::panel_trait::{MapView, Panel, PanelState};
use crate::data::selection::Mode;
use crate::data::text::{Lang, Localized};

/// Right-hand details for the current selection, plus the disclaimer.
pub struct InfoPanel {
    state: PanelState,
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Info"),
        }
    }
}

impl Panel for InfoPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, view: &mut MapView<'_>) {
        let lang = view.controller.lang();

        match view.controller.mode() {
            Mode::Points => match view.controller.selected_point() {
                Some(p) => {
                    ui.horizontal_wrapped(|ui| {
                        badge(ui, p.standard.tag());
                        badge(ui, p.category.label(lang));
                    });
                    ui.add_space(6.0);
                    ui.heading(p.name.get(lang));
                    details(ui, lang, &p.organ, &p.summary, p.case.as_ref());
                }
                None => empty_info(ui, lang, lang.pick("点位信息", "Point info")),
            },
            Mode::Areas => match view.controller.selected_area() {
                Some(a) => {
                    badge(ui, lang.pick("功能区", "Zone"));
                    ui.add_space(6.0);
                    ui.heading(a.name.get(lang));
                    details(ui, lang, &a.organ, &a.summary, a.case.as_ref());
                }
                None => empty_info(ui, lang, lang.pick("区域信息", "Area info")),
            },
        }

        ui.add_space(14.0);
        key_value(
            ui,
            lang.pick("免责声明", "Disclaimer"),
            lang.pick(
                "仅用于科普/教学演示。不要把本页面内容当作诊断或治疗依据；如有不适请咨询专业医疗人员。",
                "Educational demo only. Not for diagnosis or treatment decisions; consult a qualified clinician for symptoms.",
            ),
        );
    }
}

fn details(ui: &mut Ui, lang: Lang, organ: &Localized, summary: &Localized, case: Option<&Localized>) {
    key_value(
        ui,
        lang.pick("关联脏腑/系统（科普）", "Related organ/system (educational)"),
        organ.get(lang),
    );
    key_value(ui, lang.pick("科普说明", "Educational note"), summary.get(lang));
    if let Some(case) = case.filter(|c| !c.is_empty()) {
        key_value(
            ui,
            lang.pick("小病例/使用场景（科普）", "Mini case / use scenario (educational)"),
            case.get(lang),
        );
    }
}

fn empty_info(ui: &mut Ui, lang: Lang, title: &str) {
    ui.heading(title);
    ui.add_space(8.0);
    ui.weak(lang.pick(
        "先在左侧列表或耳朵上选择一个项目。",
        "Pick an item from the list or click the map.",
    ));
}

fn key_value(ui: &mut Ui, key: &str, value: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(key).small().weak());
    ui.label(value);
}

fn badge(ui: &mut Ui, text: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small());
        });
}
