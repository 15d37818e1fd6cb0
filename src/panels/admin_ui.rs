//! Admin pick log: readouts plus copy, export and clear actions.

use egui::{RichText, Ui};

use super::panel_trait::{MapView, Panel, PanelState};
use crate::data::admin::format_readout;
use crate::data::mirror::EarSide;

/// Pick log shown while admin mode is on.
pub struct AdminPanel {
    state: PanelState,
    /// Last export outcome, shown under the buttons.
    status: Option<String>,
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Admin"),
            status: None,
        }
    }
}

impl Panel for AdminPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, view: &mut MapView<'_>) {
        let lang = view.controller.lang();
        ui.label(
            RichText::new(lang.pick("标点记录", "Picked coordinates"))
                .strong(),
        );
        ui.weak(lang.pick(
            "坐标为左耳（规范）坐标，右耳点击会自动换算。",
            "Coordinates are canonical (left ear); right-ear clicks are converted.",
        ));

        egui::ScrollArea::vertical()
            .max_height(160.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if view.picks.is_empty() {
                    ui.weak(lang.pick("尚无记录。", "No picks yet."));
                }
                for (i, pick) in view.picks.iter().enumerate().rev() {
                    let side = match pick.side {
                        EarSide::Left => lang.pick("左耳", "Left"),
                        EarSide::Right => lang.pick("右耳", "Right"),
                    };
                    ui.monospace(format!("#{:<2} {:<5} {}", i + 1, side, format_readout(pick.pos)));
                }
            });

        ui.horizontal(|ui| {
            let has_picks = !view.picks.is_empty();
            if ui
                .add_enabled(has_picks, egui::Button::new(format!(
                    "{} {}",
                    egui_phosphor::regular::COPY,
                    lang.pick("复制 YAML", "Copy YAML")
                )))
                .clicked()
            {
                ui.ctx().copy_text(view.picks.to_yaml_snippet());
                self.status = Some(lang.pick("已复制到剪贴板。", "Copied to clipboard.").to_string());
            }
            if ui
                .add_enabled(has_picks, egui::Button::new(format!(
                    "{} {}",
                    egui_phosphor::regular::FLOPPY_DISK,
                    lang.pick("导出…", "Export…")
                )))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name("picks.yaml")
                    .add_filter("YAML", &["yaml", "yml"])
                    .save_file()
                {
                    self.status = Some(match view.picks.export_to_path(&path) {
                        Ok(()) => format!("{} {}", lang.pick("已导出：", "Exported:"), path.display()),
                        Err(e) => {
                            log::warn!("admin pick export failed: {e}");
                            e.to_string()
                        }
                    });
                }
            }
            if ui
                .add_enabled(has_picks, egui::Button::new(format!(
                    "{} {}",
                    egui_phosphor::regular::BROOM,
                    lang.pick("清空", "Clear")
                )))
                .clicked()
            {
                view.clear_picks();
                self.status = None;
            }
        });

        if let Some(status) = &self.status {
            ui.small(status);
        }
    }
}
