//! Color schemes for the ear map UI.
//!
//! A [`ColorScheme`] sets egui [`Visuals`] for the chrome and provides a
//! [`DiagramPalette`] for everything painted on the diagram itself.

use eframe::egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

/// Colors used when painting outlines, markers, areas and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiagramPalette {
    /// Fill behind the ear outline.
    pub canvas: Color32,
    /// Tint applied to the rasterized ear outline.
    pub outline_tint: Color32,
    pub marker: Color32,
    pub marker_selected: Color32,
    /// Ring drawn around the selected marker.
    pub ring: Color32,
    pub area_fill: Color32,
    pub area_fill_selected: Color32,
    pub area_stroke: Color32,
    pub label_bg: Color32,
    pub label_text: Color32,
    pub admin_badge: Color32,
}

/// Visual theme for the ear map window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
    /// Pure black background with maximally saturated accents.
    HighContrast,
}

impl ColorScheme {
    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Light, ColorScheme::Dark, ColorScheme::HighContrast]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
            ColorScheme::HighContrast => "High Contrast",
        }
    }

    /// Apply this scheme's visuals to an egui context.
    pub fn apply(&self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            ColorScheme::Light => {
                let mut v = Visuals::light();
                v.panel_fill = Color32::from_rgb(250, 248, 245);
                v.faint_bg_color = Color32::from_rgb(242, 238, 232);
                v
            }
            ColorScheme::Dark => Visuals::dark(),
            ColorScheme::HighContrast => {
                let mut v = Visuals::dark();
                let bg = Color32::BLACK;
                let fg = Color32::WHITE;
                v.panel_fill = bg;
                v.window_fill = Color32::from_rgb(10, 10, 10);
                v.extreme_bg_color = bg;
                v.faint_bg_color = Color32::from_rgb(20, 20, 20);
                v.override_text_color = Some(fg);
                v.widgets.noninteractive.bg_fill = Color32::from_rgb(20, 20, 20);
                v.widgets.noninteractive.fg_stroke.color = fg;
                v
            }
        }
    }

    pub fn palette(&self) -> DiagramPalette {
        match self {
            ColorScheme::Light => DiagramPalette {
                canvas: Color32::WHITE,
                outline_tint: Color32::from_rgb(60, 52, 46),
                marker: Color32::from_rgb(200, 60, 50),
                marker_selected: Color32::from_rgb(150, 20, 20),
                ring: Color32::from_rgb(230, 120, 30),
                area_fill: Color32::from_rgba_unmultiplied(60, 130, 200, 60),
                area_fill_selected: Color32::from_rgba_unmultiplied(230, 120, 30, 110),
                area_stroke: Color32::from_rgb(40, 90, 150),
                label_bg: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
                label_text: Color32::from_rgb(30, 30, 30),
                admin_badge: Color32::from_rgb(20, 110, 60),
            },
            ColorScheme::Dark => DiagramPalette {
                canvas: Color32::from_rgb(30, 30, 34),
                outline_tint: Color32::from_rgb(210, 200, 190),
                marker: Color32::from_rgb(255, 110, 90),
                marker_selected: Color32::from_rgb(255, 190, 80),
                ring: Color32::from_rgb(255, 190, 80),
                area_fill: Color32::from_rgba_unmultiplied(90, 160, 230, 60),
                area_fill_selected: Color32::from_rgba_unmultiplied(255, 170, 60, 110),
                area_stroke: Color32::from_rgb(120, 180, 240),
                label_bg: Color32::from_rgba_unmultiplied(20, 20, 24, 230),
                label_text: Color32::from_rgb(235, 235, 235),
                admin_badge: Color32::from_rgb(90, 200, 130),
            },
            ColorScheme::HighContrast => DiagramPalette {
                canvas: Color32::BLACK,
                outline_tint: Color32::WHITE,
                marker: Color32::from_rgb(255, 0, 0),
                marker_selected: Color32::from_rgb(255, 255, 0),
                ring: Color32::from_rgb(255, 255, 0),
                area_fill: Color32::from_rgba_unmultiplied(0, 160, 255, 80),
                area_fill_selected: Color32::from_rgba_unmultiplied(255, 255, 0, 120),
                area_stroke: Color32::from_rgb(0, 200, 255),
                label_bg: Color32::BLACK,
                label_text: Color32::WHITE,
                admin_badge: Color32::from_rgb(0, 255, 0),
            },
        }
    }
}
