//! Configuration for the ear map UI.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::admin::DEFAULT_PICK_CAPACITY;
use crate::data::geometry::ViewBox;
use crate::data::text::Lang;
use crate::events::EventController;

pub use crate::color_scheme::{ColorScheme, DiagramPalette};

// ─────────────────────────────────────────────────────────────────────────────
// Outline image placement
// ─────────────────────────────────────────────────────────────────────────────

/// How the ear outline image is placed relative to the interactive overlay.
///
/// The outline is scaled about the overlay centre and optionally shifted;
/// points and areas are not affected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutlineTransform {
    /// Uniform scale about the overlay centre. Default: `1.12`.
    pub scale: f64,
    /// Translation in intrinsic units, applied after scaling.
    pub translate: [f64; 2],
    /// Replacement SVG for the bundled outline.
    pub svg_path: Option<PathBuf>,
}

impl Default for OutlineTransform {
    fn default() -> Self {
        Self {
            scale: 1.12,
            translate: [0.0, 0.0],
            svg_path: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle individual UI features on or off. All default to `true`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Show the admin toggle in the top bar.
    pub admin: bool,
    /// Show the search box.
    pub search: bool,
    /// Show the info panel on the right.
    pub info_panel: bool,
    /// Show the legend below the diagrams.
    pub legend: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            admin: true,
            search: true,
            info_panel: true,
            legend: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Responsive layout thresholds
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum-size thresholds that control responsive layout.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResponsiveLayout {
    /// Minimum central width (px) to draw the two ears side by side. Default: `520.0`.
    pub min_width_for_side_by_side: f32,
    /// Minimum window width (px) to show the list and info side panels. Default: `1100.0`.
    pub min_width_for_side_panels: f32,
    /// Default width (px) of the list panel.
    pub list_panel_width: f32,
    /// Default width (px) of the info panel.
    pub info_panel_width: f32,
}

impl Default for ResponsiveLayout {
    fn default() -> Self {
        Self {
            min_width_for_side_by_side: 520.0,
            min_width_for_side_panels: 1100.0,
            list_panel_width: 300.0,
            info_panel_width: 340.0,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EarMapConfig
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid view_box: {0}")]
    ViewBox(#[from] crate::data::geometry::ViewBoxParseError),
}

/// Top-level configuration for the ear map window.
///
/// | Field          | Purpose |
/// |----------------|---------|
/// | `view_box`     | Intrinsic bounds of the diagram asset |
/// | `outline`      | Placement of the ear outline image |
/// | `features`     | Toggle individual UI features on/off |
/// | `layout`       | Responsive thresholds |
/// | `color_scheme` | Visual theme |
/// | `events`       | Optional subscriber event bus |
#[derive(Clone)]
pub struct EarMapConfig {
    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    // ── Diagram ──────────────────────────────────────────────────────────────
    /// Intrinsic bounds shared by the outline and all catalog coordinates.
    pub view_box: ViewBox,
    pub outline: OutlineTransform,
    /// Catalog file to load instead of the bundled one.
    pub catalog_path: Option<PathBuf>,

    // ── Text ─────────────────────────────────────────────────────────────────
    /// Language at session start.
    pub default_lang: Lang,
    /// Font file with CJK glyphs. When `None`, common system locations are probed.
    pub cjk_font_path: Option<PathBuf>,

    // ── Appearance / behaviour ───────────────────────────────────────────────
    pub color_scheme: ColorScheme,
    pub features: FeatureFlags,
    pub layout: ResponsiveLayout,
    /// Number of admin picks kept in the pick log.
    pub admin_log_capacity: usize,

    // ── Programmatic access ──────────────────────────────────────────────────
    pub events: Option<EventController>,
}

impl Default for EarMapConfig {
    fn default() -> Self {
        Self {
            title: "Auricular Acupuncture Map".to_string(),
            native_options: None,

            view_box: ViewBox::default(),
            outline: OutlineTransform::default(),
            catalog_path: None,

            default_lang: Lang::default(),
            cjk_font_path: None,

            color_scheme: ColorScheme::default(),
            features: FeatureFlags::default(),
            layout: ResponsiveLayout::default(),
            admin_log_capacity: DEFAULT_PICK_CAPACITY,

            events: None,
        }
    }
}

/// YAML form of [`EarMapConfig`]. Absent fields keep their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EarMapConfigFile {
    pub title: Option<String>,
    /// `"min_x min_y width height"`, as in an SVG `viewBox` attribute.
    pub view_box: Option<String>,
    pub outline: Option<OutlineTransform>,
    pub catalog_path: Option<PathBuf>,
    pub default_lang: Option<Lang>,
    pub cjk_font_path: Option<PathBuf>,
    pub color_scheme: Option<ColorScheme>,
    pub features: Option<FeatureFlags>,
    pub layout: Option<ResponsiveLayout>,
    pub admin_log_capacity: Option<usize>,
}

impl EarMapConfigFile {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Overlay the fields present in this file onto `cfg`.
    pub fn apply_to(self, cfg: &mut EarMapConfig) -> Result<(), ConfigError> {
        if let Some(title) = self.title {
            cfg.title = title;
        }
        if let Some(vb) = self.view_box {
            cfg.view_box = vb.parse()?;
        }
        if let Some(outline) = self.outline {
            cfg.outline = outline;
        }
        if self.catalog_path.is_some() {
            cfg.catalog_path = self.catalog_path;
        }
        if let Some(lang) = self.default_lang {
            cfg.default_lang = lang;
        }
        if self.cjk_font_path.is_some() {
            cfg.cjk_font_path = self.cjk_font_path;
        }
        if let Some(scheme) = self.color_scheme {
            cfg.color_scheme = scheme;
        }
        if let Some(features) = self.features {
            cfg.features = features;
        }
        if let Some(layout) = self.layout {
            cfg.layout = layout;
        }
        if let Some(cap) = self.admin_log_capacity {
            cfg.admin_log_capacity = cap;
        }
        Ok(())
    }
}

impl EarMapConfig {
    /// Defaults overlaid with a YAML config file.
    pub fn from_yaml_path(path: &Path) -> Result<Self, ConfigError> {
        let txt = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::default();
        EarMapConfigFile::from_yaml_str(&txt)?.apply_to(&mut cfg)?;
        log::info!("loaded config {:?}", path);
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let file = EarMapConfigFile::from_yaml_str(
            "default_lang: en\ncolor_scheme: dark\nfeatures:\n  admin: false\n",
        )
        .unwrap();
        let mut cfg = EarMapConfig::default();
        file.apply_to(&mut cfg).unwrap();
        assert_eq!(cfg.default_lang, Lang::En);
        assert_eq!(cfg.color_scheme, ColorScheme::Dark);
        assert!(!cfg.features.admin);
        assert!(cfg.features.search);
        assert_eq!(cfg.outline.scale, 1.12);
        assert_eq!(cfg.view_box, ViewBox::default());
    }

    #[test]
    fn view_box_string_is_parsed() {
        let file = EarMapConfigFile::from_yaml_str("view_box: \"0 0 500 800\"").unwrap();
        let mut cfg = EarMapConfig::default();
        file.apply_to(&mut cfg).unwrap();
        assert_eq!(cfg.view_box.width, 500.0);
        assert_eq!(cfg.view_box.height, 800.0);
    }

    #[test]
    fn bad_view_box_is_an_error() {
        let file = EarMapConfigFile::from_yaml_str("view_box: \"0 0 wide\"").unwrap();
        let mut cfg = EarMapConfig::default();
        assert!(matches!(file.apply_to(&mut cfg), Err(ConfigError::ViewBox(_))));
    }
}
