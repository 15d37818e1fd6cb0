//! Top-level entry point for running the ear map as a native window.
//!
//! [`run_earmap`] rasterizes the outline SVG, installs fonts (Phosphor icons
//! and a CJK face for Chinese text) and enters the eframe event loop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;

use crate::config::EarMapConfig;
use crate::data::catalog::{Catalog, CatalogError};

use super::EarMapApp;

/// Bundled ear outline, embedded at compile time.
pub const BUILTIN_OUTLINE_SVG: &[u8] = include_bytes!("../../assets/ear_outline.svg");

/// Raster height of the outline texture in pixels.
const OUTLINE_RASTER_HEIGHT: u32 = 1400;
const ICON_SIZE: u32 = 256;

/// Common install locations of fonts with CJK coverage.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("SVG has an empty canvas")]
    EmptyImage,
}

/// Launch the ear map in a native window. Blocks until the window is closed.
pub fn run_earmap(mut cfg: EarMapConfig, catalog: Arc<Catalog>) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.icon.is_none() {
        match load_app_icon_svg(BUILTIN_OUTLINE_SVG) {
            Ok(icon) => opts.viewport = opts.viewport.clone().with_icon(icon),
            Err(e) => log::warn!("app icon unavailable: {e}"),
        }
    }
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    let outline = load_outline(cfg.outline.svg_path.as_deref());

    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            install_fonts(&cc.egui_ctx, cfg.cjk_font_path.as_deref());
            let texture = outline.map(|img| {
                cc.egui_ctx
                    .load_texture("ear_outline", img, egui::TextureOptions::LINEAR)
            });
            Ok(Box::new(EarMapApp::new(catalog, &cfg, texture)))
        }),
    )
}

/// The catalog named in `cfg`, or the bundled one.
pub fn load_catalog(cfg: &EarMapConfig) -> Result<Arc<Catalog>, CatalogError> {
    match &cfg.catalog_path {
        Some(path) => Catalog::load_from_path(path).map(Arc::new),
        None => Catalog::builtin(),
    }
}

/// Outline texture from `custom` if given and usable, else the bundled SVG.
fn load_outline(custom: Option<&Path>) -> Option<egui::ColorImage> {
    if let Some(path) = custom {
        let loaded = std::fs::read(path)
            .map_err(|source| AssetError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|data| outline_image(&data));
        match loaded {
            Ok(img) => return Some(img),
            Err(e) => log::warn!("outline {path:?} unusable, falling back to the bundled one: {e}"),
        }
    }
    match outline_image(BUILTIN_OUTLINE_SVG) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("bundled outline unusable: {e}");
            None
        }
    }
}

/// Rasterize an outline SVG into a white alpha mask, so the palette can
/// tint it. The image covers the SVG canvas, which must match the view box.
pub fn outline_image(data: &[u8]) -> Result<egui::ColorImage, AssetError> {
    let tree = parse_svg(data)?;
    let size = tree.size();
    let height = OUTLINE_RASTER_HEIGHT;
    let width = ((size.width() / size.height()) * height as f32).round().max(1.0) as u32;
    let pixmap = render_fitted(&tree, width, height)?;
    let mask: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            [a, a, a, a]
        })
        .collect();
    Ok(egui::ColorImage::from_rgba_premultiplied(
        [width as usize, height as usize],
        &mask,
    ))
}

fn load_app_icon_svg(data: &[u8]) -> Result<egui::IconData, AssetError> {
    let tree = parse_svg(data)?;
    let pixmap = render_fitted(&tree, ICON_SIZE, ICON_SIZE)?;
    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Ok(egui::IconData {
        rgba,
        width: ICON_SIZE,
        height: ICON_SIZE,
    })
}

fn parse_svg(data: &[u8]) -> Result<usvg::Tree, AssetError> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opt)?;
    let size = tree.size();
    if size.width() <= 0.0 || size.height() <= 0.0 {
        return Err(AssetError::EmptyImage);
    }
    Ok(tree)
}

/// Render `tree` centred into a `width × height` pixmap, preserving aspect.
fn render_fitted(tree: &usvg::Tree, width: u32, height: u32) -> Result<tiny_skia::Pixmap, AssetError> {
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(AssetError::EmptyImage)?;
    let size = tree.size();
    let s = (width as f32 / size.width()).min(height as f32 / size.height());
    let tx = (width as f32 - size.width() * s) * 0.5;
    let ty = (height as f32 - size.height() * s) * 0.5;
    let transform = tiny_skia::Transform::from_row(s, 0.0, 0.0, s, tx, ty);
    resvg::render(tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Phosphor icons plus a CJK fallback face for both families.
fn install_fonts(ctx: &egui::Context, cjk_path: Option<&Path>) {
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    match load_cjk_font(cjk_path) {
        Some((path, bytes)) => {
            fonts.font_data.insert(
                "cjk".to_owned(),
                Arc::new(egui::FontData::from_owned(bytes)),
            );
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push("cjk".to_owned());
            }
            log::info!("using CJK font {:?}", path);
        }
        None => log::warn!(
            "no CJK font found; Chinese text will render as boxes. Set cjk_font_path in the config"
        ),
    }
    ctx.set_fonts(fonts);
}

fn load_cjk_font(explicit: Option<&Path>) -> Option<(PathBuf, Vec<u8>)> {
    if let Some(path) = explicit {
        match std::fs::read(path) {
            Ok(bytes) => return Some((path.to_path_buf(), bytes)),
            Err(e) => log::warn!("CJK font {:?} unreadable: {e}", path),
        }
    }
    CJK_FONT_CANDIDATES.iter().find_map(|p| {
        let path = Path::new(p);
        std::fs::read(path).ok().map(|bytes| (path.to_path_buf(), bytes))
    })
}
