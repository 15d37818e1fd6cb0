//! Main application module for the ear map GUI.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`earmap_app`]    | [`EarMapApp`] (eframe) and per-frame panel wiring |
//! | [`layout`]        | Top bar, mode row, responsive side/stacked panels |
//! | [`run`]           | [`run_earmap()`] entry point, SVG rasterizing, fonts |

mod earmap_app;
mod layout;
mod run;

pub use earmap_app::EarMapApp;
pub use run::{load_catalog, outline_image, run_earmap, AssetError, BUILTIN_OUTLINE_SVG};
