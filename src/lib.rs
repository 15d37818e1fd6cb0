//! Earmap crate root: re-exports and module wiring.
//!
//! An interactive educational diagram of auricular (ear) points and zones,
//! built on egui/eframe. Framework-free logic lives in [`data`]:
//! - `catalog`: the immutable point/area catalog and its validation
//! - `mapper`: screen → intrinsic coordinate mapping and hit testing
//! - `mirror`: right-ear projection of the canonical point set
//! - `selection`: per-session selection state and its transitions
//! - `admin`: the coordinate pick log used when authoring catalog entries
//!
//! The UI is split into [`panels`] (list, diagram, info, admin) and [`app`]
//! (window chrome and the [`run_earmap`] entry point).

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod events;
pub mod panels;

// Public re-exports for a compact external API
pub use app::{load_catalog, run_earmap, AssetError, EarMapApp};
pub use color_scheme::{ColorScheme, DiagramPalette};
pub use config::{ConfigError, EarMapConfig, EarMapConfigFile, FeatureFlags, OutlineTransform, ResponsiveLayout};
pub use data::admin::{AdminPick, AdminPickLog};
pub use data::catalog::{Area, Catalog, CatalogError, Category, Point, Standard};
pub use data::geometry::{Affine2, Coord, ScreenRect, ViewBox};
pub use data::mapper::{CoordinateMapper, MapError};
pub use data::mirror::{canonical_pick, mirror_points, overlay_transform, project_points, EarSide};
pub use data::selection::{Mode, SelectionController, SelectionError, SelectionState};
pub use data::text::{Lang, Localized};
pub use events::{EventController, EventFilter, EventKind, MapEvent, PickMeta};
