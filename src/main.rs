//! Standalone ear map viewer.
//!
//! `EARMAP_CONFIG` may name a YAML config file; `RUST_LOG` sets verbosity.

use earmap::{load_catalog, run_earmap, EarMapConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::var_os("EARMAP_CONFIG") {
        Some(path) => match EarMapConfig::from_yaml_path(path.as_ref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(2);
            }
        },
        None => EarMapConfig::default(),
    };

    let catalog = match load_catalog(&cfg) {
        Ok(c) => c,
        Err(e) => {
            log::error!("catalog could not be loaded: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "catalog v{}: {} points, {} areas",
        catalog.version(),
        catalog.points().len(),
        catalog.areas().len()
    );

    run_earmap(cfg, catalog)
}
