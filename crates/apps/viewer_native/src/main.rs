//! Headless globe viewer: loads country borders, builds fills and replays a
//! scripted pointer sweep, logging what gets hovered and clicked.
//!
//! Environment:
//! - `GLOBE_DATA`: GeoJSON FeatureCollection path (synthetic countries if unset)
//! - `GLOBE_CONFIG`: JSON [`config::ViewerConfig`] path (defaults if unset)
//! - `RUST_LOG`: log filter

mod config;
mod sweep;

use std::env;

use formats::{SYNTHETIC_COUNTRIES, load_world_from_geojson_str, load_world_or_placeholder};
use layers::build_country_fills;
use scene::camera::PerspectiveCamera;
use scene::hover::PickingController;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ViewerConfig, ViewerError};

fn main() -> Result<(), ViewerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = match env::var("GLOBE_CONFIG") {
        Ok(path) => ViewerConfig::from_path(path)?,
        Err(_) => ViewerConfig::default(),
    };

    let mut loaded = match env::var("GLOBE_DATA") {
        Ok(path) => load_world_or_placeholder(path, &cfg.globe),
        Err(_) => {
            info!("GLOBE_DATA not set; using the synthetic country set");
            load_world_from_geojson_str(SYNTHETIC_COUNTRIES, &cfg.globe)?
        }
    };

    let filled = build_country_fills(&mut loaded.world, &loaded.countries.features, &cfg.fill);
    info!(
        outlines = loaded.outlines.len(),
        fills = filled.len(),
        placeholder = loaded.world.is_placeholder(),
        "world ready"
    );

    let viewport = cfg.viewport();
    let camera = PerspectiveCamera::from_config(&cfg.globe.camera, viewport.aspect());
    let mut controller = PickingController::new(cfg.globe.hover);
    let events = sweep::run_sweep(
        &mut loaded.world,
        &camera,
        &viewport,
        &mut controller,
        &cfg.sweep,
    );

    info!(
        events = events.len(),
        frames = controller.frame().index,
        elapsed_s = controller.frame().time.seconds(),
        "sweep finished"
    );
    Ok(())
}
