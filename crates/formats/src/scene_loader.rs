use std::fs;
use std::path::{Path, PathBuf};

use scene::{CountryId, GlobeConfig, World};
use thiserror::Error;
use tracing::{error, info};

use crate::geojson::{CountryCollection, GeoJsonError};
use crate::scene_ingest::ingest_countries;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse country data: {0}")]
    GeoJson(#[from] GeoJsonError),
}

/// A world with its country outlines, plus the parsed features that later
/// passes (fill meshing) build on.
#[derive(Debug, Clone)]
pub struct LoadedWorld {
    pub world: World,
    pub countries: CountryCollection,
    pub outlines: Vec<CountryId>,
}

pub fn load_world_from_geojson_str(
    payload: &str,
    cfg: &GlobeConfig,
) -> Result<LoadedWorld, LoadError> {
    let countries = CountryCollection::from_geojson_str(payload)?;
    let mut world = World::from_config(cfg);
    let outlines = ingest_countries(&mut world, &countries, cfg.outline);
    info!(
        countries = outlines.len(),
        rejected = countries.rejected.len(),
        "country outlines built"
    );
    Ok(LoadedWorld {
        world,
        countries,
        outlines,
    })
}

pub fn load_world_from_path(
    path: impl AsRef<Path>,
    cfg: &GlobeConfig,
) -> Result<LoadedWorld, LoadError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_world_from_geojson_str(&payload, cfg)
}

/// Load `path`, or fall back to an empty world showing the placeholder cube.
///
/// The session keeps running either way; picking on the fallback world finds
/// nothing.
pub fn load_world_or_placeholder(path: impl AsRef<Path>, cfg: &GlobeConfig) -> LoadedWorld {
    match load_world_from_path(path, cfg) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("error loading country data: {err}");
            LoadedWorld {
                world: World::with_placeholder(cfg),
                countries: CountryCollection::default(),
                outlines: Vec::new(),
            }
        }
    }
}
