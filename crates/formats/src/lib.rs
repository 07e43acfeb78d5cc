pub mod geojson;
pub mod scene_ingest;
pub mod scene_loader;

pub use geojson::*;
pub use scene_ingest::*;
pub use scene_loader::*;

/// Small hand-made country set used by tests and the headless viewer.
pub const SYNTHETIC_COUNTRIES: &str = include_str!("../assets/synthetic_countries.json");
