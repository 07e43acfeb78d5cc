use scene::{CountryId, LineMaterial, Polyline, World};
use tracing::{debug, warn};

use crate::geojson::{CountryCollection, CountryFeature};

/// Build border outlines for every parsed country and log the features the
/// parser set aside. Returns the ids of the outlines added to `world`.
pub fn ingest_countries(
    world: &mut World,
    collection: &CountryCollection,
    material: LineMaterial,
) -> Vec<CountryId> {
    for rejected in &collection.rejected {
        warn!(
            feature = %rejected.name,
            index = rejected.index,
            "skipping malformed feature: {}",
            rejected.reason
        );
    }
    build_outlines(world, &collection.features, material)
}

/// One polyline per ring (outer and holes alike), projected at the world's
/// outline radius.
///
/// Degenerate rings are dropped silently; a country left without any ring is
/// not added.
pub fn build_outlines(
    world: &mut World,
    features: &[CountryFeature],
    material: LineMaterial,
) -> Vec<CountryId> {
    let radius = world.outline_radius();
    let mut built = Vec::with_capacity(features.len());

    for feature in features {
        let polylines: Vec<Polyline> = feature
            .rings()
            .filter_map(|ring| Polyline::from_ring(ring, radius, material))
            .collect();
        if polylines.is_empty() {
            debug!(country = %feature.identity, "no drawable rings");
            continue;
        }
        built.push(world.add_country(feature.identity.clone(), polylines));
    }

    built
}
