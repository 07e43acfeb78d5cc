//! Filled country interiors.
//!
//! The outer ring of each polygon is triangulated with earcut in lon/lat
//! degrees, every triangle is subdivided in that flat parametric space, and
//! only then projected onto the sphere so the mesh follows its curvature.
//! Holes are ignored.

use std::collections::BTreeSet;

use earcutr::earcut;
use foundation::math::{LonLat, Vec2, Vec3, unwrap_longitudes_deg};
use formats::{CountryFeature, GeoPolygon};
use scene::{CountryIdentity, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::symbology::FillPalette;

/// Deeper subdivision is clamped to this.
pub const MAX_SUBDIVISION_DEPTH: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// ISO codes of the countries to fill.
    pub codes: BTreeSet<String>,
    pub subdivision_depth: u32,
    /// Fill meshes sit at `outline_radius * scale`.
    pub scale: f64,
    pub palette: FillPalette,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            codes: ["AU", "BR", "CN", "FR", "US"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            subdivision_depth: 3,
            scale: 1.005,
            palette: FillPalette::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("ring has {vertices} distinct vertices, need at least 3")]
    DegenerateRing { vertices: usize },
    #[error("triangulation failed")]
    Triangulation,
    #[error("triangulation produced no triangles")]
    Empty,
}

/// Split `tri` into `4^depth` triangles through edge midpoints.
pub fn subdivide(tri: [Vec2; 3], depth: u32, out: &mut Vec<[Vec2; 3]>) {
    if depth == 0 {
        out.push(tri);
        return;
    }
    let [a, b, c] = tri;
    let (ab, bc, ca) = (a.midpoint(b), b.midpoint(c), c.midpoint(a));
    for child in [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]] {
        subdivide(child, depth - 1, out);
    }
}

/// Earcut triangles of one ring, in (lon, lat) degrees.
///
/// A closing duplicate vertex is dropped and longitudes are unwrapped, so a
/// ring across the antimeridian triangulates as one piece (its longitudes may
/// then run past 180).
pub fn triangulate_ring(ring: &[LonLat]) -> Result<Vec<[Vec2; 3]>, FillError> {
    let mut ring = ring;
    if ring.len() >= 2 && ring.first() == ring.last() {
        ring = &ring[..ring.len() - 1];
    }
    if ring.len() < 3 {
        return Err(FillError::DegenerateRing {
            vertices: ring.len(),
        });
    }

    let lons: Vec<f64> = ring.iter().map(|p| p.lon_deg).collect();
    let points: Vec<Vec2> = unwrap_longitudes_deg(&lons)
        .into_iter()
        .zip(ring)
        .map(|(lon, p)| Vec2::new(lon, p.lat_deg))
        .collect();
    let coords: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();

    let indices = earcut(&coords, &[], 2).map_err(|_| FillError::Triangulation)?;
    let triangles: Vec<[Vec2; 3]> = indices
        .chunks_exact(3)
        .filter_map(|t| Some([*points.get(t[0])?, *points.get(t[1])?, *points.get(t[2])?]))
        .collect();
    if triangles.is_empty() {
        return Err(FillError::Empty);
    }
    Ok(triangles)
}

/// Flat triangle list (3 vertices per triangle) covering the outer ring of
/// every polygon, projected at `radius`.
///
/// Polygons whose outer ring is degenerate or triangulates to nothing are
/// dropped; the mesh is `Empty` only when no polygon is left.
pub fn build_fill_mesh(
    polygons: &[GeoPolygon],
    radius: f64,
    depth: u32,
) -> Result<Vec<Vec3>, FillError> {
    let depth = depth.min(MAX_SUBDIVISION_DEPTH);
    let mut flat = Vec::new();
    for outer in polygons.iter().filter_map(GeoPolygon::outer) {
        let triangles = match triangulate_ring(outer) {
            Ok(triangles) => triangles,
            Err(err @ (FillError::DegenerateRing { .. } | FillError::Empty)) => {
                debug!("dropping polygon from fill: {err}");
                continue;
            }
            Err(err) => return Err(err),
        };
        for tri in triangles {
            subdivide(tri, depth, &mut flat);
        }
    }

    let mut out = Vec::with_capacity(flat.len() * 3);
    for tri in flat {
        out.extend(tri.iter().map(|p| LonLat::new(p.x, p.y).project(radius)));
    }
    if out.is_empty() {
        return Err(FillError::Empty);
    }
    Ok(out)
}

/// Add a fill for every feature whose ISO code is in `cfg.codes`.
///
/// A country whose mesh cannot be built is logged and skipped. Returns the
/// identities of the filled countries in input order.
pub fn build_country_fills(
    world: &mut World,
    features: &[CountryFeature],
    cfg: &FillConfig,
) -> Vec<CountryIdentity> {
    let radius = world.outline_radius() * cfg.scale;
    let mut filled = Vec::new();

    for feature in features {
        let Some(code) = feature.identity.code.as_deref() else {
            continue;
        };
        if !cfg.codes.contains(code) {
            continue;
        }
        match build_fill_mesh(&feature.polygons, radius, cfg.subdivision_depth) {
            Ok(triangles) => {
                let color = cfg.palette.color_for(code);
                world.add_fill(feature.identity.clone(), triangles, color);
                filled.push(feature.identity.clone());
            }
            Err(err) => warn!(country = %feature.identity, "skipping fill: {err}"),
        }
    }

    filled
}
