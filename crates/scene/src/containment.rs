//! Point-in-polygon on the sphere, evaluated in (longitude, latitude) space.
//!
//! Rings are tested one by one and a country counts as hit when any of its
//! rings contains the point. Hole rings are therefore treated like outer
//! rings: a point inside a lake is reported as inside the country.

use std::f64::consts::{PI, TAU};

use foundation::math::{Vec2, Vec3, lon_lat_rad_on_sphere, unwrap_longitudes_rad};

use crate::country::Polyline;
use crate::error::PickError;

/// Does any of `polylines` (read through their original positions) contain
/// `point`? Both live on the sphere of `radius`.
pub fn country_contains(
    point: Vec3,
    polylines: &[Polyline],
    radius: f64,
) -> Result<bool, PickError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(PickError::DegenerateRadius(radius));
    }
    if !point.is_finite() {
        return Err(PickError::NonFinitePoint);
    }

    let (lon, lat) = lon_lat_rad_on_sphere(point, radius);
    let query = Vec2::new(lon, lat);

    let mut ring = Vec::new();
    for (index, polyline) in polylines.iter().enumerate() {
        ring.clear();
        for v in polyline.original() {
            if !v.is_finite() {
                return Err(PickError::NonFiniteVertex { polyline: index });
            }
            let (lon, lat) = lon_lat_rad_on_sphere(*v, radius);
            ring.push(Vec2::new(lon, lat));
        }
        if ring_contains(query, &ring) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// [`country_contains`], treating a failed test as "not contained".
pub fn contains(point: Vec3, polylines: &[Polyline], radius: f64) -> bool {
    country_contains(point, polylines, radius).unwrap_or(false)
}

/// Even-odd test of `point` against a closed ring, both as (lon, lat) radians.
///
/// If an edge spans more than PI in longitude the ring is taken to cross the
/// antimeridian: it is unwrapped into one continuous run and the ray is cast
/// again from `lon + 2PI` and `lon - 2PI`, each parity XOR-ed into the result.
pub fn ring_contains(point: Vec2, ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    if !crosses_antimeridian(ring) {
        return even_odd(point.x, point.y, ring);
    }

    let lons: Vec<f64> = ring.iter().map(|p| p.x).collect();
    let unwrapped: Vec<Vec2> = unwrap_longitudes_rad(&lons)
        .into_iter()
        .zip(ring)
        .map(|(lon, p)| Vec2::new(lon, p.y))
        .collect();

    let mut inside = even_odd(point.x, point.y, &unwrapped);
    inside ^= even_odd(point.x + TAU, point.y, &unwrapped);
    inside ^= even_odd(point.x - TAU, point.y, &unwrapped);
    inside
}

fn crosses_antimeridian(ring: &[Vec2]) -> bool {
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        if (ring[i].x - ring[j].x).abs() > PI {
            return true;
        }
        j = i;
    }
    false
}

/// Horizontal ray toward +x, counting edge crossings (edges i, j = i - 1).
fn even_odd(x: f64, y: f64, ring: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > y) != (pj.y > y) {
            let x_cross = (pj.x - pi.x) * (y - pi.y) / (pj.y - pi.y) + pi.x;
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
