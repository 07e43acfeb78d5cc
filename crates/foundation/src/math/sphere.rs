//! Geographic coordinates on a sphere.
//!
//! Convention: +Y is north, longitude is negated before the trigonometric
//! mapping so that east is to the viewer's right when looking at the globe
//! down the -Z axis (right-handed, Y-up scene).

use std::f64::consts::{PI, TAU};

use super::Vec3;

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    pub fn is_finite(self) -> bool {
        self.lon_deg.is_finite() && self.lat_deg.is_finite()
    }

    pub fn project(self, radius: f64) -> Vec3 {
        project_lon_lat_deg(self.lon_deg, self.lat_deg, radius)
    }
}

/// Map `(lon_deg, lat_deg)` to a point on the sphere of `radius`.
pub fn project_lon_lat_deg(lon_deg: f64, lat_deg: f64, radius: f64) -> Vec3 {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    let cos_lat = lat.cos();

    Vec3::new(
        radius * cos_lat * (-lon).cos(),
        radius * lat.sin(),
        radius * cos_lat * (-lon).sin(),
    )
}

/// Inverse of [`project_lon_lat_deg`], in radians.
///
/// `point` is assumed to lie on the sphere of `radius`; the latitude argument
/// is clamped so points slightly off the surface still map to a finite value.
/// Longitude is undefined at the poles and resolves to 0 there.
pub fn lon_lat_rad_on_sphere(point: Vec3, radius: f64) -> (f64, f64) {
    let lon = (-point.z).atan2(point.x);
    let lat = (point.y / radius).clamp(-1.0, 1.0).asin();
    (lon, lat)
}

/// Wrap an angle difference into `(-PI, PI]`.
pub fn wrap_delta_rad(delta: f64) -> f64 {
    let mut d = delta.rem_euclid(TAU);
    if d > PI {
        d -= TAU;
    }
    d
}

/// Rewrite a longitude sequence so consecutive entries differ by at most PI.
///
/// The first entry is kept as-is; every later entry is shifted by whole turns.
/// A ring that crosses the antimeridian comes out as one continuous run
/// (e.g. `[3.1, -3.1]` becomes `[3.1, 3.18...]`).
pub fn unwrap_longitudes_rad(lons: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(lons.len());
    let mut iter = lons.iter().copied();
    let Some(first) = iter.next() else {
        return out;
    };
    out.push(first);
    let mut prev_raw = first;
    let mut prev = first;
    for lon in iter {
        prev += wrap_delta_rad(lon - prev_raw);
        prev_raw = lon;
        out.push(prev);
    }
    out
}

/// Degree flavour of [`unwrap_longitudes_rad`].
pub fn unwrap_longitudes_deg(lons: &[f64]) -> Vec<f64> {
    let rad: Vec<f64> = lons.iter().map(|l| l.to_radians()).collect();
    unwrap_longitudes_rad(&rad)
        .into_iter()
        .map(f64::to_degrees)
        .collect()
}
