use foundation::math::{Vec2, Vec3};
use tracing::debug;

use crate::World;
use crate::camera::{PickCamera, Viewport};
use crate::containment::country_contains;
use crate::country::CountryId;
use crate::visibility::visible_countries_by_distance;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir.scale(t)
    }
}

/// Nearest intersection of `ray` with a sphere at or in front of its origin.
///
/// The ray direction does not have to be normalized.
pub fn intersect_sphere(ray: Ray, center: Vec3, radius: f64) -> Option<Vec3> {
    let dir = ray.dir.normalized()?;
    let oc = ray.origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let s = disc.sqrt();
    let t = [-b - s, -b + s].into_iter().find(|t| *t >= 0.0)?;
    Some(Ray::new(ray.origin, dir).at(t))
}

/// Camera ray under a window-pixel position.
pub fn pointer_ray<C>(camera: &C, viewport: &Viewport, pos_px: Vec2) -> Option<Ray>
where
    C: PickCamera + ?Sized,
{
    let ndc = viewport.to_ndc(pos_px)?;
    camera.ray_through_ndc(ndc)
}

/// Point on the base sphere under the pointer, if the ray hits it.
///
/// Borders are never raycast directly; they are too thin to hit reliably.
pub fn sphere_hit_under_pointer<C>(
    world: &World,
    camera: &C,
    viewport: &Viewport,
    pos_px: Vec2,
) -> Option<Vec3>
where
    C: PickCamera + ?Sized,
{
    let ray = pointer_ray(camera, viewport, pos_px)?;
    let globe = world.globe();
    intersect_sphere(ray, globe.center, globe.radius)
}

/// Country containing `surface_point`, searched nearest-centroid first among
/// countries whose centroid is on screen.
///
/// Ordering contract:
/// - Candidates are visited by ascending centroid-to-eye distance; equal
///   distances fall back to ascending `CountryId`.
/// - The first containing country wins, even if a later one also contains
///   the point.
///
/// Countries whose hit test fails are skipped.
pub fn pick_country<C>(world: &World, camera: &C, surface_point: Vec3) -> Option<CountryId>
where
    C: PickCamera + ?Sized,
{
    // Border vertices live on the outline sphere; test on the same sphere so
    // latitudes line up.
    let radius = world.outline_radius();
    let query = surface_point.normalized()?.scale(radius);

    for id in visible_countries_by_distance(world, camera) {
        let Some(country) = world.country(id) else {
            continue;
        };
        match country_contains(query, country.polylines(), radius) {
            Ok(true) => return Some(id),
            Ok(false) => {}
            Err(err) => {
                debug!(country = %country.identity(), "skipping containment test: {err}");
            }
        }
    }
    None
}

/// Screen picking wrapper: pixels to country.
pub fn pick_screen<C>(
    world: &World,
    camera: &C,
    viewport: &Viewport,
    pos_px: Vec2,
) -> Option<CountryId>
where
    C: PickCamera + ?Sized,
{
    let hit = sphere_hit_under_pointer(world, camera, viewport, pos_px)?;
    pick_country(world, camera, hit)
}
