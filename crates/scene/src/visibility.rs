use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::camera::PickCamera;
use crate::country::CountryId;

/// Whether an NDC point lies in the visible cube [-1, 1]^3.
pub fn ndc_in_unit_cube(ndc: Vec3) -> bool {
    let unit = -1.0..=1.0;
    unit.contains(&ndc.x) && unit.contains(&ndc.y) && unit.contains(&ndc.z)
}

/// Cheap on-screen test by centroid only.
///
/// A country whose centroid is off screen while part of its body is visible
/// is reported as not visible.
pub fn is_centroid_visible<C>(camera: &C, centroid: Vec3) -> bool
where
    C: PickCamera + ?Sized,
{
    camera.project_to_ndc(centroid).is_some_and(ndc_in_unit_cube)
}

/// Countries with an on-screen centroid, nearest to the eye first.
///
/// Ordering contract:
/// - Ascending Euclidean distance from centroid to `camera.position()`.
/// - Equal distances keep ascending `CountryId` order.
pub fn visible_countries_by_distance<C>(world: &World, camera: &C) -> Vec<CountryId>
where
    C: PickCamera + ?Sized,
{
    let eye = camera.position();
    let mut ranked: Vec<(f64, CountryId)> = world
        .iter_countries()
        .filter(|(_, country)| is_centroid_visible(camera, country.centroid()))
        .map(|(id, country)| (country.centroid().distance(eye), id))
        .collect();

    ranked.sort_by(|a, b| stable_total_cmp_f64(a.0, b.0).then_with(|| a.1.cmp(&b.1)));
    ranked.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::{is_centroid_visible, ndc_in_unit_cube, visible_countries_by_distance};
    use crate::camera::PerspectiveCamera;
    use crate::country::{CountryId, CountryIdentity, Polyline};
    use crate::{GlobeConfig, World};
    use foundation::math::{LonLat, Vec3, project_lon_lat_deg};

    fn add_square(world: &mut World, name: &str, lon0: f64, lat0: f64) -> CountryId {
        let ring = [
            LonLat::new(lon0, lat0),
            LonLat::new(lon0 + 4.0, lat0),
            LonLat::new(lon0 + 4.0, lat0 + 4.0),
            LonLat::new(lon0, lat0 + 4.0),
        ];
        let material = GlobeConfig::default().outline;
        let line = Polyline::from_ring(&ring, world.outline_radius(), material).expect("ring");
        world.add_country(CountryIdentity::new(name, None), vec![line])
    }

    #[test]
    fn unit_cube_is_inclusive() {
        assert!(ndc_in_unit_cube(Vec3::new(1.0, -1.0, 1.0)));
        assert!(!ndc_in_unit_cube(Vec3::new(1.0001, 0.0, 0.0)));
        assert!(!ndc_in_unit_cube(Vec3::new(0.0, 0.0, f64::NAN)));
    }

    #[test]
    fn centroid_behind_camera_is_hidden() {
        let cam = PerspectiveCamera::default();
        assert!(is_centroid_visible(&cam, Vec3::new(0.0, 0.0, 2.0)));
        assert!(!is_centroid_visible(&cam, Vec3::new(0.0, 0.0, 9.0)));
    }

    #[test]
    fn nearest_centroid_comes_first() {
        let mut world = World::from_config(&GlobeConfig::default());
        let far = add_square(&mut world, "far", 40.0, 0.0);
        let near = add_square(&mut world, "near", -2.0, -2.0);
        let mid = add_square(&mut world, "mid", 15.0, 0.0);

        let eye = project_lon_lat_deg(0.0, 0.0, 5.0);
        let cam = PerspectiveCamera::default().look_at(eye, Vec3::ZERO);
        assert_eq!(visible_countries_by_distance(&world, &cam), vec![near, mid, far]);
    }

    #[test]
    fn equal_distances_keep_id_order() {
        let mut world = World::from_config(&GlobeConfig::default());
        let a = add_square(&mut world, "a", 10.0, -2.0);
        let b = add_square(&mut world, "b", 10.0, -2.0);

        let cam = PerspectiveCamera::default();
        assert_eq!(visible_countries_by_distance(&world, &cam), vec![a, b]);
    }
}
