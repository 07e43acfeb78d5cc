//! Hover and click handling on top of [`crate::picking`].
//!
//! The controller owns the hover state and is the only thing that displaces
//! or recolors borders. It mutates the world through `&mut World` per event,
//! so a frame never sees a half-updated outline.

use foundation::math::{Vec2, Vec3};
use runtime::event_bus::{EventBus, Stamped};
use runtime::frame::Frame;
use tracing::info;

use crate::World;
use crate::camera::{PickCamera, Viewport};
use crate::config::HoverStyle;
use crate::country::{CountryId, CountryIdentity};
use crate::picking::{pick_country, sphere_hit_under_pointer};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    None,
    Hovering(CountryId),
}

impl HoverState {
    pub fn country(self) -> Option<CountryId> {
        match self {
            HoverState::None => None,
            HoverState::Hovering(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobeEvent {
    HoverEntered(CountryIdentity),
    HoverExited(CountryIdentity),
    Clicked(CountryIdentity),
}

/// Hover state machine driven by pointer events.
///
/// Transitions and clicks are appended to an internal event log that only
/// [`Self::drain_events`] empties. The host drains it once per frame, after
/// the frame's pointer events; otherwise it grows for the whole session.
#[derive(Debug)]
pub struct PickingController {
    state: HoverState,
    style: HoverStyle,
    frame: Frame,
    events: EventBus<GlobeEvent>,
}

impl PickingController {
    pub fn new(style: HoverStyle) -> Self {
        Self {
            state: HoverState::None,
            style,
            frame: Frame::default(),
            events: EventBus::new(),
        }
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn hovered(&self) -> Option<CountryId> {
        self.state.country()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Advance to the next render tick.
    pub fn tick(&mut self, dt_s: f64) {
        self.frame = self.frame.next(dt_s);
    }

    /// Pointer moved to `pos_px` (window pixels) inside `viewport`.
    pub fn on_pointer_move<C>(
        &mut self,
        world: &mut World,
        camera: &C,
        viewport: &Viewport,
        pos_px: Vec2,
    ) -> HoverState
    where
        C: PickCamera + ?Sized,
    {
        let hit = sphere_hit_under_pointer(world, camera, viewport, pos_px);
        self.on_sphere_hit(world, camera, hit)
    }

    /// Same as [`Self::on_pointer_move`] for a caller that already raycast the
    /// base sphere. `None` means the pointer is off the globe.
    pub fn on_sphere_hit<C>(
        &mut self,
        world: &mut World,
        camera: &C,
        hit: Option<Vec3>,
    ) -> HoverState
    where
        C: PickCamera + ?Sized,
    {
        let target = hit.and_then(|point| pick_country(world, camera, point));
        self.transition(world, target);
        self.state
    }

    /// Pointer left the canvas.
    pub fn on_pointer_leave(&mut self, world: &mut World) {
        self.transition(world, None);
    }

    /// Identity of the hovered country, if any. Borders are left untouched.
    pub fn on_click(&mut self, world: &World) -> Option<CountryIdentity> {
        let id = self.hovered()?;
        let identity = world.country(id)?.identity().clone();
        info!(country = %identity, "country clicked");
        self.events.emit(self.frame, GlobeEvent::Clicked(identity.clone()));
        Some(identity)
    }

    /// Events emitted since the last [`Self::drain_events`].
    pub fn events(&self) -> &[Stamped<GlobeEvent>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<GlobeEvent>> {
        self.events.drain()
    }

    fn transition(&mut self, world: &mut World, target: Option<CountryId>) {
        let current = self.hovered();
        if current == target {
            return;
        }

        if let Some(prev) = current {
            self.reset(world, prev);
        }
        self.state = match target {
            Some(next) if self.highlight(world, next) => HoverState::Hovering(next),
            _ => HoverState::None,
        };
    }

    fn reset(&mut self, world: &mut World, id: CountryId) {
        let Some(country) = world.country_mut(id) else {
            return;
        };
        for polyline in country.polylines_mut() {
            polyline.restore();
            polyline.set_material(self.style.normal);
        }
        country.set_hovered(false);
        self.events
            .emit(self.frame, GlobeEvent::HoverExited(country.identity().clone()));
    }

    fn highlight(&mut self, world: &mut World, id: CountryId) -> bool {
        let Some(country) = world.country_mut(id) else {
            return false;
        };
        for polyline in country.polylines_mut() {
            polyline.elevate(self.style.elevation);
            polyline.set_material(self.style.highlight);
        }
        country.set_hovered(true);
        info!(country = %country.identity(), "hovering");
        self.events
            .emit(self.frame, GlobeEvent::HoverEntered(country.identity().clone()));
        true
    }
}

impl Default for PickingController {
    fn default() -> Self {
        Self::new(HoverStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeEvent, HoverState, PickingController};
    use crate::camera::{PerspectiveCamera, Viewport};
    use crate::country::{CountryId, CountryIdentity, Polyline};
    use crate::{GlobeConfig, World};
    use foundation::math::{LonLat, Vec2, project_lon_lat_deg};
    use pretty_assertions::assert_eq;

    // The default camera looks down -z, so the middle of the screen is lon -90.
    fn world_facing_camera() -> (World, CountryId, CountryId) {
        let mut world = World::from_config(&GlobeConfig::default());
        let mut square = |name: &str, code: Option<&str>, lon0: f64| {
            let ring = [
                LonLat::new(lon0, -5.0),
                LonLat::new(lon0 + 10.0, -5.0),
                LonLat::new(lon0 + 10.0, 5.0),
                LonLat::new(lon0, 5.0),
            ];
            let material = GlobeConfig::default().outline;
            let line = Polyline::from_ring(&ring, world.outline_radius(), material).expect("ring");
            world.add_country(CountryIdentity::new(name, code.map(str::to_string)), vec![line])
        };
        let center = square("Centerland", Some("CL"), -95.0);
        let east = square("Eastland", None, -85.0);
        (world, center, east)
    }

    fn surface(lon: f64, lat: f64) -> Option<foundation::math::Vec3> {
        Some(project_lon_lat_deg(lon, lat, 2.0))
    }

    fn radii(world: &World, id: CountryId) -> Vec<f64> {
        world.country(id).expect("country").polylines()[0]
            .current()
            .iter()
            .map(|v| v.length())
            .collect()
    }

    #[test]
    fn pointer_over_country_elevates_and_highlights_it() {
        let (mut world, center, _) = world_facing_camera();
        let cam = PerspectiveCamera::default();
        let vp = Viewport::new(1280.0, 720.0);
        let mut ctl = PickingController::default();

        let state = ctl.on_pointer_move(&mut world, &cam, &vp, Vec2::new(640.0, 360.0));
        assert_eq!(state, HoverState::Hovering(center));

        let country = world.country(center).expect("center");
        assert!(country.is_hovered());
        let line = &country.polylines()[0];
        assert_eq!(line.material(), ctl.style.highlight);
        for r in radii(&world, center) {
            assert!((r - 2.03).abs() < 1e-9, "radius {r}");
        }
    }

    #[test]
    fn same_target_does_not_touch_the_borders() {
        let (mut world, center, _) = world_facing_camera();
        let cam = PerspectiveCamera::default();
        let mut ctl = PickingController::default();

        ctl.on_sphere_hit(&mut world, &cam, surface(-92.0, 1.0));
        let before = world.country(center).expect("center").clone();
        for line in world.country_mut(center).expect("center").polylines_mut() {
            line.take_dirty();
        }

        ctl.on_sphere_hit(&mut world, &cam, surface(-91.0, -2.0));
        let after = world.country(center).expect("center");
        assert_eq!(after.polylines()[0].current(), before.polylines()[0].current());
        assert!(after.polylines().iter().all(|l| !l.is_dirty()));
        assert_eq!(ctl.events().len(), 1);
    }

    #[test]
    fn moving_between_countries_restores_the_previous_one() {
        let (mut world, center, east) = world_facing_camera();
        let cam = PerspectiveCamera::default();
        let mut ctl = PickingController::default();

        ctl.on_sphere_hit(&mut world, &cam, surface(-92.0, 0.0));
        ctl.tick(0.016);
        assert_eq!(
            ctl.on_sphere_hit(&mut world, &cam, surface(-80.0, 0.0)),
            HoverState::Hovering(east)
        );

        let prev = world.country(center).expect("center");
        assert!(!prev.is_hovered());
        assert_eq!(prev.polylines()[0].current(), prev.polylines()[0].original());
        assert_eq!(prev.polylines()[0].material(), ctl.style.normal);

        let events: Vec<(u64, GlobeEvent)> = ctl
            .drain_events()
            .into_iter()
            .map(|s| (s.frame_index, s.event))
            .collect();
        let centerland = CountryIdentity::new("Centerland", Some("CL".into()));
        let eastland = CountryIdentity::new("Eastland", None);
        assert_eq!(
            events,
            vec![
                (0, GlobeEvent::HoverEntered(centerland.clone())),
                (1, GlobeEvent::HoverExited(centerland)),
                (1, GlobeEvent::HoverEntered(eastland)),
            ]
        );
    }

    #[test]
    fn leaving_the_globe_exits_hover() {
        let (mut world, center, _) = world_facing_camera();
        let cam = PerspectiveCamera::default();
        let vp = Viewport::new(1280.0, 720.0);
        let mut ctl = PickingController::default();

        ctl.on_sphere_hit(&mut world, &cam, surface(-92.0, 0.0));
        let state = ctl.on_pointer_move(&mut world, &cam, &vp, Vec2::new(0.0, 0.0));
        assert_eq!(state, HoverState::None);
        for r in radii(&world, center) {
            assert!((r - 2.02).abs() < 1e-9);
        }

        ctl.on_sphere_hit(&mut world, &cam, surface(-92.0, 0.0));
        ctl.on_pointer_leave(&mut world);
        assert_eq!(ctl.state(), HoverState::None);
        assert!(!world.country(center).expect("center").is_hovered());
    }

    #[test]
    fn click_reports_the_hovered_identity() {
        let (mut world, _, _) = world_facing_camera();
        let cam = PerspectiveCamera::default();
        let mut ctl = PickingController::default();

        assert_eq!(ctl.on_click(&world), None);

        ctl.on_sphere_hit(&mut world, &cam, surface(-80.0, 0.0));
        let picked = ctl.on_click(&world).expect("clicked");
        assert_eq!(picked.to_string(), "Eastland (N/A)");
        assert!(matches!(
            ctl.events().last().map(|s| &s.event),
            Some(GlobeEvent::Clicked(id)) if id.name == "Eastland"
        ));
    }

    #[test]
    fn draining_each_frame_keeps_only_that_frames_events() {
        let (mut world, _, east) = world_facing_camera();
        let cam = PerspectiveCamera::default();
        let mut ctl = PickingController::default();

        ctl.on_sphere_hit(&mut world, &cam, surface(-92.0, 0.0));
        assert_eq!(ctl.drain_events().len(), 1);
        assert!(ctl.events().is_empty());

        ctl.tick(0.016);
        ctl.on_sphere_hit(&mut world, &cam, surface(-80.0, 0.0));
        ctl.on_click(&world);
        let frame: Vec<u64> = ctl.events().iter().map(|s| s.frame_index).collect();
        assert_eq!(frame, vec![1, 1, 1]);
        assert_eq!(ctl.hovered(), Some(east));
        assert_eq!(ctl.drain_events().len(), 3);
        assert!(ctl.events().is_empty());
    }

    #[test]
    fn empty_world_stays_idle() {
        let mut world = World::from_config(&GlobeConfig::default());
        let cam = PerspectiveCamera::default();
        let mut ctl = PickingController::default();
        assert_eq!(ctl.on_sphere_hit(&mut world, &cam, surface(0.0, 0.0)), HoverState::None);
        assert!(ctl.events().is_empty());
    }
}
