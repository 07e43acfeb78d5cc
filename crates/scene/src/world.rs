use foundation::color::Rgb;
use foundation::handles::RenderHandle;
use foundation::math::Vec3;

use crate::config::GlobeConfig;
use crate::country::{CountryFill, CountryId, CountryIdentity, CountryOutline, Polyline};
use crate::prefabs::{Globe, Placeholder};

/// Rendering root: base sphere, country borders and fills.
#[derive(Debug, Clone)]
pub struct World {
    next_handle: RenderHandle,
    globe: Globe,
    outline_radius: f64,
    countries: Vec<CountryOutline>,
    fills: Vec<CountryFill>,
    placeholder: Option<Placeholder>,
}

impl World {
    pub fn new(sphere_radius: f64, outline_radius: f64) -> Self {
        let first = RenderHandle::new(0);
        Self {
            next_handle: first.next(),
            globe: Globe::new(sphere_radius, first),
            outline_radius,
            countries: Vec::new(),
            fills: Vec::new(),
            placeholder: None,
        }
    }

    pub fn from_config(cfg: &GlobeConfig) -> Self {
        Self::new(cfg.sphere_radius, cfg.outline_radius())
    }

    /// Empty world showing only the load-failure placeholder.
    pub fn with_placeholder(cfg: &GlobeConfig) -> Self {
        let mut world = Self::from_config(cfg);
        let render = world.allocate_handle();
        world.placeholder = Some(Placeholder::cube(render));
        world
    }

    pub fn globe(&self) -> &Globe {
        &self.globe
    }

    pub fn sphere_radius(&self) -> f64 {
        self.globe.radius
    }

    /// Radius border vertices are projected at.
    pub fn outline_radius(&self) -> f64 {
        self.outline_radius
    }

    pub fn add_country(
        &mut self,
        identity: CountryIdentity,
        polylines: Vec<Polyline>,
    ) -> CountryId {
        let id = CountryId(self.countries.len() as u32);
        let render = self.allocate_handle();
        self.countries.push(CountryOutline::new(
            identity,
            polylines,
            self.outline_radius,
            render,
        ));
        id
    }

    pub fn add_fill(
        &mut self,
        identity: CountryIdentity,
        triangles: Vec<Vec3>,
        color: Rgb,
    ) -> RenderHandle {
        let render = self.allocate_handle();
        self.fills.push(CountryFill {
            identity,
            triangles,
            color,
            render,
        });
        render
    }

    pub fn country(&self, id: CountryId) -> Option<&CountryOutline> {
        self.countries.get(id.index())
    }

    pub fn country_mut(&mut self, id: CountryId) -> Option<&mut CountryOutline> {
        self.countries.get_mut(id.index())
    }

    pub fn countries(&self) -> &[CountryOutline] {
        &self.countries
    }

    pub fn iter_countries(&self) -> impl Iterator<Item = (CountryId, &CountryOutline)> {
        self.countries
            .iter()
            .enumerate()
            .map(|(idx, country)| (CountryId(idx as u32), country))
    }

    /// First country whose ISO code matches `code` exactly.
    pub fn find_country_by_code(&self, code: &str) -> Option<CountryId> {
        self.iter_countries()
            .find(|(_, c)| c.identity().code.as_deref() == Some(code))
            .map(|(id, _)| id)
    }

    pub fn fills(&self) -> &[CountryFill] {
        &self.fills
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    fn allocate_handle(&mut self) -> RenderHandle {
        let handle = self.next_handle;
        self.next_handle = handle.next();
        handle
    }
}
