use std::fmt;

use foundation::color::Rgb;
use foundation::handles::RenderHandle;
use foundation::math::{LonLat, Vec3};
use serde::{Deserialize, Serialize};

/// Label used wherever a country has no ISO code.
pub const MISSING_CODE_LABEL: &str = "N/A";

/// Name and ISO 3166-1 alpha-2 code of a country.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryIdentity {
    pub name: String,
    pub code: Option<String>,
}

impl CountryIdentity {
    pub fn new(name: impl Into<String>, code: Option<String>) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }

    pub fn display_code(&self) -> &str {
        self.code.as_deref().unwrap_or(MISSING_CODE_LABEL)
    }
}

impl fmt::Display for CountryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.display_code())
    }
}

/// Index of a [`CountryOutline`] inside its [`crate::World`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(pub u32);

impl CountryId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineMaterial {
    pub color: Rgb,
    pub opacity: f32,
}

impl LineMaterial {
    pub const fn new(color: Rgb, opacity: f32) -> Self {
        Self { color, opacity }
    }
}

/// One closed border ring on the sphere.
///
/// `original` is frozen at construction and is what hit-testing reads;
/// `current` is what gets drawn and may be displaced while hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    current: Vec<Vec3>,
    original: Vec<Vec3>,
    material: LineMaterial,
    dirty: bool,
}

impl Polyline {
    /// Rings with fewer coordinates than this carry no border and are dropped.
    pub const MIN_RING_COORDS: usize = 2;

    pub fn new(positions: Vec<Vec3>, material: LineMaterial) -> Self {
        Self {
            original: positions.clone(),
            current: positions,
            material,
            dirty: true,
        }
    }

    /// Project a lon/lat ring onto the sphere as a closed strip
    /// `v0, v1, .., v(n-1), v0`.
    ///
    /// Returns `None` for degenerate rings.
    pub fn from_ring(ring: &[LonLat], radius: f64, material: LineMaterial) -> Option<Self> {
        if ring.len() < Self::MIN_RING_COORDS {
            return None;
        }
        let mut positions = Vec::with_capacity(ring.len() + 1);
        for i in 0..=ring.len() {
            positions.push(ring[i % ring.len()].project(radius));
        }
        Some(Self::new(positions, material))
    }

    pub fn current(&self) -> &[Vec3] {
        &self.current
    }

    pub fn original(&self) -> &[Vec3] {
        &self.original
    }

    pub fn material(&self) -> LineMaterial {
        self.material
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Push every vertex `amount` world units outward along its own normal.
    ///
    /// Always computed from `original`, so repeated calls do not accumulate.
    pub fn elevate(&mut self, amount: f64) {
        for (cur, orig) in self.current.iter_mut().zip(&self.original) {
            *cur = match orig.normalized() {
                Some(n) => *orig + n.scale(amount),
                None => *orig,
            };
        }
        self.dirty = true;
    }

    pub fn restore(&mut self) {
        self.current.copy_from_slice(&self.original);
        self.dirty = true;
    }

    pub fn set_material(&mut self, material: LineMaterial) {
        self.material = material;
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the renderer needs to re-upload this polyline and
    /// clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

/// Borders of one country plus what picking needs to rank it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryOutline {
    identity: CountryIdentity,
    polylines: Vec<Polyline>,
    centroid: Vec3,
    hovered: bool,
    render: RenderHandle,
}

impl CountryOutline {
    pub fn new(
        identity: CountryIdentity,
        polylines: Vec<Polyline>,
        radius: f64,
        render: RenderHandle,
    ) -> Self {
        let centroid = surface_centroid(&polylines, radius);
        Self {
            identity,
            polylines,
            centroid,
            hovered: false,
            render,
        }
    }

    pub fn identity(&self) -> &CountryIdentity {
        &self.identity
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn polylines_mut(&mut self) -> &mut [Polyline] {
        &mut self.polylines
    }

    /// Mean of all vertices, pushed back onto the sphere. A ranking proxy,
    /// not a geometric center.
    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn render_handle(&self) -> RenderHandle {
        self.render
    }
}

/// Arithmetic mean of every vertex across `polylines`, rescaled to `radius`.
///
/// Zero vertices (or a mean at the origin) yields the zero vector.
pub fn surface_centroid(polylines: &[Polyline], radius: f64) -> Vec3 {
    let mut sum = Vec3::ZERO;
    let mut count = 0usize;
    for polyline in polylines {
        for v in polyline.original() {
            sum += *v;
            count += 1;
        }
    }
    if count == 0 {
        return Vec3::ZERO;
    }
    let mean = sum.scale(1.0 / count as f64);
    match mean.normalized() {
        Some(n) => n.scale(radius),
        None => Vec3::ZERO,
    }
}

/// Filled interior of a country, built once after data load.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFill {
    pub identity: CountryIdentity,
    /// Flat triangle list (3 vertices per triangle) in world coordinates.
    pub triangles: Vec<Vec3>,
    pub color: Rgb,
    pub render: RenderHandle,
}

impl CountryFill {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryIdentity, LineMaterial, Polyline, surface_centroid};
    use foundation::color::Rgb;
    use foundation::math::{LonLat, Vec3};

    const LAVENDER: LineMaterial = LineMaterial::new(Rgb::from_hex(0xE6E6FA), 0.8);

    fn square(lon0: f64, lat0: f64, size: f64) -> Vec<LonLat> {
        vec![
            LonLat::new(lon0, lat0),
            LonLat::new(lon0 + size, lat0),
            LonLat::new(lon0 + size, lat0 + size),
            LonLat::new(lon0, lat0 + size),
        ]
    }

    #[test]
    fn display_code_falls_back() {
        let named = CountryIdentity::new("France", Some("FR".to_string()));
        let anon = CountryIdentity::new("Somaliland", None);
        assert_eq!(named.display_code(), "FR");
        assert_eq!(anon.display_code(), "N/A");
        assert_eq!(anon.to_string(), "Somaliland (N/A)");
    }

    #[test]
    fn ring_becomes_closed_strip() {
        let ring = square(0.0, 0.0, 10.0);
        let line = Polyline::from_ring(&ring, 2.0, LAVENDER).expect("polyline");
        assert_eq!(line.len(), ring.len() + 1);
        assert_eq!(line.original()[0], line.original()[ring.len()]);
        assert_eq!(line.current(), line.original());
        for v in line.original() {
            assert!((v.length() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_rings_are_dropped() {
        assert!(Polyline::from_ring(&[], 1.0, LAVENDER).is_none());
        assert!(Polyline::from_ring(&[LonLat::new(1.0, 1.0)], 1.0, LAVENDER).is_none());
        assert!(Polyline::from_ring(&square(0.0, 0.0, 1.0)[..2], 1.0, LAVENDER).is_some());
    }

    #[test]
    fn elevate_is_idempotent_and_restore_is_exact() {
        let mut line = Polyline::from_ring(&square(5.0, 5.0, 3.0), 2.0, LAVENDER).expect("line");
        line.take_dirty();

        line.elevate(0.01);
        let once = line.current().to_vec();
        line.elevate(0.01);
        assert_eq!(line.current(), &once[..]);
        for v in line.current() {
            assert!((v.length() - 2.01).abs() < 1e-12);
        }
        assert!(line.take_dirty());
        assert!(!line.is_dirty());

        line.restore();
        assert_eq!(line.current(), line.original());
    }

    #[test]
    fn centroid_lies_on_sphere_inside_the_ring() {
        let line = Polyline::from_ring(&square(0.0, 0.0, 10.0), 2.0, LAVENDER).expect("line");
        let c = surface_centroid(std::slice::from_ref(&line), 2.0);
        assert!((c.length() - 2.0).abs() < 1e-12);
        assert!(c.x > 0.0 && c.y > 0.0 && c.z < 0.0);
    }

    #[test]
    fn centroid_of_nothing_is_origin() {
        assert_eq!(surface_centroid(&[], 2.0), Vec3::ZERO);
    }
}
