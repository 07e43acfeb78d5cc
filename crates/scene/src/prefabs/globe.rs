use foundation::color::Rgb;
use foundation::handles::RenderHandle;
use foundation::math::Vec3;

/// The base sphere: the surface pointer rays are intersected with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Globe {
    pub center: Vec3,
    pub radius: f64,
    pub render: RenderHandle,
}

impl Globe {
    pub fn new(radius: f64, render: RenderHandle) -> Self {
        Self {
            center: Vec3::ZERO,
            radius,
            render,
        }
    }
}

/// Stand-in object shown when country data failed to load.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placeholder {
    pub half_extent: f64,
    pub color: Rgb,
    pub render: RenderHandle,
}

impl Placeholder {
    /// Red cube of edge 0.5 at the origin.
    pub fn cube(render: RenderHandle) -> Self {
        Self {
            half_extent: 0.25,
            color: Rgb::from_hex(0xFF0000),
            render,
        }
    }
}
