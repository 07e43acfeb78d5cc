use foundation::math::{Vec2, Vec3};

use crate::config::CameraConfig;
use crate::picking::Ray;

/// Pixel rectangle the globe is drawn into (window coordinates, y down).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Window pixels to normalized device coordinates (y up, [-1, 1] across
    /// the viewport). `None` for an empty viewport.
    pub fn to_ndc(&self, pos_px: Vec2) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            (pos_px.x - self.left) / self.width * 2.0 - 1.0,
            -((pos_px.y - self.top) / self.height) * 2.0 + 1.0,
        ))
    }
}

/// What picking needs from the renderer's camera.
pub trait PickCamera {
    /// Eye position in world space.
    fn position(&self) -> Vec3;

    /// World-space ray from the eye through an NDC point.
    fn ray_through_ndc(&self, ndc: Vec2) -> Option<Ray>;

    /// Project a world point to NDC (OpenGL convention: the visible volume is
    /// the cube [-1, 1]^3). `None` when the projection is undefined.
    fn project_to_ndc(&self, point: Vec3) -> Option<Vec3>;
}

/// Symmetric perspective camera looking from `eye` at `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

impl PerspectiveCamera {
    pub fn from_config(cfg: &CameraConfig, aspect: f64) -> Self {
        Self {
            eye: Vec3::new(cfg.eye[0], cfg.eye[1], cfg.eye[2]),
            target: Vec3::new(cfg.target[0], cfg.target[1], cfg.target[2]),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_y_deg: cfg.fov_y_deg,
            aspect,
            near: cfg.near,
            far: cfg.far,
        }
    }

    pub fn look_at(mut self, eye: Vec3, target: Vec3) -> Self {
        self.eye = eye;
        self.target = target;
        self
    }

    /// Orthonormal (forward, right, up) frame, or `None` if the camera looks
    /// along its up vector or at itself.
    fn basis(&self) -> Option<(Vec3, Vec3, Vec3)> {
        let forward = (self.target - self.eye).normalized()?;
        let right = forward.cross(self.up).normalized()?;
        let up = right.cross(forward);
        Some((forward, right, up))
    }

    fn tan_half_fov(&self) -> f64 {
        (self.fov_y_deg * 0.5).to_radians().tan()
    }
}

impl PickCamera for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.eye
    }

    fn ray_through_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let (forward, right, up) = self.basis()?;
        let t = self.tan_half_fov();
        let dir = forward + right.scale(ndc.x * t * self.aspect) + up.scale(ndc.y * t);
        Some(Ray::new(self.eye, dir.normalized()?))
    }

    fn project_to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let (forward, right, up) = self.basis()?;
        let d = point - self.eye;
        let depth = d.dot(forward);
        if depth.abs() < 1e-12 {
            return None;
        }
        let t = self.tan_half_fov();
        let (n, f) = (self.near, self.far);
        let ndc = Vec3::new(
            d.dot(right) / (depth * t * self.aspect),
            d.dot(up) / (depth * t),
            (f + n) / (f - n) - 2.0 * f * n / ((f - n) * depth),
        );
        ndc.is_finite().then_some(ndc)
    }
}
