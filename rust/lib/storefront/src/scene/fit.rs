//! Bounds and camera framing.

use glam::{BVec3, DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box. `Aabb::EMPTY` contains nothing and is the
/// identity for `union`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };

    pub fn new(min: impl Into<DVec3>, max: impl Into<DVec3>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Radius of the bounding sphere: half the diagonal.
    pub fn radius(&self) -> f64 {
        self.size().length() / 2.0
    }

    /// Box around all eight transformed corners.
    pub fn transformed(&self, m: &DMat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        (0..8)
            .map(|corner| {
                DVec3::select(
                    BVec3::new(corner & 1 != 0, corner & 2 != 0, corner & 4 != 0),
                    self.max,
                    self.min,
                )
            })
            .map(|p| m.transform_point3(p))
            .fold(Aabb::EMPTY, |acc, q| acc.union(&Aabb::new(q, q)))
    }
}

/// Orbit camera limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitControls {
    pub enable_pan: bool,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
}

impl OrbitControls {
    pub fn clamp_distance(&self, distance: f64) -> f64 {
        distance.clamp(self.min_distance, self.max_distance)
    }

    pub fn clamp_polar(&self, angle: f64) -> f64 {
        angle.clamp(self.min_polar_angle, self.max_polar_angle)
    }
}

/// Camera and fitting parameters of every preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub fov_degrees: f64,
    /// Extra room around the fitted model; 1.0 touches the frustum.
    pub margin: f64,
    pub camera_start: DVec3,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            margin: 1.2,
            camera_start: DVec3::new(0.0, 0.0, 6.0),
            min_distance: 1.0,
            max_distance: 20.0,
        }
    }
}

impl SceneSettings {
    /// Rotate and zoom, no pan, full vertical rotation.
    pub fn controls(&self) -> OrbitControls {
        OrbitControls {
            enable_pan: false,
            enable_rotate: true,
            enable_zoom: true,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            min_polar_angle: 0.0,
            max_polar_angle: std::f64::consts::PI,
        }
    }
}

/// How a loaded model is placed in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Framing {
    /// World-space bounds as authored.
    pub bounds: Aabb,
    /// Translation applied before scaling: moves the bounds' centre to the origin.
    pub offset: DVec3,
    /// Uniform scale bringing the bounding sphere to unit radius.
    pub scale: f64,
    pub camera_distance: f64,
    pub fov_degrees: f64,
    pub controls: OrbitControls,
}

impl Framing {
    /// Position of an authored point after fitting.
    pub fn apply(&self, p: DVec3) -> DVec3 {
        (p + self.offset) * self.scale
    }
}

/// Fit `bounds` to the view. `None` for empty or zero-size bounds, which
/// cannot be framed.
pub fn auto_fit(bounds: &Aabb, settings: &SceneSettings) -> Option<Framing> {
    if bounds.is_empty() {
        return None;
    }
    let radius = bounds.radius();
    if !radius.is_finite() || radius <= f64::EPSILON {
        return None;
    }
    let controls = settings.controls();
    let half_fov = settings.fov_degrees.to_radians() / 2.0;
    let distance = controls.clamp_distance(settings.margin / half_fov.sin());
    Some(Framing {
        bounds: *bounds,
        offset: -bounds.center(),
        scale: 1.0 / radius,
        camera_distance: distance,
        fov_degrees: settings.fov_degrees,
        controls,
    })
}
