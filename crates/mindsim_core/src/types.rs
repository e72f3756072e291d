use serde::{Deserialize, Serialize};

use crate::constants::{BOUNDARY_MARGIN, MIN_SCALE_FACTOR};
use crate::vector::Vec3;

/// Stable handle for a body inside its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

/// A simulated sphere. Unit mass, no rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Position relative to the boundary center, in the boundary's local units
    pub position: Vec3,
    /// Local units per second
    pub velocity: Vec3,
    /// Radius in the same space as `position`
    pub radius: f32,
    /// Speed the invariant holds the body at (0 = no forced motion)
    pub cruise_speed: f32,
}

impl Body {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_driven(&self) -> bool {
        self.cruise_speed > 0.0
    }
}

/// Spherical containment volume centered on the local origin.
///
/// `radius` is expressed in local units; `scale_factor` is the scale of the frame
/// the boundary belongs to (a mind's scale). Both are public so the owning scene can
/// rescale at any time; containment math re-reads them on every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub radius: f32,
    pub scale_factor: f32,
    /// World-space gap kept between body surfaces and the boundary
    pub margin: f32,
}

impl Boundary {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            scale_factor: 1.0,
            margin: BOUNDARY_MARGIN,
        }
    }

    pub fn with_scale(radius: f32, scale_factor: f32) -> Self {
        Self {
            scale_factor,
            ..Self::new(radius)
        }
    }

    /// Scale factor used in the math, guarded against zero/negative/NaN values
    pub fn scale(&self) -> f32 {
        if self.scale_factor.is_finite() {
            self.scale_factor.max(MIN_SCALE_FACTOR)
        } else {
            1.0
        }
    }

    pub fn world_radius(&self) -> f32 {
        self.radius * self.scale()
    }

    /// Farthest a body center may sit from the origin, in world units
    pub fn world_limit(&self, body_radius: f32) -> f32 {
        let s = self.scale();
        (self.radius * s - body_radius * s - self.margin).max(0.0)
    }

    /// `world_limit` converted back to local units
    pub fn local_limit(&self, body_radius: f32) -> f32 {
        self.world_limit(body_radius) / self.scale()
    }

    /// World-space distance of a local position from the center
    pub fn world_distance(&self, position: Vec3) -> f32 {
        position.length() * self.scale()
    }

    /// Local position expressed in world units relative to the boundary center
    pub fn to_world(&self, position: Vec3) -> Vec3 {
        position * self.scale()
    }

    /// How far the body pokes past the wall in world units, ignoring the margin.
    /// Zero or negative means contained.
    pub fn penetration(&self, body: &Body) -> f32 {
        let s = self.scale();
        self.world_distance(body.position) - (self.radius * s - body.radius * s)
    }

    pub fn contains(&self, body: &Body, tolerance: f32) -> bool {
        self.penetration(body) <= tolerance
    }
}

/// Speed invariant applied to every driven body of a container.
/// One policy per container; the two are never mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SpeedPolicy {
    /// Speed renormalized to exactly `cruise_speed` (mind/mental model)
    #[default]
    Cruise,
    /// Speed kept in `[min_speed, max_speed]` (container demo)
    Band { min_speed: f32, max_speed: f32 },
}

impl SpeedPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cruise => "cruise",
            Self::Band { .. } => "band",
        }
    }

    /// Whether `speed` satisfies the policy for a body with the given cruise speed
    pub fn admits(&self, speed: f32, cruise_speed: f32, tolerance: f32) -> bool {
        if cruise_speed <= 0.0 {
            return true;
        }
        match *self {
            Self::Cruise => (speed - cruise_speed).abs() <= tolerance,
            Self::Band {
                min_speed,
                max_speed,
            } => speed >= min_speed - tolerance && speed <= max_speed + tolerance,
        }
    }
}
