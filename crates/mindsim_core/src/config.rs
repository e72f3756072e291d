use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::error::{ConfigError, ConfigLoadError};
use crate::types::{Boundary, SpeedPolicy};

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed for deterministic simulation
    pub seed: u64,
    /// Boundary radius in local units
    pub boundary_radius: f32,
    /// Scale of the frame owning the boundary
    pub scale_factor: f32,
    /// World-space gap kept between bodies and the boundary
    pub margin: f32,
    /// Restitution for wall reflections and pair impulses
    pub restitution: f32,
    /// Frame deltas above this are clamped before integrating
    pub max_dt: f32,
    /// Speed invariant for every body in the container
    pub speed_policy: SpeedPolicy,
    /// Radius of spawned bodies (local units)
    pub body_radius: f32,
    /// Cruise speed of spawned bodies (local units per second)
    pub cruise_speed: f32,
    /// Bodies spawned when the container is built
    pub initial_bodies: u32,
    /// Rejection-sampling attempts for random placement
    pub placement_attempts: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::mind()
    }
}

impl SimConfig {
    /// Mind/mental model: unit local sphere scaled by the mind, fixed cruise speed
    pub fn mind() -> Self {
        Self {
            seed: 42,
            boundary_radius: 1.0,
            scale_factor: 1.0,
            margin: BOUNDARY_MARGIN,
            restitution: DEFAULT_RESTITUTION,
            max_dt: MAX_DT,
            speed_policy: SpeedPolicy::Cruise,
            body_radius: MENTAL_RADIUS,
            cruise_speed: MENTAL_CRUISE_SPEED,
            initial_bodies: 8,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }

    /// Standalone container + balls demo: fixed radius, speed kept inside a band
    pub fn container_demo() -> Self {
        Self {
            boundary_radius: DEMO_BOUNDARY_RADIUS,
            speed_policy: SpeedPolicy::Band {
                min_speed: DEMO_MIN_SPEED,
                max_speed: DEMO_MAX_SPEED,
            },
            body_radius: DEMO_BALL_RADIUS,
            cruise_speed: (DEMO_MIN_SPEED + DEMO_MAX_SPEED) * 0.5,
            restitution: 0.95,
            initial_bodies: 12,
            ..Self::mind()
        }
    }

    pub fn boundary(&self) -> Boundary {
        Boundary {
            radius: self.boundary_radius,
            scale_factor: self.scale_factor,
            margin: self.margin,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.boundary_radius) {
            return Err(ConfigError::NonPositiveRadius(self.boundary_radius));
        }
        if !is_positive(self.scale_factor) {
            return Err(ConfigError::NonPositiveScale(self.scale_factor));
        }
        if !is_positive(self.max_dt) {
            return Err(ConfigError::NonPositiveMaxDt(self.max_dt));
        }
        if !(MIN_RESTITUTION..=MAX_RESTITUTION).contains(&self.restitution) {
            return Err(ConfigError::RestitutionOutOfRange {
                got: self.restitution,
                min: MIN_RESTITUTION,
                max: MAX_RESTITUTION,
            });
        }
        if !is_non_negative(self.margin) {
            return Err(ConfigError::NegativeMargin(self.margin));
        }
        if !is_positive(self.body_radius) {
            return Err(ConfigError::NonPositiveBodyRadius(self.body_radius));
        }
        if !is_non_negative(self.cruise_speed) {
            return Err(ConfigError::NegativeCruiseSpeed(self.cruise_speed));
        }
        if let SpeedPolicy::Band {
            min_speed,
            max_speed,
        } = self.speed_policy
        {
            if !(is_positive(min_speed) && is_positive(max_speed) && max_speed >= min_speed) {
                return Err(ConfigError::InvalidSpeedBand {
                    min_speed,
                    max_speed,
                });
            }
        }
        if self.boundary().world_limit(self.body_radius) <= 0.0 {
            return Err(ConfigError::BodyTooLarge {
                body_radius: self.body_radius,
                boundary_radius: self.boundary_radius,
            });
        }
        Ok(())
    }

    /// Parse a YAML config. Missing fields take the mind defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn is_positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn is_non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}
