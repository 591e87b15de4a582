//! Engine configuration.
//!
//! Restitution, resolver selection and unit conversion are threaded through
//! these values rather than living in process-wide constants.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Which penetration resolver a step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    Disabled,
    /// Moves bodies apart in proportion to inverse mass.
    #[default]
    Linear,
    /// Unvalidated: also rotates bodies by a pseudo-torque share. The angular
    /// term is not dimensionally consistent with a displacement.
    ExperimentalRotational,
}

/// Which velocity resolver a step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityMode {
    #[default]
    Disabled,
    /// Impulse exchange along the contact normal only.
    Linear,
    /// Known defect: the rotational term absorbs most of the impulse and
    /// suppresses the linear response.
    ExperimentalRotational,
}

/// Parameters consumed by the contact resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Coefficient of restitution. Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    pub position_mode: PositionMode,
    pub velocity_mode: VelocityMode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            restitution: 1.0,
            position_mode: PositionMode::Linear,
            velocity_mode: VelocityMode::Disabled,
        }
    }
}

/// Conversion between simulation metres and display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitScale {
    pub pixels_per_metre: f64,
}

impl UnitScale {
    pub fn new(pixels_per_metre: f64) -> Self {
        Self { pixels_per_metre }
    }

    pub fn metres_to_pixels(&self, metres: f64) -> f64 {
        metres * self.pixels_per_metre
    }

    pub fn pixels_to_metres(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_metre
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self {
            pixels_per_metre: 20.0,
        }
    }
}

/// Top-level configuration for a `CollisionWorld`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub resolver: ResolverConfig,
    pub units: UnitScale,
    /// Mass given to movable shapes that do not specify one.
    pub default_mass: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            units: UnitScale::default(),
            default_mass: 10.0,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document and validates the result. Missing fields take
    /// their default values.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is inside its documented range.
    pub fn validate(&self) -> EngineResult<()> {
        let restitution = self.resolver.restitution;
        if !(0.0..=1.0).contains(&restitution) {
            return Err(EngineError::InvalidConfig(format!(
                "restitution must be within [0, 1], got {restitution}"
            )));
        }
        if !(self.units.pixels_per_metre.is_finite() && self.units.pixels_per_metre > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "pixels_per_metre must be positive, got {}",
                self.units.pixels_per_metre
            )));
        }
        if !(self.default_mass.is_finite() && self.default_mass > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "default_mass must be positive, got {}",
                self.default_mass
            )));
        }
        Ok(())
    }

    /// Preset that resolves penetration and velocity with the linear solvers.
    pub fn linear() -> Self {
        Self {
            resolver: ResolverConfig {
                velocity_mode: VelocityMode::Linear,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
