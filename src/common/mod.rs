pub mod config;

pub use config::{EngineConfig, PositionMode, ResolverConfig, UnitScale, VelocityMode};
