pub mod collision;
pub mod common;
pub mod error;
pub mod math;
pub mod objects;
pub mod resolution;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{Contact, ObjectList};
pub use common::{EngineConfig, PositionMode, ResolverConfig, UnitScale, VelocityMode};
pub use error::{EngineError, EngineResult};
pub use math::{Transform, Vec2};
pub use objects::{Body, BodyArena, BodyHandle};
pub use shapes::{Circle, Cuboid, HalfSpace, Shape, ShapeDesc, ShapeKind};
pub use world::{CollisionWorld, ShapeHandle, StepReport};
