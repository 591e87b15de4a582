//! Error types for the collision engine.
//!
//! Fallible operations return `EngineResult<T>`. Geometry constructors assert
//! their preconditions instead, since bad extents are programming errors.

use thiserror::Error;

use crate::objects::BodyHandle;
use crate::world::ShapeHandle;

/// Unified error type for the collision engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The handle's arena slot was released or reused.
    #[error("stale body handle {0:?}")]
    StaleBody(BodyHandle),

    /// The shape handle was not issued by this world.
    #[error("unknown shape handle {0:?}")]
    UnknownShape(ShapeHandle),

    /// The shape gave its body to another shape and is inert.
    #[error("shape {0:?} has no body attached")]
    DetachedShape(ShapeHandle),

    /// Translation, rotation or mass change requested on an immovable shape.
    #[error("shape {0:?} is immovable")]
    ImmovableShape(ShapeHandle),

    /// Resolution was invoked on a contact with nothing that can move.
    #[error("contact has no movable body (combined inverse inertia {total})")]
    NoMovableBody { total: f64 },

    /// Both contact slots reference the same body.
    #[error("contact references body {0:?} on both sides")]
    SelfContact(BodyHandle),

    /// A caller-supplied vertex buffer has the wrong length.
    #[error("vertex buffer needs {expected} slots, got {actual}")]
    VertexBufferSize { expected: usize, actual: usize },

    /// Configuration value is invalid or could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;
