pub mod collision_world;

pub use collision_world::{CollisionWorld, ShapeEntry, StepReport};

/// Index of a shape in a `CollisionWorld`. Shapes are never removed from
/// the world's table, so a handle stays valid for the world's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeHandle(pub(crate) usize);

impl ShapeHandle {
    pub fn index(self) -> usize {
        self.0
    }
}
