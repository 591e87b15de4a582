pub mod transform;
pub mod vec2;

pub use transform::{wrap_degrees, Transform};
pub use vec2::Vec2;
