pub mod arena;
pub mod body;

pub use arena::{BodyArena, BodyHandle};
pub use body::Body;
