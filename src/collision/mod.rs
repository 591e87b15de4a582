pub mod contact;
pub mod detection;
pub mod object_list;
pub mod sweep;

// Re-export key types
pub use contact::Contact;
pub use detection::*;
pub use object_list::ObjectList;
pub use sweep::{generate_contacts, ColliderSet};
