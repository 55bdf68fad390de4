pub mod index;
pub mod publications;
