pub mod config;
pub mod diffuse;
pub mod directions;
pub mod overlap;
pub mod screen;
pub mod shadow;
pub mod solar;
