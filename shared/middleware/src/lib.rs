pub mod access_control;
pub mod cors;

pub use access_control::*;
pub use cors::*;
