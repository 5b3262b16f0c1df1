pub mod color;
pub mod entity;
pub mod picking;
pub mod projection;
pub mod region;
pub mod registry;

pub use color::*;
pub use entity::*;
pub use region::*;
pub use registry::*;
