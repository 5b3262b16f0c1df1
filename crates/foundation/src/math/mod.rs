pub mod polygon;
pub mod precision;
pub mod vec;

pub use polygon::*;
pub use precision::*;
pub use vec::*;
