pub mod index;
pub mod record;
pub mod signals;

pub use index::*;
pub use record::*;
pub use signals::*;
