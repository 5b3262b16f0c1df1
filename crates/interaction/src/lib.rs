//! Hover-driven region interaction.
//!
//! Everything here is advanced from a single per-frame `GlobeApp::tick`; no
//! component blocks or schedules work of its own.

pub mod app;
pub mod config;
pub mod events;
pub mod extrusion;
pub mod ground;
pub mod hover;
pub mod lighting;
pub mod mood;
pub mod sink;

pub use app::*;
pub use config::*;
pub use events::*;
pub use extrusion::*;
pub use ground::*;
pub use hover::*;
pub use lighting::*;
pub use mood::*;
pub use sink::*;
