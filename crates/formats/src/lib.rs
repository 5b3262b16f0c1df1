pub mod dataset_csv;
pub mod loader;
pub mod region_geojson;

pub use dataset_csv::*;
pub use loader::*;
pub use region_geojson::*;
