// Pitch geometry: named coordinate systems, the coordinate standardizer,
// and zone grids for spatial aggregation.

pub mod spec;
pub mod standardizer;
pub mod zones;

pub use spec::PitchSpec;
pub use standardizer::{transform, transform_point};
pub use zones::{bin_statistic, ZoneGrid};
