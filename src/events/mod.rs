// Match events: the record model, table loaders, and the preparation
// pipeline that orders and mirrors a raw event table.

pub mod loader;
pub mod model;
pub mod prepare;

pub use loader::{load_events, load_events_csv, load_events_json, EventError};
pub use model::{Coord, Event, EventType};
pub use prepare::{apply_aliases, prepare, PrepareConfig};
