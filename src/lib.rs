// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod events;
pub mod filters;
pub mod network;
pub mod pitch;
pub mod report;
pub mod xg;
