pub mod app_config;
pub mod seed;
pub mod snapshot;

pub use app_config::Config;
pub use snapshot::{JsonFileStore, MemoryStore, SnapshotError, SnapshotStore};
