pub mod load;
pub mod save;
pub mod types;

pub use types::{Config, DEFAULT_COLLECTION_PREFIX, DEFAULT_TOLERANCE, MAX_RECENT_PATHS, UserSettings};
