//! 功能元件模組
//!
//! 每個子模組實現一個獨立的功能，包含主要邏輯和專用工具

pub mod collection_comparator;
pub mod dataset_survey;
pub mod pixel_tracker;

pub use collection_comparator::CollectionComparator;
pub use dataset_survey::DatasetSurvey;
pub use pixel_tracker::PixelTracker;
