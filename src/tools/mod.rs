mod bundle_exporter;
mod change_classifier;
mod collection_scanner;
mod csv_exporter;
mod error;
mod frame_scanner;
mod image_loader;
mod metadata_exporter;
mod path_validator;
mod sample_store;

pub use bundle_exporter::export_bundle;
pub use change_classifier::{ChangePoint, classify, classify_store};
pub use collection_scanner::enumerate_collections;
pub use csv_exporter::export_tracking_csv;
pub use error::TrackError;
pub use frame_scanner::{
    FrameEntry, FramePattern, detect_sequence_pattern, scan_sequence_frames,
};
pub use image_loader::{Frame, load_frame};
pub use metadata_exporter::{SessionMetadata, export_metadata};
pub use path_validator::{ensure_directory_exists, validate_directory_exists, validate_file_exists};
pub use sample_store::{Coordinate, Rgb, SampleStore};
