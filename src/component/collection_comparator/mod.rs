//! 跨集合影格比對元件
//!
//! 以一張參考影格為基準，在共同根目錄下的兄弟集合中找同一邏輯
//! 影格，逐座標比對顏色差異

mod comparator;
mod main;
mod report_writer;

pub use comparator::{
    ComparisonResult, ReferenceColor, ReferenceFrame, SiblingEntry, SiblingReport,
    SkippedSibling, compare_collections,
};
pub use main::CollectionComparator;
pub use report_writer::export_comparison_csv;
