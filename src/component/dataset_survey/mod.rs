//! 資料集統計元件
//!
//! 遞迴掃描資料集根目錄，回報序列與影格的分布狀況

mod main;
mod surveyor;

pub use main::DatasetSurvey;
pub use surveyor::{SurveyStats, survey_dataset};
