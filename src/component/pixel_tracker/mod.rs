//! 像素顏色追蹤元件
//!
//! 對一條影格序列追蹤指定座標的 RGB 演變：
//! 平行解碼、循序取樣、變化分類、結果匯出

mod frame_sampler;
mod main;

pub use frame_sampler::{TrackReport, peek, track_frame};
pub use main::PixelTracker;
