//! 追蹤引擎的錯誤型別
//!
//! 區分「無法繼續」的設定錯誤與批次處理中可局部恢復的單項錯誤

use std::path::PathBuf;
use thiserror::Error;

/// 追蹤與比對引擎的錯誤分類
#[derive(Debug, Error)]
pub enum TrackError {
    /// 座標從未註冊就嘗試寫入
    #[error("未註冊的座標: ({x}, {y})")]
    UnknownCoordinate { x: u32, y: u32 },

    /// 比對的參考影格不存在或無法讀取，整個比對中止
    #[error("找不到參考影格: {0:?}")]
    ReferenceNotFound(PathBuf),

    /// 找不到任何符合前綴的兄弟資料夾，整個比對中止
    #[error("在 {0:?} 底下找不到任何兄弟資料夾")]
    NoSiblingsFound(PathBuf),

    /// 單一影格載入失敗；批次處理中記錄後跳過
    #[error("影格載入失敗 {path:?}: {reason}")]
    FrameLoadFailed { path: PathBuf, reason: String },

    /// 資料為空時嘗試匯出；不寫出任何檔案
    #[error("沒有可匯出的追蹤資料")]
    NoDataToExport,
}
