//! 循序影格取樣
//!
//! 從單張解碼影格讀出所有追蹤座標的顏色，依座標插入順序附加到
//! 取樣儲存；超出影格邊界的座標當幀跳過（容許資料集內影格尺寸不一）

use crate::tools::{Coordinate, Frame, Rgb, SampleStore, TrackError};
use log::debug;

/// 單張影格的取樣統計
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TrackReport {
    /// 成功記錄的座標數
    pub recorded: usize,
    /// 超出邊界而跳過的座標數
    pub skipped: usize,
}

/// 對一張影格取樣：每個範圍內的已註冊座標記錄一筆
///
/// 超出邊界的座標不記錄也不報錯，只留 debug 記錄
pub fn track_frame(store: &mut SampleStore, frame: &Frame) -> Result<TrackReport, TrackError> {
    let coords: Vec<Coordinate> = store.coordinates().to_vec();

    let mut report = TrackReport::default();
    for coord in coords {
        match frame.get(coord.x, coord.y) {
            Some(rgb) => {
                store.record(coord, rgb)?;
                report.recorded += 1;
            }
            None => {
                debug!(
                    "座標 {coord} 超出影格範圍 {}x{}，此幀跳過",
                    frame.width(),
                    frame.height()
                );
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// 僅讀取不記錄（滑鼠懸停式的即時檢視，不污染追蹤歷史）
#[must_use]
pub fn peek(frame: &Frame, coord: Coordinate) -> Option<Rgb> {
    frame.get(coord.x, coord.y)
}
