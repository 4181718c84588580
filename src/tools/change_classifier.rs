//! 顏色變化分類
//!
//! 純函式：把顏色序列換算成相對基準色的距離與變化旗標，
//! 不保留任何狀態，每次呼叫都從目前的儲存內容重新計算

use crate::tools::sample_store::{Coordinate, Rgb, SampleStore};

/// 單一取樣的分類結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangePoint {
    /// 相對基準色的歐氏距離
    pub delta: f64,
    /// `delta > tolerance`（等於容差不算變化）
    pub changed: bool,
}

/// 對一條顏色序列做變化分類
///
/// 基準色預設為序列第一筆；空序列回傳空結果而非錯誤
#[must_use]
pub fn classify(samples: &[Rgb], tolerance: f64, baseline: Option<Rgb>) -> Vec<ChangePoint> {
    let Some(base) = baseline.or_else(|| samples.first().copied()) else {
        return Vec::new();
    };

    samples
        .iter()
        .map(|sample| {
            let delta = sample.distance(&base);
            ChangePoint {
                delta,
                changed: delta > tolerance,
            }
        })
        .collect()
}

/// 對整個儲存做分類，依座標插入順序回傳
#[must_use]
pub fn classify_store(store: &SampleStore, tolerance: f64) -> Vec<(Coordinate, Vec<ChangePoint>)> {
    store
        .coordinates()
        .iter()
        .map(|coord| {
            let points = store
                .samples(coord)
                .map(|samples| classify(samples, tolerance, None))
                .unwrap_or_default();
            (*coord, points)
        })
        .collect()
}
