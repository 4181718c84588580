//! 跨集合比對核心
//!
//! 給定一張參考影格，依命名慣例在共同根目錄下的每個兄弟集合中
//! 找到同一邏輯影格，逐座標計算相對「參考色」的距離與變化旗標。
//! 設定類錯誤（參考不存在、沒有兄弟集合）立即中止；單一兄弟的
//! 載入失敗只記錄跳過，不影響整體比對

use crate::tools::{
    Coordinate, FramePattern, Rgb, TrackError, enumerate_collections, load_frame,
};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// 集合資料夾內放置影格序列的固定子目錄名
const RENDERS_DIR: &str = "renders";

/// 從參考影格路徑解析出的位置資訊
///
/// 路徑慣例：`{root}/{collection}/renders/{view}/{view}.{frame:04}.{ext}`
#[derive(Debug, Clone)]
pub struct ReferenceFrame {
    /// 兄弟集合的共同根目錄
    pub root: PathBuf,
    /// 參考影格所屬的集合名稱
    pub collection: String,
    /// 影格編號
    pub frame_index: u32,
    /// 檔名樣式（視圖、補零位數、副檔名）
    pub pattern: FramePattern,
}

impl ReferenceFrame {
    /// 解析參考影格路徑；不存在或不符合慣例都視為 `ReferenceNotFound`
    pub fn resolve(path: &Path) -> Result<Self, TrackError> {
        let not_found = || TrackError::ReferenceNotFound(path.to_path_buf());

        if !path.is_file() {
            return Err(not_found());
        }

        let (pattern, frame_index) = FramePattern::parse(path).ok_or_else(not_found)?;

        // 由下往上：影格檔 -> 視圖資料夾 -> renders -> 集合資料夾 -> 根目錄
        let view_dir = path.parent().ok_or_else(not_found)?;
        let renders_dir = view_dir.parent().ok_or_else(not_found)?;
        if renders_dir.file_name().and_then(|n| n.to_str()) != Some(RENDERS_DIR) {
            return Err(not_found());
        }
        let collection_dir = renders_dir.parent().ok_or_else(not_found)?;
        let root = collection_dir.parent().ok_or_else(not_found)?;

        let collection = collection_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(not_found)?
            .to_string();

        Ok(Self {
            root: root.to_path_buf(),
            collection,
            frame_index,
            pattern,
        })
    }

    /// 組出某個兄弟集合中同一邏輯影格的路徑
    #[must_use]
    pub fn sibling_frame_path(&self, sibling: &str) -> PathBuf {
        self.root
            .join(sibling)
            .join(RENDERS_DIR)
            .join(&self.pattern.view)
            .join(self.pattern.file_name(self.frame_index))
    }
}

/// 參考影格中一個座標的觀測色
#[derive(Debug, Clone, Copy)]
pub struct ReferenceColor {
    pub coordinate: Coordinate,
    pub color: Rgb,
}

/// 兄弟集合中一個座標的比對結果
#[derive(Debug, Clone, Copy)]
pub struct SiblingEntry {
    pub coordinate: Coordinate,
    pub color: Rgb,
    /// 與「參考色」的歐氏距離（不是與兄弟自身歷史比）
    pub delta: f64,
    /// `delta > tolerance`
    pub changed: bool,
}

/// 單一兄弟集合的比對報告
#[derive(Debug, Clone)]
pub struct SiblingReport {
    pub collection: String,
    pub entries: Vec<SiblingEntry>,
}

/// 被跳過的兄弟集合與原因
#[derive(Debug, Clone)]
pub struct SkippedSibling {
    pub collection: String,
    pub reason: String,
}

/// 一次跨集合比對的完整結果；每次呼叫重新計算，不做快取
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub reference_collection: String,
    pub view: String,
    pub frame_index: u32,
    pub tolerance: f64,
    /// 參考影格的觀測色，依座標插入順序
    pub reference: Vec<ReferenceColor>,
    pub siblings: Vec<SiblingReport>,
    pub skipped: Vec<SkippedSibling>,
}

/// 跨集合比對
///
/// 1. 解析參考影格位置（失敗 -> `ReferenceNotFound`）
/// 2. 依前綴列舉兄弟集合，排除參考集合（零個 -> `NoSiblingsFound`）
/// 3. 逐兄弟載入同一邏輯影格，失敗者記錄跳過後繼續
/// 4. 逐座標計算相對參考色的距離與旗標；超出邊界的座標只在
///    該影格中省略
pub fn compare_collections(
    reference_path: &Path,
    coordinates: &[Coordinate],
    tolerance: f64,
    collection_prefix: &str,
    shutdown_signal: &AtomicBool,
) -> Result<ComparisonResult, TrackError> {
    let reference = ReferenceFrame::resolve(reference_path)?;

    let siblings: Vec<String> = enumerate_collections(&reference.root, collection_prefix)
        .map_err(|e| {
            debug!("列舉兄弟集合失敗: {e}");
            TrackError::NoSiblingsFound(reference.root.clone())
        })?
        .into_iter()
        .filter(|name| *name != reference.collection)
        .collect();

    if siblings.is_empty() {
        return Err(TrackError::NoSiblingsFound(reference.root.clone()));
    }

    let reference_frame = load_frame(reference_path)
        .map_err(|_| TrackError::ReferenceNotFound(reference_path.to_path_buf()))?;

    // 參考色每個座標只讀一次；超出參考影格範圍的座標整個比對中省略
    let reference_colors: Vec<ReferenceColor> = coordinates
        .iter()
        .filter_map(|coord| {
            reference_frame.get(coord.x, coord.y).map(|color| ReferenceColor {
                coordinate: *coord,
                color,
            })
        })
        .collect();

    let mut result = ComparisonResult {
        reference_collection: reference.collection.clone(),
        view: reference.pattern.view.clone(),
        frame_index: reference.frame_index,
        tolerance,
        reference: reference_colors,
        siblings: Vec::new(),
        skipped: Vec::new(),
    };

    for sibling in siblings {
        if shutdown_signal.load(Ordering::SeqCst) {
            info!("收到中斷訊號，停止比對");
            break;
        }

        let frame_path = reference.sibling_frame_path(&sibling);
        let frame = match load_frame(&frame_path) {
            Ok(frame) => frame,
            Err(e) => {
                // 單一兄弟的失敗不中止整體比對
                warn!("兄弟集合 {sibling} 的影格無法載入，跳過: {e}");
                result.skipped.push(SkippedSibling {
                    collection: sibling,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let entries: Vec<SiblingEntry> = result
            .reference
            .iter()
            .filter_map(|reference_color| {
                let coord = reference_color.coordinate;
                frame.get(coord.x, coord.y).map(|color| {
                    let delta = color.distance(&reference_color.color);
                    SiblingEntry {
                        coordinate: coord,
                        color,
                        delta,
                        changed: delta > tolerance,
                    }
                })
            })
            .collect();

        result.siblings.push(SiblingReport {
            collection: sibling,
            entries,
        });
    }

    info!(
        "比對完成 - 參考: {}, 兄弟: {}, 跳過: {}",
        result.reference_collection,
        result.siblings.len(),
        result.skipped.len()
    );

    Ok(result)
}
