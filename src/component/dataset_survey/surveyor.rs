//! 資料集統計掃描
//!
//! 遞迴走訪資料集根目錄，統計每個子資料夾的序列、影格數與大小；
//! 個別資料夾的錯誤記錄後繼續，不中止整個掃描

use crate::tools::{detect_sequence_pattern, scan_sequence_frames, validate_directory_exists};
use anyhow::Result;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// 資料集掃描統計
#[derive(Debug, Default)]
pub struct SurveyStats {
    /// 走訪的子資料夾總數
    pub total_folders: usize,
    /// 找到的序列數
    pub total_sequences: usize,
    /// 所有序列的影格總數
    pub total_frames: usize,
    /// 各副檔名的序列數
    pub sequence_types: HashMap<String, usize>,
    /// 每個含序列資料夾（相對路徑）的影格數，依走訪順序
    pub frame_counts: Vec<(String, usize)>,
    /// 每個資料夾（相對路徑）的檔案大小總和
    pub folder_sizes: Vec<(String, u64)>,
    /// 掃描過程累積的非致命錯誤
    pub errors: Vec<String>,
}

/// 掃描資料集根目錄
pub fn survey_dataset(
    root: &Path,
    extensions: &[String],
    shutdown_signal: &AtomicBool,
) -> Result<SurveyStats> {
    validate_directory_exists(root)?;

    info!("開始掃描資料集: {}", root.display());

    let mut stats = SurveyStats::default();

    let folders: Vec<_> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect();

    stats.total_folders = folders.len();

    for folder in folders {
        if shutdown_signal.load(Ordering::SeqCst) {
            info!("收到中斷訊號，停止掃描");
            break;
        }

        let relative = folder
            .strip_prefix(root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| folder.display().to_string());

        // 資料夾大小：只算第一層檔案
        match folder_size(&folder) {
            Ok(size) if size > 0 => stats.folder_sizes.push((relative.clone(), size)),
            Ok(_) => {}
            Err(e) => {
                warn!("無法計算資料夾大小 {}: {e}", folder.display());
                stats.errors.push(format!("大小計算失敗 {relative}: {e}"));
            }
        }

        let pattern = match detect_sequence_pattern(&folder, extensions) {
            Ok(Some(pattern)) => pattern,
            Ok(None) => {
                debug!("{} 沒有序列影格", folder.display());
                continue;
            }
            Err(e) => {
                warn!("序列偵測失敗 {}: {e}", folder.display());
                stats.errors.push(format!("序列偵測失敗 {relative}: {e}"));
                continue;
            }
        };

        match scan_sequence_frames(&folder, extensions) {
            Ok(frames) if !frames.is_empty() => {
                stats.total_sequences += 1;
                stats.total_frames += frames.len();
                *stats
                    .sequence_types
                    .entry(pattern.extension.clone())
                    .or_insert(0) += 1;
                stats.frame_counts.push((relative, frames.len()));
            }
            Ok(_) => {}
            Err(e) => {
                stats.errors.push(format!("影格列舉失敗 {relative}: {e}"));
            }
        }
    }

    info!(
        "資料集掃描完成 - 資料夾: {}, 序列: {}, 影格: {}",
        stats.total_folders, stats.total_sequences, stats.total_frames
    );

    Ok(stats)
}

fn folder_size(folder: &Path) -> Result<u64> {
    let mut size = 0;
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            size += entry.metadata()?.len();
        }
    }
    Ok(size)
}
