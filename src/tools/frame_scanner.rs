//! 影格序列掃描
//!
//! 解析 `{view}.{frame:04}.{ext}` 命名慣例，列出資料夾內
//! 依影格編號排序的序列

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

// 命名慣例：`{view}.{frame}.{ext}`，frame 為固定位數補零
static FRAME_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<view>.+)\.(?P<frame>\d+)\.(?P<ext>[A-Za-z0-9]+)$").expect("Invalid regex")
});

/// 一條影格序列的命名樣式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePattern {
    /// 視圖識別名（例如 `beauty`、`depth`）
    pub view: String,
    /// 影格編號的補零位數
    pub padding: usize,
    /// 副檔名（不含點）
    pub extension: String,
}

impl FramePattern {
    /// 從單一影格檔名解析出樣式與影格編號
    ///
    /// 不符合命名慣例的檔名回傳 `None`
    #[must_use]
    pub fn parse(path: &Path) -> Option<(Self, u32)> {
        let file_name = path.file_name()?.to_str()?;
        let caps = FRAME_NAME_REGEX.captures(file_name)?;

        let frame_digits = caps.name("frame")?.as_str();
        let index: u32 = frame_digits.parse().ok()?;

        let pattern = Self {
            view: caps.name("view")?.as_str().to_string(),
            padding: frame_digits.len(),
            extension: caps.name("ext")?.as_str().to_lowercase(),
        };

        Some((pattern, index))
    }

    /// 依樣式組出指定影格編號的檔名
    #[must_use]
    pub fn file_name(&self, index: u32) -> String {
        format!(
            "{}.{:0width$}.{}",
            self.view,
            index,
            self.extension,
            width = self.padding
        )
    }
}

/// 掃描到的一張序列影格
#[derive(Debug, Clone)]
pub struct FrameEntry {
    pub path: PathBuf,
    pub index: u32,
}

/// 列出資料夾內屬於同一條序列的影格，依編號排序
///
/// 只接受副檔名在 `extensions` 名單內的檔案；不符合命名慣例的檔案
/// 直接略過。子資料夾不往下掃（序列影格放在同一層）
pub fn scan_sequence_frames(directory: &Path, extensions: &[String]) -> Result<Vec<FrameEntry>> {
    let mut frames: Vec<FrameEntry> = WalkDir::new(directory)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.into_path();
            let (pattern, index) = FramePattern::parse(&path)?;
            if extensions.iter().any(|ext| *ext == pattern.extension) {
                Some(FrameEntry { path, index })
            } else {
                None
            }
        })
        .collect();

    frames.sort_by_key(|frame| frame.index);

    debug!(
        "在 {} 找到 {} 張序列影格",
        directory.display(),
        frames.len()
    );

    Ok(frames)
}

/// 偵測資料夾內的序列樣式（取第一個符合慣例的檔案）
pub fn detect_sequence_pattern(
    directory: &Path,
    extensions: &[String],
) -> Result<Option<FramePattern>> {
    let frames = scan_sequence_frames(directory, extensions)
        .with_context(|| format!("無法掃描序列資料夾: {}", directory.display()))?;

    Ok(frames
        .first()
        .and_then(|frame| FramePattern::parse(&frame.path))
        .map(|(pattern, _)| pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        vec!["exr".to_string(), "png".to_string(), "jpg".to_string()]
    }

    #[test]
    fn test_parse_frame_name() {
        let (pattern, index) = FramePattern::parse(Path::new("beauty.0042.exr")).unwrap();
        assert_eq!(pattern.view, "beauty");
        assert_eq!(pattern.padding, 4);
        assert_eq!(pattern.extension, "exr");
        assert_eq!(index, 42);
    }

    #[test]
    fn test_parse_view_with_dots() {
        // 視圖名本身可以含點，最後兩段固定是編號與副檔名
        let (pattern, index) = FramePattern::parse(Path::new("diffuse.indirect.0007.png")).unwrap();
        assert_eq!(pattern.view, "diffuse.indirect");
        assert_eq!(index, 7);
    }

    #[test]
    fn test_parse_rejects_non_sequence_names() {
        assert!(FramePattern::parse(Path::new("notes.txt")).is_none());
        assert!(FramePattern::parse(Path::new("preview.png")).is_none());
    }

    #[test]
    fn test_file_name_round_trip() {
        let pattern = FramePattern {
            view: "beauty".to_string(),
            padding: 4,
            extension: "exr".to_string(),
        };
        assert_eq!(pattern.file_name(3), "beauty.0003.exr");
        assert_eq!(pattern.file_name(12345), "beauty.12345.exr");
    }

    #[test]
    fn test_scan_sequence_frames_sorted_by_index() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();

        fs::write(base.join("beauty.0010.png"), "x").unwrap();
        fs::write(base.join("beauty.0002.png"), "x").unwrap();
        fs::write(base.join("beauty.0001.png"), "x").unwrap();
        // 不符合慣例或副檔名的檔案要略過
        fs::write(base.join("readme.txt"), "x").unwrap();
        fs::write(base.join("beauty.0003.mp4"), "x").unwrap();

        let frames = scan_sequence_frames(base, &default_extensions()).unwrap();
        let indices: Vec<u32> = frames.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 2, 10]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let frames = scan_sequence_frames(temp_dir.path(), &default_extensions()).unwrap();
        assert!(frames.is_empty());
    }

    #[test]
    fn test_detect_sequence_pattern() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("depth.0001.exr"), "x").unwrap();

        let pattern = detect_sequence_pattern(temp_dir.path(), &default_extensions())
            .unwrap()
            .unwrap();
        assert_eq!(pattern.view, "depth");
        assert_eq!(pattern.extension, "exr");
    }
}
