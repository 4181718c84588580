//! 資料集合列舉
//!
//! 在共同根目錄底下找出符合命名前綴的模擬輸出資料夾（集合），
//! 供跨集合比對使用

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// 列出根目錄下符合前綴的集合名稱，依名稱排序
///
/// 只看第一層子資料夾；隱藏資料夾（`.` 開頭）一律略過
pub fn enumerate_collections(root: &Path, prefix: &str) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("無法讀取根目錄: {}", root.display()))?;

    let mut collections: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| !name.starts_with('.') && name.starts_with(prefix))
        .collect();

    collections.sort();

    debug!(
        "在 {} 找到 {} 個符合前綴 {prefix:?} 的集合",
        root.display(),
        collections.len()
    );

    Ok(collections)
}
