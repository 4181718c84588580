use crate::config::types::{MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    // 存在程式執行的當前目錄，方便與程式一起移動
    let path = Path::new("settings.json");
    let content = serde_json::to_string_pretty(settings).context("無法序列化設定")?;

    fs::write(path, content).with_context(|| format!("無法寫入設定檔: {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的路徑：新路徑放最前面，去重並限制數量
pub fn add_recent_path(settings: &mut UserSettings, path: &str) {
    settings.recent_paths.retain(|p| p != path);
    settings.recent_paths.insert(0, path.to_string());
    settings.recent_paths.truncate(MAX_RECENT_PATHS);
}
