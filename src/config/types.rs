use serde::{Deserialize, Serialize};

/// 最近使用路徑的保留上限
pub const MAX_RECENT_PATHS: usize = 10;

/// 預設變化容差（通道空間歐氏距離）
pub const DEFAULT_TOLERANCE: f64 = 10.0;

/// 預設的集合命名前綴
pub const DEFAULT_COLLECTION_PREFIX: &str = "sim";

/// 使用者設定，存於工作目錄的 settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    /// 變化分類的距離閾值；嚴格大於才算變化
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// 瀏覽影格時是否自動記錄到取樣儲存
    #[serde(default)]
    pub auto_track: bool,
    /// 兄弟集合資料夾的命名前綴
    #[serde(default = "default_collection_prefix")]
    pub collection_prefix: String,
    /// 視為序列影格的副檔名（不含點）
    #[serde(default = "default_frame_extensions")]
    pub frame_extensions: Vec<String>,
    /// 最近使用過的資料夾路徑，新的在前
    #[serde(default)]
    pub recent_paths: Vec<String>,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_collection_prefix() -> String {
    DEFAULT_COLLECTION_PREFIX.to_string()
}

fn default_frame_extensions() -> Vec<String> {
    vec!["exr".to_string(), "png".to_string(), "jpg".to_string()]
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            auto_track: false,
            collection_prefix: default_collection_prefix(),
            frame_extensions: default_frame_extensions(),
            recent_paths: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
}
