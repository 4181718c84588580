//! 程式啟動初始化

/// 初始化記錄器
///
/// 預設 info 等級，可用 RUST_LOG 環境變數覆寫
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
