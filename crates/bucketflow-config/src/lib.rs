pub mod error;

pub use error::*;

use std::path::{Path, PathBuf};

/// 設定ファイルのパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "BUCKETFLOW_CONFIG_PATH";

/// 検索するファイル名（優先順）
const CANDIDATES: [&str; 4] = [
    "bucket.local.kdl",
    ".bucket.local.kdl",
    "bucket.kdl",
    ".bucket.kdl",
];

/// グローバル設定ファイルのパス (~/.config/bucketflow/bucket.kdl)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bucketflow").join("bucket.kdl"))
}

/// プロジェクトのbucket.kdlファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 BUCKETFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: bucket.local.kdl, .bucket.local.kdl, bucket.kdl, .bucket.kdl
/// 3. ./.bucketflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/bucketflow/bucket.kdl (グローバル設定)
pub fn find_config_file() -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    find_config_file_in(&current_dir)
}

/// 指定ディレクトリを起点にbucket.kdlファイルを探す
pub fn find_config_file_in(dir: &Path) -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!(path = %config_path, "{} のファイルが存在しないため無視します", CONFIG_PATH_ENV);
    }

    // 2. 指定ディレクトリで検索
    if let Some(path) = first_existing(dir) {
        return Ok(path);
    }

    // 3. ./.bucketflow/ ディレクトリで検索
    let flow_dir = dir.join(".bucketflow");
    if flow_dir.is_dir() {
        if let Some(path) = first_existing(&flow_dir) {
            return Ok(path);
        }
    }

    // 4. グローバル設定ファイル (~/.config/bucketflow/bucket.kdl)
    if let Some(global_config) = global_config_path().filter(|p| p.exists()) {
        return Ok(global_config);
    }

    Err(ConfigError::ConfigFileNotFound)
}

fn first_existing(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}
