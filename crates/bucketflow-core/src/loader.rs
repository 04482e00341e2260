//! 統合ローダー
//!
//! 設定ファイルの発見とパースを統合

use crate::error::Result;
use crate::model::PluginConfig;
use crate::parser::parse_kdl_file;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 設定ファイルを発見してロード
///
/// 戻り値は読み込んだファイルのパスと設定
#[instrument]
pub fn load_config() -> Result<(PathBuf, PluginConfig)> {
    let path = bucketflow_config::find_config_file()?;
    let config = load_config_from(&path)?;
    Ok((path, config))
}

/// 指定されたファイルから設定をロード
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_config_from(path: &Path) -> Result<PluginConfig> {
    let config = parse_kdl_file(path)?;
    info!(
        bucket = config.bucket_name().unwrap_or("-"),
        enabled = config.enabled,
        "Loaded bucket configuration"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bucket.kdl");
        std::fs::write(
            &path,
            r#"
            deployment-bucket {
                name "loaded"
            }
            bucket-config
            "#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.bucket_name(), Some("loaded"));
    }
}
