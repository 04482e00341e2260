//! プラグイン設定モデル

use super::bucket::DesiredState;
use serde::{Deserialize, Serialize};

/// 境界で一度だけ構築される型付き設定
///
/// コアはこの構造体のみを参照し、設定ツリーを辿ることはありません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// プラグインの有効/無効（デフォルト: 有効）
    pub enabled: bool,

    /// 目標状態（bucket-config / deployment-bucket が無い場合は None）
    pub desired: Option<DesiredState>,

    /// プロバイダー接続設定
    pub provider: ProviderSettings,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            desired: None,
            provider: ProviderSettings::default(),
        }
    }
}

impl PluginConfig {
    /// リコンサイル対象のバケット名
    pub fn bucket_name(&self) -> Option<&str> {
        self.desired.as_ref().and_then(|d| d.bucket())
    }
}

/// プロバイダー接続設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// リージョン（eu-west-1 など）。未指定時はSDKのデフォルト解決に従う
    pub region: Option<String>,

    /// エンドポイントURL（LocalStack等のS3互換サービス向け）
    pub endpoint_url: Option<String>,

    /// 作成直後の待機時間の上限（秒）
    pub wait_timeout_secs: Option<u64>,
}
