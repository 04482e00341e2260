//! バケットの状態モデル
//!
//! 宣言された目標状態（DesiredState）と、プロバイダーから取得した
//! 実際の状態（ObservedState）を定義します。

use serde::{Deserialize, Serialize};

/// バケットの目標状態
///
/// 設定から一度だけ構築され、リコンサイル実行中は読み取り専用です。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesiredState {
    /// 対象バケット名（未指定の場合リコンサイルは何もしない）
    pub bucket_name: Option<String>,

    /// サーバーサイド暗号化アルゴリズム（AES256, aws:kms など）
    /// 未指定 = 暗号化を管理しない
    pub server_side_encryption: Option<String>,

    /// バージョニングを有効にするか
    #[serde(default)]
    pub versioning_enabled: bool,

    /// Transfer Acceleration を有効にするか
    #[serde(default)]
    pub acceleration_enabled: bool,

    /// バケットポリシー（未指定 = ポリシーを管理しない）
    pub policy_document: Option<serde_json::Value>,
}

impl DesiredState {
    /// バケット名を指定して作成
    pub fn for_bucket(name: impl Into<String>) -> Self {
        Self {
            bucket_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_encryption(mut self, algorithm: impl Into<String>) -> Self {
        self.server_side_encryption = Some(algorithm.into());
        self
    }

    pub fn with_versioning(mut self, enabled: bool) -> Self {
        self.versioning_enabled = enabled;
        self
    }

    pub fn with_acceleration(mut self, enabled: bool) -> Self {
        self.acceleration_enabled = enabled;
        self
    }

    pub fn with_policy(mut self, policy: serde_json::Value) -> Self {
        self.policy_document = Some(policy);
        self
    }

    /// 空文字列のバケット名は未指定として扱う
    pub fn bucket(&self) -> Option<&str> {
        self.bucket_name.as_deref().filter(|name| !name.is_empty())
    }

    /// 管理対象の暗号化アルゴリズム（空文字列は未指定）
    pub fn encryption(&self) -> Option<&str> {
        self.server_side_encryption
            .as_deref()
            .filter(|algorithm| !algorithm.is_empty())
    }
}

/// プロバイダー上の実際の状態
///
/// ファセットごとに判断の直前で取得され、キャッシュされません。
/// 全ファセットをまとめて保持するのは plan（ドライラン）のみです。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedState {
    pub exists: bool,
    /// 暗号化は追加のみ（一度設定されたら外さない）
    pub encryption_configured: bool,
    pub versioning_enabled: bool,
    pub acceleration_enabled: bool,
}

impl ObservedState {
    /// 存在しないバケットの状態（全ファセット無効）
    pub fn absent() -> Self {
        Self::default()
    }
}
