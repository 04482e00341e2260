//! KDLパーサー
//!
//! bucketflowのKDL設定ファイルをパースし、型付きの `PluginConfig` を生成します。
//! 設定ツリーの走査はここで完結し、コアには正規化済みの値だけが渡されます。

mod bucket;
mod target;
mod value;

pub use bucket::{BucketSection, parse_bucket_config, parse_provider};
pub use target::{
    BlockTargetAdapter, DeploymentTarget, DeploymentTargetAdapter, LegacyTargetAdapter,
    adapter_for,
};

use crate::error::{FlowError, Result};
use crate::model::{DesiredState, PluginConfig, ProviderSettings};
use kdl::KdlDocument;
use std::fs;
use std::path::Path;
use value::first_integer;

/// format-version 未指定時のバージョン
pub const DEFAULT_FORMAT_VERSION: i128 = 2;

/// KDLファイルをパースしてPluginConfigを生成
pub fn parse_kdl_file<P: AsRef<Path>>(path: P) -> Result<PluginConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| FlowError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_kdl_string(&content)
}

/// KDL文字列をパース
pub fn parse_kdl_string(content: &str) -> Result<PluginConfig> {
    let doc: KdlDocument = content.parse()?;

    // format-version はノードの並び順に関係なく先に決定する
    let format_version = doc
        .nodes()
        .iter()
        .find(|n| n.name().value() == "format-version")
        .map(|n| {
            first_integer(n).ok_or_else(|| {
                FlowError::InvalidConfig("format-version には整数を指定してください".into())
            })
        })
        .transpose()?
        .unwrap_or(DEFAULT_FORMAT_VERSION);
    let adapter = adapter_for(format_version)?;

    let mut target: Option<DeploymentTarget> = None;
    let mut section: Option<BucketSection> = None;
    let mut provider = ProviderSettings::default();

    for node in doc.nodes() {
        match node.name().value() {
            "format-version" => {}
            "deployment-bucket" => target = Some(adapter.parse(node)?),
            "bucket-config" => section = Some(parse_bucket_config(node)?),
            "provider" => provider = parse_provider(node)?,
            other => {
                tracing::debug!("未知のトップレベルノード '{}' を無視します", other);
            }
        }
    }

    Ok(assemble(target, section, provider))
}

/// パース結果を PluginConfig にまとめる
///
/// bucket-config が無い場合、目標状態は「未指定」になる。
fn assemble(
    target: Option<DeploymentTarget>,
    section: Option<BucketSection>,
    provider: ProviderSettings,
) -> PluginConfig {
    let Some(section) = section else {
        return PluginConfig {
            enabled: true,
            desired: None,
            provider,
        };
    };

    let target = target.unwrap_or_default();
    let desired = DesiredState {
        bucket_name: target.name,
        server_side_encryption: target.server_side_encryption,
        versioning_enabled: section.versioning,
        acceleration_enabled: section.accelerate,
        policy_document: section.policy,
    };

    PluginConfig {
        enabled: section.enabled,
        desired: Some(desired),
        provider,
    }
}
