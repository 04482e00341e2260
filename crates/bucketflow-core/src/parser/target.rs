//! デプロイ先バケット宣言のパース
//!
//! `deployment-bucket` ノードは設定フォーマットのバージョンによって形が異なります。
//! どちらの形を読むかは `format-version` から一度だけ決定し、
//! 以降は正規化された `DeploymentTarget` のみを扱います。

use super::value::{first_string, property_string};
use crate::error::{FlowError, Result};
use kdl::KdlNode;

/// 正規化されたデプロイ先バケット宣言
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub name: Option<String>,
    pub server_side_encryption: Option<String>,
}

/// `deployment-bucket` ノードを正規化するアダプター
pub trait DeploymentTargetAdapter {
    fn parse(&self, node: &KdlNode) -> Result<DeploymentTarget>;
}

/// format-version 1: `deployment-bucket "name" server-side-encryption="AES256"`
#[derive(Debug, Default)]
pub struct LegacyTargetAdapter;

impl DeploymentTargetAdapter for LegacyTargetAdapter {
    fn parse(&self, node: &KdlNode) -> Result<DeploymentTarget> {
        Ok(DeploymentTarget {
            name: first_string(node),
            server_side_encryption: property_string(node, "server-side-encryption")
                .or_else(|| property_string(node, "server_side_encryption")),
        })
    }
}

/// format-version 2: 子ノードによるブロック形式
///
/// ```kdl
/// deployment-bucket {
///     name "my-bucket"
///     server-side-encryption "AES256"
/// }
/// ```
#[derive(Debug, Default)]
pub struct BlockTargetAdapter;

impl DeploymentTargetAdapter for BlockTargetAdapter {
    fn parse(&self, node: &KdlNode) -> Result<DeploymentTarget> {
        let mut target = DeploymentTarget::default();

        let Some(children) = node.children() else {
            // 引数だけで書かれていた場合は旧形式として解釈
            if node.entries().first().is_some() {
                tracing::warn!(
                    "deployment-bucket に子ノードがありません。format-version 1 の形式として解釈します"
                );
                return LegacyTargetAdapter.parse(node);
            }
            return Ok(target);
        };

        for child in children.nodes() {
            match child.name().value() {
                "name" => target.name = first_string(child),
                "server-side-encryption" | "server_side_encryption" => {
                    target.server_side_encryption = first_string(child);
                }
                other => {
                    tracing::debug!("deployment-bucket: 未知のノード '{}' を無視します", other);
                }
            }
        }

        Ok(target)
    }
}

/// format-version に対応するアダプターを選択
pub fn adapter_for(format_version: i128) -> Result<Box<dyn DeploymentTargetAdapter>> {
    match format_version {
        1 => Ok(Box::new(LegacyTargetAdapter)),
        2 => Ok(Box::new(BlockTargetAdapter)),
        other => Err(FlowError::UnsupportedFormatVersion(other)),
    }
}
