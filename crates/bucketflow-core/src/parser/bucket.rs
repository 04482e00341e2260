//! bucket-config / provider ノードのパース

use super::value::{first_bool, first_integer, first_string};
use crate::error::{FlowError, Result};
use crate::model::ProviderSettings;
use kdl::KdlNode;

/// bucket-config ノードの内容
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSection {
    pub enabled: bool,
    pub versioning: bool,
    pub accelerate: bool,
    pub policy: Option<serde_json::Value>,
}

impl Default for BucketSection {
    fn default() -> Self {
        Self {
            enabled: true,
            versioning: false,
            accelerate: false,
            policy: None,
        }
    }
}

/// bucket-config ノードをパース
pub fn parse_bucket_config(node: &KdlNode) -> Result<BucketSection> {
    let mut section = BucketSection::default();

    let Some(children) = node.children() else {
        return Ok(section);
    };

    for child in children.nodes() {
        match child.name().value() {
            "enabled" => {
                section.enabled = first_bool(child).ok_or_else(|| {
                    FlowError::InvalidConfig("enabled には #true / #false を指定してください".into())
                })?;
            }
            "versioning" => {
                section.versioning = first_bool(child).ok_or_else(|| {
                    FlowError::InvalidConfig(
                        "versioning には #true / #false を指定してください".into(),
                    )
                })?;
            }
            "accelerate" | "acceleration" => {
                section.accelerate = first_bool(child).ok_or_else(|| {
                    FlowError::InvalidConfig(
                        "accelerate には #true / #false を指定してください".into(),
                    )
                })?;
            }
            "policy" => {
                let raw = first_string(child).ok_or_else(|| {
                    FlowError::InvalidConfig("policy にはJSON文字列を指定してください".into())
                })?;
                let policy: serde_json::Value = serde_json::from_str(&raw)?;
                if !policy.is_object() {
                    return Err(FlowError::InvalidConfig(
                        "policy はJSONオブジェクトである必要があります".into(),
                    ));
                }
                section.policy = Some(policy);
            }
            other => {
                tracing::debug!("bucket-config: 未知のノード '{}' を無視します", other);
            }
        }
    }

    Ok(section)
}

/// provider ノードをパース
pub fn parse_provider(node: &KdlNode) -> Result<ProviderSettings> {
    let mut provider = ProviderSettings::default();

    let Some(children) = node.children() else {
        return Ok(provider);
    };

    for child in children.nodes() {
        match child.name().value() {
            "region" => provider.region = first_string(child),
            "endpoint-url" | "endpoint_url" => provider.endpoint_url = first_string(child),
            "wait-timeout" | "wait_timeout" => {
                let secs = first_integer(child).ok_or_else(|| {
                    FlowError::InvalidConfig("wait-timeout には秒数を指定してください".into())
                })?;
                let secs = u64::try_from(secs).map_err(|_| {
                    FlowError::InvalidConfig(format!("wait-timeout が範囲外です: {secs}"))
                })?;
                provider.wait_timeout_secs = Some(secs);
            }
            other => {
                tracing::debug!("provider: 未知のノード '{}' を無視します", other);
            }
        }
    }

    Ok(provider)
}
