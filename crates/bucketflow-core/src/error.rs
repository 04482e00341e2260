use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("KDLパースエラー: {0}")]
    KdlParse(#[from] kdl::KdlError),

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("ポリシーのJSONが不正です: {0}")]
    InvalidPolicy(#[from] serde_json::Error),

    #[error("未対応の format-version です: {0}（1 または 2 を指定してください）")]
    UnsupportedFormatVersion(i128),

    #[error(transparent)]
    Config(#[from] bucketflow_config::ConfigError),
}

pub type Result<T> = std::result::Result<T, FlowError>;
