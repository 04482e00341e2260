use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: bucket.local.kdl, .bucket.local.kdl, bucket.kdl, .bucket.kdl\n\
        - ./.bucketflow/ ディレクトリ\n\
        - ~/.config/bucketflow/bucket.kdl\n\
        または BUCKETFLOW_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ConfigFileNotFound,

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
