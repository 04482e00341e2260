//! bucketflow core
//!
//! バケット設定のデータモデルと、KDL設定ファイルのパーサーを提供します。

pub mod error;
pub mod loader;
pub mod model;
pub mod parser;

pub use error::{FlowError, Result};
pub use loader::{load_config, load_config_from};
pub use model::{DesiredState, ObservedState, PluginConfig, ProviderSettings};
pub use parser::{parse_kdl_file, parse_kdl_string};
