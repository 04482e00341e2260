//! モデル定義
//!
//! bucketflowで使用されるデータモデルを定義します。

mod bucket;
mod plugin;

// Re-exports
pub use bucket::*;
pub use plugin::*;
