use bucketflow_cloud::{FacetFailure, Reconciler, SkipReason};
use bucketflow_cloud_aws::S3BucketApi;
use bucketflow_core::{PluginConfig, ProviderSettings};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const RULE_WIDTH: usize = 48;

/// 設定をロードする（パス指定があればそれを、なければ自動検出）
pub fn load_config(path: Option<&Path>) -> anyhow::Result<(PathBuf, PluginConfig)> {
    match path {
        Some(path) => {
            let config = bucketflow_core::load_config_from(path)?;
            Ok((path.to_path_buf(), config))
        }
        None => Ok(bucketflow_core::load_config()?),
    }
}

/// 読み込んだ設定ファイル情報を表示
pub fn print_loaded_config_file(path: &Path) {
    println!("📄 設定ファイル: {}", path.display().to_string().cyan());
}

/// プロバイダー設定からS3向けのReconcilerを構築
pub async fn build_reconciler(settings: &ProviderSettings) -> anyhow::Result<Reconciler> {
    let api = S3BucketApi::from_settings(settings).await?;
    Ok(Reconciler::new(Arc::new(api)))
}

/// ゲートでスキップされた理由を表示
pub fn print_skipped(reason: SkipReason) {
    println!(
        "{} {}",
        "⏭  バケット同期をスキップしました:".yellow(),
        skip_reason_label(reason)
    );
}

pub fn skip_reason_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::Disabled => "bucket-config で無効化されています (enabled #false)",
        SkipReason::NoDesiredState => "bucket-config が宣言されていません",
        SkipReason::PackageOnly => "パッケージのみの操作です",
    }
}

/// 失敗内容を区切り線で囲んでstderrに表示
pub fn print_failure_block(failure: &FacetFailure) {
    let rule = "━".repeat(RULE_WIDTH);
    eprintln!();
    eprintln!("{}", rule.red());
    for (i, line) in failure_block_lines(failure).iter().enumerate() {
        if i == 0 {
            eprintln!("{}", line.red().bold());
        } else {
            eprintln!("{}", line);
        }
    }
    eprintln!("{}", rule.red());
}

fn failure_block_lines(failure: &FacetFailure) -> Vec<String> {
    vec![
        "✗ バケット設定の同期に失敗しました".to_string(),
        format!("  facet: {}", failure.facet),
        format!("  error: {}", failure.error),
        "  デプロイは続行されます。上記を修正して再実行してください".to_string(),
    ]
}
