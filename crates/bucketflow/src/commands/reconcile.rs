//! bucket reconcile: デプロイ前検証フックでバケット設定を同期

use crate::utils;
use bucketflow_cloud::{Activation, Operation, ReconcileReport};
use colored::Colorize;
use std::path::Path;

pub async fn handle(config_path: Option<&Path>) -> anyhow::Result<()> {
    let (path, config) = utils::load_config(config_path)?;
    utils::print_loaded_config_file(&path);

    let hook = match bucketflow_cloud::evaluate(&config, Operation::Deploy) {
        Activation::Register { hook } => hook,
        Activation::Skip(reason) => {
            tracing::debug!(%reason, "Skipping reconcile");
            utils::print_skipped(reason);
            return Ok(());
        }
    };

    let Some(desired) = config.desired.as_ref() else {
        return Ok(());
    };

    let reconciler = utils::build_reconciler(&config.provider).await?;
    tracing::debug!(hook, provider = reconciler.provider_name(), "Running reconcile");

    println!("フック: {}", hook.cyan());
    println!("プロバイダー: {}", reconciler.provider_name().cyan());
    println!("{}", "バケット設定を同期中...".blue().bold());

    let report = reconciler.reconcile(desired).await;
    print_report(&report);

    // 同期の失敗はデプロイを止めない
    Ok(())
}

fn print_report(report: &ReconcileReport) {
    if report.is_skipped() {
        println!(
            "{}",
            "バケット名が設定されていないため同期しませんでした".yellow()
        );
        return;
    }

    let bucket = report.bucket.as_deref().unwrap_or("-");
    println!("バケット: {}", bucket.cyan());

    for change in &report.changes {
        println!("  {} {:<13} {}", "✓".green(), change.facet.to_string(), change.message);
    }

    if report.waited == Some(false) {
        println!(
            "  {} {}",
            "⚠".yellow(),
            "作成したバケットの可視化を確認できませんでした（続行します）".yellow()
        );
    }

    match &report.failure {
        Some(failure) => utils::print_failure_block(failure),
        None => {
            println!();
            if report.has_changes() {
                println!(
                    "{} ({}ms)",
                    "✓ バケット設定を同期しました".green().bold(),
                    report.duration_ms
                );
            } else {
                println!(
                    "{} ({}ms)",
                    "✓ 変更はありません".green().bold(),
                    report.duration_ms
                );
            }
        }
    }
}
