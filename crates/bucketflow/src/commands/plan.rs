//! bucket plan: 同期で発生する変更を表示（ドライラン）

use crate::utils;
use bucketflow_cloud::{Action, ActionType, Activation, Operation};
use colored::Colorize;
use std::path::Path;

pub async fn handle(config_path: Option<&Path>) -> anyhow::Result<()> {
    let (path, config) = utils::load_config(config_path)?;
    utils::print_loaded_config_file(&path);

    if let Activation::Skip(reason) = bucketflow_cloud::evaluate(&config, Operation::Plan) {
        tracing::debug!(%reason, "Skipping plan");
        utils::print_skipped(reason);
        return Ok(());
    }

    let Some(desired) = config.desired.as_ref() else {
        return Ok(());
    };
    let Some(bucket) = desired.bucket() else {
        println!(
            "{}",
            "バケット名が設定されていないため計画はありません".yellow()
        );
        return Ok(());
    };

    let reconciler = utils::build_reconciler(&config.provider).await?;
    println!(
        "{} ({})",
        "現在のバケット設定を取得中...".blue(),
        reconciler.provider_name()
    );
    let plan = reconciler.plan(desired).await;

    println!();
    println!("{} {}", "実行計画:".bold(), bucket.cyan().bold());
    for action in &plan.actions {
        print_action(action);
    }

    println!();
    if plan.has_changes {
        println!("{}", plan.summary().to_string().bold());
        println!("実行するには {} を使用してください", "bucket reconcile".cyan());
    } else {
        println!("{}", "✓ 変更はありません".green().bold());
    }

    Ok(())
}

fn print_action(action: &Action) {
    let symbol = action_symbol(action.action_type);
    let line = format!("  {} {}", symbol, action.description);
    let line = match action.action_type {
        ActionType::Create => line.green(),
        ActionType::Update => line.yellow(),
        ActionType::NoOp => line.dimmed(),
    };
    println!("{}", line);
}

fn action_symbol(action_type: ActionType) -> &'static str {
    match action_type {
        ActionType::Create => "+",
        ActionType::Update => "~",
        ActionType::NoOp => "=",
    }
}
