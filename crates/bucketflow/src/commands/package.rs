use crate::utils;
use bucketflow_cloud::{Activation, Operation};
use colored::Colorize;
use std::path::Path;

/// パッケージのみの操作。設定は検証するがバケットには触れない
pub fn handle(config_path: Option<&Path>) -> anyhow::Result<()> {
    let (path, config) = utils::load_config(config_path)?;
    utils::print_loaded_config_file(&path);

    match bucketflow_cloud::evaluate(&config, Operation::Package) {
        Activation::Skip(reason) => utils::print_skipped(reason),
        Activation::Register { .. } => {
            unreachable!("package never registers the bucket reconciler");
        }
    }

    println!(
        "{}",
        "✓ 設定を検証しました（バケット同期は実行していません）"
            .green()
            .bold()
    );
    Ok(())
}
