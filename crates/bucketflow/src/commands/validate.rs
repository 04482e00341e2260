use crate::utils;
use colored::Colorize;
use std::path::Path;

pub fn handle(config_path: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let (path, config) = match utils::load_config(config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {}", e);
            if config_path.is_none() {
                eprintln!();
                eprintln!(
                    "bucket.kdl が存在するディレクトリで実行するか、--config または {} を指定してください",
                    bucketflow_config::CONFIG_PATH_ENV
                );
            }
            std::process::exit(1);
        }
    };

    utils::print_loaded_config_file(&path);
    println!("{}", "✓ 設定ファイルは正常です！".green().bold());
    println!();
    println!("サマリー:");
    println!(
        "  有効: {}",
        if config.enabled { "yes".green() } else { "no".yellow() }
    );

    match &config.desired {
        Some(desired) => {
            println!(
                "  バケット: {}",
                desired.bucket().unwrap_or("(未設定)").cyan()
            );
            println!(
                "  暗号化: {}",
                desired.encryption().unwrap_or("(未設定)")
            );
            println!("  バージョニング: {}", on_off(desired.versioning_enabled));
            println!("  転送高速化: {}", on_off(desired.acceleration_enabled));
            println!(
                "  ポリシー: {}",
                if desired.policy_document.is_some() {
                    "あり"
                } else {
                    "なし"
                }
            );
        }
        None => {
            println!("  bucket-config: {}", "(なし)".dimmed());
        }
    }

    let provider = &config.provider;
    if provider.region.is_some() || provider.endpoint_url.is_some() {
        println!("  プロバイダー:");
        if let Some(region) = &provider.region {
            println!("    - region: {}", region.cyan());
        }
        if let Some(endpoint) = &provider.endpoint_url {
            println!("    - endpoint: {}", endpoint.cyan());
        }
    }

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
