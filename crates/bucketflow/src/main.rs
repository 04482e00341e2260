mod commands;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bucket")]
#[command(about = "デプロイ用バケットを、宣言どおりに。", long_about = None)]
struct Cli {
    /// 設定ファイルのパス（省略時は bucket.kdl を自動検出）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// バケット設定を宣言どおりに同期（デプロイ前検証フックで実行）
    Reconcile,
    /// 同期で実行される変更を表示（リモートは変更しない）
    Plan,
    /// パッケージのみ実行（バケットには一切触れない）
    Package,
    /// 設定を検証
    Validate,
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrへ（RUST_LOG未指定時はinfo）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("bucketflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config_path = cli.config.as_deref();
    tracing::debug!(
        config = ?config_path,
        command = command_name(&cli.command),
        "Dispatching command"
    );

    // コマンドディスパッチ
    match cli.command {
        Commands::Reconcile => commands::reconcile::handle(config_path).await?,
        Commands::Plan => commands::plan::handle(config_path).await?,
        Commands::Package => commands::package::handle(config_path)?,
        Commands::Validate => commands::validate::handle(config_path)?,
        Commands::Version => {
            unreachable!("Version is handled before config loading");
        }
    }

    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Reconcile => "reconcile",
        Commands::Plan => "plan",
        Commands::Package => "package",
        Commands::Validate => "validate",
        Commands::Version => "version",
    }
}
