use agent_analytics::config::LogFormat;
use agent_analytics::utils::{logger, validation::Validate};
use agent_analytics::{AnalyticsError, AppConfig, Cli, CommandRunner, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 載入配置（檔案可選）
    let mut config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 初始化日誌
    match config.logging.format {
        LogFormat::Json => logger::init_json_logger(config.logging.verbose),
        LogFormat::Compact => logger::init_cli_logger(config.logging.verbose),
    }

    tracing::info!("🚀 Starting agent-analytics");
    tracing::debug!("Effective config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        report_failure(&e);
    }

    let runner = CommandRunner::new(config);

    let result = match cli.command {
        Commands::Analyze { .. } => runner.run_analyze().await.map(|_| ()),
        Commands::Serve { .. } => runner.run_serve().await,
        Commands::Verify { mode, csv, .. } => runner.run_verify(mode, csv).await.map(|_| ()),
        Commands::Check => runner.run_check(),
    };

    if let Err(e) = result {
        report_failure(&e);
    }

    Ok(())
}

fn report_failure(e: &AnalyticsError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}
