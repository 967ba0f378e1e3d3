use anyhow::Context;
use clap::Parser;
use quikbak::config::cli::{Command, ConfigCommand};
use quikbak::config::ConfigProvider;
use quikbak::utils::{logger, validation::Validate};
use quikbak::{CliConfig, CommandHandlers, ConsoleReporter, QuikBakConfig, ZipArchiveService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    // 驗證參數
    if let Err(e) = cli.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let provider = cli.config_provider();

    if let Some((kind, path)) = cli.command.file_command() {
        let handlers = CommandHandlers::new(provider, ZipArchiveService::new(), ConsoleReporter::new());

        match handlers.run(kind, path).await {
            Ok(outcome) => {
                tracing::info!(
                    "📁 {} finished: {} -> {}",
                    outcome.command,
                    outcome.source.display(),
                    outcome.output.display()
                );
            }
            Err(e) => {
                // 失敗訊息已由 reporter 顯示，這裡只補充建議與退出碼
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                    kind,
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(e.exit_code());
            }
        }
        return Ok(());
    }

    if let Command::Config(sub) = &cli.command {
        match sub {
            ConfigCommand::Show { json } => show_config(&provider, *json)?,
            ConfigCommand::Init { force } => {
                let path = provider.base().path().to_path_buf();
                provider
                    .base()
                    .write_defaults(*force)
                    .with_context(|| format!("could not write {}", path.display()))?;
                println!("✅ Wrote default settings to {}", path.display());
            }
        }
    }

    Ok(())
}

fn show_config(provider: &dyn ConfigProvider, json: bool) -> anyhow::Result<()> {
    let config = QuikBakConfig::from_provider(provider)?;
    if let Err(e) = config.validate() {
        tracing::warn!("⚠️ Effective settings are invalid: {}", e);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", config.to_toml_string()?);
    }
    Ok(())
}
