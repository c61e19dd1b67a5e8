use campus_registry::core::menu::print_banner;
use campus_registry::utils::error::ErrorSeverity;
use campus_registry::utils::{logger, validation::Validate};
use campus_registry::{CliConfig, LineTerminal, RegistryConfig, Session};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting campus-registry");
    tracing::debug!("CLI config: {:?}", config);

    // 載入種子資料，沒有指定檔案時使用內建預設
    let registry_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match RegistryConfig::from_file(path) {
                Ok(registry_config) => registry_config,
                Err(e) => {
                    tracing::error!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        None => RegistryConfig::default(),
    };

    if let Err(e) = registry_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut terminal = LineTerminal::stdio();
    if !config.no_banner {
        print_banner(&mut terminal).await?;
    }

    let mut session = Session::from_config(&registry_config);
    if let Err(e) = session.run(&mut terminal).await {
        tracing::error!(
            "❌ Session ended with an error: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
