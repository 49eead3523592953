use clap::Parser;
use sketch_edge::adapters::http;
use sketch_edge::app::presets::builtin_variants;
use sketch_edge::core::simulation::run_scripted;
use sketch_edge::core::ConfigProvider;
use sketch_edge::utils::{logger, validation::Validate};
use sketch_edge::{CliConfig, Command, Responder, Result, Viewport};
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting sketch-edge");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ sketch-edge failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<()> {
    match &config.command {
        Command::List => {
            for variant in builtin_variants() {
                println!(
                    "{:<14} {:<14} {} asset(s)  {}",
                    variant.name,
                    variant.kind,
                    variant.assets.len(),
                    variant.title
                );
            }
            Ok(())
        }
        Command::Render { output } => {
            let responder = Responder::new(&config.variant()?)?;
            match output {
                Some(path) => {
                    std::fs::write(path, responder.body())?;
                    tracing::info!("📁 Page written to: {}", path);
                }
                None => print!("{}", responder.body()),
            }
            Ok(())
        }
        Command::Simulate {
            frames,
            seed,
            width,
            height,
        } => {
            let variant = config.variant()?;
            variant.validate()?;
            let viewport = Viewport {
                width: *width,
                height: *height,
            };

            tracing::info!(
                "🔍 Simulating '{}' for {} frames (seed {})",
                variant.name,
                frames,
                seed
            );
            let state = run_scripted(&variant.params, viewport, *seed, *frames);
            println!("{}", serde_json::to_string_pretty(&state.stats())?);
            Ok(())
        }
        Command::Serve { host, port } => {
            let file = config.file_config()?;
            file.validate_server()?;

            let host = host.clone().unwrap_or_else(|| file.host().to_string());
            let port = port.unwrap_or_else(|| file.port());

            // Responder::new 會驗證套用完覆寫後的變體
            let variant = file.variant_with(config.variant.as_deref())?;
            let responder = Arc::new(Responder::new(&variant)?);
            http::serve(responder, &host, port).await
        }
    }
}
