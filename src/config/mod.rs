pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::SketchVariant;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "sketch-edge")]
#[command(about = "Serve generative-art sketches as a static HTML page")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Built-in variant to serve (overrides the config file)
    #[arg(long, global = true)]
    pub variant: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Answer every HTTP request with the sketch page
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Write the rendered page to a file or stdout
    Render {
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Step the headless animation model and print stats as JSON
    Simulate {
        #[arg(long, default_value = "600")]
        frames: u64,
        #[arg(long, default_value = "1")]
        seed: u64,
        #[arg(long, default_value = "1280")]
        width: f64,
        #[arg(long, default_value = "720")]
        height: f64,
    },
    /// List the built-in variants
    List,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 沒有指定 --config 時使用空配置
    pub fn file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)
            }
            None => Ok(TomlConfig::default()),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn variant(&self) -> Result<SketchVariant> {
        self.file_config()?.variant_with(self.variant.as_deref())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::model::SketchKind;

    #[test]
    fn test_parse_serve() {
        let cli = CliConfig::parse_from(["sketch-edge", "serve", "--port", "9001", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Serve {
                port: Some(9001),
                host: None
            }
        ));
    }

    #[test]
    fn test_variant_flag_without_file() {
        let cli = CliConfig::parse_from(["sketch-edge", "render", "--variant", "feedback"]);
        assert_eq!(cli.variant().unwrap().kind, SketchKind::Feedback);
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = CliConfig::parse_from(["sketch-edge", "simulate"]);
        match cli.command {
            Command::Simulate { frames, seed, .. } => {
                assert_eq!(frames, 600);
                assert_eq!(seed, 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
