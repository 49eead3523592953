use crate::app::presets::{find_variant, DEFAULT_VARIANT};
use crate::core::ConfigProvider;
use crate::domain::model::{SketchParamsPatch, SketchVariant};
use crate::utils::error::{Result, SketchError};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8787;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub sketch: Option<SketchConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Overrides applied on top of a built-in variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SketchConfig {
    pub variant: Option<String>,
    pub title: Option<String>,
    pub library_url: Option<String>,
    pub background: Option<String>,
    pub assets: Option<Vec<String>>,
    pub params: Option<SketchParamsPatch>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SketchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${IMAGE_URL})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SketchError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn host(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.host.as_deref())
            .unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn variant_name(&self) -> &str {
        self.sketch
            .as_ref()
            .and_then(|s| s.variant.as_deref())
            .unwrap_or(DEFAULT_VARIANT)
    }

    /// Build the variant, optionally picking a different preset than the
    /// file names. File overrides still apply on top.
    pub fn variant_with(&self, name_override: Option<&str>) -> Result<SketchVariant> {
        let name = name_override.unwrap_or_else(|| self.variant_name());
        let mut variant = find_variant(name)?;

        if let Some(sketch) = &self.sketch {
            if let Some(title) = &sketch.title {
                variant.title = title.clone();
            }
            if let Some(url) = &sketch.library_url {
                variant.library_url = url.clone();
            }
            if let Some(background) = &sketch.background {
                variant.background = background.clone();
            }
            if let Some(assets) = &sketch.assets {
                variant.assets = assets.clone();
            }
            if let Some(patch) = &sketch.params {
                variant.params.apply(patch);
            }
        }

        Ok(variant)
    }
}

impl ConfigProvider for TomlConfig {
    fn variant(&self) -> Result<SketchVariant> {
        self.variant_with(None)
    }
}

impl TomlConfig {
    /// 只檢查 [server]，變體由呼叫端在套用覆寫後自行驗證
    pub fn validate_server(&self) -> Result<()> {
        validate_non_empty_string("server.host", self.host())?;
        validate_range("server.port", self.port(), 1, u16::MAX)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_server()?;
        self.variant()?.validate()
    }
}
