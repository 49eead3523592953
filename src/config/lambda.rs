use crate::app::presets::{find_variant, DEFAULT_VARIANT};
use crate::core::ConfigProvider;
use crate::domain::model::SketchVariant;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::env;

/// Lambda 部署時從環境變數讀取配置
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaConfig {
    pub variant: String,
    pub title: Option<String>,
    pub library_url: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            variant: non_empty("SKETCH_VARIANT").unwrap_or_else(|| DEFAULT_VARIANT.to_string()),
            title: non_empty("SKETCH_TITLE"),
            library_url: non_empty("SKETCH_LIBRARY_URL"),
        }
    }
}

impl ConfigProvider for LambdaConfig {
    fn variant(&self) -> Result<SketchVariant> {
        let mut variant = find_variant(&self.variant)?;
        if let Some(title) = &self.title {
            variant.title = title.clone();
        }
        if let Some(url) = &self.library_url {
            variant.library_url = url.clone();
        }
        Ok(variant)
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.variant()?.validate()?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SketchKind;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = LambdaConfig::from_lookup(lookup(&[]));
        assert_eq!(config.variant, "waveform");
        assert!(config.title.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = LambdaConfig::from_lookup(lookup(&[
            ("SKETCH_VARIANT", "starfield"),
            ("SKETCH_TITLE", "Deep Field"),
            ("SKETCH_LIBRARY_URL", ""),
        ]));

        let variant = config.variant().unwrap();
        assert_eq!(variant.kind, SketchKind::Starfield);
        assert_eq!(variant.title, "Deep Field");
        // 空字串視為未設定
        assert!(config.library_url.is_none());
    }

    #[test]
    fn test_bad_library_url_fails_validation() {
        let config = LambdaConfig::from_lookup(lookup(&[("SKETCH_LIBRARY_URL", "p5.min.js")]));
        assert!(config.validate().is_err());
    }
}
