use crate::domain::model::{SketchParams, SketchVariant};
use crate::utils::error::{Result, SketchError};
use std::cmp::Ordering;
use url::Url;

pub const MAX_ASSETS: usize = 2;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SketchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SketchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SketchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SketchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 與任何值比較都沒有順序，必須拒絕
    let in_range = matches!(
        (value.partial_cmp(&min), value.partial_cmp(&max)),
        (Some(Ordering::Greater | Ordering::Equal), Some(Ordering::Less | Ordering::Equal))
    );
    if !in_range {
        return Err(SketchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SketchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a positive finite number".to_string(),
        });
    }
    Ok(())
}

/// Background colors end up inside a `<style>` block, so only plain CSS
/// color tokens are accepted.
pub fn validate_css_color(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let ok = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | ' ' | '%'));
    if !ok {
        return Err(SketchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Only names, hex and rgb()/hsl() colors are allowed".to_string(),
        });
    }
    Ok(())
}

impl Validate for SketchParams {
    fn validate(&self) -> Result<()> {
        validate_positive("params.noise_speed", self.noise_speed)?;
        validate_range("params.noise_height", self.noise_height, 0.0, 1000.0)?;
        validate_range("params.wave_count", self.wave_count, 1, 16)?;
        validate_range("params.easing", self.easing, 0.0, 1.0)?;
        validate_range("params.particle_cap", self.particle_cap, 1, 5000)?;
        validate_range("params.spawn_per_frame", self.spawn_per_frame, 0, 100)?;
        validate_positive("params.particle_decay", self.particle_decay)?;
        validate_range("params.particle_decay", self.particle_decay, 0.0, 255.0)?;
        validate_range("params.star_count", self.star_count, 0, 5000)?;
        validate_range("params.star_speed", self.star_speed, 0.0, 100.0)?;
        validate_range("params.ripple_cap", self.ripple_cap, 0, 200)?;
        validate_range("params.segments", self.segments, 2, 64)?;
        Ok(())
    }
}

impl Validate for SketchVariant {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("title", &self.title)?;
        validate_url("library_url", &self.library_url)?;
        validate_css_color("background", &self.background)?;

        let required = self.kind.required_assets();
        if self.assets.len() < required {
            return Err(SketchError::MissingConfigError {
                field: format!("assets[{}]", self.assets.len()),
            });
        }
        validate_range("assets.len", self.assets.len(), 0, MAX_ASSETS)?;
        for (i, asset) in self.assets.iter().enumerate() {
            validate_url(&format!("assets[{}]", i), asset)?;
        }

        self.params.validate()?;

        tracing::debug!("✅ Variant '{}' validation passed", self.name);
        Ok(())
    }
}
