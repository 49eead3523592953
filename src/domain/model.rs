use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const P5_LIBRARY_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/p5.js/1.6.0/p5.min.js";
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// 每個變體對應一個腳本模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SketchKind {
    Waveform,
    Kaleidoscope,
    Particles,
    Starfield,
    Feedback,
}

impl SketchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SketchKind::Waveform => "waveform",
            SketchKind::Kaleidoscope => "kaleidoscope",
            SketchKind::Particles => "particles",
            SketchKind::Starfield => "starfield",
            SketchKind::Feedback => "feedback",
        }
    }

    /// Number of image assets the sketch script references.
    pub fn required_assets(&self) -> usize {
        match self {
            SketchKind::Waveform | SketchKind::Feedback => 1,
            SketchKind::Kaleidoscope => 2,
            SketchKind::Particles | SketchKind::Starfield => 0,
        }
    }
}

impl fmt::Display for SketchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunable numbers substituted into the sketch script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchParams {
    pub noise_speed: f64,
    pub noise_height: f64,
    pub wave_count: u32,
    pub easing: f64,
    pub particle_cap: usize,
    pub spawn_per_frame: u32,
    pub particle_decay: f64,
    pub star_count: usize,
    pub star_speed: f64,
    pub ripple_cap: usize,
    pub segments: u32,
    pub trail_alpha: u8,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            noise_speed: 0.05,
            noise_height: 25.0,
            wave_count: 3,
            easing: 0.05,
            particle_cap: 300,
            spawn_per_frame: 4,
            particle_decay: 4.0,
            star_count: 0,
            star_speed: 4.0,
            ripple_cap: 12,
            segments: 8,
            trail_alpha: 15,
        }
    }
}

/// Partial overrides for [`SketchParams`], as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SketchParamsPatch {
    pub noise_speed: Option<f64>,
    pub noise_height: Option<f64>,
    pub wave_count: Option<u32>,
    pub easing: Option<f64>,
    pub particle_cap: Option<usize>,
    pub spawn_per_frame: Option<u32>,
    pub particle_decay: Option<f64>,
    pub star_count: Option<usize>,
    pub star_speed: Option<f64>,
    pub ripple_cap: Option<usize>,
    pub segments: Option<u32>,
    pub trail_alpha: Option<u8>,
}

impl SketchParams {
    pub fn apply(&mut self, patch: &SketchParamsPatch) {
        macro_rules! merge {
            ($target:expr, $patch:expr; $($field:ident),* $(,)?) => {
                $(if let Some(v) = $patch.$field {
                    $target.$field = v;
                })*
            };
        }
        merge!(
            self, patch;
            noise_speed,
            noise_height,
            wave_count,
            easing,
            particle_cap,
            spawn_per_frame,
            particle_decay,
            star_count,
            star_speed,
            ripple_cap,
            segments,
            trail_alpha,
        );
    }
}

/// 一個可部署的畫作變體
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchVariant {
    pub name: String,
    pub title: String,
    pub library_url: String,
    pub background: String,
    pub kind: SketchKind,
    pub assets: Vec<String>,
    pub params: SketchParams,
}

/// Everything a host adapter needs to emit a response.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Arc<str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch_only_touches_set_fields() {
        let mut params = SketchParams::default();
        let patch = SketchParamsPatch {
            noise_height: Some(40.0),
            particle_cap: Some(120),
            ..Default::default()
        };

        params.apply(&patch);

        assert_eq!(params.noise_height, 40.0);
        assert_eq!(params.particle_cap, 120);
        assert_eq!(params.noise_speed, SketchParams::default().noise_speed);
        assert_eq!(params.segments, SketchParams::default().segments);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&SketchKind::Kaleidoscope).unwrap();
        assert_eq!(json, "\"kaleidoscope\"");
        assert_eq!(SketchKind::Starfield.to_string(), "starfield");
    }
}
