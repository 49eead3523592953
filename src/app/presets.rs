use crate::domain::model::{SketchKind, SketchParams, SketchVariant, P5_LIBRARY_URL};
use crate::utils::error::{Result, SketchError};

pub const DEFAULT_VARIANT: &str = "waveform";

const IMAGE_URL: &str =
    "https://imagedelivery.net/baAa4fwjctZfuBzZ3hvtGA/59a00d14-cc58-4c62-e9c1-fc4d1184f900/public";

fn base(name: &str, title: &str, kind: SketchKind, assets: Vec<String>) -> SketchVariant {
    SketchVariant {
        name: name.to_string(),
        title: title.to_string(),
        library_url: P5_LIBRARY_URL.to_string(),
        background: "black".to_string(),
        kind,
        assets,
        params: SketchParams::default(),
    }
}

/// 五個內建變體，參數各有不同
pub fn builtin_variants() -> Vec<SketchVariant> {
    let waveform = base(
        "waveform",
        "p5.js Cloudflare Worker Sketch",
        SketchKind::Waveform,
        vec![IMAGE_URL.to_string()],
    );

    let mut kaleidoscope = base(
        "kaleidoscope",
        "Kaleidoscope",
        SketchKind::Kaleidoscope,
        vec![IMAGE_URL.to_string(), IMAGE_URL.to_string()],
    );
    kaleidoscope.params.noise_speed = 0.01;
    kaleidoscope.params.noise_height = 40.0;
    kaleidoscope.params.segments = 12;
    kaleidoscope.params.trail_alpha = 40;

    let mut particles = base("particles", "Particles", SketchKind::Particles, vec![]);
    particles.params.noise_speed = 0.02;
    particles.params.noise_height = 30.0;
    particles.params.particle_cap = 300;
    particles.params.spawn_per_frame = 5;
    particles.params.particle_decay = 3.0;
    particles.params.ripple_cap = 12;
    particles.params.trail_alpha = 25;

    let mut starfield = base("starfield", "Starfield", SketchKind::Starfield, vec![]);
    starfield.params.noise_speed = 0.01;
    starfield.params.noise_height = 35.0;
    starfield.params.star_count = 400;
    starfield.params.star_speed = 6.0;
    starfield.params.wave_count = 4;
    starfield.params.trail_alpha = 60;

    let mut feedback = base(
        "feedback",
        "Feedback",
        SketchKind::Feedback,
        vec![IMAGE_URL.to_string()],
    );
    feedback.params.noise_speed = 0.008;
    feedback.params.noise_height = 50.0;
    feedback.params.easing = 0.08;
    feedback.params.trail_alpha = 8;

    vec![waveform, kaleidoscope, particles, starfield, feedback]
}

pub fn find_variant(name: &str) -> Result<SketchVariant> {
    builtin_variants()
        .into_iter()
        .find(|v| v.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| SketchError::UnknownVariant {
            name: name.to_string(),
        })
}
