//! HTML page assembly.
//!
//! A page is the fixed document shell (head, style, library script) around
//! one inline sketch script. Sketch scripts live in `templates/` and carry
//! `{{name}}` placeholders that are filled from the variant's parameters.

use crate::domain::model::{SketchKind, SketchVariant};
use crate::utils::error::{Result, SketchError};
use regex::Regex;

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([a-z0-9_]+)\s*\}\}";

fn template_source(kind: SketchKind) -> &'static str {
    match kind {
        SketchKind::Waveform => include_str!("templates/waveform.js"),
        SketchKind::Kaleidoscope => include_str!("templates/kaleidoscope.js"),
        SketchKind::Particles => include_str!("templates/particles.js"),
        SketchKind::Starfield => include_str!("templates/starfield.js"),
        SketchKind::Feedback => include_str!("templates/feedback.js"),
    }
}

/// Render the complete HTML document for a variant.
///
/// The output is a pure function of `variant`: calling this twice with the
/// same value yields byte-identical strings.
pub fn render_page(variant: &SketchVariant) -> Result<String> {
    let script = render_script(variant)?;

    let mut html = String::with_capacity(script.len() + 512);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", escape_html(&variant.title)));
    html.push_str(&format!(
        "  <script src=\"{}\"></script>\n",
        escape_html(&variant.library_url)
    ));
    html.push_str("  <style>\n");
    html.push_str("    body {\n");
    html.push_str("      margin: 0;\n");
    html.push_str(&format!("      background-color: {};\n", variant.background));
    html.push_str("    }\n");
    html.push_str("  </style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("<script>\n");
    html.push_str(&script);
    if !script.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</script>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    Ok(html)
}

/// Fill the kind's script template from the variant.
pub fn render_script(variant: &SketchVariant) -> Result<String> {
    let template = template_source(variant.kind);
    let re = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| SketchError::TemplateError {
        template: variant.kind.to_string(),
        message: e.to_string(),
    })?;

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in re.captures_iter(template) {
        let whole = caps.get(0).ok_or_else(|| SketchError::TemplateError {
            template: variant.kind.to_string(),
            message: "empty placeholder match".to_string(),
        })?;
        let name = &caps[1];
        let value = placeholder_value(variant, name).ok_or_else(|| {
            SketchError::TemplateError {
                template: variant.kind.to_string(),
                message: format!("unknown placeholder '{}'", name),
            }
        })?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&template[last..]);

    Ok(out)
}

fn placeholder_value(variant: &SketchVariant, name: &str) -> Option<String> {
    let p = &variant.params;
    let value = match name {
        "noise_speed" => p.noise_speed.to_string(),
        "noise_height" => p.noise_height.to_string(),
        "wave_count" => p.wave_count.to_string(),
        "easing" => p.easing.to_string(),
        "particle_cap" => p.particle_cap.to_string(),
        "spawn_per_frame" => p.spawn_per_frame.to_string(),
        "particle_decay" => p.particle_decay.to_string(),
        "star_count" => p.star_count.to_string(),
        "star_speed" => p.star_speed.to_string(),
        "ripple_cap" => p.ripple_cap.to_string(),
        "segments" => p.segments.to_string(),
        "trail_alpha" => p.trail_alpha.to_string(),
        // 圖片網址放在單引號字串中
        other => {
            let index: usize = other.strip_prefix("asset_")?.parse().ok()?;
            escape_js_string(variant.assets.get(index)?)
        }
    };
    Some(value)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\x3C"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::presets::{builtin_variants, find_variant};

    #[test]
    fn test_every_builtin_renders() {
        for variant in builtin_variants() {
            let html = render_page(&variant).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{}", variant.name);
            assert!(!html.contains("{{"), "unfilled placeholder in {}", variant.name);
        }
    }

    #[test]
    fn test_waveform_carries_params() {
        let mut variant = find_variant("waveform").unwrap();
        variant.params.noise_height = 42.5;
        variant.params.wave_count = 5;

        let script = render_script(&variant).unwrap();

        assert!(script.contains("let noiseHeight = 42.5;"));
        assert!(script.contains("let waveCount = 5;"));
        assert!(script.contains(&format!("loadImage('{}')", variant.assets[0])));
    }

    #[test]
    fn test_missing_asset_is_template_error() {
        let mut variant = find_variant("kaleidoscope").unwrap();
        variant.assets.truncate(1);

        let err = render_script(&variant).unwrap_err();
        assert!(matches!(err, SketchError::TemplateError { .. }));
    }

    #[test]
    fn test_title_and_urls_are_escaped() {
        let mut variant = find_variant("waveform").unwrap();
        variant.title = "<b>Waves & Noise</b>".to_string();
        variant.assets[0] = "https://example.com/it's</script>.png".to_string();

        let html = render_page(&variant).unwrap();

        assert!(html.contains("<title>&lt;b&gt;Waves &amp; Noise&lt;/b&gt;</title>"));
        assert!(html.contains("it\\'s\\x3C/script>.png"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_render_is_deterministic() {
        let variant = find_variant("particles").unwrap();
        assert_eq!(render_page(&variant).unwrap(), render_page(&variant).unwrap());
    }
}
