use crate::core::page::render_page;
use crate::domain::model::{SketchResponse, SketchVariant, HTML_CONTENT_TYPE};
use crate::domain::ports::RequestInfo;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Answers every request with the same pre-rendered page.
///
/// All fallible work (validation, template filling) happens in [`Responder::new`],
/// so [`Responder::respond`] has no failure path.
#[derive(Debug, Clone)]
pub struct Responder {
    variant_name: String,
    body: Arc<str>,
}

impl Responder {
    pub fn new(variant: &SketchVariant) -> Result<Self> {
        variant.validate()?;
        let html = render_page(variant)?;

        tracing::info!(
            "🎨 Rendered '{}' ({}) page: {} bytes",
            variant.name,
            variant.kind,
            html.len()
        );

        Ok(Self {
            variant_name: variant.name.clone(),
            body: Arc::from(html),
        })
    }

    /// Method, path and headers do not influence the response.
    pub fn respond(&self, request: RequestInfo<'_>) -> SketchResponse {
        tracing::debug!(
            variant = %self.variant_name,
            method = request.method,
            path = request.path,
            "serving sketch"
        );

        SketchResponse {
            status: 200,
            content_type: HTML_CONTENT_TYPE,
            body: Arc::clone(&self.body),
        }
    }

    pub fn variant_name(&self) -> &str {
        &self.variant_name
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::presets::find_variant;
    use crate::utils::error::SketchError;

    fn responder() -> Responder {
        Responder::new(&find_variant("waveform").unwrap()).unwrap()
    }

    #[test]
    fn test_get_root() {
        let response = responder().respond(RequestInfo::new("GET", "/"));

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, "text/html");
        assert!(response.body.starts_with("<!DOCTYPE html>"));
        assert!(response.body.contains("<title>"));
    }

    #[test]
    fn test_request_shape_is_ignored() {
        let responder = responder();
        let get = responder.respond(RequestInfo::new("GET", "/"));
        let post = responder.respond(RequestInfo::new("POST", "/anything"));
        let odd = responder.respond(RequestInfo::new("DELETE", "/a/b?c=d"));

        assert_eq!(get, post);
        assert_eq!(get, odd);
    }

    #[test]
    fn test_repeated_calls_share_one_body() {
        let responder = responder();
        let first = responder.respond(RequestInfo::new("GET", "/"));
        let second = responder.respond(RequestInfo::new("GET", "/"));

        assert!(Arc::ptr_eq(&first.body, &second.body));
        assert_eq!(first.body.as_bytes(), second.body.as_bytes());
    }

    #[test]
    fn test_invalid_variant_fails_at_construction() {
        let mut variant = find_variant("waveform").unwrap();
        variant.library_url = "not a url".to_string();

        let err = Responder::new(&variant).unwrap_err();
        assert!(matches!(err, SketchError::InvalidConfigValueError { .. }));
    }
}
