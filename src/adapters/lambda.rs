//! Translation between Lambda HTTP events and the responder.
//!
//! Both function-URL / API Gateway v2 events and REST (v1) events are
//! accepted. Method and path are read only so they can be logged.

use crate::core::responder::Responder;
use crate::domain::ports::RequestInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Arc<str>,
    pub is_base64_encoded: bool,
}

fn event_method(event: &Value) -> &str {
    event
        .pointer("/requestContext/http/method")
        .or_else(|| event.get("httpMethod"))
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN")
}

fn event_path(event: &Value) -> &str {
    event
        .get("rawPath")
        .or_else(|| event.get("path"))
        .and_then(Value::as_str)
        .unwrap_or("/")
}

/// Answer any event, well-formed or not, with the sketch page.
pub fn handle_event(responder: &Responder, event: &Value) -> HttpResponse {
    let sketch = responder.respond(RequestInfo::new(event_method(event), event_path(event)));

    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), sketch.content_type.to_string());

    HttpResponse {
        status_code: sketch.status,
        headers,
        body: sketch.body,
        is_base64_encoded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::presets::find_variant;
    use serde_json::json;

    fn responder() -> Responder {
        Responder::new(&find_variant("starfield").unwrap()).unwrap()
    }

    #[test]
    fn test_function_url_event() {
        let event = json!({
            "version": "2.0",
            "rawPath": "/gallery",
            "requestContext": { "http": { "method": "GET", "path": "/gallery" } }
        });
        assert_eq!(event_method(&event), "GET");
        assert_eq!(event_path(&event), "/gallery");

        let response = handle_event(&responder(), &event);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["content-type"], "text/html");
        assert!(response.body.starts_with("<!DOCTYPE html>"));
        assert!(!response.is_base64_encoded);
    }

    #[test]
    fn test_rest_and_garbage_events_get_same_page() {
        let responder = responder();
        let rest = json!({ "httpMethod": "POST", "path": "/anything", "body": "x=1" });
        let garbage = json!([1, 2, 3]);

        assert_eq!(event_method(&garbage), "UNKNOWN");
        assert_eq!(event_path(&garbage), "/");
        assert_eq!(
            handle_event(&responder, &rest),
            handle_event(&responder, &garbage)
        );
    }

    #[test]
    fn test_events_share_rendered_body() {
        let responder = responder();
        let first = handle_event(&responder, &json!({ "rawPath": "/a" }));
        let second = handle_event(&responder, &json!({ "httpMethod": "PUT" }));

        assert!(Arc::ptr_eq(&first.body, &second.body));
        assert_eq!(&*first.body, responder.body());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = handle_event(&responder(), &json!({}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["isBase64Encoded"], false);
        assert_eq!(value["headers"]["content-type"], "text/html");

        let back: HttpResponse = serde_json::from_value(value).unwrap();
        assert_eq!(back, response);
    }
}
