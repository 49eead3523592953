use crate::domain::model::SketchVariant;
use crate::utils::error::Result;

/// Anything that can produce the variant a responder should serve.
pub trait ConfigProvider: Send + Sync {
    fn variant(&self) -> Result<SketchVariant>;
}

/// Host-independent view of an inbound request. Only used for logging.
#[derive(Debug, Clone, Copy)]
pub struct RequestInfo<'a> {
    pub method: &'a str,
    pub path: &'a str,
}

impl<'a> RequestInfo<'a> {
    pub fn new(method: &'a str, path: &'a str) -> Self {
        Self { method, path }
    }
}
