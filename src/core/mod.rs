pub mod page;
pub mod responder;
pub mod simulation;

pub use crate::domain::model::{SketchKind, SketchParams, SketchResponse, SketchVariant};
pub use crate::domain::ports::{ConfigProvider, RequestInfo};
pub use crate::utils::error::Result;
