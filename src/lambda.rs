#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use sketch_edge::adapters::lambda::{handle_event, HttpResponse};
#[cfg(feature = "lambda")]
use sketch_edge::core::ConfigProvider;
#[cfg(feature = "lambda")]
use sketch_edge::utils::logger;
#[cfg(feature = "lambda")]
use sketch_edge::{LambdaConfig, Responder};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    responder: Arc<Responder>,
    event: LambdaEvent<serde_json::Value>,
) -> Result<HttpResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "handling event");
    Ok(handle_event(&responder, &event.payload))
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時渲染一次，之後每個請求共用
    let lambda_config = LambdaConfig::from_env();
    let variant = lambda_config
        .variant()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    let responder = Arc::new(
        Responder::new(&variant)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?,
    );

    tracing::info!("Sketch Lambda ready with variant '{}'", responder.variant_name());

    run(service_fn(move |event| {
        let responder = Arc::clone(&responder);
        async move { function_handler(responder, event).await }
    }))
    .await
}
