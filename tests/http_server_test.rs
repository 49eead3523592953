use sketch_edge::adapters::http::serve_on;
use sketch_edge::app::presets::find_variant;
use sketch_edge::Responder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

async fn start_server(variant: &str) -> (String, oneshot::Sender<()>, tokio::task::JoinHandle<()>) {
    let responder = Arc::new(Responder::new(&find_variant(variant).unwrap()).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        serve_on(listener, responder, async move {
            let _ = rx.await;
        })
        .await
        .unwrap();
    });

    (format!("http://{}", addr), tx, handle)
}

#[tokio::test]
async fn test_live_server_answers_everything_the_same() {
    let (base, shutdown, handle) = start_server("particles").await;
    let client = reqwest::Client::new();

    let get = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(get.status(), 200);
    assert_eq!(get.headers()["content-type"], "text/html");
    let get_body = get.text().await.unwrap();
    assert!(get_body.starts_with("<!DOCTYPE html>"));
    assert!(get_body.contains("<title>Particles</title>"));

    let post = client
        .post(format!("{}/anything", base))
        .header("x-custom", "ignored")
        .body("payload")
        .send()
        .await
        .unwrap();
    assert_eq!(post.status(), 200);
    assert_eq!(post.headers()["content-type"], "text/html");
    assert_eq!(post.text().await.unwrap(), get_body);

    // 重複請求回傳相同內容
    for _ in 0..3 {
        let again = client
            .get(format!("{}/deep/path?q=1", base))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(again, get_body);
    }

    shutdown.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_bind_failure_is_server_error() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();
    let responder = Arc::new(Responder::new(&find_variant("waveform").unwrap()).unwrap());

    let err = sketch_edge::adapters::http::serve(responder, "127.0.0.1", port)
        .await
        .unwrap_err();
    assert!(matches!(err, sketch_edge::SketchError::ServerError { .. }));
    assert_eq!(err.exit_code(), 2);
}
