#![allow(dead_code)]

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tracing::Level;

use type_api::api::JSONAPI_MEDIA_TYPE;
use type_api::config::Config;
use type_api::server::serve;

pub static DEFAULT_CONFIG: Lazy<Config> = Lazy::new(|| Config {
    address: SocketAddr::from_str("127.0.0.1:0").unwrap(),
    export_prometheus: false,
    max_body_size: 1_000_000,
    log_level: Level::INFO,
});

pub struct ServerHandle {
    pub addr: SocketAddr,
    shutdown: Arc<Notify>,
}

impl ServerHandle {
    pub async fn for_config(config: Config) -> ServerHandle {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let notify = Arc::new(Notify::new());
        let shutdown = notify.clone();

        tokio::spawn(async move {
            serve(config, listener, async move { notify.notified().await }).await
        });
        ServerHandle { addr, shutdown }
    }

    pub async fn send_request<T: Into<reqwest::Body>>(&self, body: T) -> reqwest::Response {
        self.send_request_with_method(reqwest::Method::POST, body)
            .await
    }

    pub async fn send_request_with_method<T: Into<reqwest::Body>>(
        &self,
        method: reqwest::Method,
        body: T,
    ) -> reqwest::Response {
        let client = reqwest::Client::new();
        client
            .request(method, format!("http://{:?}/", self.addr))
            .body(body)
            .header(CONTENT_TYPE, JSONAPI_MEDIA_TYPE)
            .send()
            .await
            .expect("failed to send request")
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.shutdown.notify_one()
    }
}

pub fn event_payload(event: &str, data: Value) -> String {
    json!({
        "data": {
            "type": "event",
            "id": event,
            "attributes": { "data": data }
        }
    })
    .to_string()
}
