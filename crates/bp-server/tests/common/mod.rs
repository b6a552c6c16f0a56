#![allow(dead_code)]

use std::sync::Arc;

use bp_config::ServerConfig;
use bp_db::{SchoolDb, SchoolService, SchoolSettings};
use bp_llm::{Completer, FakeCompleter};
use bp_server::{AppState, build_router};
use serde_json::Value;

pub struct TestApp {
    pub base: String,
    pub client: reqwest::Client,
}

/// Serve the full router over an in-memory database on an ephemeral port.
pub async fn spawn_app(completer: Arc<dyn Completer>) -> TestApp {
    let db = SchoolDb::open_local(":memory:").await.expect("open db");
    let service = SchoolService::from_db(
        db,
        SchoolSettings {
            bcrypt_cost: bp_auth::MIN_COST,
            ..SchoolSettings::default()
        },
    );
    let app = build_router(AppState::new(service, completer, &ServerConfig::default()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    TestApp {
        base: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

pub async fn spawn_default() -> TestApp {
    spawn_app(Arc::new(FakeCompleter::replying("fake reply"))).await
}

impl TestApp {
    async fn read(resp: reqwest::Response) -> (u16, Value) {
        let status = resp.status().as_u16();
        let body = resp.json::<Value>().await.expect("json body");
        (status, body)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(format!("{}{path}", self.base))
            .send()
            .await
            .expect("send");
        Self::read(resp).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = self
            .client
            .post(format!("{}{path}", self.base))
            .json(body)
            .send()
            .await
            .expect("send");
        Self::read(resp).await
    }

    /// POST with no body (query-string endpoints).
    pub async fn post_empty(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .post(format!("{}{path}", self.base))
            .send()
            .await
            .expect("send");
        Self::read(resp).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = self
            .client
            .put(format!("{}{path}", self.base))
            .json(body)
            .send()
            .await
            .expect("send");
        Self::read(resp).await
    }

    pub async fn delete(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .delete(format!("{}{path}", self.base))
            .send()
            .await
            .expect("send");
        Self::read(resp).await
    }
}
