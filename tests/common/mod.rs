#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use breach_check_rs::checker::Checker;
use breach_check_rs::error::TransportError;
use breach_check_rs::notifier::{Message, Notifier, Transport};
use breach_check_rs::server::{router, AppState};
use breach_check_rs::types::ScanSnapshot;
use breach_check_rs::wordlist::Wordlist;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tower::ServiceExt;

pub const OPERATOR: &str = "ops@example.com";

/// Records every message; optionally waits for a permit before each send.
#[derive(Default)]
pub struct TestTransport {
    pub sent: Mutex<Vec<Message>>,
    pub gate: Option<Semaphore>,
    pub fail: bool,
}

impl TestTransport {
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn open_gate(&self, n: usize) {
        if let Some(g) = &self.gate {
            g.add_permits(n);
        }
    }

    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for TestTransport {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        if let Some(g) = &self.gate {
            g.acquire().await.expect("gate closed").forget();
        }
        if self.fail {
            return Err(TransportError::Delivery {
                recipient: message.to.clone(),
                reason: "smtp down".into(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn checker(words: &[&str], transport: Arc<TestTransport>) -> Checker {
    let wordlist: Wordlist = words.iter().copied().collect();
    let notifier = Notifier::new(transport, "alerts@example.com", Some(OPERATOR.into()));
    Checker::new(Arc::new(wordlist), notifier)
}

pub fn app(words: &[&str], transport: Arc<TestTransport>) -> Router {
    router(AppState::new(checker(words, transport)), None)
}

pub async fn call<T: DeserializeOwned>(app: &Router, req: Request<Body>) -> (u16, T) {
    let resp = app.clone().oneshot(req).await.expect("router call");
    let code = resp.status().as_u16();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body");
    (code, serde_json::from_slice(&bytes).expect("json body"))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Poll `/progress` until the running flag clears.
pub async fn wait_done(app: &Router) -> ScanSnapshot {
    for _ in 0..500 {
        let (_, snap): (u16, ScanSnapshot) = call(app, get("/progress")).await;
        if !snap.running {
            return snap;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("check did not finish");
}
