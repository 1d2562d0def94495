//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{TimeZone, Utc};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use plant_monitor::config::Config;
use plant_monitor::error::FetchError;
use plant_monitor::plant_api::{EndpointResolver, Reading, ReadingSource, ResourceAddress};
use plant_monitor::view::{ViewHandle, ViewRuntime};

pub const BASE_URL: &str = "http://plants.test";

pub fn test_config(base_url: &str, timeout_secs: u64) -> Config {
    Config {
        plant_api_base_url: base_url.to_string(),
        request_timeout_seconds: timeout_secs,
        use_dummy_data: false,
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
    }
}

pub fn reading(value: f64, day: u32) -> Reading {
    Reading::new(value, Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap())
}

/// The two records the startup scenario returns.
pub fn startup_readings() -> Vec<Reading> {
    vec![reading(22.0, 1), reading(23.0, 2)]
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A fetch the scripted source is waiting on.
pub struct PendingFetch {
    pub address: ResourceAddress,
    respond: oneshot::Sender<Result<Vec<Reading>, FetchError>>,
}

impl PendingFetch {
    pub fn succeed(self, readings: Vec<Reading>) {
        self.respond.send(Ok(readings)).unwrap();
    }

    pub fn fail(self, error: FetchError) {
        self.respond.send(Err(error)).unwrap();
    }
}

/// Reading source whose fetches complete only when the test answers them.
pub struct ScriptedSource {
    requests: mpsc::UnboundedSender<PendingFetch>,
}

impl ReadingSource for ScriptedSource {
    async fn fetch(&self, address: &ResourceAddress) -> Result<Vec<Reading>, FetchError> {
        let (respond, response) = oneshot::channel();
        self.requests
            .send(PendingFetch {
                address: address.clone(),
                respond,
            })
            .map_err(|_| FetchError::unreachable("script closed"))?;
        response
            .await
            .unwrap_or_else(|_| Err(FetchError::unreachable("script dropped request")))
    }
}

pub struct ScriptedView {
    pub view: ViewHandle,
    pub fetches: mpsc::UnboundedReceiver<PendingFetch>,
    pub task: JoinHandle<()>,
}

impl ScriptedView {
    pub async fn next_fetch(&mut self) -> PendingFetch {
        self.fetches.recv().await.expect("runtime stopped")
    }
}

/// Spawn a view runtime driven by a [`ScriptedSource`].
pub fn scripted_view() -> ScriptedView {
    let (requests, fetches) = mpsc::unbounded_channel();
    let source = Arc::new(ScriptedSource { requests });
    let (runtime, view) = ViewRuntime::new(source, EndpointResolver::new(BASE_URL));
    let task = tokio::spawn(runtime.run());

    ScriptedView {
        view,
        fetches,
        task,
    }
}
