use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;

use cleanup::CleanupServices;
use common::MissingSetting;
use common::platform::memory::MemoryPlatform;
use server::state::{AppState, BlockServices};

pub mod routes {
    pub const BLOCK: &str = "/api/v1/account/block";
    pub const USER_EVENTS: &str = "/api/v1/events/users";
    pub const HEALTH: &str = "/health";
    pub const OPENAPI: &str = "/api-docs/openapi.json";
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    /// Shared with the handlers; inspect it to see what they did.
    pub platform: MemoryPlatform,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let text = res.text().await.expect("Failed to read response body");
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            text,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Both handlers configured against `platform`.
    pub async fn spawn(platform: MemoryPlatform) -> Self {
        let state = AppState {
            block: Ok(BlockServices {
                identity: Arc::new(platform.clone()),
                accounts: Arc::new(platform.clone()),
            }),
            cleanup: Ok(CleanupServices {
                profiles: Arc::new(platform.clone()),
                files: Arc::new(platform.clone()),
                accounts: Arc::new(platform.clone()),
            }),
        };
        Self::spawn_with_state(state, platform).await
    }

    /// Both handlers missing `setting`.
    pub async fn spawn_unconfigured(setting: &'static str) -> Self {
        let state = AppState {
            block: Err(MissingSetting(setting)),
            cleanup: Err(MissingSetting(setting)),
        };
        Self::spawn_with_state(state, MemoryPlatform::new()).await
    }

    pub async fn spawn_with_state(state: AppState, platform: MemoryPlatform) -> Self {
        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            platform,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_with_header(&self, path: &str, authorization: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", authorization)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, body: &'static str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to send POST request");
        TestResponse::from_response(res).await
    }

    pub async fn options(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .request(reqwest::Method::OPTIONS, self.url(path))
            .send()
            .await
            .expect("Failed to send OPTIONS request");
        TestResponse::from_response(res).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");
        TestResponse::from_response(res).await
    }
}

/// Asserts the permissive CORS headers are present.
pub fn assert_cors(res: &TestResponse) {
    assert_eq!(res.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        res.header("access-control-allow-methods"),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        res.header("access-control-allow-headers"),
        Some("Content-Type, Authorization, X-Appwrite-Project, X-Appwrite-Key")
    );
}
