//! REST client for an Appwrite-compatible backend.
//!
//! Two credential flavours are kept in separate types: [`SessionClient`]
//! carries an end-user JWT and can only read the caller's own account, while
//! [`ServerClient`] carries the elevated API key and is the only type that
//! can change or delete accounts.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::error::{PlatformError, absent_as_false};
use super::traits::{AccountAdmin, FileStore, Identity, IdentityVerifier, ProfileStore};
use crate::config::PlatformCredentials;
use crate::profile::ProfileDocument;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const JWT_HEADER: &str = "X-Appwrite-JWT";

/// Attribute on profile documents that references the owning account.
pub const PROFILE_OWNER_ATTRIBUTE: &str = "userId";

/// Base URL, project and HTTP client shared by both credential flavours.
#[derive(Debug, Clone)]
struct Transport {
    base: Url,
    project_id: String,
    http: Client,
}

impl Transport {
    fn new(endpoint: &str, project_id: &str, timeout: Duration) -> Result<Self, PlatformError> {
        let base = Url::parse(endpoint)
            .map_err(|e| PlatformError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(PlatformError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("offboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base,
            project_id: project_id.to_string(),
            http,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, PlatformError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| PlatformError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success response to a [`PlatformError`].
async fn check(response: Response) -> Result<Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.is_empty() => format!("HTTP {status}"),
        Err(_) => body,
    };

    Err(match status {
        StatusCode::NOT_FOUND => PlatformError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlatformError::Unauthorized(message),
        _ => PlatformError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, PlatformError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| PlatformError::Decode(e.to_string()))
}

/// Client acting with an end-user session.
#[derive(Debug, Clone)]
pub struct SessionClient {
    transport: Transport,
}

impl SessionClient {
    pub fn new(endpoint: &str, project_id: &str, timeout: Duration) -> Result<Self, PlatformError> {
        Ok(Self {
            transport: Transport::new(endpoint, project_id, timeout)?,
        })
    }

    pub fn from_credentials(creds: &PlatformCredentials) -> Result<Self, PlatformError> {
        Self::new(
            &creds.endpoint,
            &creds.project_id,
            Duration::from_secs(creds.timeout_secs),
        )
    }
}

#[async_trait]
impl IdentityVerifier for SessionClient {
    async fn verify_session(&self, token: &str) -> Result<Identity, PlatformError> {
        let url = self.transport.url(&["account"])?;
        let response = self
            .transport
            .request(Method::GET, url)
            .header(JWT_HEADER, token)
            .send()
            .await?;
        decode(check(response).await?).await
    }
}

/// Client acting with the elevated server key.
#[derive(Debug, Clone)]
pub struct ServerClient {
    transport: Transport,
    api_key: String,
}

impl ServerClient {
    pub fn new(creds: &PlatformCredentials) -> Result<Self, PlatformError> {
        Ok(Self {
            transport: Transport::new(
                &creds.endpoint,
                &creds.project_id,
                Duration::from_secs(creds.timeout_secs),
            )?,
            api_key: creds.api_key.clone(),
        })
    }

    /// Handle on a document collection.
    pub fn collection(&self, database_id: &str, collection_id: &str) -> DocumentCollection {
        DocumentCollection {
            client: self.clone(),
            database_id: database_id.to_string(),
            collection_id: collection_id.to_string(),
        }
    }

    /// Handle on a storage bucket.
    pub fn bucket(&self, bucket_id: &str) -> StorageBucket {
        StorageBucket {
            client: self.clone(),
            bucket_id: bucket_id.to_string(),
        }
    }

    async fn send(&self, method: Method, segments: &[&str]) -> Result<Response, PlatformError> {
        self.send_with(method, segments, |req| req).await
    }

    async fn send_with(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, PlatformError> {
        let url = self.transport.url(segments)?;
        debug!(%method, %url, "Platform request");
        let request = self
            .transport
            .request(method, url)
            .header(KEY_HEADER, &self.api_key);
        let response = build(request).send().await?;
        check(response).await
    }
}

#[async_trait]
impl AccountAdmin for ServerClient {
    async fn block(&self, account_id: &str) -> Result<(), PlatformError> {
        self.send_with(Method::PATCH, &["users", account_id, "status"], |req| {
            req.json(&json!({ "status": false }))
        })
        .await?;
        Ok(())
    }

    async fn status(&self, account_id: &str) -> Result<Option<bool>, PlatformError> {
        match self.send(Method::GET, &["users", account_id]).await {
            Ok(response) => {
                let user: UserStatus = decode(response).await?;
                Ok(Some(user.status))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, account_id: &str) -> Result<bool, PlatformError> {
        absent_as_false(
            self.send(Method::DELETE, &["users", account_id])
                .await
                .map(drop),
        )
    }
}

#[derive(Deserialize)]
struct UserStatus {
    status: bool,
}

#[derive(Deserialize)]
struct DocumentList {
    documents: Vec<ProfileDocument>,
}

/// A collection of profile documents.
#[derive(Debug, Clone)]
pub struct DocumentCollection {
    client: ServerClient,
    database_id: String,
    collection_id: String,
}

#[async_trait]
impl ProfileStore for DocumentCollection {
    async fn find_by_owner(&self, account_id: &str) -> Result<Vec<ProfileDocument>, PlatformError> {
        let query = json!({
            "method": "equal",
            "attribute": PROFILE_OWNER_ATTRIBUTE,
            "values": [account_id],
        })
        .to_string();

        let response = self
            .client
            .send_with(
                Method::GET,
                &[
                    "databases",
                    &self.database_id,
                    "collections",
                    &self.collection_id,
                    "documents",
                ],
                |req| req.query(&[("queries[]", query.as_str())]),
            )
            .await?;

        let list: DocumentList = decode(response).await?;
        Ok(list.documents)
    }

    async fn delete(&self, profile_id: &str) -> Result<bool, PlatformError> {
        let result = self
            .client
            .send(
                Method::DELETE,
                &[
                    "databases",
                    &self.database_id,
                    "collections",
                    &self.collection_id,
                    "documents",
                    profile_id,
                ],
            )
            .await;
        absent_as_false(result.map(drop))
    }
}

/// A storage bucket holding profile photos.
#[derive(Debug, Clone)]
pub struct StorageBucket {
    client: ServerClient,
    bucket_id: String,
}

#[async_trait]
impl FileStore for StorageBucket {
    async fn delete(&self, file_id: &str) -> Result<bool, PlatformError> {
        let result = self
            .client
            .send(
                Method::DELETE,
                &["storage", "buckets", &self.bucket_id, "files", file_id],
            )
            .await;
        absent_as_false(result.map(drop))
    }
}
