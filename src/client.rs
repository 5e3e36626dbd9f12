use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::models::Envelope;

pub const DEFAULT_HOST_URL: &str = "http://localhost:19090";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("status: {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Caller side of the log store. Any response other than 200 is an error.
#[derive(Clone, Debug)]
pub struct LogClient {
    http_client: Client,
    host_url: String,
}

impl LogClient {
    /// `host` overrides [`DEFAULT_HOST_URL`] when given and non-empty.
    pub fn new(host: Option<&str>) -> Result<Self, ClientError> {
        Self::with_timeout(host, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(host: Option<&str>, timeout: Duration) -> Result<Self, ClientError> {
        let host_url = match host {
            Some(host) if !host.is_empty() => host.trim_end_matches('/').to_string(),
            _ => DEFAULT_HOST_URL.to_string(),
        };
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(LogClient {
            http_client,
            host_url,
        })
    }

    pub fn host_url(&self) -> &str {
        &self.host_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/{}", self.host_url, path))
    }

    async fn do_request(&self, req: RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let res = req.send().await?;
        let status = res.status();
        let body = res.bytes().await?;
        debug!(status = status.as_u16(), len = body.len(), "log store replied");

        if status != StatusCode::OK {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }

    async fn do_json(&self, req: RequestBuilder) -> Result<Envelope, ClientError> {
        let body = self.do_request(req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get_logs(&self) -> Result<Envelope, ClientError> {
        self.do_json(self.request(Method::GET, "")).await
    }

    pub async fn create_logs(&self, logs: &Envelope) -> Result<Envelope, ClientError> {
        self.do_json(self.request(Method::POST, "").json(logs)).await
    }

    /// An update against an empty log answers 200 with no body, which comes
    /// back as an empty envelope.
    pub async fn update_logs(
        &self,
        order_id: &str,
        logs: &Envelope,
    ) -> Result<Envelope, ClientError> {
        let body = self
            .do_request(self.request(Method::PUT, order_id).json(logs))
            .await?;
        if body.is_empty() {
            return Ok(Envelope::default());
        }
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn delete_logs(&self) -> Result<(), ClientError> {
        self.do_request(self.request(Method::DELETE, "")).await?;
        Ok(())
    }
}
