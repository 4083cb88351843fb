use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, Url};
use runner_core::{RunDescriptor, RunInput};
use runner_logging::{runner_debug, runner_info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{ApiToken, ClientError, ClientSettings, FailureKind};

/// The three remote operations the runner consumes.
#[async_trait::async_trait]
pub trait ActorApi: Send + Sync {
    async fn start_run(&self, actor_id: &str, input: &RunInput)
        -> Result<RunDescriptor, ClientError>;

    async fn get_run(&self, run_id: &str) -> Result<RunDescriptor, ClientError>;

    /// One unpaginated call; the service's default page size applies.
    async fn list_items(&self, dataset_id: &str) -> Result<Vec<Value>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ApifyClient {
    http: reqwest::Client,
    base_url: Url,
    token: ApiToken,
    max_bytes: u64,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: Option<String>,
}

impl ApifyClient {
    pub fn new(settings: ClientSettings, token: ApiToken) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be a base url"),
            ));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token,
            max_bytes: settings.max_bytes,
        })
    }

    /// `{base}/v2/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::new(FailureKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .push("v2")
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ClientError> {
        let response = request
            .bearer_auth(self.token.expose())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        runner_debug!("{} -> {}", response.url().path(), status);
        let body = self.read_body(response).await?;
        if !status.is_success() {
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                service_message(&body).unwrap_or_else(|| status.to_string()),
            ));
        }
        Ok(body)
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>, ClientError> {
        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ActorApi for ApifyClient {
    async fn start_run(
        &self,
        actor_id: &str,
        input: &RunInput,
    ) -> Result<RunDescriptor, ClientError> {
        // `user/name` actor ids are addressed as `user~name`.
        let actor = actor_id.replace('/', "~");
        let url = self.endpoint(&["acts", &actor, "runs"])?;
        let payload = serde_json::to_vec(input)
            .map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))?;

        runner_info!(
            "Starting actor {} for {} profile(s)",
            actor_id,
            input.profiles.len()
        );
        let body = self
            .send(
                self.http
                    .post(url)
                    .header(CONTENT_TYPE, "application/json")
                    .body(payload),
            )
            .await?;
        decode::<Envelope<RunDescriptor>>(&body).map(|env| env.data)
    }

    async fn get_run(&self, run_id: &str) -> Result<RunDescriptor, ClientError> {
        let url = self.endpoint(&["actor-runs", run_id])?;
        let body = self.send(self.http.get(url)).await?;
        decode::<Envelope<RunDescriptor>>(&body).map(|env| env.data)
    }

    async fn list_items(&self, dataset_id: &str) -> Result<Vec<Value>, ClientError> {
        let mut url = self.endpoint(&["datasets", dataset_id, "items"])?;
        url.query_pairs_mut().append_pair("format", "json");
        let body = self.send(self.http.get(url)).await?;
        decode::<Vec<Value>>(&body)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))
}

/// `error.type: error.message` from the service's error envelope, if present.
fn service_message(body: &[u8]) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    match (envelope.error.kind, envelope.error.message) {
        (Some(kind), Some(message)) => Some(format!("{kind}: {message}")),
        (None, Some(message)) => Some(message),
        (Some(kind), None) => Some(kind),
        (None, None) => None,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
