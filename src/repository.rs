use std::fmt;
use std::future::Future;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::{
    character::Roster,
    error::{LedgerError, Result},
    settings::RepositoryConfig,
};

// The host rejects requests without a user agent.
const USER_AGENT: &str = concat!("tavern-ledger/", env!("CARGO_PKG_VERSION"));

/// The roster as read from the host, together with the version token that
/// any write based on it must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFile {
    pub roster: Roster,
    pub version: String,
}

/// Storage for the roster file, guarded by an optimistic-concurrency token.
pub trait RosterStore {
    fn fetch_file(&self) -> impl Future<Output = Result<RosterFile>> + Send;

    /// Replace the file if `version` is still current. Returns the new version token.
    fn write_file(
        &self,
        roster: &Roster,
        version: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

// Serialize the roster the way it is stored: 2-space indented JSON, base64 encoded.
pub fn encode_content(roster: &Roster) -> Result<String> {
    let json = serde_json::to_string_pretty(roster)?;
    Ok(STANDARD.encode(json))
}

// The host wraps its base64 payload every 60 columns, so whitespace is dropped before decoding.
pub fn decode_content(encoded: &str) -> Result<Roster> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

#[derive(Deserialize)]
struct ContentsEnvelope {
    content: String,
    sha: String,
}

#[derive(Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

#[derive(Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Deserialize)]
struct WrittenContent {
    sha: String,
}

#[derive(Deserialize)]
struct HostError {
    message: String,
}

// Contents API client for the single roster file.
#[derive(Clone)]
pub struct RepositoryClient {
    http: reqwest::Client,
    config: RepositoryConfig,
    token: String,
}

impl fmt::Debug for RepositoryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RepositoryClient {
    pub fn new(config: RepositoryConfig, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_http_client(http, config, token))
    }

    pub fn with_http_client(
        http: reqwest::Client,
        config: RepositoryConfig,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            config,
            token: token.into(),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.config.contents_url())
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::USER_AGENT, USER_AGENT)
    }

    pub async fn fetch(&self) -> Result<RosterFile> {
        let mut request = self.request(reqwest::Method::GET);
        if let Some(branch) = &self.config.branch {
            request = request.query(&[("ref", branch)]);
        }
        log::debug!("GET {}", self.config.contents_url());
        let response = error_for_status(request.send().await?).await?;
        let envelope: ContentsEnvelope = response.json().await?;
        let roster = decode_content(&envelope.content)?;
        log::info!(
            "Fetched {} characters at version {}",
            roster.len(),
            envelope.sha
        );
        Ok(RosterFile {
            roster,
            version: envelope.sha,
        })
    }

    pub async fn write(&self, roster: &Roster, version: &str) -> Result<String> {
        let body = WriteRequest {
            message: &self.config.commit_message,
            content: encode_content(roster)?,
            sha: version,
            branch: self.config.branch.as_deref(),
        };
        log::debug!("PUT {} based on {version}", self.config.contents_url());
        let response = self
            .request(reqwest::Method::PUT)
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::CONFLICT {
            log::warn!("Write rejected, version {version} is stale");
            return Err(LedgerError::StaleVersion(version.to_string()));
        }
        let written: WriteResponse = error_for_status(response).await?.json().await?;
        log::info!("Wrote {} characters, new version {}", roster.len(), written.content.sha);
        Ok(written.content.sha)
    }
}

impl RosterStore for RepositoryClient {
    fn fetch_file(&self) -> impl Future<Output = Result<RosterFile>> + Send {
        self.fetch()
    }

    fn write_file(
        &self,
        roster: &Roster,
        version: &str,
    ) -> impl Future<Output = Result<String>> + Send {
        self.write(roster, version)
    }
}

// Turn a non-success answer into an error carrying the host's own message when it sent one.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<HostError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    log::error!("Repository host answered {status}: {message}");
    Err(LedgerError::Http {
        status: status.as_u16(),
        message,
    })
}
