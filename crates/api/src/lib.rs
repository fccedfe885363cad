pub mod comment;
mod decode;
pub mod error;
pub mod issue;
pub mod project;

use std::time::Duration;

use error::{ApiError, RemoteError, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

pub use issue::Issue;
pub use reqwest::Method;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Client for a single Jira instance.
///
/// All operations go through [`JiraClient::request`], which performs exactly
/// one authenticated round trip. The only timeout is the connect timeout
/// given at construction; reads and writes on an established connection are
/// not bounded.
#[derive(Clone, Debug)]
pub struct JiraClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
}

impl JiraClient {
    /// `base_url` must be absolute, e.g. `https://jira.example.com/rest/api/2/`.
    /// Request paths are appended to it verbatim.
    pub fn new(
        base_url: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;

        let client = Client::builder()
            .user_agent(format!("jiralink/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            client,
            base_url,
            username: username.into(),
            password: password.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch an issue, restricting the returned `fields` to `fields`.
    ///
    /// An empty `fields` slice still sends `?fields=` with an empty value.
    pub async fn get_issue<S: AsRef<str>>(&self, key: &str, fields: &[S]) -> Result<Issue> {
        let fields = fields
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        let body = self
            .request(Method::GET, &format!("issue/{key}/?fields={fields}"), Vec::new())
            .await?;

        Issue::from_slice(&body)
    }

    /// Display name of a project.
    pub async fn get_project_title(&self, key: &str) -> Result<String> {
        let body = self
            .request(Method::GET, &format!("project/{key}"), Vec::new())
            .await?;

        project::title_from_slice(&body)
    }

    /// Add a comment to an issue. The response body is ignored.
    pub async fn comment(&self, issue: &str, message: &str) -> Result<()> {
        let body = comment::encode(message)?;
        self.request(Method::POST, &format!("issue/{issue}/comment"), body)
            .await?;
        Ok(())
    }

    /// Send one authenticated request and classify the response.
    ///
    /// `404` and anything `>= 500` become [`ApiError::Remote`]; every other status is
    /// returned as raw body bytes for the caller to decode.
    pub async fn request(&self, method: Method, path: &str, body: Vec<u8>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url.as_str(), path);

        debug!(method = %method, url = %url, "Sending request");

        let response = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .basic_auth(&self.username, Some(&self.password))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let data = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = data.len(), "Received response");

        match status {
            StatusCode::NOT_FOUND => Err(RemoteError::not_found(status_line(status)).into()),
            status if status.as_u16() >= 500 => {
                let message = String::from_utf8_lossy(&data).into_owned();
                Err(RemoteError::server(status.as_u16(), status_line(status), message).into())
            }
            _ => Ok(data.to_vec()),
        }
    }
}

/// `404 Not Found`, or just the code when it has no canonical reason.
fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}
