//! GitHub gist client.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::config::schema::GistConfig;
use crate::error::{FunctionsError, FunctionsResult};
use crate::secrets::GistStore;

const SERVICE: &str = "GitHub";

#[derive(Debug, Deserialize)]
struct CreatedGist {
    html_url: String,
}

/// Gist store backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GistClient {
    http: Client,
    api_base: url::Url,
}

impl GistClient {
    /// Create a client authenticated with `token`.
    pub fn new(config: &GistConfig, token: &str) -> FunctionsResult<Self> {
        let api_base = api_base_url(&config.api_base)?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| FunctionsError::Config("GitHub token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("functions-client/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FunctionsError::upstream(SERVICE, e))?;

        Ok(Self { http, api_base })
    }

    fn endpoint(&self, path: &str) -> FunctionsResult<url::Url> {
        self.api_base
            .join(path)
            .map_err(|e| FunctionsError::Config(format!("invalid gist API path {}: {}", path, e)))
    }

    /// Fail early when a classic token lacks the `gist` scope.
    ///
    /// Fine-grained tokens report no scopes header and are let through.
    async fn check_token_scope(&self) -> FunctionsResult<()> {
        let response = self
            .http
            .get(self.endpoint("user")?)
            .send()
            .await
            .map_err(|e| FunctionsError::upstream(SERVICE, e))?;
        let response = ensure_success(response, "token check failed").await?;

        if let Some(scopes) = response.headers().get("x-oauth-scopes") {
            let scopes = scopes.to_str().unwrap_or_default();
            if !scopes.split(',').any(|s| s.trim() == "gist") {
                return Err(FunctionsError::UpstreamApi {
                    service: SERVICE,
                    status: Some(response.status().as_u16()),
                    message: "the provided token does not have permission to create gists".to_string(),
                    payload: scopes.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl GistStore for GistClient {
    async fn create_gist(&self, content: &str) -> FunctionsResult<String> {
        self.check_token_scope().await?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let file_name = format!("encrypted-functions-request-data-{}.json", millis);
        let body = json!({
            "public": false,
            "files": { file_name: { "content": content } },
        });

        let response = self
            .http
            .post(self.endpoint("gists")?)
            .json(&body)
            .send()
            .await
            .map_err(|e| FunctionsError::upstream(SERVICE, e))?;
        let response = ensure_success(response, "failed to create gist").await?;

        let created: CreatedGist = response
            .json()
            .await
            .map_err(|e| FunctionsError::upstream(SERVICE, e))?;
        let gist_url = format!("{}/raw", created.html_url.trim_end_matches('/'));

        tracing::info!(gist_url = %gist_url, "Encrypted secrets uploaded to gist");
        Ok(gist_url)
    }

    async fn delete_gist(&self, gist_url: &str) -> FunctionsResult<bool> {
        let gist_id = gist_id_from_url(gist_url)?;

        let response = self
            .http
            .delete(self.endpoint(&format!("gists/{}", gist_id))?)
            .send()
            .await
            .map_err(|e| FunctionsError::upstream(SERVICE, e))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(gist_id = %gist_id, "Gist deleted");
            return Ok(true);
        }

        let payload = response.text().await.unwrap_or_default();
        tracing::warn!(
            gist_id = %gist_id,
            status = status.as_u16(),
            payload = %payload,
            "Gist deletion refused"
        );
        Ok(false)
    }
}

/// Turn a non-success response into `UpstreamApi`, keeping the body.
async fn ensure_success(response: Response, message: &str) -> FunctionsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let payload = response.text().await.unwrap_or_default();
    Err(FunctionsError::UpstreamApi {
        service: SERVICE,
        status: Some(status.as_u16()),
        message: message.to_string(),
        payload,
    })
}

/// Parse the API base so relative endpoints join below its full path.
fn api_base_url(api_base: &str) -> FunctionsResult<url::Url> {
    let mut base = api_base.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse()
        .map_err(|e| FunctionsError::Config(format!("invalid gist API base: {}", e)))
}

/// Extract the gist id from `https://gist.github.com/<user>/<id>[/raw[/...]]`.
pub fn gist_id_from_url(gist_url: &str) -> FunctionsResult<String> {
    let invalid = || FunctionsError::InvalidGistUrl(gist_url.to_string());
    let url: url::Url = gist_url.parse().map_err(|_| invalid())?;
    if url.host_str() != Some("gist.github.com") {
        return Err(invalid());
    }
    let mut segments = url.path_segments().ok_or_else(invalid)?;
    let _user = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let id = segments.next().ok_or_else(invalid)?;
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }
    Ok(id.to_string())
}
