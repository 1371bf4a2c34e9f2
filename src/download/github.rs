use crate::config::Settings;
use crate::error::{GenerateError, GenerateResult};
use crate::models::{Asset, ReleaseInfo};
use chrono::{DateTime, SecondsFormat};
use tracing::{debug, info, warn};

const ACCEPT: &str = "application/vnd.github.v3+json";

/// Source of "latest release" metadata for a repository
pub trait ReleaseProvider {
    fn fetch_latest_release(&self, repository: &str) -> GenerateResult<ReleaseInfo>;
}

/// Blocking GitHub Releases API client
///
/// Makes exactly one request per call. Retries and timeouts are left to `ureq`.
pub struct GitHubClient {
    api_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&settings.user_agent)
            .build();
        Self {
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            agent,
        }
    }
}

impl ReleaseProvider for GitHubClient {
    fn fetch_latest_release(&self, repository: &str) -> GenerateResult<ReleaseInfo> {
        validate_repository(repository)?;

        let api_url = format!("{}/repos/{repository}/releases/latest", self.api_url);
        debug!(%api_url, "Fetching release info");

        let mut request = self.agent.get(&api_url).set("Accept", ACCEPT);
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let error = status_error(
                    repository,
                    status,
                    response.status_text(),
                    response.header("X-RateLimit-Remaining"),
                    response.header("X-RateLimit-Reset"),
                );
                warn!(repository, status, "{error}");
                return Err(error);
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!(repository, "Transport failure: {transport}");
                return Err(GenerateError::TransportError(transport.to_string()));
            }
        };

        // Redirects are followed by the agent, so anything left outside 2xx is unexpected
        if !(200..300).contains(&response.status()) {
            return Err(GenerateError::ProviderError {
                status: response.status(),
                status_text: response.status_text().to_string(),
            });
        }

        // Read the body before parsing so a dropped connection stays a transport error
        let text = response.into_string().map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                warn!(repository, "GitHub response body is not UTF-8: {e}");
                GenerateError::InvalidResponseShape
            }
            _ => {
                warn!(repository, "Failed to read GitHub response body: {e}");
                GenerateError::TransportError(e.to_string())
            }
        })?;
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            warn!(repository, "Failed to parse GitHub release JSON: {e}");
            GenerateError::InvalidResponseShape
        })?;
        let release = ReleaseInfo::from_json(body)?;

        info!(
            repository,
            tag = %release.tag_name,
            assets = release.assets.len(),
            "Found release"
        );
        Ok(release)
    }
}

/// Check that a repository is "owner/name" with exactly one separator and no empty half
pub fn validate_repository(repository: &str) -> GenerateResult<()> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(GenerateError::InvalidRepositoryFormat),
    }
}

/// Map a non-success response to an error
fn status_error(
    repository: &str,
    status: u16,
    status_text: &str,
    rate_limit_remaining: Option<&str>,
    rate_limit_reset: Option<&str>,
) -> GenerateError {
    if status == 403 && rate_limit_remaining.map(str::trim) == Some("0") {
        return GenerateError::RateLimited {
            reset_at: format_reset_time(rate_limit_reset),
        };
    }
    if status == 404 {
        return GenerateError::ReleaseNotFound(repository.to_string());
    }
    GenerateError::ProviderError {
        status,
        status_text: status_text.to_string(),
    }
}

/// Render an `X-RateLimit-Reset` value (Unix seconds) as ISO-8601 UTC
pub fn format_reset_time(reset: Option<&str>) -> String {
    reset
        .and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "unknown".to_string())
}

/// First asset, in release order, whose file name contains `filter` (case-sensitive)
pub fn find_asset<'a>(assets: &'a [Asset], filter: &str) -> GenerateResult<Option<&'a Asset>> {
    if filter.is_empty() {
        return Err(GenerateError::InvalidFilter);
    }
    Ok(assets.iter().find(|asset| asset.name.contains(filter)))
}
