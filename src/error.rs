use thiserror::Error;

/// Everything that can stop a script from being generated
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Tool '{0}' is not supported")]
    UnsupportedTool(String),

    #[error("Repository must be in \"owner/repo\" format")]
    InvalidRepositoryFormat,

    #[error("Repository {0} not found or has no releases")]
    ReleaseNotFound(String),

    /// `reset_at` is an ISO-8601 timestamp, or "unknown" when the provider sent none
    #[error("GitHub API rate limit exceeded. Resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("GitHub API request failed with status {status}: {status_text}")]
    ProviderError { status: u16, status_text: String },

    #[error("Invalid release data received from GitHub API")]
    InvalidResponseShape,

    #[error("Failed to fetch release information from GitHub: {0}")]
    TransportError(String),

    #[error("No compatible binary found for {tool}. No asset matching filter '{filter}'")]
    NoMatchingAsset { tool: String, filter: String },

    #[error("Assets must be an array")]
    InvalidAssetsInput,

    #[error("Filter must be a non-empty string")]
    InvalidFilter,
}

impl GenerateError {
    /// True for outcomes caused by what the caller asked for rather than by the provider
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GenerateError::UnsupportedTool(_) | GenerateError::NoMatchingAsset { .. }
        )
    }
}

pub type GenerateResult<T> = Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_upstream_wording() {
        assert_eq!(
            GenerateError::UnsupportedTool("foo".to_string()).to_string(),
            "Tool 'foo' is not supported"
        );
        assert_eq!(
            GenerateError::ReleaseNotFound("owner/repo".to_string()).to_string(),
            "Repository owner/repo not found or has no releases"
        );
        assert_eq!(
            GenerateError::ProviderError {
                status: 502,
                status_text: "Bad Gateway".to_string()
            }
            .to_string(),
            "GitHub API request failed with status 502: Bad Gateway"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(GenerateError::UnsupportedTool("x".to_string()).is_client_error());
        assert!(
            GenerateError::NoMatchingAsset {
                tool: "x".to_string(),
                filter: "y".to_string()
            }
            .is_client_error()
        );
        assert!(!GenerateError::InvalidResponseShape.is_client_error());
        assert!(!GenerateError::TransportError("boom".to_string()).is_client_error());
    }
}
