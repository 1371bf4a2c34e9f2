use crate::download::github::ReleaseProvider;
use crate::error::GenerateError;
use crate::generator::ScriptGenerator;
use crate::registry::{is_tool_supported, supported_tools};
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing::{error, info};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const CACHE_CONTROL: &str = "public, max-age=300";
const ALLOW_METHODS: &str = "GET, OPTIONS";
const CORS_MAX_AGE: &str = "86400";

/// Routes: `GET /` lists tools, `GET /{tool}` returns the script, `OPTIONS /{tool}` answers preflight
pub fn create_router<P>(generator: Arc<ScriptGenerator<P>>) -> Router
where
    P: ReleaseProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_tools))
        .route("/{tool}", get(get_script::<P>).options(preflight))
        .with_state(generator)
}

/// Bind `listen` and serve until the process is stopped
pub async fn serve<P>(generator: Arc<ScriptGenerator<P>>, listen: &str) -> Result<()>
where
    P: ReleaseProvider + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {listen}"))?;
    info!("Serving install scripts on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(generator))
        .await
        .context("HTTP server failed")
}

/// GET / - supported tool names, one per line
pub async fn list_tools() -> Response {
    let mut body = supported_tools().join("\n");
    body.push('\n');
    text_response(StatusCode::OK, body)
}

/// GET /{tool} - generated install script
pub async fn get_script<P>(
    State(generator): State<Arc<ScriptGenerator<P>>>,
    Path(tool): Path<String>,
) -> Response
where
    P: ReleaseProvider + Send + Sync + 'static,
{
    if !is_tool_supported(&tool) {
        return text_response(StatusCode::NOT_FOUND, unsupported_message(&tool));
    }

    let result = {
        let tool = tool.clone();
        tokio::task::spawn_blocking(move || generator.generate_script(&tool)).await
    };

    match result {
        Ok(Ok(script)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, TEXT_PLAIN),
                (header::CACHE_CONTROL, CACHE_CONTROL),
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
                (header::ACCESS_CONTROL_MAX_AGE, CORS_MAX_AGE),
            ],
            script,
        )
            .into_response(),
        Ok(Err(err)) => {
            error!(tool = %tool, "Error generating script: {err}");
            text_response(error_status(&err), err.to_string())
        }
        Err(join_error) => {
            error!(tool = %tool, "Script generation task failed: {join_error}");
            text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Failed to generate installation script for '{tool}'. Please try again later."
                ),
            )
        }
    }
}

/// OPTIONS /{tool} - CORS preflight
pub async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
            (header::ACCESS_CONTROL_MAX_AGE, CORS_MAX_AGE),
        ],
    )
        .into_response()
}

/// Client-caused failures are "not found", everything else is a server error
pub fn error_status(err: &GenerateError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn unsupported_message(tool: &str) -> String {
    format!(
        "Tool '{tool}' is not supported. Supported tools: {}",
        supported_tools().join(", ")
    )
}

fn text_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, TEXT_PLAIN),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateResult;
    use crate::models::ReleaseInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticProvider {
        fail: bool,
        calls: AtomicUsize,
    }

    impl ReleaseProvider for StaticProvider {
        fn fetch_latest_release(&self, repository: &str) -> GenerateResult<ReleaseInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GenerateError::ReleaseNotFound(repository.to_string()));
            }
            Ok(ReleaseInfo {
                tag_name: "v1.0.0".to_string(),
                name: "v1.0.0".to_string(),
                assets: vec![],
            })
        }
    }

    fn generator(fail: bool) -> Arc<ScriptGenerator<StaticProvider>> {
        Arc::new(ScriptGenerator::new(StaticProvider {
            fail,
            calls: AtomicUsize::new(0),
        }))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_script_response_headers() {
        let response = get_script(State(generator(false)), Path("kubectl".to_string())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=300");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let body = body_text(response).await;
        assert!(body.starts_with("#!/usr/bin/env bash\n"));
        assert!(body.contains("kubectl version --client"));
    }

    #[tokio::test]
    async fn test_unsupported_tool_is_404_without_fetch() {
        let generator = generator(false);
        let response = get_script(State(generator.clone()), Path("emacs".to_string())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_text(response).await,
            "Tool 'emacs' is not supported. Supported tools: kubectl, terraform, helm, node, docker-compose"
        );
        assert_eq!(generator.provider().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_matching_asset_is_404() {
        let response =
            get_script(State(generator(false)), Path("docker-compose".to_string())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("No compatible binary found"));
    }

    #[tokio::test]
    async fn test_provider_failure_is_500_with_message() {
        let response = get_script(State(generator(true)), Path("helm".to_string())).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            body_text(response).await,
            "Repository helm/helm not found or has no releases"
        );
    }

    #[tokio::test]
    async fn test_preflight() {
        let response = preflight().await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, OPTIONS"
        );
        assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[tokio::test]
    async fn test_list_tools() {
        let body = body_text(list_tools().await).await;
        assert_eq!(body, "kubectl\nterraform\nhelm\nnode\ndocker-compose\n");
    }

    #[test]
    fn test_error_status() {
        assert_eq!(
            error_status(&GenerateError::UnsupportedTool("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&GenerateError::TransportError("reset".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
