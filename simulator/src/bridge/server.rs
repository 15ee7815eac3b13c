use crate::bridge::model::{AnalyzeRequest, ResultsView};
use crate::capture::clip::VideoClip;
use crate::workflow::runner::Runner;
use anyhow::Context;
use athletehub_core::{ProgressEvent, ResultNamespace};
use log::{debug, info, warn};
use serde_json::json;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use warp::http::StatusCode;
use warp::reply::{json as json_reply, with_status, Json, WithStatus};
use warp::{Filter, Rejection, Reply};

fn lookup_reply(runner: &Runner, namespace: ResultNamespace, session_id: &str) -> WithStatus<Json> {
    match runner.lookup(namespace, session_id) {
        Ok(lookup) => with_status(json_reply(&ResultsView::from(lookup)), StatusCode::OK),
        Err(err) => {
            warn!("results lookup error: {:#}", err);
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load analysis results")
        }
    }
}

fn error_reply(status: StatusCode, message: &str) -> WithStatus<Json> {
    with_status(json_reply(&json!({ "error": message })), status)
}

/// Results lookups, export and on-demand analysis for the dashboard.
pub fn routes(runner: Arc<Runner>) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let runner_filter = warp::any().map(move || runner.clone());

    let results_route = warp::path!("results" / String)
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|session_id: String, runner: Arc<Runner>| {
            lookup_reply(&runner, ResultNamespace::Analysis, &session_id)
        });

    let cricket_route = warp::path!("cricket-results" / String)
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|session_id: String, runner: Arc<Runner>| {
            lookup_reply(&runner, ResultNamespace::CricketAnalysis, &session_id)
        });

    let export_route = warp::path!("results" / String / "export")
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|session_id: String, runner: Arc<Runner>| match runner.export(&session_id) {
            Ok((export, _)) => with_status(json_reply(&export), StatusCode::OK),
            Err(err) => {
                warn!("export error: {:#}", err);
                error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Failed to export analysis results")
            }
        });

    let analyze_route = warp::path!("analyze")
        .and(warp::post())
        .and(warp::body::json())
        .and(runner_filter)
        .and_then(|request: AnalyzeRequest, runner: Arc<Runner>| async move {
            let clip = VideoClip::synthetic(request.size_bytes);
            let outcome = runner
                .analyze(
                    request.kind,
                    &clip,
                    |event: &ProgressEvent| debug!("[bridge] {}% {}", event.progress, event.message),
                    &CancellationToken::new(),
                )
                .await;
            let reply = match outcome {
                Ok(result) => with_status(json_reply(&result), StatusCode::OK),
                Err(err) => {
                    warn!("analyze error: {:#}", err);
                    error_reply(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Video analysis failed. Please try again.",
                    )
                }
            };
            Ok::<_, Infallible>(reply)
        });

    export_route
        .or(results_route)
        .or(cricket_route)
        .or(analyze_route)
}

/// Serves the bridge until `shutdown` resolves.
pub async fn serve<F>(runner: Arc<Runner>, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (bound, server) = warp::serve(routes(runner))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .with_context(|| format!("binding results bridge to {}", addr))?;
    info!("results bridge listening on http://{}", bound);
    server.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use athletehub_core::AnalysisResult;

    fn runner() -> Arc<Runner> {
        let cfg = WorkflowConfig::from_args(None, 0.0, Some(3));
        Arc::new(Runner::new(&cfg).unwrap())
    }

    #[tokio::test]
    async fn unknown_session_serves_demo_record() {
        let api = routes(runner());
        let response = warp::test::request()
            .method("GET")
            .path("/results/session-1-missing")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let view: ResultsView = serde_json::from_slice(response.body()).unwrap();
        assert!(view.demo);
        assert!(view.result.ball_detected);
        assert_eq!(view.result.session_id, "session-1-missing");
    }

    #[tokio::test]
    async fn file_backed_lookup_of_unusual_id_serves_demo_record() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = WorkflowConfig::from_args(Some(dir.path().to_path_buf()), 0.0, Some(3));
        let api = routes(Arc::new(Runner::new(&cfg).unwrap()));
        for path in ["/results/session.1", "/cricket-results/cricket..%2F..%2Fx"] {
            let response = warp::test::request().method("GET").path(path).reply(&api).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", path);
            let view: ResultsView = serde_json::from_slice(response.body()).unwrap();
            assert!(view.demo);
        }
    }

    #[tokio::test]
    async fn serve_reports_busy_address_as_error() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();
        let outcome = serve(runner(), addr, async {}).await;
        let err = outcome.unwrap_err();
        assert!(format!("{:#}", err).contains(&addr.to_string()));
    }

    #[tokio::test]
    async fn analyze_then_fetch_returns_stored_result() {
        let api = routes(runner());
        let response = warp::test::request()
            .method("POST")
            .path("/analyze")
            .json(&json!({ "kind": "cricket-batting", "sizeBytes": 123456 }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let result: AnalysisResult = serde_json::from_slice(response.body()).unwrap();
        assert!(result.session_id.starts_with("cricket-"));

        let response = warp::test::request()
            .method("GET")
            .path(&format!("/cricket-results/{}", result.session_id))
            .reply(&api)
            .await;
        let view: ResultsView = serde_json::from_slice(response.body()).unwrap();
        assert!(!view.demo);
        assert_eq!(view.result, result);
    }

    #[tokio::test]
    async fn export_route_returns_download_document() {
        let api = routes(runner());
        let response = warp::test::request()
            .method("GET")
            .path("/results/session-2-missing/export")
            .reply(&api)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["sessionId"], "session-2-missing");
        assert!(body["results"]["accuracy"].as_str().unwrap().ends_with('%'));
    }

    #[tokio::test]
    async fn malformed_analyze_body_is_rejected() {
        let api = routes(runner());
        let response = warp::test::request()
            .method("POST")
            .path("/analyze")
            .json(&json!({ "kind": "tennis", "sizeBytes": 1 }))
            .reply(&api)
            .await;
        assert!(response.status().is_client_error());
    }
}
