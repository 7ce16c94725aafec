mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::post, Json, Router};
use serde_json::json;

use newslens::classifier::{band, classify, ScoreBand, SourceRegistry, Verdict};
use newslens::client::{AnalysisClient, CONNECTION_MESSAGE};
use newslens::session::{AnalysisSession, RequestState, SubmitOutcome};
use newslens::view::{render, ScreenView};

use common::{spawn_service, unreachable_base_url};

const TIMEOUT: Duration = Duration::from_secs(5);

fn session_for(base: String, timeout: Duration) -> AnalysisSession {
    let client = AnalysisClient::new(base).expect("build client");
    AnalysisSession::new(Arc::new(client), timeout)
}

#[tokio::test]
async fn miracle_cure_is_flagged_fake() {
    let app = Router::new().route(
        "/analyze",
        post(|| async {
            Json(json!({
                "label": "Likely Fake",
                "trust_score": 12,
                "explanations": [{"sentence": "...", "reason": "Sensational language"}],
                "sources": ["Snopes"]
            }))
        }),
    );
    let mut session = session_for(spawn_service(app).await, TIMEOUT);

    let state = session.analyze("BREAKING: miracle cure!!!").await.clone();
    let RequestState::Succeeded(result) = &state else {
        panic!("expected success, got {state:?}");
    };

    assert_eq!(classify(Some(result.label.as_str())), Verdict::Fake);
    assert_eq!(band(result.trust_score), ScoreBand::Low);

    let registry = SourceRegistry::builtin();
    let resolved = registry.resolve(&result.sources[0]);
    assert_eq!(resolved.name, "Snopes");
    assert_eq!(resolved.url.as_deref(), Some("https://www.snopes.com"));

    let screen = render(&ScreenView::from_state(&state, registry));
    assert!(screen.contains("Sensational language"));
}

#[tokio::test]
async fn unreachable_service_fails_with_connection_message() {
    let mut session = session_for(unreachable_base_url().await, TIMEOUT);

    let state = session.analyze("Is this real?").await;
    assert_eq!(state, &RequestState::Failed(CONNECTION_MESSAGE.to_string()));
    assert_eq!(session.input(), "Is this real?");
}

#[tokio::test]
async fn blank_input_sends_nothing() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/analyze",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({"label": "Unverified", "trust_score": 50}))
            }
        }),
    );
    let mut session = session_for(spawn_service(app).await, TIMEOUT);

    session.set_input("  \n ");
    assert_eq!(session.submit(), SubmitOutcome::Ignored);
    assert_eq!(session.settle().await, &RequestState::Idle);

    session.analyze("real text").await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn hung_service_times_out() {
    let app = Router::new().route(
        "/analyze",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({"label": "Likely Real", "trust_score": 90}))
        }),
    );
    let mut session = session_for(spawn_service(app).await, Duration::from_millis(200));

    let state = session.analyze("anything at all").await;
    assert_eq!(
        state.error(),
        Some("The analysis service did not respond within 0.2 seconds.")
    );
}

#[tokio::test]
async fn service_error_replaces_previous_result() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let app = Router::new().route(
        "/analyze",
        post(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    (
                        axum::http::StatusCode::OK,
                        Json(json!({"label": "Likely Real", "trust_score": 82})),
                    )
                } else {
                    (
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "Analysis failed", "message": "model offline"})),
                    )
                }
            }
        }),
    );
    let mut session = session_for(spawn_service(app).await, TIMEOUT);

    assert!(session.analyze("first").await.result().is_some());

    let state = session.analyze("second").await;
    assert_eq!(state, &RequestState::Failed("model offline".to_string()));
    assert!(state.result().is_none());
}
