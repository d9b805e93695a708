use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use std::path::PathBuf;
use std::time::{Duration as StdDuration, Instant};
use tower::ServiceExt;

use demand_pressure::api::build_stats_report;
use demand_pressure::config::StatsConfig;
use demand_pressure::server::{cache_control, parse_companies, router, AppState, StatsCache};
use demand_pressure::store::DemandStore;
use demand_pressure::{DemandRecord, DemandStatus};

fn sample_demands() -> Vec<DemandRecord> {
    let created = Some(Utc::now() - Duration::days(2));
    vec![
        DemandRecord::new("a1", "Acme", DemandStatus::Active, 100, created),
        DemandRecord::new("a2", "Acme", DemandStatus::Active, 200, created),
        DemandRecord::new("g1", "Globex", DemandStatus::Closed, 1000, created),
        DemandRecord::new("h1", "Hooli", DemandStatus::Met, 40, None),
    ]
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("demand-pressure-server-{}-{}", std::process::id(), name))
}

async fn app_with(path: &PathBuf, demands: &[DemandRecord]) -> Router {
    std::fs::write(path, serde_json::to_string(demands).unwrap()).unwrap();
    let store = DemandStore::load(path.clone()).await.unwrap();
    router(AppState::new(store, StatsConfig::default()))
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cache_header = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, cache_header, body)
}

#[tokio::test]
async fn stats_are_cached_until_reload() {
    let path = temp_path("stats.json");
    let demands = sample_demands();
    let app = app_with(&path, &demands).await;

    let (status, cache_header, body) = send(&app, "GET", "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache_header.as_deref(), Some("public, max-age=300"));
    assert_eq!(body["stats"]["totalDemands"], 4);
    assert_eq!(body["pressureBoard"][0]["companyName"], "Globex");

    std::fs::write(&path, serde_json::to_string(&demands[..1]).unwrap()).unwrap();
    let (_, _, cached) = send(&app, "GET", "/api/stats").await;
    assert_eq!(cached["stats"]["totalDemands"], 4);

    let (status, _, reloaded) = send(&app, "POST", "/api/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reloaded["count"], 1);

    let (_, _, fresh) = send(&app, "GET", "/api/stats").await;
    assert_eq!(fresh["stats"]["totalDemands"], 1);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn failed_reload_keeps_serving_previous_records() {
    let path = temp_path("reload.json");
    let app = app_with(&path, &sample_demands()).await;

    std::fs::remove_file(&path).unwrap();
    let (status, _, _) = send(&app, "POST", "/api/reload").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, _, board) = send(&app, "GET", "/api/board").await;
    assert_eq!(board.as_array().map(|entries| entries.len()), Some(3));
}

#[tokio::test]
async fn unknown_demand_is_not_found() {
    let path = temp_path("detail.json");
    let app = app_with(&path, &sample_demands()).await;

    let (status, _, _) = send(&app, "GET", "/api/demands/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(&app, "GET", "/api/demands/g1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stage"], "campaign");
    assert_eq!(body["signersToNextStage"], 9000);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn coalition_trims_company_names() {
    let path = temp_path("coalition.json");
    let app = app_with(&path, &sample_demands()).await;

    let (status, _, body) =
        send(&app, "GET", "/api/coalition?companies=%20Acme%20,,Globex").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companies"], 2);
    assert_eq!(body["totalCoSigners"], 1300);
    assert_eq!(body["stage"], "campaign");

    let (status, _, _) = send(&app, "GET", "/api/coalition?companies=%20,").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn trending_endpoint_honours_limit() {
    let path = temp_path("trending.json");
    let app = app_with(&path, &sample_demands()).await;

    let (status, _, body) = send(&app, "GET", "/api/trending?limit=1").await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["demand"]["id"], "a2");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn cache_entry_expires_after_ttl() {
    let mut cache = StatsCache::new(StdDuration::from_secs(300));
    let stored_at = Instant::now();
    let report = build_stats_report(&sample_demands(), 10, Utc::now());

    assert!(cache.lookup(stored_at).is_none());
    cache.store(report, stored_at);

    let hit = cache.lookup(stored_at + StdDuration::from_secs(299));
    assert_eq!(hit.map(|report| report.stats.total_demands), Some(4));
    assert!(cache.lookup(stored_at + StdDuration::from_secs(300)).is_none());

    cache.clear();
    assert!(cache.lookup(stored_at).is_none());
}

#[test]
fn cache_control_uses_ttl() {
    assert_eq!(cache_control(300), "public, max-age=300");
    assert_eq!(cache_control(0), "public, max-age=0");
}

#[test]
fn company_list_is_split_and_trimmed() {
    let companies = parse_companies(" Acme , ,Globex,Acme");

    assert_eq!(companies.len(), 2);
    assert!(companies.contains("Acme"));
    assert!(companies.contains("Globex"));
    assert!(parse_companies(" , ").is_empty());
}
