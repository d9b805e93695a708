use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{debug, info, warn};

use crate::api::{build_stats_report, DemandInsight, StatsReport};
use crate::config::{AppConfig, StatsConfig};
use crate::demand::DemandRecord;
use crate::scoring::{
    build_pressure_board_at, coalition_pressure_at, group_by_company, top_trending_at,
    CoalitionPressure, PressureEntry,
};
use crate::store::DemandStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<DemandStore>,
    stats: StatsConfig,
    cache: Arc<Mutex<StatsCache>>,
}

impl AppState {
    pub fn new(store: DemandStore, stats: StatsConfig) -> Self {
        let cache = StatsCache::new(Duration::from_secs(stats.cache_ttl_secs));
        Self {
            store: Arc::new(store),
            stats,
            cache: Arc::new(Mutex::new(cache)),
        }
    }
}

/// Single cached stats report. An entry is served while `at < stored + ttl`.
#[derive(Debug)]
pub struct StatsCache {
    ttl: Duration,
    entry: Option<(StatsReport, Instant)>,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn lookup(&self, at: Instant) -> Option<StatsReport> {
        self.entry
            .as_ref()
            .filter(|(_, expires_at)| *expires_at > at)
            .map(|(report, _)| report.clone())
    }

    pub fn store(&mut self, report: StatsReport, at: Instant) {
        self.entry = Some((report, at + self.ttl));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

pub fn cache_control(ttl_secs: u64) -> String {
    format!("public, max-age={}", ttl_secs)
}

pub fn parse_companies(raw: &str) -> HashSet<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

#[derive(Deserialize)]
struct TrendingQuery {
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct CoalitionQuery {
    #[serde(default)]
    companies: String,
}

#[derive(Serialize)]
struct ReloadResponse {
    count: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/stats", get(stats_handler))
        .route("/api/board", get(board_handler))
        .route("/api/trending", get(trending_handler))
        .route("/api/demands/:id", get(demand_handler))
        .route("/api/coalition", get(coalition_handler))
        .route("/api/reload", post(reload_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: AppConfig) -> Result<(), String> {
    let store = DemandStore::load(config.data.demands_path.clone()).await?;
    let app = router(AppState::new(store, config.stats.clone()));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "serving pressure stats");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let report = cached_report(&state).await;
    (
        [(header::CACHE_CONTROL, cache_control(state.stats.cache_ttl_secs))],
        Json(report),
    )
}

async fn board_handler(State(state): State<AppState>) -> Json<Vec<PressureEntry>> {
    let demands = state.store.list().await;
    Json(build_pressure_board_at(group_by_company(&demands), Utc::now()))
}

async fn trending_handler(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Json<Vec<DemandInsight>> {
    let limit = query.limit.unwrap_or(state.stats.trending_limit);
    let demands = state.store.list().await;
    let now = Utc::now();
    let insights = top_trending_at(&demands, limit, now)
        .iter()
        .map(|demand| DemandInsight::build(demand, now))
        .collect();
    Json(insights)
}

async fn demand_handler(
    State(state): State<AppState>,
    Path(demand_id): Path<String>,
) -> Result<Json<DemandInsight>, (StatusCode, String)> {
    let demand = state
        .store
        .get(&demand_id)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("demand not found: {}", demand_id)))?;
    Ok(Json(DemandInsight::build(&demand, Utc::now())))
}

async fn coalition_handler(
    State(state): State<AppState>,
    Query(query): Query<CoalitionQuery>,
) -> Result<Json<CoalitionPressure>, (StatusCode, String)> {
    let companies = parse_companies(&query.companies);
    if companies.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "companies is required".to_string()));
    }

    let members: Vec<DemandRecord> = state
        .store
        .list()
        .await
        .into_iter()
        .filter(|demand| companies.contains(demand.target_company.as_str()))
        .collect();
    Ok(Json(coalition_pressure_at(&members, Utc::now())))
}

async fn reload_handler(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    let count = state.store.reload().await.map_err(|err| {
        warn!(error = %err, "reload failed");
        (StatusCode::INTERNAL_SERVER_ERROR, err)
    })?;
    state.cache.lock().await.clear();
    Ok(Json(ReloadResponse { count }))
}

async fn cached_report(state: &AppState) -> StatsReport {
    let mut cache = state.cache.lock().await;
    if let Some(report) = cache.lookup(Instant::now()) {
        debug!("stats cache hit");
        return report;
    }

    debug!("stats cache miss");
    let demands = state.store.list().await;
    let report = build_stats_report(&demands, state.stats.trending_limit, Utc::now());
    cache.store(report.clone(), Instant::now());
    report
}
