use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::demand::DemandRecord;

const RECENCY_WINDOW_DAYS: f64 = 30.0;
const COUNT_WEIGHT: f64 = 2.0;
const RECENCY_WEIGHT: f64 = 50.0;
const VELOCITY_WEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingScore {
    pub demand_id: String,
    pub score: f64,
    pub co_sign_velocity: f64,
    pub recency_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    Cold,
    Warm,
    Hot,
    Fire,
}

impl HeatLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 500.0 {
            HeatLevel::Fire
        } else if score >= 200.0 {
            HeatLevel::Hot
        } else if score >= 50.0 {
            HeatLevel::Warm
        } else {
            HeatLevel::Cold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HeatLevel::Cold => "cold",
            HeatLevel::Warm => "warm",
            HeatLevel::Hot => "hot",
            HeatLevel::Fire => "fire",
        }
    }
}

pub fn trending_score(demand: &DemandRecord) -> TrendingScore {
    trending_score_at(demand, Utc::now())
}

/// A demand without a creation time counts as created at `now`: full
/// recency, no velocity.
pub fn trending_score_at(demand: &DemandRecord, now: DateTime<Utc>) -> TrendingScore {
    let age = demand.age_in_days(now).unwrap_or(0.0);
    let count = demand.co_sign_count as f64;

    let recency_score = (1.0 - age / RECENCY_WINDOW_DAYS).max(0.0);
    let co_sign_velocity = if age > 0.0 { count / age } else { 0.0 };
    let score =
        count * COUNT_WEIGHT + recency_score * RECENCY_WEIGHT + co_sign_velocity * VELOCITY_WEIGHT;

    TrendingScore {
        demand_id: demand.id.clone(),
        score,
        co_sign_velocity,
        recency_score,
    }
}

pub fn sort_by_trending(demands: &[DemandRecord]) -> Vec<DemandRecord> {
    sort_by_trending_at(demands, Utc::now())
}

pub fn sort_by_trending_at(demands: &[DemandRecord], now: DateTime<Utc>) -> Vec<DemandRecord> {
    let mut scored: Vec<(f64, &DemandRecord)> = demands
        .iter()
        .map(|demand| (trending_score_at(demand, now).score, demand))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, demand)| demand.clone()).collect()
}

pub fn top_trending(demands: &[DemandRecord], limit: usize) -> Vec<DemandRecord> {
    top_trending_at(demands, limit, Utc::now())
}

pub fn top_trending_at(
    demands: &[DemandRecord],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<DemandRecord> {
    let active: Vec<DemandRecord> = demands
        .iter()
        .filter(|demand| demand.is_active())
        .cloned()
        .collect();
    let mut sorted = sort_by_trending_at(&active, now);
    sorted.truncate(limit);
    sorted
}

pub fn heat_level(demand: &DemandRecord) -> HeatLevel {
    heat_level_at(demand, Utc::now())
}

pub fn heat_level_at(demand: &DemandRecord, now: DateTime<Utc>) -> HeatLevel {
    HeatLevel::from_score(trending_score_at(demand, now).score)
}
