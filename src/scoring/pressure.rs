use chrono::{DateTime, Utc};

use crate::demand::DemandRecord;

const SIGNER_WEIGHT: f64 = 0.4;
const ACTIVE_WEIGHT: f64 = 0.3;
const VELOCITY_WEIGHT: f64 = 0.3;
const ACTIVE_SCALE: f64 = 100.0;
const VELOCITY_SCALE: f64 = 50.0;

/// Age assumed for records without a creation time. Aggregates damp
/// unknown-age demands instead of treating them as brand new.
pub const UNKNOWN_AGE_DAYS: f64 = 30.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressureComponents {
    pub total_signers: u64,
    pub active_demands: usize,
    pub velocity: f64,
}

impl PressureComponents {
    pub fn collect(demands: &[DemandRecord], now: DateTime<Utc>) -> Self {
        Self {
            total_signers: demands.iter().map(|demand| demand.co_sign_count).sum(),
            active_demands: demands.iter().filter(|demand| demand.is_active()).count(),
            velocity: pressure_velocity(demands, now),
        }
    }

    pub fn score(&self) -> u64 {
        let raw = self.total_signers as f64 * SIGNER_WEIGHT
            + self.active_demands as f64 * ACTIVE_SCALE * ACTIVE_WEIGHT
            + self.velocity * VELOCITY_SCALE * VELOCITY_WEIGHT;
        raw.round().max(0.0) as u64
    }
}

pub fn pressure_score(demands: &[DemandRecord]) -> u64 {
    pressure_score_at(demands, Utc::now())
}

pub fn pressure_score_at(demands: &[DemandRecord], now: DateTime<Utc>) -> u64 {
    if demands.is_empty() {
        return 0;
    }
    PressureComponents::collect(demands, now).score()
}

pub fn pressure_velocity(demands: &[DemandRecord], now: DateTime<Utc>) -> f64 {
    demands
        .iter()
        .map(|demand| {
            let age = demand.age_in_days(now).unwrap_or(UNKNOWN_AGE_DAYS);
            demand.co_sign_count as f64 / age.max(1.0)
        })
        .sum()
}
