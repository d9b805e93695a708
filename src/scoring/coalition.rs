use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::demand::DemandRecord;
use crate::escalation::{escalation_progress, escalation_stage, EscalationStage};
use crate::scoring::pressure::{pressure_score_at, PressureComponents};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoalitionPressure {
    pub demand_count: usize,
    pub active_demands: usize,
    pub total_co_signers: u64,
    pub pressure_score: u64,
    pub velocity: f64,
    pub companies: usize,
    pub stage: EscalationStage,
    pub progress: f64,
}

pub fn coalition_pressure(demands: &[DemandRecord]) -> CoalitionPressure {
    coalition_pressure_at(demands, Utc::now())
}

pub fn coalition_pressure_at(demands: &[DemandRecord], now: DateTime<Utc>) -> CoalitionPressure {
    let components = PressureComponents::collect(demands, now);
    let companies: HashSet<&str> = demands
        .iter()
        .map(|demand| demand.target_company.as_str())
        .collect();

    CoalitionPressure {
        demand_count: demands.len(),
        active_demands: components.active_demands,
        total_co_signers: components.total_signers,
        pressure_score: pressure_score_at(demands, now),
        velocity: components.velocity,
        companies: companies.len(),
        stage: escalation_stage(components.total_signers),
        progress: escalation_progress(components.total_signers),
    }
}
