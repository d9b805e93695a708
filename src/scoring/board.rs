use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::demand::DemandRecord;
use crate::scoring::pressure::PressureComponents;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureChange {
    Up,
    Down,
    #[default]
    Same,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureEntry {
    pub company_name: String,
    pub pressure_score: u64,
    pub active_demands: usize,
    pub total_co_signers: u64,
    pub velocity: f64,
    pub rank: usize,
    pub change: PressureChange,
}

impl PressureEntry {
    fn from_group(company_name: String, demands: &[DemandRecord], now: DateTime<Utc>) -> Self {
        let components = PressureComponents::collect(demands, now);
        Self {
            company_name,
            pressure_score: components.score(),
            active_demands: components.active_demands,
            total_co_signers: components.total_signers,
            velocity: components.velocity,
            rank: 0,
            change: PressureChange::default(),
        }
    }
}

pub fn build_pressure_board<I, S, D>(groups: I) -> Vec<PressureEntry>
where
    I: IntoIterator<Item = (S, D)>,
    S: Into<String>,
    D: AsRef<[DemandRecord]>,
{
    build_pressure_board_at(groups, Utc::now())
}

/// Ties keep the order in which groups were supplied.
pub fn build_pressure_board_at<I, S, D>(groups: I, now: DateTime<Utc>) -> Vec<PressureEntry>
where
    I: IntoIterator<Item = (S, D)>,
    S: Into<String>,
    D: AsRef<[DemandRecord]>,
{
    let mut entries: Vec<PressureEntry> = groups
        .into_iter()
        .map(|(company, demands)| PressureEntry::from_group(company.into(), demands.as_ref(), now))
        .collect();

    entries.sort_by(|a, b| b.pressure_score.cmp(&a.pressure_score));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    entries
}

pub fn group_by_company(demands: &[DemandRecord]) -> Vec<(String, Vec<DemandRecord>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<DemandRecord>)> = Vec::new();

    for demand in demands {
        let index = *positions
            .entry(demand.target_company.as_str())
            .or_insert_with(|| {
                groups.push((demand.target_company.clone(), Vec::new()));
                groups.len() - 1
            });
        groups[index].1.push(demand.clone());
    }

    groups
}
