use serde::Serialize;
use std::collections::HashSet;

use crate::demand::{DemandRecord, DemandStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_demands: usize,
    pub active_demands: usize,
    pub demands_met: usize,
    pub total_co_signers: u64,
    pub companies_targeted: usize,
}

pub fn platform_stats(demands: &[DemandRecord]) -> PlatformStats {
    let companies: HashSet<&str> = demands
        .iter()
        .map(|demand| demand.target_company.as_str())
        .collect();

    PlatformStats {
        total_demands: demands.len(),
        active_demands: demands.iter().filter(|demand| demand.is_active()).count(),
        demands_met: demands
            .iter()
            .filter(|demand| demand.status == DemandStatus::Met)
            .count(),
        total_co_signers: demands.iter().map(|demand| demand.co_sign_count).sum(),
        companies_targeted: companies.len(),
    }
}
