use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::demand::DemandRecord;
use crate::escalation::{escalation_progress, escalation_stage, signers_to_next_stage, EscalationStage};
use crate::scoring::{
    build_pressure_board_at, group_by_company, heat_level_at, top_trending_at, trending_score_at,
    HeatLevel, PressureEntry, TrendingScore,
};
use crate::stats::{platform_stats, PlatformStats};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub stats: PlatformStats,
    pub trending: Vec<DemandRecord>,
    pub pressure_board: Vec<PressureEntry>,
}

pub fn build_stats_report(
    demands: &[DemandRecord],
    trending_limit: usize,
    now: DateTime<Utc>,
) -> StatsReport {
    StatsReport {
        stats: platform_stats(demands),
        trending: top_trending_at(demands, trending_limit, now),
        pressure_board: build_pressure_board_at(group_by_company(demands), now),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandInsight {
    pub demand: DemandRecord,
    pub trending: TrendingScore,
    pub heat: HeatLevel,
    pub stage: EscalationStage,
    pub stage_label: String,
    pub stage_icon: String,
    pub progress: f64,
    pub signers_to_next_stage: Option<u64>,
}

impl DemandInsight {
    pub fn build(demand: &DemandRecord, now: DateTime<Utc>) -> Self {
        let stage = escalation_stage(demand.co_sign_count);
        let descriptor = stage.descriptor();
        Self {
            demand: demand.clone(),
            trending: trending_score_at(demand, now),
            heat: heat_level_at(demand, now),
            stage,
            stage_label: descriptor.label.to_string(),
            stage_icon: descriptor.icon.to_string(),
            progress: escalation_progress(demand.co_sign_count),
            signers_to_next_stage: signers_to_next_stage(demand.co_sign_count),
        }
    }
}
