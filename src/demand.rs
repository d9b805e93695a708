use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandStatus {
    Draft,
    Active,
    Negotiation,
    Met,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub target_company: String,
    pub status: DemandStatus,
    #[serde(default)]
    pub co_sign_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DemandRecord {
    pub fn new(
        id: impl Into<String>,
        target_company: impl Into<String>,
        status: DemandStatus,
        co_sign_count: u64,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            target_company: target_company.into(),
            status,
            co_sign_count,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DemandStatus::Active
    }

    pub fn age_in_days(&self, now: DateTime<Utc>) -> Option<f64> {
        self.created_at
            .map(|created_at| (now - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY)
    }
}
