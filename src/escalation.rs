use serde::{Deserialize, Serialize};

pub const CAMPAIGN_THRESHOLD: u64 = 1_000;
pub const MOVEMENT_THRESHOLD: u64 = 10_000;
pub const CRISIS_THRESHOLD: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationStage {
    Petition,
    Campaign,
    Movement,
    Crisis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageDescriptor {
    pub min: u64,
    pub max: Option<u64>,
    pub icon: &'static str,
    pub label: &'static str,
}

impl EscalationStage {
    pub const ALL: [EscalationStage; 4] = [
        EscalationStage::Petition,
        EscalationStage::Campaign,
        EscalationStage::Movement,
        EscalationStage::Crisis,
    ];

    pub fn descriptor(self) -> StageDescriptor {
        match self {
            EscalationStage::Petition => StageDescriptor {
                min: 0,
                max: Some(CAMPAIGN_THRESHOLD),
                icon: "📝",
                label: "Petition",
            },
            EscalationStage::Campaign => StageDescriptor {
                min: CAMPAIGN_THRESHOLD,
                max: Some(MOVEMENT_THRESHOLD),
                icon: "📣",
                label: "Campaign",
            },
            EscalationStage::Movement => StageDescriptor {
                min: MOVEMENT_THRESHOLD,
                max: Some(CRISIS_THRESHOLD),
                icon: "✊",
                label: "Movement",
            },
            EscalationStage::Crisis => StageDescriptor {
                min: CRISIS_THRESHOLD,
                max: None,
                icon: "🔥",
                label: "Crisis",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn next(self) -> Option<Self> {
        match self {
            EscalationStage::Petition => Some(EscalationStage::Campaign),
            EscalationStage::Campaign => Some(EscalationStage::Movement),
            EscalationStage::Movement => Some(EscalationStage::Crisis),
            EscalationStage::Crisis => None,
        }
    }

    pub fn contains(self, count: u64) -> bool {
        let descriptor = self.descriptor();
        count >= descriptor.min && descriptor.max.map_or(true, |max| count < max)
    }
}

/// Boundary counts belong to the higher stage: 1000 is already a campaign.
pub fn escalation_stage(count: u64) -> EscalationStage {
    if count >= CRISIS_THRESHOLD {
        EscalationStage::Crisis
    } else if count >= MOVEMENT_THRESHOLD {
        EscalationStage::Movement
    } else if count >= CAMPAIGN_THRESHOLD {
        EscalationStage::Campaign
    } else {
        EscalationStage::Petition
    }
}

pub fn escalation_progress(count: u64) -> f64 {
    let count = count as f64;
    if count >= CRISIS_THRESHOLD as f64 {
        100.0
    } else if count >= MOVEMENT_THRESHOLD as f64 {
        75.0 + (count - 10_000.0) / 90_000.0 * 25.0
    } else if count >= CAMPAIGN_THRESHOLD as f64 {
        50.0 + (count - 1_000.0) / 9_000.0 * 25.0
    } else {
        (count / 1_000.0 * 50.0).min(50.0)
    }
}

pub fn signers_to_next_stage(count: u64) -> Option<u64> {
    escalation_stage(count)
        .next()
        .map(|next| next.descriptor().min.saturating_sub(count))
}
