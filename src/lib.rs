pub mod api;
pub mod config;
pub mod demand;
pub mod escalation;
pub mod format;
pub mod scoring;
pub mod server;
pub mod stats;
pub mod store;

pub use demand::{DemandRecord, DemandStatus};
pub use escalation::{
    escalation_progress, escalation_stage, signers_to_next_stage, EscalationStage,
    StageDescriptor,
};
pub use format::{format_float, format_number, format_percent};
pub use stats::{platform_stats, PlatformStats};
