use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::demand::DemandRecord;

pub struct DemandStore {
    path: PathBuf,
    demands: RwLock<Vec<DemandRecord>>,
}

impl DemandStore {
    /// A missing export on first load starts the store empty.
    pub async fn load(path: PathBuf) -> Result<Self, String> {
        let demands = if path.exists() {
            read_demands(&path).await?
        } else {
            Vec::new()
        };
        info!(path = %path.display(), count = demands.len(), "loaded demands");
        Ok(Self {
            path,
            demands: RwLock::new(demands),
        })
    }

    pub async fn list(&self) -> Vec<DemandRecord> {
        let guard = self.demands.read().await;
        guard.clone()
    }

    pub async fn get(&self, demand_id: &str) -> Option<DemandRecord> {
        let guard = self.demands.read().await;
        guard.iter().find(|demand| demand.id == demand_id).cloned()
    }

    /// Re-reads the export. The previous records stay in place if the file
    /// is missing or cannot be parsed.
    pub async fn reload(&self) -> Result<usize, String> {
        let demands = read_demands(&self.path).await?;
        let count = demands.len();
        let mut guard = self.demands.write().await;
        *guard = demands;
        debug!(path = %self.path.display(), count, "reloaded demands");
        Ok(count)
    }
}

async fn read_demands(path: &Path) -> Result<Vec<DemandRecord>, String> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("failed to read demands: {}", err))?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&data).map_err(|err| format!("failed to parse demands: {}", err))
}
