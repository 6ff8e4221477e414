//! Report shape and persistence for completed evaluations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::ElementEvaluation;

/// Final artifact for one epic: every element evaluation in processing
/// order, plus run metadata. The in-memory value is authoritative even
/// when the write to disk fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicReport {
    pub run_id: String,
    pub epic_index: usize,
    pub created_at: DateTime<Utc>,
    pub evaluations: Vec<ElementEvaluation>,
    /// Where the artifact landed, when the write succeeded.
    #[serde(skip)]
    pub saved_to: Option<PathBuf>,
}

impl EpicReport {
    pub fn new(epic_index: usize, evaluations: Vec<ElementEvaluation>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            epic_index,
            created_at: Utc::now(),
            evaluations,
            saved_to: None,
        }
    }

    /// File name embedding the epic index and a second-granular timestamp,
    /// so repeated runs never overwrite each other.
    pub fn artifact_name(&self) -> String {
        format!(
            "epic_evaluation_{}_{}.json",
            self.epic_index,
            self.created_at.format("%Y%m%d_%H%M%S")
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report under `dir`, creating the directory if needed.
    pub async fn persist(&self, dir: &Path) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(self.artifact_name());
        tokio::fs::write(&path, self.to_json()?).await?;
        Ok(path)
    }
}
