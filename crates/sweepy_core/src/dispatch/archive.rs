//! The machine-readable record of a persisted sweep.

use std::fs;
use std::path::Path;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::ParameterSpec;
use crate::model::FixedParameters;
use crate::sweep::{ResultTensor, SweepOutcome};

/// File name of the data archive inside a persist location
pub const ARCHIVE_FILE: &str = "data.json";

/// File name of the run report inside a persist location
pub const REPORT_FILE: &str = "README.txt";

/// Everything needed to reload the numeric results of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepArchive {
    pub model: String,
    pub parameters: Vec<ParameterSpec>,
    #[serde(default)]
    pub fixed: FixedParameters,
    pub reps: usize,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    pub tensors: Vec<ResultTensor>,
}

impl SweepArchive {
    pub fn from_outcome(outcome: &SweepOutcome) -> Self {
        Self {
            model: outcome.model.clone(),
            parameters: outcome.specs().to_vec(),
            fixed: outcome.fixed.clone(),
            reps: outcome.reps,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
            tensors: outcome.tensors.clone(),
        }
    }

    pub fn tensor(&self, name: &str) -> Option<&ResultTensor> {
        self.tensors.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tensors.iter().map(|t| t.name.as_str())
    }
}

/// Read back the archive written by a persisted sweep at `location`.
pub fn load_archive(location: &Path) -> Result<SweepArchive> {
    let content = fs::read_to_string(location.join(ARCHIVE_FILE))?;
    Ok(serde_json::from_str(&content)?)
}
