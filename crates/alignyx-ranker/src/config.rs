//! Shortlisting pipeline configuration.

use serde::{Deserialize, Serialize};
use alignyx_common::error::{AlignyxError, Result};

/// Tunable parameters of the filter pipeline. Cutoffs are validated once at
/// construction; the pipeline never re-checks them mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Experimental method to retain, compared case-sensitively.
    #[serde(default = "default_method")]
    pub method: String,

    /// Maximum resolution in angstrom (lower is better quality).
    #[serde(default = "default_max_resolution")]
    pub max_resolution: f64,

    /// Minimum ligand weight in dalton; ligands at or below this are treated
    /// as solvents/ions. A heuristic exclusion, not a chemical classifier.
    #[serde(default = "default_min_ligand_weight")]
    pub min_ligand_weight: f64,

    /// Number of structures to keep after filtering and sorting.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Report malformed resolution values per record instead of silently
    /// excluding them. The record is dropped either way.
    #[serde(default)]
    pub strict: bool,
}

fn default_method() -> String { "X-RAY DIFFRACTION".to_string() }
fn default_max_resolution() -> f64 { 3.0 }
fn default_min_ligand_weight() -> f64 { 100.0 }
fn default_top_n() -> usize { 4 }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            max_resolution: default_max_resolution(),
            min_ligand_weight: default_min_ligand_weight(),
            top_n: default_top_n(),
            strict: false,
        }
    }
}

impl PipelineConfig {
    /// Validate cutoff ranges, consuming and returning the config.
    /// Negative cutoffs are a caller configuration error.
    pub fn validated(self) -> Result<Self> {
        if self.max_resolution < 0.0 {
            return Err(AlignyxError::Config(format!(
                "max_resolution must be non-negative, got {}",
                self.max_resolution
            )));
        }
        if self.min_ligand_weight < 0.0 {
            return Err(AlignyxError::Config(format!(
                "min_ligand_weight must be non-negative, got {}",
                self.min_ligand_weight
            )));
        }
        Ok(self)
    }
}
