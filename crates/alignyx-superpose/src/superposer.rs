//! Reference/query superposition over the ordered pairing.
//!
//! The first structure in the pairing becomes the immobile reference; every
//! later structure is aligned to it. Alignments whose quality score exceeds
//! the threshold are dropped from the exported files but stay in the
//! metadata shortlist.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use alignyx_common::ProteinLigandPair;
use crate::alignment_log::AlignmentLog;
use crate::engine::{AlignmentEngine, AlignmentJob};

/// Superposition process state: either the reference is still to be
/// designated, or it is fixed and everything else aligns against it.
enum AlignState {
    AwaitingTarget,
    Aligning {
        target_id: String,
        target_path: PathBuf,
    },
}

/// What a superposition pass produced.
#[derive(Debug, Default)]
pub struct SuperposeOutcome {
    /// The immobile reference, if any structure was processed.
    pub target_id: Option<String>,
    /// Successfully aligned structure ids, in processing order.
    pub aligned: Vec<String>,
    /// Structures whose alignment was discarded for bad fit.
    pub skipped: Vec<String>,
    pub log: AlignmentLog,
}

pub struct Superposer<'a> {
    engine: &'a dyn AlignmentEngine,
    rmsd_threshold: f64,
}

impl<'a> Superposer<'a> {
    pub fn new(engine: &'a dyn AlignmentEngine, rmsd_threshold: f64) -> Self {
        Self {
            engine,
            rmsd_threshold,
        }
    }

    /// Process the pairing in order. `files` maps structure id to its local
    /// coordinate file; a missing entry is a caller error. Engine failures
    /// propagate; a bad fit is an outcome, not an error.
    pub async fn superpose(
        &self,
        pairs: &[ProteinLigandPair],
        files: &HashMap<String, PathBuf>,
        out_dir: &Path,
    ) -> anyhow::Result<SuperposeOutcome> {
        let mut outcome = SuperposeOutcome::default();
        let mut state = AlignState::AwaitingTarget;

        for pair in pairs {
            let path = files.get(&pair.structure_id).ok_or_else(|| {
                anyhow::anyhow!("no coordinate file for {}", pair.structure_id)
            })?;

            match &state {
                AlignState::AwaitingTarget => {
                    info!("Immobile target: {}", pair.structure_id);
                    outcome.log.record_target(&pair.structure_id);
                    outcome.target_id = Some(pair.structure_id.clone());
                    state = AlignState::Aligning {
                        target_id: pair.structure_id.clone(),
                        target_path: path.clone(),
                    };
                }
                AlignState::Aligning {
                    target_id,
                    target_path,
                } => {
                    outcome.log.record_align(&pair.structure_id, target_id);
                    let job = AlignmentJob {
                        mobile_id: pair.structure_id.clone(),
                        mobile_path: path.clone(),
                        reference_id: target_id.clone(),
                        reference_path: target_path.clone(),
                        ligand_id: pair.chemical_id.clone(),
                        out_dir: out_dir.to_path_buf(),
                    };
                    let result = self.engine.align(&job).await?;

                    if result.rmsd > self.rmsd_threshold {
                        warn!(
                            rmsd = result.rmsd,
                            threshold = self.rmsd_threshold,
                            "bad alignment, skipping {}",
                            pair.structure_id
                        );
                        outcome.log.record_bad_alignment();
                        outcome.skipped.push(pair.structure_id.clone());
                        // The engine has already exported; a skipped
                        // structure must not leave files behind.
                        let _ = tokio::fs::remove_file(&result.aligned_path).await;
                        let _ = tokio::fs::remove_file(&result.ligand_path).await;
                    } else {
                        outcome.aligned.push(pair.structure_id.clone());
                    }
                }
            }
        }

        Ok(outcome)
    }
}
