//! Pipeline run outcome types.

use serde::{Deserialize, Serialize};
use alignyx_common::{LigandRecord, ProteinLigandPair, StructureRecord};

/// Reason string recorded when a structure has no ligand above the weight
/// cutoff (or none at all).
pub const NO_QUALIFYING_LIGAND: &str = "no qualifying ligand";

/// A structure dropped by the ligand-presence filter, with the reason kept
/// for observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedStructure {
    pub structure_id: String,
    pub reason: String,
}

/// A present-but-unparsable resolution value, reported per record in strict
/// mode. Never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalformedResolution {
    pub structure_id: String,
    pub raw: String,
}

/// Everything a pipeline run produced: the ordered pairing handed to the
/// download/alignment stage, the surviving records, and the per-record
/// conditions met along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineReport {
    /// structure id → chosen ligand, in shortlist order.
    pub pairs: Vec<ProteinLigandPair>,
    /// Full records of the chosen ligands, parallel to `pairs`. This is what
    /// the ligand table is written from.
    pub top_ligands: Vec<LigandRecord>,
    /// The retained top-N records, in sorted order.
    pub shortlist: Vec<StructureRecord>,
    /// Structures dropped by the ligand-presence filter.
    pub excluded: Vec<ExcludedStructure>,
    /// Strict-mode resolution parse failures.
    pub malformed_resolutions: Vec<MalformedResolution>,
    /// Size of the input record set before any filtering.
    pub input_count: usize,
}
