//! The filter/sort/select core.
//!
//! Stages run strictly in order: method filter, resolution filter, stable
//! sort, ligand-presence filter, top-N truncation, largest-ligand selection.
//! Each stage is a pure transformation; the only awaited call is the ligand
//! lookup, which happens once per candidate in sorted order.

use std::cmp::Ordering;

use tracing::{debug, info};

use alignyx_common::{LigandRecord, ProteinLigandPair, StructureRecord};
use crate::config::PipelineConfig;
use crate::provider::LigandProvider;
use crate::report::{ExcludedStructure, MalformedResolution, PipelineReport, NO_QUALIFYING_LIGAND};

/// Parse a reported resolution value. Returns None for anything that is not
/// a plain number.
pub fn parse_resolution(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Retain records whose experimental method equals `method` exactly.
/// Case-sensitive; records without a method are dropped.
pub fn filter_by_method(records: Vec<StructureRecord>, method: &str) -> Vec<StructureRecord> {
    records
        .into_iter()
        .filter(|r| r.experimental_method.as_deref() == Some(method))
        .collect()
}

/// Retain records whose parsed resolution is at most `cutoff`. Unparsable or
/// missing values fail the predicate. With `strict`, each present but
/// unparsable value is reported per record; absent values stay silent.
pub fn filter_by_resolution(
    records: Vec<StructureRecord>,
    cutoff: f64,
    strict: bool,
) -> (Vec<StructureRecord>, Vec<MalformedResolution>) {
    let mut kept = Vec::new();
    let mut malformed = Vec::new();

    for record in records {
        match record.resolution_angstrom.as_deref() {
            Some(raw) => match parse_resolution(raw) {
                Some(value) if value <= cutoff => kept.push(record),
                Some(_) => {}
                None => {
                    if strict {
                        malformed.push(MalformedResolution {
                            structure_id: record.structure_id.clone(),
                            raw: raw.to_string(),
                        });
                    }
                }
            },
            None => {}
        }
    }

    (kept, malformed)
}

/// Stable ascending sort on parsed resolution. Records without a parsable
/// value sort last; ties and missing values keep their input order.
pub fn sort_by_resolution(records: &mut [StructureRecord]) {
    records.sort_by(|a, b| {
        let ra = a.resolution_angstrom.as_deref().and_then(parse_resolution);
        let rb = b.resolution_angstrom.as_deref().and_then(parse_resolution);
        match (ra, rb) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// True when at least one ligand sits strictly above the weight cutoff.
pub fn has_qualifying_ligand(ligands: &[LigandRecord], min_weight: f64) -> bool {
    ligands.iter().any(|l| l.molecular_weight > min_weight)
}

/// Pick the heaviest ligand by a strict greater-than scan starting from
/// weight 0.0: the first ligand at a given weight wins ties, and a set whose
/// weights are all at or below zero selects nothing. Matches the reference
/// behaviour exactly.
pub fn largest_ligand(ligands: &[LigandRecord]) -> Option<&LigandRecord> {
    let mut max_weight = 0.0;
    let mut best = None;
    for ligand in ligands {
        if ligand.molecular_weight > max_weight {
            max_weight = ligand.molecular_weight;
            best = Some(ligand);
        }
    }
    best
}

/// Ordered reduction of a full structure-metadata set to the final
/// structure → ligand pairing.
pub struct FilterPipeline {
    config: PipelineConfig,
}

impl FilterPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all stages over `records`. Collaborator failures from the ligand
    /// provider propagate; per-record data problems never do. An empty input
    /// yields an empty report.
    pub async fn run(
        &self,
        records: Vec<StructureRecord>,
        ligands: &dyn LigandProvider,
    ) -> anyhow::Result<PipelineReport> {
        let input_count = records.len();
        info!(input_count, "running structure filter pipeline");

        let by_method = filter_by_method(records, &self.config.method);
        debug!(kept = by_method.len(), "method filter applied");

        let (mut candidates, malformed_resolutions) =
            filter_by_resolution(by_method, self.config.max_resolution, self.config.strict);
        debug!(kept = candidates.len(), "resolution filter applied");

        sort_by_resolution(&mut candidates);

        // Ligand lookup happens in sorted order, before truncation, so a
        // structure dropped here frees a slot for the next candidate.
        let mut excluded = Vec::new();
        let mut survivors: Vec<(StructureRecord, Vec<LigandRecord>)> = Vec::new();
        for record in candidates {
            let ligand_set = ligands.ligands_for(&record.structure_id).await?;
            if has_qualifying_ligand(&ligand_set, self.config.min_ligand_weight) {
                survivors.push((record, ligand_set));
            } else {
                debug!("excluding {}: {}", record.structure_id, NO_QUALIFYING_LIGAND);
                excluded.push(ExcludedStructure {
                    structure_id: record.structure_id.clone(),
                    reason: NO_QUALIFYING_LIGAND.to_string(),
                });
            }
        }

        survivors.truncate(self.config.top_n);

        let mut shortlist = Vec::with_capacity(survivors.len());
        let mut pairs = Vec::with_capacity(survivors.len());
        let mut top_ligands = Vec::with_capacity(survivors.len());
        for (record, ligand_set) in survivors {
            if let Some(ligand) = largest_ligand(&ligand_set) {
                pairs.push(ProteinLigandPair::new(&record.structure_id, &ligand.chemical_id));
                top_ligands.push(ligand.clone());
            }
            shortlist.push(record);
        }

        info!(
            shortlisted = shortlist.len(),
            paired = pairs.len(),
            excluded = excluded.len(),
            "pipeline finished"
        );

        Ok(PipelineReport {
            pairs,
            top_ligands,
            shortlist,
            excluded,
            malformed_resolutions,
            input_count,
        })
    }
}
