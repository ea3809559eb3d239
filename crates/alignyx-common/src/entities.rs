/// Core entity types shared between the ingestion clients, the filter
/// pipeline, and the superposition stage.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

/// One structure-metadata record returned by the database lookup for a
/// query protein. `structure_id` is unique within a single result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRecord {
    pub structure_id: String,
    pub experimental_method: Option<String>,
    /// Raw resolution value as reported by the data source. Kept textual and
    /// parsed defensively where it is consumed; unparsable values are a
    /// per-record condition, never fatal.
    pub resolution_angstrom: Option<String>,
    pub title: Option<String>,
    pub deposited: Option<String>,
}

impl StructureRecord {
    pub fn new(structure_id: &str) -> Self {
        Self {
            structure_id: structure_id.to_string(),
            experimental_method: None,
            resolution_angstrom: None,
            title: None,
            deposited: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Ligand
// ---------------------------------------------------------------------------

/// One annotated ligand attached to a structure. A structure owns zero or
/// more of these; the association is always a collection, even for a single
/// ligand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LigandRecord {
    pub chemical_id: String,
    pub molecular_weight: f64,
    pub structure_id: String,
    pub smiles: Option<String>,
}

impl LigandRecord {
    pub fn new(structure_id: &str, chemical_id: &str, molecular_weight: f64) -> Self {
        Self {
            chemical_id: chemical_id.to_string(),
            molecular_weight,
            structure_id: structure_id.to_string(),
            smiles: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Protein-ligand pairing
// ---------------------------------------------------------------------------

/// Chosen structure/ligand association, one per retained structure.
/// Pair order is the filtered/sorted structure order and is fixed once the
/// pairing is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProteinLigandPair {
    pub structure_id: String,
    pub chemical_id: String,
}

impl ProteinLigandPair {
    pub fn new(structure_id: &str, chemical_id: &str) -> Self {
        Self {
            structure_id: structure_id.to_string(),
            chemical_id: chemical_id.to_string(),
        }
    }
}
