//! RCSB nonpolymer-entity (ligand) client.
//!
//! Endpoints used:
//!   entry:             https://data.rcsb.org/rest/v1/core/entry/{id}
//!   nonpolymer entity: https://data.rcsb.org/rest/v1/core/nonpolymer_entity/{id}/{entity_id}
//!   chem comp:         https://data.rcsb.org/rest/v1/core/chemcomp/{comp_id}

use serde::Deserialize;
use alignyx_common::sandbox::SandboxClient as Client;
use alignyx_common::LigandRecord;
use tracing::{debug, instrument, warn};

const DATA_URL: &str = "https://data.rcsb.org/rest/v1/core";

pub struct RcsbLigandClient {
    client: Client,
}

#[derive(Deserialize)]
struct EntryIdsResponse {
    rcsb_entry_container_identifiers: Option<EntryContainerIdentifiers>,
}

#[derive(Deserialize)]
struct EntryContainerIdentifiers {
    non_polymer_entity_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct NonpolymerEntityResponse {
    pdbx_entity_nonpoly: Option<EntityNonpoly>,
}

#[derive(Deserialize)]
struct EntityNonpoly {
    comp_id: Option<String>,
}

#[derive(Deserialize)]
struct ChemCompResponse {
    chem_comp: Option<ChemCompData>,
    rcsb_chem_comp_descriptor: Option<ChemCompDescriptor>,
}

#[derive(Deserialize)]
struct ChemCompData {
    formula_weight: Option<f64>,
}

#[derive(Deserialize)]
struct ChemCompDescriptor {
    smiles: Option<String>,
}

impl RcsbLigandClient {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        let parsed = self
            .client
            .get(url)?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(parsed)
    }

    /// List the nonpolymer entity ids annotated on an entry. Entries without
    /// any bound chemical component return an empty list.
    async fn nonpolymer_entity_ids(&self, structure_id: &str) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/entry/{}", DATA_URL, structure_id);
        let resp: EntryIdsResponse = self.fetch_json(&url).await?;
        Ok(resp
            .rcsb_entry_container_identifiers
            .and_then(|ids| ids.non_polymer_entity_ids)
            .unwrap_or_default())
    }

    /// Fetch all annotated ligands of a structure with their chemical ids,
    /// component weights, and SMILES strings.
    #[instrument(skip(self))]
    pub async fn ligands_for(&self, structure_id: &str) -> anyhow::Result<Vec<LigandRecord>> {
        let entity_ids = self.nonpolymer_entity_ids(structure_id).await?;
        if entity_ids.is_empty() {
            debug!("no nonpolymer entities on {}", structure_id);
            return Ok(vec![]);
        }

        let mut ligands = Vec::new();
        for entity_id in &entity_ids {
            let url = format!("{}/nonpolymer_entity/{}/{}", DATA_URL, structure_id, entity_id);
            let entity: NonpolymerEntityResponse = match self.fetch_json(&url).await {
                Ok(e) => e,
                Err(e) => {
                    warn!("skipping nonpolymer entity {}/{}: {}", structure_id, entity_id, e);
                    continue;
                }
            };

            let comp_id = match entity.pdbx_entity_nonpoly.and_then(|n| n.comp_id) {
                Some(id) => id,
                None => continue,
            };

            let comp_url = format!("{}/chemcomp/{}", DATA_URL, comp_id);
            let comp: ChemCompResponse = match self.fetch_json(&comp_url).await {
                Ok(c) => c,
                Err(e) => {
                    warn!("skipping chem comp {}: {}", comp_id, e);
                    continue;
                }
            };

            // A component without a reported weight still counts as an
            // annotated ligand; it just never outweighs the solvent cutoff.
            let weight = comp
                .chem_comp
                .and_then(|c| c.formula_weight)
                .unwrap_or(0.0);
            let mut ligand = LigandRecord::new(structure_id, &comp_id, weight);
            ligand.smiles = comp.rcsb_chem_comp_descriptor.and_then(|d| d.smiles);
            ligands.push(ligand);
        }

        debug!(count = ligands.len(), "fetched ligands for {}", structure_id);
        Ok(ligands)
    }
}
