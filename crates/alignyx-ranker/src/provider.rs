//! Trait for ligand data access.
//!
//! Abstracts over the ligand metadata source so the pipeline can run against
//! the live RCSB client, a cache, or mock data in tests.

use async_trait::async_trait;
use alignyx_common::LigandRecord;

/// Access to the annotated ligand set of a structure.
#[async_trait]
pub trait LigandProvider: Send + Sync {
    /// Ligands annotated on a structure. An empty vec is the explicit
    /// "no ligand" marker; errors mean the collaborator itself failed and
    /// must propagate to the caller.
    async fn ligands_for(&self, structure_id: &str) -> anyhow::Result<Vec<LigandRecord>>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock provider with hardcoded ligand sets for unit tests.
pub struct MockLigandProvider {
    data: std::collections::HashMap<String, Vec<LigandRecord>>,
}

impl MockLigandProvider {
    pub fn new() -> Self {
        Self {
            data: std::collections::HashMap::new(),
        }
    }

    /// Add a structure's ligand set.
    pub fn with(mut self, structure_id: &str, ligands: Vec<LigandRecord>) -> Self {
        self.data.insert(structure_id.to_string(), ligands);
        self
    }
}

impl Default for MockLigandProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LigandProvider for MockLigandProvider {
    async fn ligands_for(&self, structure_id: &str) -> anyhow::Result<Vec<LigandRecord>> {
        Ok(self.data.get(structure_id).cloned().unwrap_or_default())
    }
}

// ── Adapter for RcsbLigandClient ─────────────────────────────────────────────

/// Adapter that exposes `alignyx_ingestion::RcsbLigandClient` as a
/// [`LigandProvider`], so the pipeline stays decoupled from the HTTP layer.
pub struct RcsbLigandAdapter {
    client: alignyx_ingestion::RcsbLigandClient,
}

impl RcsbLigandAdapter {
    /// Create a new adapter wrapping a ligand client.
    pub fn new(client: alignyx_ingestion::RcsbLigandClient) -> Self {
        Self { client }
    }

    /// Create a new adapter with a freshly constructed client.
    pub fn init() -> anyhow::Result<Self> {
        Ok(Self {
            client: alignyx_ingestion::RcsbLigandClient::new()?,
        })
    }
}

#[async_trait]
impl LigandProvider for RcsbLigandAdapter {
    async fn ligands_for(&self, structure_id: &str) -> anyhow::Result<Vec<LigandRecord>> {
        self.client.ligands_for(structure_id).await
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
