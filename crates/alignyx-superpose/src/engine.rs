//! Alignment engine abstraction.

use std::path::PathBuf;

use async_trait::async_trait;

/// One alignment invocation: superimpose `mobile` onto the fixed reference
/// and export the aligned coordinates plus the chosen ligand selection.
#[derive(Debug, Clone)]
pub struct AlignmentJob {
    pub mobile_id: String,
    pub mobile_path: PathBuf,
    pub reference_id: String,
    pub reference_path: PathBuf,
    /// Chemical id of the ligand to extract from the aligned structure.
    pub ligand_id: String,
    pub out_dir: PathBuf,
}

/// What the engine reported back: the fit quality and the exported files.
#[derive(Debug, Clone)]
pub struct AlignmentOutcome {
    /// RMSD-like quality score; higher means worse fit.
    pub rmsd: f64,
    pub aligned_path: PathBuf,
    pub ligand_path: PathBuf,
}

/// External 3D alignment engine. The only contract the caller relies on is
/// the returned quality score and the two exported files.
#[async_trait]
pub trait AlignmentEngine: Send + Sync {
    async fn align(&self, job: &AlignmentJob) -> anyhow::Result<AlignmentOutcome>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Mock engine returning scripted RMSD values. Writes placeholder output
/// files so skip handling can be exercised end to end.
pub struct MockAlignmentEngine {
    rmsds: std::collections::HashMap<String, f64>,
}

impl MockAlignmentEngine {
    pub fn new() -> Self {
        Self {
            rmsds: std::collections::HashMap::new(),
        }
    }

    /// Script the RMSD reported for a mobile structure id.
    pub fn with(mut self, mobile_id: &str, rmsd: f64) -> Self {
        self.rmsds.insert(mobile_id.to_string(), rmsd);
        self
    }
}

impl Default for MockAlignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlignmentEngine for MockAlignmentEngine {
    async fn align(&self, job: &AlignmentJob) -> anyhow::Result<AlignmentOutcome> {
        let rmsd = self
            .rmsds
            .get(&job.mobile_id)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("no scripted rmsd for {}", job.mobile_id))?;

        let stem = job.mobile_id.to_lowercase();
        let aligned_path = job.out_dir.join(format!("{}_algn.pdb", stem));
        let ligand_path = job.out_dir.join(format!("{}_lig.pdb", stem));
        tokio::fs::create_dir_all(&job.out_dir).await?;
        tokio::fs::write(&aligned_path, b"REMARK aligned\n").await?;
        tokio::fs::write(&ligand_path, b"REMARK ligand\n").await?;

        Ok(AlignmentOutcome {
            rmsd,
            aligned_path,
            ligand_path,
        })
    }
}
