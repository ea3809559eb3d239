//! Batch PyMOL invocation.
//!
//! Runs `pymol -cq` on a generated command script and reads the alignment
//! quality back from the `Executive: RMSD = ...` line on stdout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, info};

use alignyx_common::error::AlignyxError;
use crate::engine::{AlignmentEngine, AlignmentJob, AlignmentOutcome};

/// Wrapper for headless PyMOL execution.
pub struct PymolEngine {
    executable_path: PathBuf,
    rmsd_pattern: Regex,
}

impl PymolEngine {
    /// Create a new PymolEngine for the given executable.
    pub fn new<P: AsRef<Path>>(executable_path: P) -> Self {
        Self {
            executable_path: executable_path.as_ref().to_path_buf(),
            rmsd_pattern: Regex::new(r"RMSD\s*=\s*([0-9]+(?:\.[0-9]+)?)")
                .expect("static pattern"),
        }
    }

    /// Build the command script for one alignment job. Object names reuse
    /// the structure ids; exports land next to each other in `out_dir`.
    fn build_script(job: &AlignmentJob, aligned_path: &Path, ligand_path: &Path) -> String {
        let mut script = String::new();
        script.push_str(&format!(
            "load {}, {}\n",
            job.reference_path.display(),
            job.reference_id
        ));
        script.push_str(&format!(
            "load {}, {}\n",
            job.mobile_path.display(),
            job.mobile_id
        ));
        script.push_str(&format!("align {}, {}\n", job.mobile_id, job.reference_id));
        script.push_str(&format!(
            "save {}, {}\n",
            aligned_path.display(),
            job.mobile_id
        ));
        script.push_str(&format!(
            "select picked_ligand, {} and resn {}\n",
            job.mobile_id, job.ligand_id
        ));
        script.push_str(&format!("save {}, picked_ligand\n", ligand_path.display()));
        script
    }

    fn parse_rmsd(&self, stdout: &str) -> Result<f64, AlignyxError> {
        self.rmsd_pattern
            .captures(stdout)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .ok_or_else(|| {
                AlignyxError::Engine("no RMSD found in engine output".to_string())
            })
    }
}

#[async_trait]
impl AlignmentEngine for PymolEngine {
    async fn align(&self, job: &AlignmentJob) -> anyhow::Result<AlignmentOutcome> {
        let stem = job.mobile_id.to_lowercase();
        let aligned_path = job.out_dir.join(format!("{}_algn.pdb", stem));
        let ligand_path = job.out_dir.join(format!("{}_lig.pdb", stem));
        let script_path = job.out_dir.join(format!("{}_align.pml", stem));

        tokio::fs::create_dir_all(&job.out_dir).await?;
        let script = Self::build_script(job, &aligned_path, &ligand_path);
        tokio::fs::write(&script_path, &script).await?;

        info!("Aligning {} to {} with PyMOL", job.mobile_id, job.reference_id);
        let output = Command::new(&self.executable_path)
            .arg("-cq")
            .arg(&script_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AlignyxError::Engine(format!("PyMOL failed: {}", stderr)).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let rmsd = self.parse_rmsd(&stdout)?;
        debug!(rmsd, "PyMOL alignment completed");

        Ok(AlignmentOutcome {
            rmsd,
            aligned_path,
            ligand_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> AlignmentJob {
        AlignmentJob {
            mobile_id: "2ITY".to_string(),
            mobile_path: PathBuf::from("cache/2ity.pdb"),
            reference_id: "1M17".to_string(),
            reference_path: PathBuf::from("cache/1m17.pdb"),
            ligand_id: "IRE".to_string(),
            out_dir: PathBuf::from("out"),
        }
    }

    #[test]
    fn test_build_script() {
        let j = job();
        let aligned = j.out_dir.join("2ity_algn.pdb");
        let ligand = j.out_dir.join("2ity_lig.pdb");
        let script = PymolEngine::build_script(&j, &aligned, &ligand);

        assert!(script.contains("load cache/1m17.pdb, 1M17"));
        assert!(script.contains("load cache/2ity.pdb, 2ITY"));
        assert!(script.contains("align 2ITY, 1M17"));
        assert!(script.contains("resn IRE"));
        assert!(script.ends_with("save out/2ity_lig.pdb, picked_ligand\n"));
    }

    #[test]
    fn test_parse_rmsd() {
        let engine = PymolEngine::new("pymol");
        let stdout = " Executive: RMSD =    1.234 (523 to 523 atoms)\n";
        assert_eq!(engine.parse_rmsd(stdout).unwrap(), 1.234);
    }

    #[test]
    fn test_parse_rmsd_integer_value() {
        let engine = PymolEngine::new("pymol");
        assert_eq!(engine.parse_rmsd("RMSD = 2 (10 atoms)").unwrap(), 2.0);
    }

    #[test]
    fn test_parse_rmsd_missing_is_engine_error() {
        let engine = PymolEngine::new("pymol");
        let err = engine.parse_rmsd("PyMOL: normal program termination.").unwrap_err();
        assert!(matches!(err, AlignyxError::Engine(_)));
    }
}
