//! Configuration loading for alignyx.
//! Reads alignyx.toml from the current directory or the path in the
//! ALIGNYX_CONFIG env var.

use serde::{Deserialize, Serialize};
use std::path::Path;

use alignyx_ranker::PipelineConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub target: TargetConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub alignment: AlignmentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// UniProt accession of the query protein, e.g. "P00533".
    pub accession: String,
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,
}

fn default_max_search_results() -> usize { 200 }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default = "default_pymol_path")]
    pub pymol_path: String,
    /// Alignments scoring above this are discarded from the exported files.
    #[serde(default = "default_rmsd_threshold")]
    pub rmsd_threshold: f64,
    /// Coordinate-file format to download and align ("pdb" or "cif").
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_pymol_path()     -> String { "pymol".to_string() }
fn default_rmsd_threshold() -> f64 { 5.0 }
fn default_format()         -> String { "pdb".to_string() }

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            pymol_path: default_pymol_path(),
            rmsd_threshold: default_rmsd_threshold(),
            format: default_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default = "default_ligand_table")]
    pub ligand_table: String,
    #[serde(default = "default_alignment_log")]
    pub alignment_log: String,
}

fn default_work_dir()      -> String { "alignyx_out".to_string() }
fn default_cache_dir()     -> String { "cache".to_string() }
fn default_ligand_table()  -> String { "ligands.tsv".to_string() }
fn default_alignment_log() -> String { "alignment.log".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            cache_dir: default_cache_dir(),
            ligand_table: default_ligand_table(),
            alignment_log: default_alignment_log(),
        }
    }
}

impl Config {
    /// Load from ALIGNYX_CONFIG or ./alignyx.toml.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("ALIGNYX_CONFIG").unwrap_or_else(|_| "alignyx.toml".to_string());
        Self::from_path(&path)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow::anyhow!("cannot read config {}: {}", path.as_ref().display(), e)
        })?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }
}
