//! Coordinate-file retrieval with an on-disk cache.

use anyhow::Result;
use async_trait::async_trait;
use alignyx_common::sandbox::SandboxClient as Client;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::StructureFileSource;

/// Coordinate-file format selector for downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordFormat {
    Pdb,
    Cif,
}

impl CoordFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CoordFormat::Pdb => "pdb",
            CoordFormat::Cif => "cif",
        }
    }

    /// Parse a configured format name. Unknown names are a caller error.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pdb" => Some(CoordFormat::Pdb),
            "cif" | "mmcif" => Some(CoordFormat::Cif),
            _ => None,
        }
    }
}

/// Client for fetching structure coordinate files from RCSB.
pub struct StructureFetcher {
    client: Client,
    cache_dir: PathBuf,
}

impl StructureFetcher {
    /// Create a new StructureFetcher with the given cache directory.
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        Ok(Self {
            client: Client::new()?,
            cache_dir: cache_dir.as_ref().to_path_buf(),
        })
    }

    /// Fetch a coordinate file by structure id, in the requested format.
    /// Files already present in the cache are not re-downloaded.
    pub async fn fetch(&self, structure_id: &str, format: CoordFormat) -> Result<PathBuf> {
        let file_name = format!("{}.{}", structure_id.to_lowercase(), format.extension());
        let file_path = self.cache_dir.join(&file_name);

        if file_path.exists() {
            debug!("structure {} found in cache", structure_id);
            return Ok(file_path);
        }

        info!("Fetching structure {} from RCSB", structure_id);
        let url = format!("https://files.rcsb.org/download/{}", file_name);
        let response = self.client.get(&url)?.send().await?.error_for_status()?;
        let content = response.bytes().await?;

        fs::create_dir_all(&self.cache_dir).await?;
        fs::write(&file_path, content).await?;

        Ok(file_path)
    }
}

#[async_trait]
impl StructureFileSource for StructureFetcher {
    async fn fetch_structure(
        &self,
        structure_id: &str,
        format: CoordFormat,
    ) -> anyhow::Result<PathBuf> {
        self.fetch(structure_id, format).await
    }
}
