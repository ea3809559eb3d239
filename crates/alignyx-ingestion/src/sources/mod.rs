//! Structural-database source clients.

pub mod search;
pub mod entry;
pub mod ligand;
pub mod files;

use std::path::PathBuf;

use async_trait::async_trait;
use alignyx_common::StructureRecord;

use self::files::CoordFormat;

/// Common interface for structure search backends.
#[async_trait]
pub trait StructureSearchSource: Send + Sync {
    /// Search for structures of a protein by sequence-database accession,
    /// returns candidate structure identifiers.
    async fn search(
        &self,
        accession: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<String>>;
}

/// Common interface for structure-metadata backends.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Fetch the metadata record for one structure identifier.
    async fn fetch_entry(&self, structure_id: &str) -> anyhow::Result<StructureRecord>;
}

/// Common interface for coordinate-file retrieval backends.
#[async_trait]
pub trait StructureFileSource: Send + Sync {
    /// Materialize the coordinate file for a structure on local disk and
    /// return its path.
    async fn fetch_structure(
        &self,
        structure_id: &str,
        format: CoordFormat,
    ) -> anyhow::Result<PathBuf>;
}

// ── Mock Implementations for Testing ────────────────────────────────────────

/// Mock search source with a fixed hit list.
pub struct MockStructureSearchSource {
    hits: Vec<String>,
}

impl MockStructureSearchSource {
    pub fn new() -> Self {
        Self { hits: Vec::new() }
    }

    /// Add a structure id to the fixed result set.
    pub fn with(mut self, structure_id: &str) -> Self {
        self.hits.push(structure_id.to_string());
        self
    }
}

impl Default for MockStructureSearchSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StructureSearchSource for MockStructureSearchSource {
    async fn search(&self, _accession: &str, max_results: usize) -> anyhow::Result<Vec<String>> {
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }
}

/// Mock entry source with hardcoded records.
pub struct MockEntrySource {
    records: std::collections::HashMap<String, StructureRecord>,
}

impl MockEntrySource {
    pub fn new() -> Self {
        Self {
            records: std::collections::HashMap::new(),
        }
    }

    /// Add a record, keyed by its structure id.
    pub fn with(mut self, record: StructureRecord) -> Self {
        self.records.insert(record.structure_id.clone(), record);
        self
    }
}

impl Default for MockEntrySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntrySource for MockEntrySource {
    async fn fetch_entry(&self, structure_id: &str) -> anyhow::Result<StructureRecord> {
        self.records
            .get(structure_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no entry for {}", structure_id))
    }
}

/// Mock file source that writes placeholder coordinate files into a
/// directory instead of downloading them.
pub struct MockStructureFileSource {
    dir: PathBuf,
}

impl MockStructureFileSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl StructureFileSource for MockStructureFileSource {
    async fn fetch_structure(
        &self,
        structure_id: &str,
        format: CoordFormat,
    ) -> anyhow::Result<PathBuf> {
        let path = self.dir.join(format!(
            "{}.{}",
            structure_id.to_lowercase(),
            format.extension()
        ));
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, format!("REMARK placeholder for {}\n", structure_id)).await?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_search_source() {
        let source = MockStructureSearchSource::new().with("1ABC").with("2DEF");
        let hits = source.search("P00533", 10).await.unwrap();
        assert_eq!(hits, vec!["1ABC".to_string(), "2DEF".to_string()]);

        let capped = source.search("P00533", 1).await.unwrap();
        assert_eq!(capped.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_entry_source() {
        let mut record = StructureRecord::new("1ABC");
        record.experimental_method = Some("X-RAY DIFFRACTION".to_string());
        let source = MockEntrySource::new().with(record);

        let fetched = source.fetch_entry("1ABC").await.unwrap();
        assert_eq!(fetched.experimental_method.as_deref(), Some("X-RAY DIFFRACTION"));
        assert!(source.fetch_entry("9ZZZ").await.is_err());
    }
}
