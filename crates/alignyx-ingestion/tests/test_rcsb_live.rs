//! Live tests against the public RCSB APIs.
//!
//! Requires network access. Run with:
//! ```bash
//! cargo test --package alignyx-ingestion --test test_rcsb_live -- --ignored --nocapture
//! ```

use alignyx_ingestion::sources::entry::RcsbEntryClient;
use alignyx_ingestion::sources::search::RcsbSearchClient;
use alignyx_ingestion::sources::{EntrySource, StructureSearchSource};
use alignyx_ingestion::{CoordFormat, RcsbLigandClient, StructureFetcher};

#[tokio::test]
#[ignore] // Requires network access
async fn test_search_egfr_structures() {
    let client = RcsbSearchClient::new().unwrap();
    // EGFR has hundreds of deposited structures
    let ids = client.search("P00533", 10).await.unwrap();
    println!("search returned: {:?}", ids);
    assert!(!ids.is_empty());
    assert!(ids.len() <= 10);
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_fetch_entry_metadata() {
    let client = RcsbEntryClient::new().unwrap();
    let record = client.fetch_entry("1M17").await.unwrap();
    println!("entry: {:?}", record);
    assert_eq!(record.structure_id, "1M17");
    assert_eq!(record.experimental_method.as_deref(), Some("X-RAY DIFFRACTION"));
    assert!(record.resolution_angstrom.is_some());
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_fetch_ligands() {
    let client = RcsbLigandClient::new().unwrap();
    // 1M17 carries erlotinib (AQ4)
    let ligands = client.ligands_for("1M17").await.unwrap();
    println!("ligands: {:?}", ligands);
    assert!(ligands.iter().any(|l| l.chemical_id == "AQ4"));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_fetch_structure_file() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = StructureFetcher::new(dir.path()).unwrap();
    let path = fetcher.fetch("1CRN", CoordFormat::Pdb).await.unwrap();
    assert!(path.exists());
}
