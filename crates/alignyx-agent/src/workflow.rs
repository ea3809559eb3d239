//! End-to-end run: search, metadata, shortlist, download, superpose, write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use alignyx_common::StructureRecord;
use alignyx_ingestion::sources::{EntrySource, StructureFileSource, StructureSearchSource};
use alignyx_ingestion::CoordFormat;
use alignyx_ranker::{FilterPipeline, LigandProvider};
use alignyx_superpose::{write_ligand_table, AlignmentEngine, Superposer};

use crate::config::Config;

/// Closing report of one workflow run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub accession: String,
    pub started_at: DateTime<Utc>,
    pub candidates_found: usize,
    pub records_fetched: usize,
    pub shortlisted: usize,
    pub paired: usize,
    pub aligned: usize,
    pub skipped: usize,
}

/// Run the full workflow against the given collaborators. Collaborators are
/// trait objects so tests can substitute fixtures for the live services.
pub async fn run_workflow(
    config: &Config,
    search: &dyn StructureSearchSource,
    entries: &dyn EntrySource,
    ligands: &dyn LigandProvider,
    files: &dyn StructureFileSource,
    engine: &dyn AlignmentEngine,
) -> anyhow::Result<RunSummary> {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let accession = config.target.accession.clone();
    info!(%run_id, %accession, "starting alignyx run");

    let format = CoordFormat::parse(&config.alignment.format).ok_or_else(|| {
        alignyx_common::AlignyxError::Config(format!(
            "unknown coordinate format {:?}",
            config.alignment.format
        ))
    })?;

    // 1. Candidate structure ids for the query protein
    let candidate_ids = search
        .search(&accession, config.target.max_search_results)
        .await?;
    info!(count = candidate_ids.len(), "structure search finished");

    // 2. Metadata records. A single unavailable entry is not worth failing
    //    the whole run over.
    let mut records: Vec<StructureRecord> = Vec::with_capacity(candidate_ids.len());
    for id in &candidate_ids {
        match entries.fetch_entry(id).await {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping entry {}: {}", id, e),
        }
    }
    let records_fetched = records.len();

    // 3. Filter/rank shortlist
    let pipeline = FilterPipeline::new(config.pipeline.clone().validated()?);
    let report = pipeline.run(records, ligands).await?;
    for excluded in &report.excluded {
        info!("excluded {}: {}", excluded.structure_id, excluded.reason);
    }
    for malformed in &report.malformed_resolutions {
        warn!(
            "malformed resolution on {}: {:?}",
            malformed.structure_id, malformed.raw
        );
    }

    // 4. Coordinate files for the pairing
    let work_dir = Path::new(&config.output.work_dir);
    tokio::fs::create_dir_all(work_dir).await?;
    let mut coord_files: HashMap<String, PathBuf> = HashMap::new();
    for pair in &report.pairs {
        let path = files.fetch_structure(&pair.structure_id, format).await?;
        coord_files.insert(pair.structure_id.clone(), path);
    }

    // 5. Superposition
    let superposer = Superposer::new(engine, config.alignment.rmsd_threshold);
    let outcome = superposer
        .superpose(&report.pairs, &coord_files, work_dir)
        .await?;

    // 6. Durable outputs
    write_ligand_table(work_dir.join(&config.output.ligand_table), &report.top_ligands)?;
    outcome
        .log
        .write_to(work_dir.join(&config.output.alignment_log))
        .await?;

    let summary = RunSummary {
        run_id,
        accession,
        started_at,
        candidates_found: candidate_ids.len(),
        records_fetched,
        shortlisted: report.shortlist.len(),
        paired: report.pairs.len(),
        aligned: outcome.aligned.len(),
        skipped: outcome.skipped.len(),
    };
    info!(
        shortlisted = summary.shortlisted,
        aligned = summary.aligned,
        skipped = summary.skipped,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetConfig;
    use alignyx_common::LigandRecord;
    use alignyx_ingestion::sources::{
        MockEntrySource, MockStructureFileSource, MockStructureSearchSource,
    };
    use alignyx_ranker::MockLigandProvider;
    use alignyx_superpose::MockAlignmentEngine;

    fn record(id: &str, resolution: &str) -> StructureRecord {
        let mut r = StructureRecord::new(id);
        r.experimental_method = Some("X-RAY DIFFRACTION".to_string());
        r.resolution_angstrom = Some(resolution.to_string());
        r
    }

    fn test_config(work_dir: &Path, cache_dir: &Path) -> Config {
        Config {
            target: TargetConfig {
                accession: "P00533".to_string(),
                max_search_results: 100,
            },
            pipeline: Default::default(),
            alignment: Default::default(),
            output: crate::config::OutputConfig {
                work_dir: work_dir.display().to_string(),
                cache_dir: cache_dir.display().to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_workflow_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("out");
        let cache_dir = dir.path().join("cache");
        let config = test_config(&work_dir, &cache_dir);

        let search = MockStructureSearchSource::new()
            .with("1M17")
            .with("2ITY")
            .with("9NMR");
        let entries = MockEntrySource::new()
            .with(record("1M17", "2.6"))
            .with(record("2ITY", "3.42"))
            .with({
                let mut r = StructureRecord::new("9NMR");
                r.experimental_method = Some("SOLUTION NMR".to_string());
                r
            });
        let ligands = MockLigandProvider::new()
            .with("1M17", vec![LigandRecord::new("1M17", "AQ4", 393.9)])
            .with("2ITY", vec![LigandRecord::new("2ITY", "IRE", 446.9)]);
        let files = MockStructureFileSource::new(&cache_dir);
        let engine = MockAlignmentEngine::new();

        let summary = run_workflow(&config, &search, &entries, &ligands, &files, &engine)
            .await
            .unwrap();

        // 2ITY fails the 3.0 A cutoff, 9NMR fails the method filter
        assert_eq!(summary.candidates_found, 3);
        assert_eq!(summary.records_fetched, 3);
        assert_eq!(summary.shortlisted, 1);
        assert_eq!(summary.paired, 1);
        // A lone structure is the immobile target; nothing aligns against it
        assert_eq!(summary.aligned, 0);
        assert_eq!(summary.skipped, 0);

        let table = std::fs::read_to_string(work_dir.join("ligands.tsv")).unwrap();
        assert!(table.contains("1M17\tAQ4\t393.9"));
        let log = std::fs::read_to_string(work_dir.join("alignment.log")).unwrap();
        assert_eq!(log, "Immobile target: 1M17\n");
    }

    #[tokio::test]
    async fn test_workflow_bad_alignment_skip() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("out");
        let cache_dir = dir.path().join("cache");
        let config = test_config(&work_dir, &cache_dir);

        let search = MockStructureSearchSource::new()
            .with("1M17")
            .with("2ITY")
            .with("3W2S");
        let entries = MockEntrySource::new()
            .with(record("1M17", "2.6"))
            .with(record("2ITY", "2.8"))
            .with(record("3W2S", "1.9"));
        let ligands = MockLigandProvider::new()
            .with("1M17", vec![LigandRecord::new("1M17", "AQ4", 393.9)])
            .with("2ITY", vec![LigandRecord::new("2ITY", "IRE", 446.9)])
            .with("3W2S", vec![LigandRecord::new("3W2S", "W2R", 475.5)]);
        let files = MockStructureFileSource::new(&cache_dir);
        // Sorted order is 3W2S (1.9), 1M17 (2.6), 2ITY (2.8); 3W2S becomes
        // the target and 2ITY aligns badly
        let engine = MockAlignmentEngine::new().with("1M17", 0.7).with("2ITY", 6.2);

        let summary = run_workflow(&config, &search, &entries, &ligands, &files, &engine)
            .await
            .unwrap();

        assert_eq!(summary.shortlisted, 3);
        assert_eq!(summary.aligned, 1);
        assert_eq!(summary.skipped, 1);

        // The skipped structure stays in the shortlist outputs but leaves no
        // aligned/ligand files behind
        let table = std::fs::read_to_string(work_dir.join("ligands.tsv")).unwrap();
        assert!(table.contains("2ITY\tIRE"));
        assert!(!work_dir.join("2ity_algn.pdb").exists());
        assert!(work_dir.join("1m17_algn.pdb").exists());

        let log = std::fs::read_to_string(work_dir.join("alignment.log")).unwrap();
        assert_eq!(
            log,
            "Immobile target: 3W2S\n-- align 1M17 to 3W2S\n-- align 2ITY to 3W2S\n--- bad alignment: skip structure\n"
        );
    }

    #[tokio::test]
    async fn test_workflow_empty_search_result() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("out");
        let cache_dir = dir.path().join("cache");
        let config = test_config(&work_dir, &cache_dir);

        let summary = run_workflow(
            &config,
            &MockStructureSearchSource::new(),
            &MockEntrySource::new(),
            &MockLigandProvider::new(),
            &MockStructureFileSource::new(&cache_dir),
            &MockAlignmentEngine::new(),
        )
        .await
        .unwrap();

        assert_eq!(summary.candidates_found, 0);
        assert_eq!(summary.paired, 0);
        // Outputs are still written, just empty
        assert!(work_dir.join("ligands.tsv").exists());
    }
}
