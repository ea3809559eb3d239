//! alignyx — Structure shortlisting and superposition for a query protein.
//! Entry point for the agent binary.

mod config;
mod workflow;

use tracing::info;
use tracing_subscriber::EnvFilter;

use alignyx_ingestion::sources::entry::RcsbEntryClient;
use alignyx_ingestion::sources::search::RcsbSearchClient;
use alignyx_ingestion::StructureFetcher;
use alignyx_ranker::RcsbLigandAdapter;
use alignyx_superpose::PymolEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ALIGNYX_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::load()?;
    info!(
        accession = %config.target.accession,
        "loaded configuration"
    );

    let search = RcsbSearchClient::new()?;
    let entries = RcsbEntryClient::new()?;
    let ligands = RcsbLigandAdapter::init()?;
    let files = StructureFetcher::new(&config.output.cache_dir)?;
    let engine = PymolEngine::new(&config.alignment.pymol_path);

    let summary =
        workflow::run_workflow(&config, &search, &entries, &ligands, &files, &engine).await?;

    println!(
        "run {}: {} candidates, {} shortlisted, {} aligned, {} skipped",
        summary.run_id,
        summary.candidates_found,
        summary.shortlisted,
        summary.aligned,
        summary.skipped
    );
    Ok(())
}
