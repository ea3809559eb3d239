//! alignyx-ingestion — Clients for the public structural-database HTTP APIs.
//!
//! Everything here is a thin collaborator: structure search, entry metadata,
//! ligand (nonpolymer entity) metadata, and coordinate-file retrieval. The
//! filter pipeline itself lives in `alignyx-ranker` and performs no I/O.

pub mod sources;

pub use sources::files::{CoordFormat, StructureFetcher};
pub use sources::ligand::RcsbLigandClient;
