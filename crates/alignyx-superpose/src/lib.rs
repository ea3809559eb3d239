//! alignyx-superpose — Spatial superposition of the shortlisted structures.
//!
//! The actual 3D alignment is delegated to an external molecular engine
//! (PyMOL in batch mode); this crate owns the engine invocation, the
//! reference/query process over the ordered pairing, the alignment log, and
//! the ligand table writer.

pub mod engine;
pub mod pymol;
pub mod superposer;
pub mod alignment_log;
pub mod table;

pub use alignment_log::AlignmentLog;
pub use engine::{AlignmentEngine, AlignmentJob, AlignmentOutcome, MockAlignmentEngine};
pub use pymol::PymolEngine;
pub use superposer::{Superposer, SuperposeOutcome};
pub use table::write_ligand_table;
