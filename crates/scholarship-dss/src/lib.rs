//! Decision support engine for scholarship selection.
//!
//! The engine ranks applicant batches with simple additive weighting: raw
//! attribute values are mapped to discrete scores through per-criterion
//! threshold ladders, normalized against benefit/cost semantics, combined
//! into weighted totals, and ranked with a recommendation cutoff. All I/O
//! beyond CSV snapshot intake is left to external collaborators behind the
//! [`workflows::selection::ResultSink`] seam.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
