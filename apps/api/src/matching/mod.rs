// Job Match Engine
// Implements: resume-to-job scoring and batch ranking over stored files.
// Scoring is pure; only batch.rs touches the filesystem.

pub mod batch;
pub mod handlers;
pub mod scorer;
