//! Individual steps of the update pipeline.
//!
//! Each step is a separate module with functions called by the orchestrator
//! in [`crate::pipeline`].

pub mod check;
pub mod download;
pub mod extract;
