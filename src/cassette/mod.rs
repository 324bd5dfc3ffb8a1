//! Cassettes: YAML recordings of port traffic used to replay analyses and
//! summaries deterministically.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
