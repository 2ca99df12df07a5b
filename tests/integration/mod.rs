//! Integration Tests Module
//!
//! End-to-end tests that run complete decoding pipelines and the CLI binary.

pub mod cli_smoke_test;
pub mod decode_pipeline;
