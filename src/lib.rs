//! Bitcom OP_RETURN Decoder
//!

pub mod cli;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod rpc;
pub mod types;
