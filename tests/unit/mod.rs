//! Unit Tests Module
//!
//! Component-level tests that exercise the public decoder API.

pub mod interpreter;
pub mod pushdata;
