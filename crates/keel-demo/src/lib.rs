#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]

//! # keel-demo
//!
//! Drives keel widgets from scripted key sequences, the way an owning
//! program would, and reports what they rendered and emitted.
//!
//! - [`cli`]: the `keel` command line
//! - [`config`]: TOML settings merged under flags
//! - [`data`]: generated instances and the simulated paging server
//! - [`scenario`]: the runs themselves

pub mod cli;
pub mod config;
pub mod data;
pub mod scenario;
