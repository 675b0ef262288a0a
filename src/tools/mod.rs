//! The tools module provides helper functions for the huffpack codec and its command line shell.
//!
//! The tools are:
//! - cli: Command line interface for huffpack.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod freq_count;
