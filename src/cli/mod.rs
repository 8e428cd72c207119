//! Command line interface for the ranklab retrieval toolkit.
//!
//! This module provides the CLI functionality used by the `ranklab` binary.

pub mod args;
pub mod commands;
pub mod output;
