//! Ranklab CLI binary.

use clap::Parser;
use ranklab::cli::{args::RanklabArgs, commands::execute_command};
use std::process;

fn main() {
    let args = RanklabArgs::parse();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
