//! Command-line interface handlers

pub mod commands;

pub use commands::{
    cmd_demo, cmd_run, demo_script, load_script, run_script, CliResult, StepOutcome,
};
