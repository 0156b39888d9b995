//! Smoke-test harness for analysis example scripts: discover scripts by stem
//! pattern, run each for a bounded number of simulated events under a clean
//! working directory, and surface the aggregate pass/fail outcome.

pub mod discover;
pub mod error;
pub mod runner;
pub mod workdir;

pub use discover::find_examples;
pub use error::RunError;
pub use runner::{
    run_examples, run_examples_dir, ExampleOutcome, ExampleStatus, RunOptions, RunReport,
};
pub use workdir::{clean_working_directory, with_clean_working_directory, WorkDirGuard};
