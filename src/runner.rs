//! Example execution: run each discovered script as a child process for a
//! bounded number of simulated events, keep going past failures, and report
//! the aggregate outcome.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::Serialize;

use crate::discover::find_examples;
use crate::error::RunError;

// Lines of child stderr kept in the report when a script fails.
const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Number of simulated events each example processes (`-n <nevents>`).
    pub nevents: u32,
    /// File names of known-broken examples to skip instead of run.
    pub broken: Vec<String>,
    /// Verbose harness tracing on stderr.
    pub debug: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            nevents: 10,
            broken: Vec::new(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum ExampleStatus {
    Passed,
    Failed {
        code: Option<i32>,
        stderr_tail: String,
    },
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExampleOutcome {
    pub script: String,
    pub status: ExampleStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<ExampleOutcome>,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunReport {
    /// Collapse the report into the aggregate pass/fail contract: `Ok(self)`
    /// iff no script failed, otherwise an error naming every failing script.
    pub fn into_result(self) -> Result<RunReport, RunError> {
        if self.failed == 0 {
            return Ok(self);
        }
        let failed = self
            .outcomes
            .iter()
            .filter(|o| matches!(o.status, ExampleStatus::Failed { .. }))
            .map(|o| o.script.clone())
            .collect();
        Err(RunError::ExamplesFailed { failed })
    }
}

/// The operation the test shim delegates to: run every example in `dir` whose
/// stem matches `pattern`, each for `nevents` events. Errors if any fails.
pub fn run_examples_dir(dir: &Path, pattern: &str, nevents: u32) -> Result<RunReport, RunError> {
    let opts = RunOptions {
        nevents,
        ..RunOptions::default()
    };
    run_examples(dir, pattern, &opts)?.into_result()
}

/// Extended form: full report back, script failures recorded in the report
/// rather than returned as an error. `Err` is reserved for harness problems
/// (missing directory, bad pattern, spawn failure).
pub fn run_examples(dir: &Path, pattern: &str, opts: &RunOptions) -> Result<RunReport, RunError> {
    let scripts = find_examples(dir, pattern)?;
    if scripts.is_empty() && std::env::var("EXSMOKE_NO_MATCH_WARN").is_err() {
        // Zero matches is a trivial pass, but silence here usually means a typo
        // in the pattern. Set EXSMOKE_NO_MATCH_WARN to suppress.
        eprintln!(
            "[EXSMOKE][warn] no examples matching '{}' under {}",
            pattern,
            dir.display()
        );
    }

    let mut report = RunReport::default();
    for script in &scripts {
        let name = script
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        if opts.broken.iter().any(|b| *b == name) {
            if opts.debug {
                eprintln!("[EXSMOKE][dbg] skip known-broken {}", name);
            }
            report.skipped += 1;
            report.outcomes.push(ExampleOutcome {
                script: name,
                status: ExampleStatus::Skipped,
            });
            continue;
        }

        if opts.debug {
            eprintln!("[EXSMOKE][dbg] run {} (nevents={})", name, opts.nevents);
        }
        // Scripts are executables with shebangs, invoked in the current working
        // directory so any output files they write land in the caller's scope.
        let output = Command::new(script)
            .arg("-n")
            .arg(opts.nevents.to_string())
            .env("EXSMOKE_NEVENTS", opts.nevents.to_string())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| RunError::Spawn {
                script: name.clone(),
                source,
            })?;

        if output.status.success() {
            report.passed += 1;
            report.outcomes.push(ExampleOutcome {
                script: name,
                status: ExampleStatus::Passed,
            });
        } else {
            let stderr_tail = tail_lines(&String::from_utf8_lossy(&output.stderr), STDERR_TAIL_LINES);
            eprintln!(
                "[EXSMOKE][warn] example '{}' failed (exit {:?})",
                name,
                output.status.code()
            );
            if !stderr_tail.is_empty() {
                eprintln!("{}", stderr_tail);
            }
            report.failed += 1;
            report.outcomes.push(ExampleOutcome {
                script: name,
                status: ExampleStatus::Failed {
                    code: output.status.code(),
                    stderr_tail,
                },
            });
        }
    }
    Ok(report)
}

fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
