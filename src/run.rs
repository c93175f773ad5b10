use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::SystemTime;

use log::warn;

use crate::error::BenchError;
use crate::output::OutputParser;
use crate::report::{RunResult, cell};
use crate::selector::InstanceSelector;

/// Exit code the `timeout(1)` wrapper reports when the limit expires.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

const CLEAR: &str = "\x1B[1G\x1B[0K";

/// Captured outcome of one solver invocation.
#[derive(Debug)]
pub struct RunOutcome {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Wall-clock seconds from just before spawn to just after exit.
    pub elapsed: f64,
}

impl RunOutcome {
    pub fn timed_out(&self) -> bool {
        self.code == Some(TIMEOUT_EXIT_CODE)
    }
}

/// Runs the solver once under the timeout wrapper.
///
/// The solver takes no arguments and reads no stdin; it learns its instance
/// from the config file rewritten beforehand. A nonzero exit is reported
/// through `code`, not as an error; only a solver that cannot be started at
/// all fails here.
pub fn invoke(solver: &Path, timeout: usize) -> Result<RunOutcome, BenchError> {
    if !solver.is_file() {
        return Err(BenchError::ProcessLaunch {
            path: solver.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such executable"),
        });
    }
    let start = SystemTime::now();
    let output = Command::new("timeout")
        .arg(timeout.to_string())
        .arg(solver)
        .stdin(Stdio::null())
        .output()
        .map_err(|source| BenchError::ProcessLaunch {
            path: solver.to_path_buf(),
            source,
        })?;
    let elapsed = match start.elapsed() {
        Ok(e) => e.as_secs() as f64 + f64::from(e.subsec_millis()) / 1000.0,
        Err(_) => 0.0f64,
    };
    Ok(RunOutcome {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code(),
        elapsed,
    })
}

/// One sequential pass over the instance list.
///
/// Exactly one instance runs at a time; the shared config file is the only
/// channel to the solver and strict sequencing is what keeps it race free.
#[derive(Clone, Debug)]
pub struct Sweep {
    pub solver: PathBuf,
    /// Seconds before a run is killed and recorded as a failure; `0`
    /// removes the limit.
    pub timeout: usize,
}

impl Sweep {
    /// Drives every instance through select, invoke, parse, accumulate.
    ///
    /// Failed instances are logged and skipped; the returned table holds
    /// one row per successful instance, in instance-list order.
    pub fn run<S, P>(&self, selector: &S, parser: &P, instances: &[String]) -> Vec<RunResult>
    where
        S: InstanceSelector,
        P: OutputParser,
    {
        let mut table: Vec<RunResult> = Vec::new();
        for instance in instances {
            print!("{CLEAR}\x1B[032mRunning on {instance}...\x1B[000m");
            let _ = stdout().flush();
            match self.run_one(selector, parser, instance) {
                Ok(row) => {
                    println!(
                        "{}{:<16}{:>10}{:>10}{:>10}{:>10.3}",
                        CLEAR,
                        &format!("\"{}\",", row.instance),
                        cell(&row.min_cost),
                        cell(&row.abs_error),
                        cell(&row.rel_error),
                        row.elapsed,
                    );
                    table.push(row);
                }
                Err(err) => {
                    let flag = match &err {
                        BenchError::SolverRuntime {
                            code: Some(TIMEOUT_EXIT_CODE),
                            ..
                        } => "TIMEOUT",
                        _ => "FAILED",
                    };
                    println!(
                        "{}{:<16}{:>10}",
                        CLEAR,
                        &format!("\"{instance}\","),
                        flag,
                    );
                    warn!("{instance}: {err}");
                }
            }
        }
        table
    }

    fn run_one<S, P>(
        &self,
        selector: &S,
        parser: &P,
        instance: &str,
    ) -> Result<RunResult, BenchError>
    where
        S: InstanceSelector,
        P: OutputParser,
    {
        selector.select(instance)?;
        let outcome = invoke(&self.solver, self.timeout)?;
        match outcome.code {
            Some(0) => {}
            code => {
                return Err(BenchError::SolverRuntime {
                    code,
                    stderr: outcome.stderr,
                });
            }
        }
        let metrics = parser.parse(&outcome.stdout)?;
        Ok(RunResult::new(instance, metrics, outcome.elapsed))
    }
}
