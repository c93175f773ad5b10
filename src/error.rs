use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can end a single benchmark iteration or the whole sweep.
///
/// All variants except [`BenchError::Serialization`] are caught at the loop
/// level: the failed instance is logged and the sweep moves on. Export
/// failures surface after every instance has been processed and terminate
/// the run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The solver config file could not be read or written back.
    #[error("cannot access {}: {}", .path.display(), .source)]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file has no line for the instance-selecting key, so a
    /// rewrite would silently benchmark whatever was configured last.
    #[error("no `{}` entry in {}", .key, .path.display())]
    MissingConfigKey { path: PathBuf, key: &'static str },

    /// The solver executable could not be started at all.
    #[error("cannot launch solver {}: {}", .path.display(), .source)]
    ProcessLaunch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The solver started but terminated unsuccessfully. Raised by the
    /// driver loop, not the invoker; the exit code itself is not
    /// interpreted beyond zero/nonzero and the timeout signature.
    #[error("solver run failed ({}){}", exit_label(.code), stderr_label(.stderr))]
    SolverRuntime { code: Option<i32>, stderr: String },

    /// A metric line matched its label but its value did not parse.
    #[error("unparsable metric line `{line}`")]
    MalformedOutput { line: String },

    /// A report destination could not be written.
    #[error("cannot write {}: {}", .path.display(), .detail)]
    Serialization { path: PathBuf, detail: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "killed by a signal".to_string(),
    }
}

fn stderr_label(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!(": {}", stderr.trim_end())
    }
}
