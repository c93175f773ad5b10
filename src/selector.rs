use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BenchError;
use crate::suite::DATA_FILE_KEY;

/// Channel that tells the external solver which instance to work on.
///
/// The stock solver learns its instance from the config file it reads at
/// startup, so [`ConfigFile`] is the only implementation in this crate; an
/// alternate channel (arguments, an environment variable) can be slotted in
/// without touching the sweep loop.
pub trait InstanceSelector {
    fn select(&self, instance: &str) -> Result<(), BenchError>;
}

/// The `key=value` configuration file shared with the solver.
#[derive(Clone, Debug)]
pub struct ConfigFile {
    path: PathBuf,
    key: &'static str,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigFile {
            path: path.into(),
            key: DATA_FILE_KEY,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_access(&self, source: std::io::Error) -> BenchError {
        BenchError::FileAccess {
            path: self.path.clone(),
            source,
        }
    }
}

impl InstanceSelector for ConfigFile {
    /// Rewrites every `data_file=...` line to point at `instance`.
    ///
    /// All other lines are written back byte for byte, in their original
    /// order. A config with no matching line is an error: a silent no-op
    /// would make the solver benchmark whatever was configured last.
    fn select(&self, instance: &str) -> Result<(), BenchError> {
        let text = fs::read_to_string(&self.path).map_err(|e| self.file_access(e))?;
        let mut rewritten = String::with_capacity(text.len());
        let mut matched = 0usize;
        for line in text.split_inclusive('\n') {
            let body = line.strip_suffix('\n').unwrap_or(line);
            let body = body.strip_suffix('\r').unwrap_or(body);
            match body.split_once('=') {
                Some((key, _)) if key == self.key => {
                    rewritten.push_str(self.key);
                    rewritten.push('=');
                    rewritten.push_str(instance);
                    rewritten.push('\n');
                    matched += 1;
                }
                _ => rewritten.push_str(line),
            }
        }
        if matched == 0 {
            return Err(BenchError::MissingConfigKey {
                path: self.path.clone(),
                key: self.key,
            });
        }
        fs::write(&self.path, rewritten).map_err(|e| self.file_access(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "data_file=ftv33.txt\n\
                          output_file=results.txt\n\
                          algorithm=tabu\n\
                          repeats=10\n\
                          show_progress=false\n";

    fn config_on_disk(text: &str) -> (tempfile::TempDir, ConfigFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, text).unwrap();
        (dir, ConfigFile::new(path))
    }

    #[test]
    fn rewrites_exactly_the_data_file_line() {
        let (_dir, config) = config_on_disk(CONFIG);
        config.select("tsp_10.txt").unwrap();
        let after = fs::read_to_string(config.path()).unwrap();
        let expected = CONFIG.replace("data_file=ftv33.txt", "data_file=tsp_10.txt");
        assert_eq!(after, expected);
    }

    #[test]
    fn reapplying_the_same_instance_is_idempotent() {
        let (_dir, config) = config_on_disk(CONFIG);
        config.select("tsp8_as.txt").unwrap();
        let once = fs::read_to_string(config.path()).unwrap();
        config.select("tsp8_as.txt").unwrap();
        let twice = fs::read_to_string(config.path()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn every_matching_line_is_rewritten() {
        let (_dir, config) = config_on_disk("data_file=a.txt\nrepeats=1\ndata_file=b.txt\n");
        config.select("c.txt").unwrap();
        let after = fs::read_to_string(config.path()).unwrap();
        assert_eq!(after, "data_file=c.txt\nrepeats=1\ndata_file=c.txt\n");
    }

    #[test]
    fn key_must_match_before_the_first_equals_sign() {
        // `data_file` appearing as a value must not be rewritten
        let (_dir, config) = config_on_disk("comment=data_file\ndata_file=a.txt\n");
        config.select("b.txt").unwrap();
        let after = fs::read_to_string(config.path()).unwrap();
        assert_eq!(after, "comment=data_file\ndata_file=b.txt\n");
    }

    #[test]
    fn missing_key_is_an_error() {
        let (_dir, config) = config_on_disk("output_file=results.txt\nrepeats=10\n");
        let before = fs::read_to_string(config.path()).unwrap();
        let err = config.select("tsp_10.txt").unwrap_err();
        assert!(matches!(err, BenchError::MissingConfigKey { .. }));
        let after = fs::read_to_string(config.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn unreadable_config_is_a_file_access_error() {
        let config = ConfigFile::new("/no/such/dir/config.txt");
        let err = config.select("tsp_10.txt").unwrap_err();
        assert!(matches!(err, BenchError::FileAccess { .. }));
    }
}
