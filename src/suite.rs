//! The built-in benchmark suite.

/// Instance files the solver is benchmarked against, in sweep order.
pub const SUITE: [&str; 3] = ["ftv33.txt", "tsp_10.txt", "tsp8_as.txt"];

/// Configuration key whose value selects the active instance.
pub const DATA_FILE_KEY: &str = "data_file";
