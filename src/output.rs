use crate::error::BenchError;
use crate::regex;

/// Metrics scraped from one solver run.
///
/// A label the solver never printed leaves its field `None`; absence means
/// "unknown", never zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveMetrics {
    pub min_cost: Option<i64>,
    pub abs_error: Option<i64>,
    pub rel_error: Option<f64>,
}

/// Scanner bound to one solver's console vocabulary.
///
/// The metric lines are a textual contract with a specific solver build;
/// another solver (or another wording) supplies its own implementation and
/// the sweep loop stays unchanged.
pub trait OutputParser {
    fn parse(&self, stdout: &str) -> Result<SolveMetrics, BenchError>;
}

/// Summary block printed by the tabu search solver.
///
/// ```text
/// Minimalny koszt: 245
/// Blad bezwzgledny: 5
/// Blad wzgledny: 3.5%
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TabuOutput;

impl OutputParser for TabuOutput {
    fn parse(&self, stdout: &str) -> Result<SolveMetrics, BenchError> {
        let mut metrics = SolveMetrics::default();
        for line in stdout.lines() {
            if regex!(r"\bMinimalny koszt\b").is_match(line) {
                metrics.min_cost = Some(int_value(line)?);
            } else if regex!(r"\bBlad bezwzgledny\b").is_match(line) {
                metrics.abs_error = Some(int_value(line)?);
            } else if regex!(r"\bBlad wzgledny\b").is_match(line) {
                let value = value_after_colon(line)?.trim_end_matches('%').trim_end();
                metrics.rel_error = Some(value.parse().map_err(|_| malformed(line))?);
            }
        }
        Ok(metrics)
    }
}

/// The value sits after the last `:` of the line.
fn value_after_colon(line: &str) -> Result<&str, BenchError> {
    match line.rsplit_once(':') {
        Some((_, tail)) => Ok(tail.trim()),
        None => Err(malformed(line)),
    }
}

fn int_value(line: &str) -> Result<i64, BenchError> {
    value_after_colon(line)?.parse().map_err(|_| malformed(line))
}

fn malformed(line: &str) -> BenchError {
    BenchError::MalformedOutput {
        line: line.to_string(),
    }
}
