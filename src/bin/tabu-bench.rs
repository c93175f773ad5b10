/// Benchmark driver for the tabu search TSP solver
/// Usage: tabu-bench [OPTIONS] [targets]
/// # Examples:
/// - tabu-bench                                # sweep the built-in suite
/// - tabu-bench -t 60 ftv33.txt ftv44.txt      # two instances, 60s limit
/// - tabu-bench -s ./solver -c run/config.txt  # relocated solver
use {
    anyhow::Context,
    clap::Parser,
    std::{path::PathBuf, process::Command},
    tabu_bench::{
        output::TabuOutput, report::export, run::Sweep, selector::ConfigFile, suite::SUITE,
    },
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, Parser)]
#[command(name = "tabu-bench", about = "Benchmark the tabu search TSP solver")]
struct Opts {
    /// instance files overriding the built-in suite
    targets: Vec<String>,
    /// solver executable, invoked without arguments
    #[arg(long, short = 's', default_value = "./main.exe")]
    solver: PathBuf,
    /// solver configuration file rewritten before each run
    #[arg(long, short = 'c', default_value = "config.txt")]
    config: PathBuf,
    /// time out in seconds (0 removes the limit)
    #[arg(long, short = 't', default_value_t = 510)]
    timeout: usize,
    /// spreadsheet report destination
    #[arg(long, default_value = "tabu_search_results.xlsx")]
    workbook: PathBuf,
    /// tab separated report destination
    #[arg(long, default_value = "tabu_search_results.txt")]
    text: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opts = Opts::parse();
    let instances: Vec<String> = if opts.targets.is_empty() {
        SUITE.iter().map(|s| s.to_string()).collect()
    } else {
        opts.targets.clone()
    };
    println!(
        "# {}, timeout:{} on {} @ {}",
        VERSION,
        opts.timeout,
        hostname(),
        chrono::Local::now().format("%FT%H:%M:%S"),
    );
    println!(
        "{:<16}{:>10}{:>10}{:>10}{:>10}",
        "instance,", "cost,", "abs,", "rel%,", "time"
    );
    let selector = ConfigFile::new(&opts.config);
    let sweep = Sweep {
        solver: opts.solver.clone(),
        timeout: opts.timeout,
    };
    let table = sweep.run(&selector, &TabuOutput, &instances);
    export(&table, &opts.workbook, &opts.text).context("saving benchmark reports")?;
    println!(
        "{} of {} instances saved to {} and {}",
        table.len(),
        instances.len(),
        opts.workbook.display(),
        opts.text.display(),
    );
    Ok(())
}

fn hostname() -> String {
    Command::new("hostname")
        .arg("-s")
        .output()
        .map(|o| String::from_utf8_lossy(o.stdout.trim_ascii_end()).to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
