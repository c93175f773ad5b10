//! End-to-end sweep against a stub solver.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tabu_bench::output::TabuOutput;
use tabu_bench::report::{HEADER, export};
use tabu_bench::run::Sweep;
use tabu_bench::selector::ConfigFile;

/// Plays the solver: reads its instance from the config next to itself,
/// fails on `b.txt`, otherwise prints the usual summary block.
const STUB_SOLVER: &str = r#"#!/bin/sh
cfg="$(dirname "$0")/config.txt"
instance=$(sed -n 's/^data_file=//p' "$cfg" | head -n 1)
if [ "$instance" = "b.txt" ]; then
    echo "nie mozna otworzyc pliku z danymi: b.txt" >&2
    exit 1
fi
echo "-------------------------------------"
echo "Nazwa pliku z danymi: $instance"
echo "Minimalny koszt: 100"
echo "Blad bezwzgledny: 5"
echo "Blad wzgledny: 5.0%"
echo "Czas calkowity: 200.0 ms"
echo "-------------------------------------"
"#;

fn stub_solver(dir: &Path) -> PathBuf {
    let solver = dir.join("solver.sh");
    fs::write(&solver, STUB_SOLVER).unwrap();
    let mut perms = fs::metadata(&solver).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&solver, perms).unwrap();
    solver
}

#[test]
fn failed_instances_are_skipped_and_the_sweep_continues() {
    let dir = tempfile::tempdir().unwrap();
    let solver = stub_solver(dir.path());
    let config = dir.path().join("config.txt");
    fs::write(&config, "data_file=none\noutput_file=out.txt\nrepeats=10\n").unwrap();

    let sweep = Sweep { solver, timeout: 60 };
    let instances: Vec<String> = ["a.txt", "b.txt", "c.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let table = sweep.run(&ConfigFile::new(&config), &TabuOutput, &instances);

    // b.txt exits nonzero: no row for it, and c.txt still ran after it
    let rows: Vec<&str> = table.iter().map(|r| r.instance.as_str()).collect();
    assert_eq!(rows, ["a.txt", "c.txt"]);

    let first = &table[0];
    assert_eq!(first.min_cost, Some(100));
    assert_eq!(first.abs_error, Some(5));
    assert_eq!(first.rel_error, Some(5.0));
    assert!(first.elapsed >= 0.0);

    // the config file ends up pointing at the last instance swept
    let config_after = fs::read_to_string(&config).unwrap();
    assert!(config_after.contains("data_file=c.txt\n"));
    assert!(config_after.contains("repeats=10\n"));

    let workbook = dir.path().join("results.xlsx");
    let text = dir.path().join("results.txt");
    export(&table, &workbook, &text).unwrap();

    let written = fs::read_to_string(&text).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some(HEADER.join("\t").as_str()));
    let a = lines.next().unwrap();
    assert!(a.starts_with("a.txt\t100\t5\t5\t"), "unexpected row: {a}");
    assert!(lines.next().unwrap().starts_with("c.txt\t"));
    assert_eq!(lines.next(), None);
    assert!(fs::metadata(&workbook).unwrap().len() > 0);
}

#[test]
fn sweep_without_a_config_file_yields_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let solver = stub_solver(dir.path());
    let missing = dir.path().join("nowhere").join("config.txt");

    let sweep = Sweep { solver, timeout: 60 };
    let table = sweep.run(
        &ConfigFile::new(&missing),
        &TabuOutput,
        &["a.txt".to_string()],
    );
    assert!(table.is_empty());
}
