//! End-to-end tests of the `germain` binary

use predicates::str::contains;
use serde_json::Value;

use crate::common::{config_file, germain};

fn json_output(args: &[&str]) -> Value {
    let output = germain().args(args).arg("--json").output().unwrap();
    assert!(output.status.success(), "{args:?} failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn chain_json_is_reproducible() {
    let args = [
        "chain", "--start", "0", "--end", "20000", "--count", "5", "--seed", "42",
    ];
    let first = json_output(&args);
    let second = json_output(&args);

    assert_eq!(first, second);
    assert_eq!(first["seed"], 42);
    assert_eq!(first["chain"]["primes"].as_array().unwrap().len(), 5);
    assert_eq!(first["chain"]["gaps"].as_array().unwrap().len(), 4);
    assert_eq!(first["flags"]["g3"], true);
}

#[test]
fn chain_text_output() {
    germain()
        .args(["chain", "--end", "20000", "--count", "3", "--seed", "1"])
        .assert()
        .success()
        .stdout(contains("Grammar chain (G1, G2, G3)"))
        .stdout(contains("primes: 29"));
}

#[test]
fn excessive_count_requires_force() {
    germain()
        .args(["chain", "--start", "0", "--end", "20000", "--count", "40"])
        .assert()
        .failure()
        .stderr(contains("--force"));

    germain()
        .args([
            "chain", "--start", "0", "--end", "20000", "--count", "40", "--budget", "0.2",
            "--force", "--seed", "3",
        ])
        .assert()
        .success();
}

#[test]
fn recommend_standard_interval() {
    let out = json_output(&["recommend", "--start", "0", "--end", "100000"]);
    assert_eq!(out["recommended"], 17);
    assert_eq!(out["interval"], 100_000);

    germain()
        .args(["recommend", "--start", "0", "--end", "100000", "--no-g2", "--no-g3"])
        .assert()
        .success()
        .stdout(contains("~50 elements"));
}

#[test]
fn baseline_json() {
    let out = json_output(&[
        "baseline", "--start", "0", "--end", "50000", "--count", "6", "--seed", "9",
    ]);
    let primes: Vec<i64> = out["chain"]["primes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert!(primes.len() <= 6);
    assert!(primes.windows(2).all(|w| w[0] < w[1]));
    assert!(primes.iter().all(|p| p % 30 == 29));
}

#[test]
fn compare_report_json() {
    let out = json_output(&[
        "compare", "--start", "0", "--end", "100000", "--count", "8", "--safe-count", "5",
        "--budget", "5", "--seed", "42",
    ]);
    let report = &out["report"];
    assert_eq!(
        report["grammar"]["len"],
        out["grammar"]["primes"].as_array().unwrap().len()
    );
    assert!(report["baseline"]["len"].as_u64().unwrap() <= report["grammar"]["len"].as_u64().unwrap());
    assert!(report["differences"]["grammar_only"].is_array());
    assert_eq!(report["transitions"]["cells"].as_array().unwrap().len(), 9);
}

#[test]
fn lab_text_and_json() {
    germain()
        .args(["lab", "--limit", "1000"])
        .assert()
        .success()
        .stdout(contains("Sophie Germain primes in [11, 1000]"))
        .stdout(contains("Inverse symmetry:"));

    let out = json_output(&["lab", "--limit", "1000"]);
    assert!(out["primes"].as_u64().unwrap() > 10);
    assert_eq!(out["analysis"]["symmetry"].as_array().unwrap().len(), 3);
}

#[test]
fn config_file_supplies_defaults() {
    let file = config_file("[search]\nend = 20000\ncount = 4\nseed = 42\n");
    let path = file.path().to_str().unwrap();

    let out = json_output(&["--config", path, "chain"]);
    assert_eq!(out["seed"], 42);
    assert_eq!(out["range"]["end"], 20_000);
    assert_eq!(out["chain"]["primes"].as_array().unwrap().len(), 4);

    // command-line flags win over the file
    let out = json_output(&["--config", path, "chain", "--count", "2", "--seed", "7"]);
    assert_eq!(out["seed"], 7);
    assert_eq!(out["chain"]["primes"].as_array().unwrap().len(), 2);
}

#[test]
fn broken_config_is_reported() {
    let file = config_file("[search\n");
    germain()
        .args(["--config", file.path().to_str().unwrap(), "recommend"])
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"));

    germain()
        .args(["--config", "/nonexistent/germain.toml", "recommend"])
        .assert()
        .failure();
}
