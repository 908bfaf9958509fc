//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::NamedTempFile;

use germain_core::{PrimalityCache, in_target_residue};
use germain_types::Chain;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The binary under test, with logging silenced.
pub fn germain() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_germain"));
    cmd.env("RUST_LOG", "off");
    cmd
}

/// Write `contents` to a temporary config file.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Every element is an in-class Sophie Germain prime and gaps line up.
pub fn assert_valid_chain(chain: &Chain, oracle: &PrimalityCache) {
    if chain.is_empty() {
        assert!(chain.gaps().is_empty());
        return;
    }
    assert_eq!(chain.gaps().len(), chain.len() - 1);
    for &p in chain.primes() {
        assert!(in_target_residue(p), "{p} is not 29 mod 30");
        assert!(oracle.is_prime(p), "{p} is not prime");
        assert!(oracle.is_prime(2 * p + 1), "2 * {p} + 1 is not prime");
    }
}
