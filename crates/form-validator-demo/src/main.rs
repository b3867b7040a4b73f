// File: form-validator-demo/src/main.rs
// Purpose: Replays a form scenario against the standard validators
//
// Usage: form-validator-demo [scenario.toml]
// Without an argument the bundled scenario runs. Set RUST_LOG=debug for
// validator internals.

mod runner;
mod scenario;

use anyhow::Result;
use scenario::Scenario;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_SCENARIO: &str = include_str!("../scenarios/demo.toml");

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading scenario from {}", path);
            Scenario::load(Path::new(&path))?
        }
        None => Scenario::from_toml_str(DEFAULT_SCENARIO)?,
    };

    for line in runner::run(&scenario)? {
        println!("{}", line);
    }

    Ok(())
}
