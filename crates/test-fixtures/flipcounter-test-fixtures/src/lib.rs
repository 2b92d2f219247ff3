//! Shared test fixtures: ramp-planning scenarios captured as JSON under
//! the workspace `fixtures/` directory, listed in `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    ramps: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

/// One recorded ramp-planning scenario with the plan it must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct RampScenario {
    pub start: i64,
    pub target: i64,
    pub pace_ms: u64,
    pub duration_s: u64,
    pub expect: RampExpect,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RampExpect {
    pub increment: i64,
    pub pace_ms: u64,
    pub cycles: u32,
}

pub mod ramps {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.ramps.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = MANIFEST
            .ramps
            .get(name)
            .ok_or_else(|| anyhow!("unknown ramp fixture '{name}'"))?;
        read_to_string(rel)
    }

    pub fn scenario(name: &str) -> Result<RampScenario> {
        let rel = MANIFEST
            .ramps
            .get(name)
            .ok_or_else(|| anyhow!("unknown ramp fixture '{name}'"))?;
        load_json(rel)
    }
}
