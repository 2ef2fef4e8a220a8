//! Shared JSON fixtures for the choreography crates: scenes, planning
//! sequences and alternate registry catalogs, indexed by
//! `fixtures/manifest.json`.

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
    scenes: HashMap<String, String>,
    sequences: HashMap<String, SequenceEntry>,
    registries: HashMap<String, String>,
}

/// A named planning input: a style slug and scene fixture names, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceEntry {
    pub style: String,
    pub scenes: Vec<String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

fn sorted_keys<T>(map: &HashMap<String, T>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.scenes)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.scenes, "scene", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.scenes, "scene", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.scenes, "scene", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod sequences {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.sequences)
    }

    pub fn entry(name: &str) -> Result<SequenceEntry> {
        lookup(&MANIFEST.sequences, "sequence", name).cloned()
    }

    /// Scene JSON documents of a sequence, in sequence order.
    pub fn scene_jsons(name: &str) -> Result<Vec<String>> {
        let entry = lookup(&MANIFEST.sequences, "sequence", name)?;
        entry
            .scenes
            .iter()
            .map(|scene| {
                super::scenes::json(scene)
                    .with_context(|| format!("sequence '{name}' references scene '{scene}'"))
            })
            .collect()
    }

    pub fn load_scenes<T: DeserializeOwned>(name: &str) -> Result<Vec<T>> {
        let entry = lookup(&MANIFEST.sequences, "sequence", name)?;
        entry.scenes.iter().map(|scene| super::scenes::load(scene)).collect()
    }
}

pub mod registries {
    use super::*;

    pub fn keys() -> Vec<String> {
        sorted_keys(&MANIFEST.registries)
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.registries, "registry", name)?;
        read_to_string(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.registries, "registry", name)?;
        Ok(resolve_path(rel))
    }
}
