use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::models::{Policy, Regulation};

/// On-disk catalog document shape
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    regulations: Vec<Regulation>,
    #[serde(default)]
    policies: Vec<Policy>,
}

/// Parse a catalog JSON file into a Catalog
///
/// Lets a deployment substitute its own regulation and policy tables for
/// the built-in ones.
pub fn parse_catalog_file(path: &Path) -> Result<Catalog> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_catalog_json(&content)
}

/// Parse a catalog JSON string into a Catalog
pub fn parse_catalog_json(json: &str) -> Result<Catalog> {
    let document: CatalogDocument =
        serde_json::from_str(json).context("Failed to parse catalog JSON")?;
    Catalog::new(document.regulations, document.policies)
}
