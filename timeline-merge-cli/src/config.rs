//! Configuration loading and parsing

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use timeline_merge::CaseConfig;

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sanitize: CaseConfig,
    #[serde(default)]
    pub cases: Vec<CaseEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub trace: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One case in the config: witnesses inline or in a JSON file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaseEntry {
    pub name: Option<String>,
    pub witnesses: Option<Vec<Vec<String>>>,
    pub file: Option<PathBuf>,
}

/// A case ready to be merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseInput {
    pub name: String,
    pub witnesses: Vec<Vec<String>>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config.validate()?;
    Ok(config)
}

/// Read a JSON array of witness accounts
pub fn load_witnesses(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Input must be a JSON array of arrays of strings: {:?}", path))
}

impl AppConfig {
    /// Check that every case names exactly one source
    pub fn validate(&self) -> Result<()> {
        for (idx, entry) in self.cases.iter().enumerate() {
            match (&entry.witnesses, &entry.file) {
                (Some(_), Some(_)) => {
                    bail!("Case {} sets both `witnesses` and `file`", entry.label(idx))
                }
                (None, None) => {
                    bail!("Case {} needs either `witnesses` or `file`", entry.label(idx))
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Resolve all cases, reading files relative to `base_dir`
    pub fn resolve_cases(&self, base_dir: &Path) -> Result<Vec<CaseInput>> {
        self.cases
            .iter()
            .enumerate()
            .map(|(idx, entry)| -> Result<CaseInput> {
                let witnesses = match (&entry.witnesses, &entry.file) {
                    (Some(witnesses), _) => witnesses.clone(),
                    (None, Some(file)) => load_witnesses(&base_dir.join(file))?,
                    (None, None) => {
                        bail!("Case {} needs either `witnesses` or `file`", entry.label(idx))
                    }
                };
                Ok(CaseInput {
                    name: entry.label(idx),
                    witnesses,
                })
            })
            .collect()
    }
}

impl CaseEntry {
    fn label(&self, idx: usize) -> String {
        match (&self.name, &self.file) {
            (Some(name), _) => name.clone(),
            (None, Some(file)) => file.display().to_string(),
            (None, None) => format!("case-{}", idx + 1),
        }
    }
}
