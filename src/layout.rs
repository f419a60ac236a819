//! Folder layouts: the ordered list of relative directories to ensure exist.

use std::collections::HashSet;
use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

use crate::assets;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no folders")]
    Empty,
    #[error("layout entry #{index} is empty")]
    EmptyEntry { index: usize },
    #[error("layout entry `{entry}` has leading or trailing whitespace")]
    Whitespace { entry: String },
    #[error("layout entry `{entry}` must be a relative path")]
    NotRelative { entry: String },
    #[error("layout entry `{entry}` must not contain `..`")]
    ParentSegment { entry: String },
    #[error("duplicate layout entry `{entry}`")]
    Duplicate { entry: String },
}

/// On-disk shape of a layout file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutFile {
    name: Option<String>,
    next_step: Option<String>,
    folders: Vec<String>,
}

/// Validated, immutable folder layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    name: Option<String>,
    next_step: Option<String>,
    entries: Vec<Utf8PathBuf>,
}

impl Layout {
    /// Build an unnamed layout from relative folder paths.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| entry.as_ref().to_owned())
            .collect::<Vec<_>>();
        Ok(Self {
            name: None,
            next_step: None,
            entries: validate_entries(&entries)?,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let file: LayoutFile = toml::from_str(raw).context("parsing layout")?;
        let mut layout = Self::from_entries(&file.folders)?;
        layout.name = file.name;
        layout.next_step = file.next_step;
        Ok(layout)
    }

    /// The layout shipped with the binary.
    pub fn builtin() -> Result<Self> {
        let raw = assets::get_string(assets::DEFAULT_LAYOUT)?;
        Self::from_toml(&raw)
            .with_context(|| format!("loading built-in layout {}", assets::DEFAULT_LAYOUT))
    }

    pub fn load_from_path(path: &Utf8Path) -> Result<Self> {
        let raw = fs::read_to_string(path).with_context(|| format!("reading layout {}", path))?;
        Self::from_toml(&raw).with_context(|| format!("loading layout {}", path))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn next_step(&self) -> Option<&str> {
        self.next_step.as_deref()
    }

    pub fn entries(&self) -> &[Utf8PathBuf] {
        &self.entries
    }
}

fn validate_entries(raw: &[String]) -> Result<Vec<Utf8PathBuf>, LayoutError> {
    if raw.is_empty() {
        return Err(LayoutError::Empty);
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(raw.len());
    for (index, entry) in raw.iter().enumerate() {
        let normalized = normalize_entry(index, entry)?;
        if !seen.insert(normalized.clone()) {
            return Err(LayoutError::Duplicate {
                entry: entry.clone(),
            });
        }
        entries.push(normalized);
    }
    Ok(entries)
}

/// Strip `.` segments and trailing slashes, rejecting anything that could escape the base path.
fn normalize_entry(index: usize, entry: &str) -> Result<Utf8PathBuf, LayoutError> {
    if entry.trim().is_empty() {
        return Err(LayoutError::EmptyEntry { index });
    }
    if entry.trim() != entry {
        return Err(LayoutError::Whitespace {
            entry: entry.to_owned(),
        });
    }

    let mut normalized = Utf8PathBuf::new();
    for component in Utf8Path::new(entry).components() {
        match component {
            Utf8Component::Normal(segment) => normalized.push(segment),
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                return Err(LayoutError::ParentSegment {
                    entry: entry.to_owned(),
                });
            }
            Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                return Err(LayoutError::NotRelative {
                    entry: entry.to_owned(),
                });
            }
        }
    }

    if normalized.as_str().is_empty() {
        return Err(LayoutError::EmptyEntry { index });
    }
    Ok(normalized)
}
