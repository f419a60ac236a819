//! Creates a [`Layout`] under a base path, skipping folders that already exist.
//!
//! The decision for each entry lives in [`plan`], rendering in [`report`]; this module only
//! walks the layout and performs the directory creation.

pub mod plan;
pub mod report;

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::layout::Layout;
use crate::util;
use plan::{Decision, DryRun};

#[derive(Clone, Copy, Debug, Default)]
pub struct ScaffoldOptions {
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Skipped,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntryReport {
    pub path: Utf8PathBuf,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub not_a_directory: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Summary {
    pub created: usize,
    pub skipped: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub base_path: Utf8PathBuf,
    pub base_path_created: bool,
    pub dry_run: bool,
    pub entries: Vec<EntryReport>,
}

impl RunReport {
    pub fn summary(&self) -> Summary {
        let created = self
            .entries
            .iter()
            .filter(|entry| entry.outcome == Outcome::Created)
            .count();
        Summary {
            created,
            skipped: self.entries.len() - created,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("creating base path {path}")]
    BasePath {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "creating `{entry}` at {target} ({} folders done before the failure)",
        .completed.len()
    )]
    Entry {
        entry: Utf8PathBuf,
        target: Utf8PathBuf,
        /// Entries processed successfully before the failing one, in layout order.
        completed: Vec<EntryReport>,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    /// Entries handled before the failure; empty when the base path itself failed.
    pub fn completed(&self) -> &[EntryReport] {
        match self {
            ScaffoldError::BasePath { .. } => &[],
            ScaffoldError::Entry { completed, .. } => completed,
        }
    }
}

/// Ensure every entry of `layout` exists under `base`.
///
/// Processing stops at the first entry that cannot be created; the error carries the entries
/// handled up to that point.
pub fn scaffold(
    base: &Utf8Path,
    layout: &Layout,
    options: ScaffoldOptions,
) -> Result<RunReport, ScaffoldError> {
    let mut dry_run = options.dry_run.then(DryRun::default);
    let base_path_created = ensure_base_path(base, dry_run.as_mut())?;

    let mut entries = Vec::with_capacity(layout.entries().len());
    for entry in layout.entries() {
        let target = base.join(entry);
        let decision = match &dry_run {
            Some(dry_run) => dry_run.decide(&target),
            None => plan::decide(&target),
        };
        let report = match decision {
            Decision::Skip { not_a_directory } => {
                if not_a_directory {
                    warn!(path = %target, "exists but is not a directory; skipping");
                } else {
                    debug!(path = %target, "already exists");
                }
                EntryReport {
                    path: entry.clone(),
                    outcome: Outcome::Skipped,
                    not_a_directory,
                }
            }
            Decision::Create => {
                let created = match dry_run.as_mut() {
                    Some(dry_run) => dry_run.create(&target),
                    None => fs::create_dir_all(&target),
                };
                if let Err(source) = created {
                    return Err(ScaffoldError::Entry {
                        entry: entry.clone(),
                        target,
                        completed: entries,
                        source,
                    });
                }
                info!(path = %target, dry_run = options.dry_run, "creating");
                EntryReport {
                    path: entry.clone(),
                    outcome: Outcome::Created,
                    not_a_directory: false,
                }
            }
        };
        entries.push(report);
    }

    Ok(RunReport {
        base_path: base.to_owned(),
        base_path_created,
        dry_run: options.dry_run,
        entries,
    })
}

fn ensure_base_path(
    base: &Utf8Path,
    dry_run: Option<&mut DryRun>,
) -> Result<bool, ScaffoldError> {
    let result = match dry_run {
        Some(dry_run) => match dry_run.decide(base) {
            Decision::Create => dry_run.create(base).map(|()| true),
            Decision::Skip { .. } => Ok(false),
        },
        None => util::fs::ensure_dir(base),
    };
    let created = result.map_err(|source| ScaffoldError::BasePath {
        path: base.to_owned(),
        source,
    })?;
    if created {
        warn!(path = %base, "base path does not exist; creating it");
    }
    Ok(created)
}
