use std::collections::HashSet;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};

/// What to do with a single layout entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    Create,
    Skip { not_a_directory: bool },
}

/// Decide whether `target` needs creating. Anything already at the path counts as existing.
pub fn decide(target: &Utf8Path) -> Decision {
    match fs::metadata(target) {
        Ok(meta) => Decision::Skip {
            not_a_directory: !meta.is_dir(),
        },
        // A dangling symlink still occupies the name.
        Err(_) if fs::symlink_metadata(target).is_ok() => Decision::Skip {
            not_a_directory: true,
        },
        Err(_) => Decision::Create,
    }
}

/// Directories a dry run would have created so far, so later entries see them as existing.
#[derive(Debug, Default)]
pub struct DryRun {
    dirs: HashSet<Utf8PathBuf>,
}

impl DryRun {
    pub fn decide(&self, target: &Utf8Path) -> Decision {
        if self.dirs.contains(target) {
            return Decision::Skip {
                not_a_directory: false,
            };
        }
        decide(target)
    }

    /// Record `target` and its ancestors as created, failing where a real run would.
    pub fn create(&mut self, target: &Utf8Path) -> io::Result<()> {
        if let Some(blocker) = self.blocker(target) {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", blocker),
            ));
        }
        for dir in target.ancestors() {
            if !self.dirs.insert(dir.to_owned()) {
                break;
            }
        }
        Ok(())
    }

    /// First ancestor of `target` that exists but is not a directory.
    fn blocker(&self, target: &Utf8Path) -> Option<Utf8PathBuf> {
        for dir in target.ancestors().skip(1) {
            if dir.as_str().is_empty() || self.dirs.contains(dir) {
                return None;
            }
            match decide(dir) {
                Decision::Create => continue,
                Decision::Skip {
                    not_a_directory: false,
                } => return None,
                Decision::Skip {
                    not_a_directory: true,
                } => return Some(dir.to_owned()),
            }
        }
        None
    }
}
