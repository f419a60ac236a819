use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::cli::Cli;
use crate::layout::Layout;
use crate::scaffold::{self, ScaffoldOptions, report};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BasePathSource {
    Explicit,
    CurrentDir,
}

impl BasePathSource {
    fn as_str(&self) -> &'static str {
        match self {
            BasePathSource::Explicit => "explicit",
            BasePathSource::CurrentDir => "current-dir",
        }
    }
}

#[derive(Clone, Debug)]
struct ResolvedBasePath {
    path: Utf8PathBuf,
    source: BasePathSource,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OutputMode {
    Text,
    Quiet,
    Json,
}

struct CliContext {
    base_path: Option<PathBuf>,
    layout: Option<PathBuf>,
    dry_run: bool,
    output: OutputMode,
}

impl From<&Cli> for CliContext {
    fn from(cli: &Cli) -> Self {
        let output = if cli.json {
            OutputMode::Json
        } else if cli.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Text
        };
        Self {
            base_path: cli.base_path.clone(),
            layout: cli.layout.clone(),
            dry_run: cli.dry_run,
            output,
        }
    }
}

impl CliContext {
    fn resolve_base_path(&self, cwd: &Path) -> Result<ResolvedBasePath> {
        let cwd = utf8(cwd.to_path_buf())?;
        let Some(path) = &self.base_path else {
            return Ok(ResolvedBasePath {
                path: cwd,
                source: BasePathSource::CurrentDir,
            });
        };

        let path = utf8(path.clone())?;
        let path = if path.is_absolute() { path } else { cwd.join(path) };
        Ok(ResolvedBasePath {
            path,
            source: BasePathSource::Explicit,
        })
    }

    fn load_layout(&self) -> Result<Layout> {
        match &self.layout {
            Some(path) => Layout::load_from_path(&utf8(path.clone())?),
            None => Layout::builtin(),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let ctx = CliContext::from(&cli);
    let layout = ctx.load_layout()?;

    if cli.print_layout {
        for entry in layout.entries() {
            println!("{}", entry);
        }
        return Ok(());
    }

    let cwd = std::env::current_dir().context("determining current directory")?;
    let base = ctx.resolve_base_path(&cwd)?;
    debug!(path = %base.path, source = base.source.as_str(), "resolved base path");

    execute(&ctx, &base.path, &layout)
}

fn execute(ctx: &CliContext, base: &Utf8Path, layout: &Layout) -> Result<()> {
    let options = ScaffoldOptions {
        dry_run: ctx.dry_run,
    };

    let report = match scaffold::scaffold(base, layout, options) {
        Ok(report) => report,
        Err(err) => {
            match ctx.output {
                OutputMode::Text => {
                    print!("{}", report::format_header(layout.name()));
                    println!();
                    print!("{}", report::format_entries(err.completed()));
                }
                OutputMode::Quiet => print!("{}", report::format_entries(err.completed())),
                OutputMode::Json => println!("{}", report::format_json_failure(base, &err)?),
            }
            return Err(err).with_context(|| format!("setting up project structure in {}", base));
        }
    };

    match ctx.output {
        OutputMode::Text => print!(
            "{}",
            report::format_text(&report, layout.name(), layout.next_step())
        ),
        OutputMode::Quiet => print!("{}", report::format_summary(&report, layout.next_step())),
        OutputMode::Json => println!("{}", report::format_json(&report)?),
    }
    Ok(())
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).map_err(|p| anyhow!("path is not valid UTF-8: {}", p.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn ctx(args: &[&str]) -> CliContext {
        let mut argv = vec!["spear-scaffold"];
        argv.extend_from_slice(args);
        CliContext::from(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn base_path_defaults_to_current_dir() {
        let ctx = CliContext {
            base_path: None,
            layout: None,
            dry_run: false,
            output: OutputMode::Text,
        };
        let resolved = ctx.resolve_base_path(Path::new("/work/game")).unwrap();
        assert_eq!(resolved.source, BasePathSource::CurrentDir);
        assert_eq!(resolved.path, Utf8PathBuf::from("/work/game"));
    }

    #[test]
    fn relative_base_path_is_joined_onto_cwd() {
        let ctx = ctx(&["--base-path", "spear"]);
        let resolved = ctx.resolve_base_path(Path::new("/work")).unwrap();
        assert_eq!(resolved.source, BasePathSource::Explicit);
        assert_eq!(resolved.path, Utf8PathBuf::from("/work/spear"));
    }

    #[test]
    fn absolute_base_path_is_kept() {
        let ctx = ctx(&["--base-path", "/srv/spear"]);
        let resolved = ctx.resolve_base_path(Path::new("/work")).unwrap();
        assert_eq!(resolved.path, Utf8PathBuf::from("/srv/spear"));
    }

    #[test]
    fn json_wins_over_quiet() {
        assert_eq!(ctx(&["--json", "--quiet"]).output, OutputMode::Json);
        assert_eq!(ctx(&["-q"]).output, OutputMode::Quiet);
    }

    #[test]
    fn execute_creates_layout_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let layout_path = root.join("layout.toml");
        std::fs::write(&layout_path, "folders = [\"maps\", \"maps/arena\"]\n").unwrap();

        let ctx = ctx(&["--layout", layout_path.as_str(), "--quiet"]);
        let layout = ctx.load_layout().unwrap();
        let base = root.join("game");
        execute(&ctx, &base, &layout).unwrap();
        assert!(base.join("maps/arena").is_dir());
    }

    #[test]
    fn execute_reports_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(root.join("scenes"), "").unwrap();

        let ctx = ctx(&["--quiet"]);
        let layout = Layout::from_entries(["scenes/ui"]).unwrap();
        let err = execute(&ctx, &root, &layout).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("scenes/ui"));
        assert!(chain.contains(root.as_str()));
    }
}
