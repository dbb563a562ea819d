use crate::analysis::Analyzer;
use crate::config::{Config, CONFIG_FILE};
use crate::error::SeamError;
use crate::exit::SeamExit;
use crate::reporting;
use crate::source::{DiskTree, GitRevisions};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
    pub since: Option<String>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

/// Handles the check command.
///
/// # Errors
/// Returns error if the report cannot be rendered or written.
pub fn handle_check(args: &CheckArgs) -> Result<SeamExit> {
    let config = match load_config(&args.root, args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return Ok(config_failure(&e)),
    };

    let tree = DiskTree::new(&args.root);
    let git = GitRevisions::new(&args.root);
    let mut analyzer = Analyzer::new(config, &tree);
    if let Some(rev) = &args.since {
        analyzer = analyzer.with_history(&git, rev.clone());
    }

    let result = match analyzer.run() {
        Ok(result) => result,
        Err(e) if e.is_config_error() => return Ok(config_failure(&e)),
        Err(e) => return Err(e.into()),
    };

    if args.output.is_some() {
        colored::control::set_override(false);
    }
    let rendered = if args.json {
        reporting::render_json(&result)?
    } else {
        reporting::render_report(&result)
    };
    emit(&rendered, args.output.as_deref())?;

    Ok(SeamExit::from_summary(&result.summary))
}

/// Handles the components command.
///
/// # Errors
/// Returns error if the overview cannot be rendered.
pub fn handle_components(root: &Path, config: Option<&Path>, json: bool) -> Result<SeamExit> {
    let config = match load_config(root, config) {
        Ok(config) => config,
        Err(e) => return Ok(config_failure(&e)),
    };

    let tree = DiskTree::new(root);
    let build = match Analyzer::new(config, &tree).discover() {
        Ok(build) => build,
        Err(e) if e.is_config_error() => return Ok(config_failure(&e)),
        Err(e) => return Err(e.into()),
    };

    let overview: Vec<_> = build.components.iter().map(|c| c.overview()).collect();
    if json {
        println!("{}", reporting::json::render_components_json(&overview)?);
    } else {
        print!("{}", reporting::render_components(&overview));
    }
    Ok(SeamExit::Success)
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, SeamError> {
    let path = explicit.map_or_else(|| root.join(CONFIG_FILE), Path::to_path_buf);
    Config::load(&path)
}

fn config_failure(e: &SeamError) -> SeamExit {
    eprintln!("{} {}", "Error:".red(), e);
    SeamExit::InvalidConfig
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    let Some(path) = output else {
        println!("{rendered}");
        return Ok(());
    };
    fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Report written to {}", path.display());
    Ok(())
}
