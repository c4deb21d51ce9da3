// Batch path fixing over a site's pages directory

use crate::depth::SiteLocation;
use crate::error::{FixError, Result};
use crate::rewrite::rewrite_content;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Options for configuring a fix run
#[derive(Debug, Clone)]
pub struct FixOptions {
    /// Site root; depth is measured from here
    pub root: PathBuf,
    /// Directory under `root` that is searched for HTML files
    pub pages_dir: String,
    pub dry_run: bool,
    pub show_progress_bars: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pages_dir: "pages".to_string(),
            dry_run: false,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting each file as soon as it is processed
pub type FixProgressCallback = Arc<dyn Fn(&FixResult) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FixOutcome {
    Rewritten { replacements: usize },
    Unchanged,
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResult {
    pub path: PathBuf,
    pub depth: usize,
    pub outcome: FixOutcome,
}

impl FixResult {
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, FixOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub root: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub results: Vec<FixResult>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn fixed_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.fixed_count()
    }

    /// Files that needed no change, typically because an earlier run fixed them
    pub fn unchanged_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == FixOutcome::Unchanged)
            .count()
    }
}

/// All `.html` files below `pages_root`, sorted by path.
///
/// A missing directory yields no files. Unreadable entries are skipped.
pub fn discover_html_files(pages_root: &Path) -> Vec<PathBuf> {
    if !pages_root.is_dir() {
        debug!("{} is not a directory", pages_root.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(pages_root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "html"))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Rewrite one file in place. Errors are captured in the result.
pub fn fix_file(root: &Path, path: &Path, options: &FixOptions) -> FixResult {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let location = SiteLocation::of(relative);

    let outcome = match try_fix_file(path, &location, options) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{}", e);
            FixOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    FixResult {
        path: relative.to_path_buf(),
        depth: location.depth,
        outcome,
    }
}

fn try_fix_file(path: &Path, location: &SiteLocation, options: &FixOptions) -> Result<FixOutcome> {
    let content = fs::read_to_string(path).map_err(|source| FixError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let rewrite = rewrite_content(&content, location);
    if rewrite.content == content {
        debug!("{} needs no changes", path.display());
        return Ok(FixOutcome::Unchanged);
    }

    if !options.dry_run {
        fs::write(path, &rewrite.content).map_err(|source| FixError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(FixOutcome::Rewritten {
        replacements: rewrite.replacements(),
    })
}

/// Fix every HTML file under `root/pages_dir`, one at a time, in sorted
/// order. Files already written stay written if a later one fails.
pub fn run_batch(options: &FixOptions, callback: Option<FixProgressCallback>) -> BatchReport {
    let pages_root = options.root.join(&options.pages_dir);
    let files = discover_html_files(&pages_root);
    info!(
        "Found {} HTML files under {}",
        files.len(),
        pages_root.display()
    );

    let progress_bar = if options.show_progress_bars && !files.is_empty() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        let result = fix_file(&options.root, path, options);

        match (&progress_bar, &callback) {
            (Some(pb), Some(cb)) => {
                pb.suspend(|| cb(&result));
                pb.inc(1);
            }
            (Some(pb), None) => pb.inc(1),
            (None, Some(cb)) => cb(&result),
            (None, None) => {}
        }
        results.push(result);
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    BatchReport {
        root: options.root.clone(),
        generated_at: Utc::now(),
        dry_run: options.dry_run,
        results,
    }
}
