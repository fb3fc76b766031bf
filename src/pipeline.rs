//! End-to-end report generation
//!
//! Validates the request up front, then runs scan, rank, write and patch
//! strictly in sequence.

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::model::ReportLayout;
use crate::report::{ReportWriter, patch_header};
use crate::scanner::{DirScanner, ProgressReporter};
use crate::util::Divisions;

/// A validated report run
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Absolute folder to analyse
    pub root: PathBuf,
    /// Absolute report path
    pub output: PathBuf,
    pub file_divisions: Divisions,
    pub folder_divisions: Divisions,
    pub follow_symlinks: bool,
}

impl ReportRequest {
    /// Validate paths and parse both division strings.
    ///
    /// Nothing on disk is touched here, so a `ConfigError` always means the
    /// run stopped before any side effect.
    pub fn new(
        root: impl AsRef<Path>,
        output: impl AsRef<Path>,
        file_divisions: &str,
        folder_divisions: &str,
    ) -> Result<Self, ConfigError> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(ConfigError::RootMissing(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ConfigError::RootNotDirectory(root.to_path_buf()));
        }
        let root = absolute(root)?;

        let output = absolute(output.as_ref())?;
        match output.parent() {
            Some(parent) if parent.is_dir() => {}
            _ => return Err(ConfigError::OutputHasNoParent(output)),
        }
        if output.is_dir() {
            return Err(ConfigError::OutputIsDirectory(output));
        }

        let file_divisions = Divisions::parse(file_divisions).map_err(ConfigError::FileDivisions)?;
        let folder_divisions =
            Divisions::parse(folder_divisions).map_err(ConfigError::FolderDivisions)?;

        Ok(Self {
            root,
            output,
            file_divisions,
            folder_divisions,
            follow_symlinks: false,
        })
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub layout: ReportLayout,
    pub files: usize,
    pub dirs: usize,
    pub total_size: u64,
    /// Recoverable traversal errors
    pub errors: usize,
    /// Whether the summary block made it into the report
    pub patched: bool,
}

/// Scan `request.root` and write the banded report to `request.output`.
///
/// Only failing to write the report body is an error. A failed patch is
/// logged and leaves the unpatched report in place.
pub fn generate_report(
    request: &ReportRequest,
    progress: &dyn ProgressReporter,
) -> Result<ReportSummary> {
    info!("Scanning {}", request.root.display());
    let scan = DirScanner::new()
        .follow_symlinks(request.follow_symlinks)
        .scan(&request.root, progress);
    let files = scan.files.len();
    let dirs = scan.dirs_full.len();
    let errors = scan.errors;
    let total_size = scan.total_size;

    info!("Sorting {} files and {} directories", files, dirs);
    let ranked = scan.rank();

    info!("Writing {}", request.output.display());
    let file = File::create(&request.output)
        .with_context(|| format!("Failed to create report {}", request.output.display()))?;
    let mut writer = ReportWriter::new(BufWriter::new(file));
    let layout = writer
        .write_report(
            &request.root,
            &ranked,
            &request.file_divisions,
            &request.folder_divisions,
        )
        .with_context(|| format!("Failed to write report {}", request.output.display()))?;
    writer
        .into_inner()
        .flush()
        .with_context(|| format!("Failed to flush report {}", request.output.display()))?;

    let patched = match patch_header(&request.output, &layout.summary()) {
        Ok(()) => true,
        Err(err) => {
            warn!("{}", err);
            warn!(
                "The report at {} is complete but has no summary block",
                request.output.display()
            );
            false
        }
    };

    Ok(ReportSummary {
        layout,
        files,
        dirs,
        total_size,
        errors,
        patched,
    })
}
