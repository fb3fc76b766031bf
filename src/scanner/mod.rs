//! Directory size scanner
//!
//! Walks a directory tree with `walkdir` in contents-first order and
//! records, in post-order:
//!
//! - every file with its size
//! - every folder with its full size (all descendants)
//! - every folder with its pure size (direct child files only)
//!
//! Filesystem failures never abort the walk. A folder that cannot be
//! listed is still recorded, with size 0, and a file that cannot be
//! stat'ed is recorded with size 0. Each failure is logged and counted.

mod progress;

pub use progress::{IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter, VerboseProgress};

use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::model::{ScanResult, SizedEntry};

/// Directory size scanner
#[derive(Debug, Clone, Default)]
pub struct DirScanner {
    follow_symlinks: bool,
}

impl DirScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into symlinked folders and size symlinked files by their
    /// target. A link back to one of its own ancestors is skipped.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Scan `root`. Recorded paths are `root` joined with child names, so
    /// pass an absolute root to get absolute paths back.
    pub fn scan(&self, root: &Path, progress: &dyn ProgressReporter) -> ScanResult {
        let handle = progress.start("Calculating");
        let mut ctx = WalkCtx {
            progress: handle.as_ref(),
            pending: Vec::new(),
            root_recorded: false,
            out: ScanResult::default(),
        };

        let walker = WalkDir::new(root)
            .contents_first(true)
            .follow_links(self.follow_symlinks);
        for entry in walker {
            match entry {
                Ok(entry) => ctx.visit(entry),
                Err(err) => ctx.fail(err),
            }
        }
        ctx.finish_root(root);
        handle.finish();

        let mut out = ctx.out;
        out.total_size = ctx.pending.first().map_or(0, |sums| sums.full);
        debug!(
            "Scanned {}: {} files, {} directories, {} errors",
            root.display(),
            out.files.len(),
            out.dirs_full.len(),
            out.errors
        );
        out
    }
}

/// Sizes gathered so far for the children of one open folder
#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    full: u64,
    pure: u64,
}

/// Walk state
///
/// `pending[d]` holds the sums of the entries seen at depth `d` whose
/// parent folder has not been yielded yet. Contents-first order yields a
/// folder right after its last descendant, so taking `pending[d + 1]`
/// at that point gives exactly that folder's children.
struct WalkCtx<'a> {
    progress: &'a dyn ProgressHandle,
    pending: Vec<Sums>,
    root_recorded: bool,
    out: ScanResult,
}

impl WalkCtx<'_> {
    fn visit(&mut self, entry: DirEntry) {
        let depth = entry.depth();
        if entry.file_type().is_dir() {
            let Sums { full, pure } = self.take(depth + 1);
            self.record_dir(entry.path(), full, pure);
            self.add(depth, full, 0);
            if depth == 0 {
                self.root_recorded = true;
            }
            return;
        }
        if depth == 0 {
            // The root is a symlink or not a folder at all. It is recorded
            // as a folder once the walk is over.
            return;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                self.out.errors += 1;
                warn!("err file_size {}: {}", entry.path().display(), err);
                0
            }
        };
        self.add(depth, size, size);
        self.record_file(entry.into_path(), size);
    }

    fn fail(&mut self, err: walkdir::Error) {
        self.out.errors += 1;

        if let (Some(ancestor), Some(path)) = (err.loop_ancestor(), err.path()) {
            warn!(
                "symlink cycle {} -> {}: skipped",
                path.display(),
                ancestor.display()
            );
            return;
        }
        warn!("err walk: {}", err);
        let Some(path) = err.path() else {
            return;
        };

        // A folder that could not be listed is still yielded after this
        // error, and a failed root is handled by `finish_root`. Anything
        // else is an entry that could not be stat'ed.
        if err.depth() == 0 || path.is_dir() {
            return;
        }
        let path = path.to_path_buf();
        self.record_file(path, 0);
    }

    /// Record the root folder if the walk never yielded it as one.
    fn finish_root(&mut self, root: &Path) {
        if self.root_recorded {
            return;
        }
        let Sums { full, pure } = self.take(1);
        self.record_dir(root, full, pure);
        self.add(0, full, 0);
    }

    fn take(&mut self, depth: usize) -> Sums {
        self.pending
            .get_mut(depth)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn add(&mut self, depth: usize, full: u64, pure: u64) {
        if self.pending.len() <= depth {
            self.pending.resize(depth + 1, Sums::default());
        }
        let sums = &mut self.pending[depth];
        sums.full += full;
        sums.pure += pure;
    }

    fn record_file(&mut self, path: PathBuf, bytes: u64) {
        self.out.files.push(SizedEntry::new(path, bytes));
        self.notify();
    }

    fn record_dir(&mut self, dir: &Path, full: u64, pure: u64) {
        self.out.dirs_full.push(SizedEntry::new(dir, full));
        self.out.dirs_pure.push(SizedEntry::new(dir, pure));
        self.notify();
    }

    fn notify(&self) {
        self.progress
            .update(self.out.files.len() as u64, self.out.dirs_full.len() as u64);
    }
}
