use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single division token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DivisionFault {
    #[error("token is shorter than two characters")]
    TooShort,
    #[error("token does not end in 'b'")]
    MissingSuffix,
    #[error("unit must be gb, mb, kb or b")]
    UnknownUnit,
    #[error("no number before the unit")]
    EmptyNumber,
    #[error("number is not a decimal literal")]
    MalformedNumber,
    #[error("value does not fit in 64 bits")]
    TooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DivisionError {
    #[error("invalid division '{token}': {reason}")]
    InvalidDivision { token: String, reason: DivisionFault },
}

/// Fatal problems with the run configuration, detected before any traversal
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("folder does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("output path has no parent directory: {}", .0.display())]
    OutputHasNoParent(PathBuf),

    #[error("output path is a directory: {}", .0.display())]
    OutputIsDirectory(PathBuf),

    #[error("could not resolve {}: {source}", path.display())]
    Resolve { path: PathBuf, source: io::Error },

    #[error("failed to parse file divisions: {0}")]
    FileDivisions(#[source] DivisionError),

    #[error("failed to parse folder divisions: {0}")]
    FolderDivisions(#[source] DivisionError),
}

impl ConfigError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::RootMissing(_) | ConfigError::Resolve { .. } => 1,
            ConfigError::RootNotDirectory(_) => 2,
            ConfigError::FileDivisions(_) | ConfigError::FolderDivisions(_) => 3,
            ConfigError::OutputHasNoParent(_) | ConfigError::OutputIsDirectory(_) => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// A folder present in one size collection is missing from the other.
    #[error("folder missing from cross-reference sizes: {}", path.display())]
    MissingCrossReference { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to open report {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to create temp file in {}: {source}", dir.display())]
    TempFile { dir: PathBuf, source: io::Error },

    #[error("failed to copy report {} into {}: {source}", original.display(), temp.display())]
    Copy {
        original: PathBuf,
        temp: PathBuf,
        source: io::Error,
    },

    #[error("summary placeholder not found in {}", path.display())]
    SentinelMissing { path: PathBuf },

    #[error(
        "failed to replace {} with patched copy {}: {source}",
        original.display(),
        temp.display()
    )]
    Replace {
        original: PathBuf,
        temp: PathBuf,
        source: io::Error,
    },
}
