use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sizeband",
    version,
    about = "Rank files and folders by size into a banded text report"
)]
pub struct Cli {
    /// Folder to analyse
    pub root: PathBuf,

    /// Where to write the report
    #[arg(short, long, env = "SIZEBAND_OUTPUT", default_value = "sizeband-report.txt")]
    pub output: PathBuf,

    /// Size bands for files, e.g. "10gb,1gb,500b" (empty for none)
    #[arg(long, env = "SIZEBAND_FILE_DIVISIONS", default_value = "")]
    pub file_divisions: String,

    /// Size bands for folders, same syntax as --file-divisions
    #[arg(long, env = "SIZEBAND_FOLDER_DIVISIONS", default_value = "")]
    pub folder_divisions: String,

    /// Descend into symlinked folders (cycles are detected and skipped)
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Hide the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}
