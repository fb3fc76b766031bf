//! Summary splicing
//!
//! The summary block lists line numbers that only exist once the body has
//! been written, so the body carries a placeholder line starting with
//! [`SENTINEL`]. Patching copies the report into a temp file next to it,
//! swapping the placeholder for the summary, then renames the temp file
//! over the report. The temp file lives in the same directory so the
//! rename never crosses filesystems.

use log::warn;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::PatchError;

/// First byte of the placeholder line
pub const SENTINEL: u8 = b'#';

const TEMP_PREFIX: &str = "~sizeband-";

/// Replace the first line-leading [`SENTINEL`] in `report` with `summary`.
///
/// On any failure the original report is left untouched. If the final
/// rename fails, the patched temp file is kept and its path is part of the
/// returned error.
pub fn patch_header(report: &Path, summary: &str) -> Result<(), PatchError> {
    let original = File::open(report).map_err(|source| PatchError::Open {
        path: report.to_path_buf(),
        source,
    })?;
    let permissions = original.metadata().ok().map(|meta| meta.permissions());

    let dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(|source| PatchError::TempFile {
            dir: dir.to_path_buf(),
            source,
        })?;

    let found = {
        let mut reader = BufReader::new(original);
        let mut writer = BufWriter::new(temp.as_file());
        splice(&mut reader, &mut writer, summary).and_then(|found| {
            writer.flush()?;
            Ok(found)
        })
    };
    let found = match found {
        Ok(found) => found,
        Err(source) => {
            let temp_path = temp.path().to_path_buf();
            discard(temp);
            return Err(PatchError::Copy {
                original: report.to_path_buf(),
                temp: temp_path,
                source,
            });
        }
    };
    if !found {
        discard(temp);
        return Err(PatchError::SentinelMissing {
            path: report.to_path_buf(),
        });
    }

    if let Some(permissions) = permissions {
        if let Err(err) = fs::set_permissions(temp.path(), permissions) {
            warn!(
                "could not copy permissions to {}: {}",
                temp.path().display(),
                err
            );
        }
    }

    match temp.persist(report) {
        Ok(_) => Ok(()),
        Err(err) => {
            let temp_path = err.file.path().to_path_buf();
            if let Err(keep_err) = err.file.keep() {
                warn!(
                    "could not keep patched copy {}: {}",
                    temp_path.display(),
                    keep_err.error
                );
            }
            Err(PatchError::Replace {
                original: report.to_path_buf(),
                temp: temp_path,
                source: err.error,
            })
        }
    }
}

/// Copy `reader` to `writer`, replacing the sentinel byte of the first line
/// that starts with it. Returns whether that line was found.
fn splice<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, summary: &str) -> io::Result<bool> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(false);
        }
        if line.first() == Some(&SENTINEL) {
            writer.write_all(summary.as_bytes())?;
            writer.write_all(&line[1..])?;
            io::copy(reader, writer)?;
            return Ok(true);
        }
        writer.write_all(&line)?;
    }
}

fn discard(temp: tempfile::NamedTempFile) {
    let path = temp.path().to_path_buf();
    if let Err(err) = temp.close() {
        warn!("failed to remove temp file {}: {}", path.display(), err);
    }
}
