//! Banded report writer
//!
//! Writes the three ranked sections and tracks the 1-based line number of
//! everything it emits, so the summary block can point at sections and
//! bands without re-reading the file.

use rustc_hash::FxHashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use super::band::partition;
use super::patch::SENTINEL;
use crate::error::ReportError;
use crate::model::{Band, RankedScan, ReportLayout, SectionKind, SectionLayout, SizedEntry};
use crate::util::{Divisions, format_size};

/// Padding added to the longest path for the path column
const PATH_MARGIN: usize = 20;
const SIZE_WIDTH: usize = 20;

/// Rank column width: `ceil(log10(count)) + 3`, room for the digits and ". ".
fn rank_width(count: usize) -> usize {
    let mut digits = 0;
    let mut power = 1u128;
    while power < count as u128 {
        power *= 10;
        digits += 1;
    }
    digits + 3
}

/// A path as it appears in the report. Control characters are escaped so
/// every path stays on one physical line.
fn display_path(path: &Path) -> String {
    let raw = path.display().to_string();
    if !raw.chars().any(char::is_control) {
        return raw;
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        if c.is_control() {
            escaped.extend(c.escape_debug());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

fn path_width(scan: &RankedScan) -> usize {
    scan.files()
        .iter()
        .chain(scan.dirs_full())
        .map(|entry| display_path(&entry.path).chars().count())
        .max()
        .unwrap_or(0)
        + PATH_MARGIN
}

pub struct ReportWriter<W: Write> {
    out: W,
    next_line: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, next_line: 1 }
    }

    /// Number of lines the file will have once the summary is spliced in
    #[cfg(test)]
    fn lines_written(&self) -> usize {
        self.next_line - 1
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) -> io::Result<usize> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        let line = self.next_line;
        self.next_line += 1;
        Ok(line)
    }

    /// Write the full report body and return where each section and band
    /// landed.
    ///
    /// The summary block is left as a [`SENTINEL`] placeholder line; the
    /// returned line numbers already account for the lines it will expand
    /// into.
    pub fn write_report(
        &mut self,
        root: &Path,
        scan: &RankedScan,
        file_divisions: &Divisions,
        folder_divisions: &Divisions,
    ) -> Result<ReportLayout, ReportError> {
        self.line(format_args!(
            "Sorted Output {} [{}]",
            display_path(root),
            format_size(scan.total_size())
        ))?;
        self.line(format_args!(""))?;
        self.line(format_args!("{}", SENTINEL as char))?;
        self.next_line += ReportLayout::SUMMARY_LINES - 1;
        self.line(format_args!(""))?;

        let path_width = path_width(scan);

        let files = self.write_section(
            SectionKind::Files,
            scan.files(),
            file_divisions,
            path_width,
            |entry| Ok(format!("{:<SIZE_WIDTH$}", format_size(entry.bytes))),
        )?;

        let pure_sizes = size_lookup(scan.dirs_pure());
        self.line(format_args!(""))?;
        let folders_full = self.write_section(
            SectionKind::FoldersFull,
            scan.dirs_full(),
            folder_divisions,
            path_width,
            |entry| {
                let pure = cross_reference(&pure_sizes, &entry.path)?;
                Ok(folder_columns(entry.bytes, pure))
            },
        )?;

        let full_sizes = size_lookup(scan.dirs_full());
        self.line(format_args!(""))?;
        let folders_pure = self.write_section(
            SectionKind::FoldersPure,
            scan.dirs_pure(),
            folder_divisions,
            path_width,
            |entry| {
                let full = cross_reference(&full_sizes, &entry.path)?;
                Ok(folder_columns(full, entry.bytes))
            },
        )?;

        Ok(ReportLayout {
            files,
            folders_full,
            folders_pure,
        })
    }

    fn write_section<F>(
        &mut self,
        kind: SectionKind,
        entries: &[SizedEntry],
        divisions: &Divisions,
        path_width: usize,
        size_columns: F,
    ) -> Result<SectionLayout, ReportError>
    where
        F: Fn(&SizedEntry) -> Result<String, ReportError>,
    {
        let start_line = self.line(format_args!("{}", kind.banner()))?;

        let rank_width = rank_width(entries.len());
        let name = if kind == SectionKind::Files { "File" } else { "Folder" };
        let sizes = if kind == SectionKind::Files {
            format!("{:<SIZE_WIDTH$}", "Size")
        } else {
            format!("{:<SIZE_WIDTH$}{:<SIZE_WIDTH$}", "Size (Full)", "Size (Pure)")
        };
        self.line(format_args!(
            "{:<rank_width$}{:<path_width$}{}",
            "Rank", name, sizes
        ))?;

        let write_rows = |writer: &mut Self, first: usize, rows: &[SizedEntry]| -> Result<(), ReportError> {
            for (offset, entry) in rows.iter().enumerate() {
                let columns = size_columns(entry)?;
                writer.line(format_args!(
                    "{:<rank_width$}{:<path_width$}{}",
                    format!("{}. ", first + offset + 1),
                    format!("'{}'", display_path(&entry.path)),
                    columns
                ))?;
            }
            Ok(())
        };

        let split = partition(entries, divisions.as_slice());
        let mut bands = Vec::with_capacity(split.bands.len());
        for (range, &threshold) in split.bands.into_iter().zip(divisions.as_slice()) {
            let size = format_size(threshold);
            let start_line = self.line(format_args!("Marker Start {}", size))?;
            write_rows(self, range.start, &entries[range])?;
            let end_line = self.line(format_args!("Marker End {}", size))?;
            bands.push(Band {
                threshold,
                start_line,
                end_line,
            });
        }
        write_rows(self, split.tail.start, &entries[split.tail])?;

        Ok(SectionLayout {
            kind,
            start_line,
            bands,
        })
    }
}

fn size_lookup(entries: &[SizedEntry]) -> FxHashMap<&Path, u64> {
    entries
        .iter()
        .map(|entry| (entry.path.as_path(), entry.bytes))
        .collect()
}

fn cross_reference(sizes: &FxHashMap<&Path, u64>, path: &Path) -> Result<u64, ReportError> {
    sizes
        .get(path)
        .copied()
        .ok_or_else(|| ReportError::MissingCrossReference {
            path: path.to_path_buf(),
        })
}

fn folder_columns(full: u64, pure: u64) -> String {
    format!(
        "{:<SIZE_WIDTH$}{:<SIZE_WIDTH$}",
        format_size(full),
        format_size(pure)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScanResult;

    fn scan() -> RankedScan {
        ScanResult {
            files: vec![
                SizedEntry::new("/r/a.txt", 100),
                SizedEntry::new("/r/sub/b.txt", 2048),
            ],
            dirs_full: vec![SizedEntry::new("/r/sub", 2048), SizedEntry::new("/r", 2148)],
            dirs_pure: vec![SizedEntry::new("/r/sub", 2048), SizedEntry::new("/r", 100)],
            total_size: 2148,
            errors: 0,
        }
        .rank()
    }

    /// Expand the placeholder line the way the patcher does so line
    /// numbers can be checked directly.
    fn expand(text: &str, layout: &ReportLayout) -> String {
        text.replacen("\n#\n", &format!("\n{}\n", layout.summary()), 1)
    }

    fn render(scan: &RankedScan, files: &str, folders: &str) -> (ReportLayout, Vec<String>) {
        render_at(Path::new("/r"), scan, files, folders)
    }

    fn render_at(
        root: &Path,
        scan: &RankedScan,
        files: &str,
        folders: &str,
    ) -> (ReportLayout, Vec<String>) {
        let mut writer = ReportWriter::new(Vec::new());
        let layout = writer
            .write_report(
                root,
                scan,
                &Divisions::parse(files).unwrap(),
                &Divisions::parse(folders).unwrap(),
            )
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let patched = expand(&text, &layout);
        (layout, patched.lines().map(str::to_string).collect())
    }

    fn line(lines: &[String], number: usize) -> &str {
        &lines[number - 1]
    }

    #[test]
    fn test_rank_width() {
        assert_eq!(rank_width(0), 3);
        assert_eq!(rank_width(1), 3);
        assert_eq!(rank_width(2), 4);
        assert_eq!(rank_width(10), 4);
        assert_eq!(rank_width(11), 5);
        assert_eq!(rank_width(100), 5);
        assert_eq!(rank_width(101), 6);
    }

    #[test]
    fn test_header_and_summary_position() {
        let (layout, lines) = render(&scan(), "", "");

        assert_eq!(line(&lines, 1), "Sorted Output /r [2.0977 KB]");
        assert_eq!(line(&lines, 2), "");
        assert_eq!(line(&lines, 3), "Files: L7");
        assert_eq!(line(&lines, 4), "Folders fullsort: L12");
        assert_eq!(line(&lines, 5), "Folders puresort: L17");
        assert_eq!(line(&lines, 6), "");
        assert_eq!(layout.files.start_line, 7);
    }

    #[test]
    fn test_section_lines_match_banners() {
        let (layout, lines) = render(&scan(), "", "");

        for section in layout.sections() {
            assert_eq!(line(&lines, section.start_line), section.kind.banner());
        }
    }

    #[test]
    fn test_rows_ranked_with_cross_referenced_sizes() {
        let (layout, lines) = render(&scan(), "", "");

        let first_file = line(&lines, layout.files.start_line + 2);
        assert!(first_file.starts_with("1. "));
        assert!(first_file.contains("'/r/sub/b.txt'"));
        assert!(first_file.contains("2 KB"));

        let full = line(&lines, layout.folders_full.start_line + 2);
        assert!(full.contains("'/r'"));
        assert!(full.contains("2.0977 KB"));
        assert!(full.trim_end().ends_with("100 B"));

        let pure = line(&lines, layout.folders_pure.start_line + 2);
        assert!(pure.contains("'/r/sub'"));
        assert!(pure.trim_end().ends_with("2 KB"));
    }

    #[test]
    fn test_band_lines_point_at_markers() {
        let (layout, lines) = render(&scan(), "1kb,1b", "2kb");

        assert_eq!(layout.files.bands.len(), 2);
        let first = layout.files.bands[0];
        assert_eq!(line(&lines, first.start_line), "Marker Start 1 KB");
        assert_eq!(line(&lines, first.end_line), "Marker End 1 KB");
        // b.txt is the only file >= 1 KB
        assert_eq!(first.end_line - first.start_line, 2);

        let second = layout.files.bands[1];
        assert_eq!(second.start_line, first.end_line + 1);
        assert_eq!(line(&lines, second.start_line), "Marker Start 1 B");
        assert!(line(&lines, second.start_line + 1).contains("'/r/a.txt'"));

        for section in [&layout.folders_full, &layout.folders_pure] {
            let band = section.bands[0];
            assert_eq!(line(&lines, band.start_line), "Marker Start 2 KB");
            assert_eq!(line(&lines, band.end_line), "Marker End 2 KB");
        }
        // Both folders are >= 2 KB in the full section, only sub in the pure one.
        assert_eq!(layout.folders_full.bands[0].end_line - layout.folders_full.bands[0].start_line, 3);
        assert_eq!(layout.folders_pure.bands[0].end_line - layout.folders_pure.bands[0].start_line, 2);
    }

    #[test]
    fn test_line_count_matches_output() {
        let s = scan();
        let mut writer = ReportWriter::new(Vec::new());
        let layout = writer
            .write_report(
                Path::new("/r"),
                &s,
                &Divisions::parse("1kb").unwrap(),
                &Divisions::default(),
            )
            .unwrap();
        let count = writer.lines_written();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(expand(&text, &layout).lines().count(), count);
    }

    #[test]
    fn test_display_path_escapes_control_characters() {
        assert_eq!(display_path(Path::new("/r/plain name.txt")), "/r/plain name.txt");
        assert_eq!(display_path(Path::new("/r/we\nird\t.bin")), "/r/we\\nird\\t.bin");
        assert_eq!(display_path(Path::new("/r/cr\r")), "/r/cr\\r");
    }

    #[test]
    fn test_newline_in_file_name_keeps_line_numbers() {
        let scan = ScanResult {
            files: vec![
                SizedEntry::new("/r/big.bin", 4096),
                SizedEntry::new("/r/we\nird.bin", 2048),
                SizedEntry::new("/r/small.bin", 10),
            ],
            dirs_full: vec![SizedEntry::new("/r", 6154)],
            dirs_pure: vec![SizedEntry::new("/r", 6154)],
            total_size: 6154,
            errors: 0,
        }
        .rank();

        let (layout, lines) = render(&scan, "1kb", "");

        let band = layout.files.bands[0];
        assert_eq!(line(&lines, band.start_line), "Marker Start 1 KB");
        assert_eq!(line(&lines, band.end_line), "Marker End 1 KB");
        assert!(line(&lines, band.end_line - 1).contains("'/r/we\\nird.bin'"));
        for section in layout.sections() {
            assert_eq!(line(&lines, section.start_line), section.kind.banner());
        }
    }

    #[test]
    fn test_newline_in_root_stays_in_header() {
        let root = Path::new("/tmp/r\n#x");
        let scan = ScanResult {
            files: vec![SizedEntry::new(root.join("f.bin"), 5)],
            dirs_full: vec![SizedEntry::new(root, 5)],
            dirs_pure: vec![SizedEntry::new(root, 5)],
            total_size: 5,
            errors: 0,
        }
        .rank();

        let mut writer = ReportWriter::new(Vec::new());
        let layout = writer
            .write_report(root, &scan, &Divisions::default(), &Divisions::default())
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        // Only the placeholder line may start with the sentinel
        let leading: Vec<_> = text
            .lines()
            .enumerate()
            .filter(|(_, l)| l.as_bytes().first() == Some(&SENTINEL))
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(leading, vec![3]);

        let lines: Vec<_> = expand(&text, &layout).lines().map(str::to_string).collect();
        assert_eq!(line(&lines, 1), "Sorted Output /tmp/r\\n#x [5 B]");
        assert_eq!(line(&lines, 3), "Files: L7");
        for section in layout.sections() {
            assert_eq!(line(&lines, section.start_line), section.kind.banner());
        }
    }

    #[test]
    fn test_missing_cross_reference_is_an_error() {
        let broken = ScanResult {
            dirs_full: vec![SizedEntry::new("/r", 10)],
            dirs_pure: vec![SizedEntry::new("/elsewhere", 10)],
            ..Default::default()
        }
        .rank();

        let mut writer = ReportWriter::new(Vec::new());
        let err = writer
            .write_report(Path::new("/r"), &broken, &Divisions::default(), &Divisions::default())
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingCrossReference { path } if path == Path::new("/r")));
    }
}
