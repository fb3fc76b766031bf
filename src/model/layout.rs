use crate::util::format_size;

/// The three ranked sections of a report, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Files,
    FoldersFull,
    FoldersPure,
}

impl SectionKind {
    /// Label used for this section in the summary block
    pub fn summary_label(self) -> &'static str {
        match self {
            SectionKind::Files => "Files",
            SectionKind::FoldersFull => "Folders fullsort",
            SectionKind::FoldersPure => "Folders puresort",
        }
    }

    /// Banner line that opens this section in the report body
    pub fn banner(self) -> &'static str {
        match self {
            SectionKind::Files => "==== FILES START====",
            SectionKind::FoldersFull => "==== FOLDERS FULL START ====",
            SectionKind::FoldersPure => "==== FOLDERS PURE START ====",
        }
    }
}

/// Line span (1-based, inclusive) of one threshold band, marker lines included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub threshold: u64,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    pub kind: SectionKind,
    /// Line of the section banner
    pub start_line: usize,
    pub bands: Vec<Band>,
}

impl SectionLayout {
    /// Render this section's summary line, e.g.
    /// `Files: L7 | 1 GB: L9-L12 | 500 B: L13-L20`
    pub fn summary_line(&self) -> String {
        let mut line = format!("{}: L{}", self.kind.summary_label(), self.start_line);
        for band in &self.bands {
            line.push_str(&format!(
                " | {}: L{}-L{}",
                format_size(band.threshold),
                band.start_line,
                band.end_line
            ));
        }
        line
    }
}

/// Where every section and band landed in a written report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub files: SectionLayout,
    pub folders_full: SectionLayout,
    pub folders_pure: SectionLayout,
}

impl ReportLayout {
    /// Number of lines the summary block occupies once spliced in
    pub const SUMMARY_LINES: usize = 3;

    pub fn sections(&self) -> [&SectionLayout; 3] {
        [&self.files, &self.folders_full, &self.folders_pure]
    }

    /// The summary block that replaces the placeholder, without a trailing newline.
    pub fn summary(&self) -> String {
        self.sections()
            .iter()
            .map(|section| section.summary_line())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
