mod entry;
mod layout;

pub use entry::{RankedScan, ScanResult, SizedEntry};
pub use layout::{Band, ReportLayout, SectionKind, SectionLayout};
