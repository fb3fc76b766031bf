use std::ops::Range;

use crate::model::SizedEntry;

/// Index ranges of a size-sorted slice split by descending thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// One range per threshold, in threshold order
    pub bands: Vec<Range<usize>>,
    /// Entries smaller than every threshold
    pub tail: Range<usize>,
}

/// Split `entries` (sorted by size descending) into one band per threshold.
///
/// Band `i` holds the entries with `thresholds[i] <= bytes`, taken from
/// where band `i - 1` stopped. The cursor never moves back, so thresholds
/// must be sorted descending as well; unsorted thresholds yield empty
/// bands rather than an error.
pub fn partition(entries: &[SizedEntry], thresholds: &[u64]) -> Partition {
    let mut cursor = 0;
    let bands = thresholds
        .iter()
        .map(|&threshold| {
            let start = cursor;
            while cursor < entries.len() && entries[cursor].bytes >= threshold {
                cursor += 1;
            }
            start..cursor
        })
        .collect();
    Partition {
        bands,
        tail: cursor..entries.len(),
    }
}
