mod band;
mod patch;
mod writer;

pub use band::{Partition, partition};
pub use patch::{SENTINEL, patch_header};
pub use writer::ReportWriter;
