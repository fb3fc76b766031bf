mod division;
mod format;

pub use division::{Divisions, parse_divisions};
pub use format::format_size;
