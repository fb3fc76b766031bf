// Library crate exposing modules for integration tests

pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod util;
