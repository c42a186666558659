mod backup;
mod crawler;
mod error;
mod extractor;
mod materializer;
mod report;
#[cfg(test)]
mod test_util;

pub use backup::*;
pub use crawler::*;
pub use error::{Error, Result};
pub use extractor::*;
pub use materializer::*;
pub use report::*;
