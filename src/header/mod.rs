mod header_extractor;
mod impls;

pub use header_extractor::HeaderExtractor;
pub use impls::default_header_extractor::{DefaultHeaderError, DefaultHeaderExtractor};
