pub mod error;
pub mod sheet_extractor;
