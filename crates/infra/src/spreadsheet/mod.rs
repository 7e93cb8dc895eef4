//! Spreadsheet encoding

pub mod xlsx;

pub use xlsx::XlsxCodec;
