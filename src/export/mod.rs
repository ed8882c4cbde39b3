//! Export Module
//!
//! レポート出力フォーマット。現状は CSV のみ。

pub mod csv;

pub use csv::{to_csv, CSV_HEADER};
