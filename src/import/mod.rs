pub mod mt5;

pub use mt5::{import_file, parse_report};
