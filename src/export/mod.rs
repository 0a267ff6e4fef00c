mod csv;

pub use csv::{build_csv, write_csv, DEFAULT_EXPORT_FILE};
