pub mod formatter;

pub use formatter::{
    build_report, format_entries_table, format_points, format_summary, format_vaf_panel,
    format_weight_table, should_use_colors, truncate_name, ProjectReport, Report,
};
