pub mod formatter;

pub use formatter::{print_artifacts, print_outcome_summary, print_source_entries};
