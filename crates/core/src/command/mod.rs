//! Bazel command generation and execution

pub mod bazel_command;

// Re-export commonly used types
pub use bazel_command::{BazelCommand, CommandType};
