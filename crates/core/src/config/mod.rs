//! Configuration management for bazel-leaf

mod settings;

// Re-export main types
pub use settings::{
    BazelLeafConfig, DecoratedConfig, CONFIG_FILE_NAME, DEFAULT_ASPECTS_DIR, DEFAULT_BAZEL_BIN,
    DEFAULT_OUTPUT_DIR,
};
