use bazel_leaf_core::{config::DEFAULT_BAZEL_BIN, BazelLeafConfig};

const PLACEHOLDER_TARGET: &str = "//path/to/package:target";

/// Configuration written by `bazel-leaf init`
pub fn starter_config(target: Option<&str>, test_target: Option<&str>) -> BazelLeafConfig {
    BazelLeafConfig {
        bazel_bin: Some(DEFAULT_BAZEL_BIN.to_string()),
        target: Some(target.unwrap_or(PLACEHOLDER_TARGET).to_string()),
        test_target: test_target.map(str::to_string),
        ..Default::default()
    }
}
