//! Parsing of the line-oriented output aspect scripts produce

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::types::Label;

use super::AspectScript;

/// Marker line opening an aspect's records, followed by the script file name
pub const FRAME_BEGIN: &str = "@@bazel-leaf:begin";
/// Marker line closing an aspect's records, followed by the script file name
pub const FRAME_END: &str = "@@bazel-leaf:end";

static DEPENDENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<target\s*(\S.*?)\s*>$").expect("dependency pattern is a valid regex")
});

/// Extract the records between the begin and end markers for `script`.
///
/// A marker only has to end its line, so text in front of it is ignored.
/// Records get no such treatment: each is kept as printed, minus trailing
/// whitespace. Lines outside the frame and trailing empty records are dropped.
pub fn parse_framed_output(
    stdout: &str,
    script: AspectScript,
    target: &Label,
) -> Result<Vec<String>> {
    let begin = format!("{FRAME_BEGIN} {}", script.file_name());
    let end = format!("{FRAME_END} {}", script.file_name());

    let mut lines = stdout.lines();
    let mut found_begin = false;
    for line in lines.by_ref() {
        if line.trim_end().ends_with(&begin) {
            found_begin = true;
            break;
        }
        if line.contains(&end) {
            return Err(Error::parse(target, script, "end marker found before begin marker"));
        }
    }
    if !found_begin {
        return Err(Error::parse(target, script, format!("missing `{begin}` marker")));
    }

    let mut records = Vec::new();
    let mut found_end = false;
    for line in lines {
        if line.trim_end().ends_with(&end) {
            found_end = true;
            break;
        }
        records.push(line.trim_end().to_string());
    }
    if !found_end {
        return Err(Error::parse(target, script, format!("missing `{end}` marker")));
    }

    while records.last().is_some_and(|r| r.is_empty()) {
        records.pop();
    }

    Ok(records)
}

/// `<target //foo/bar:baz>` -> `//foo/bar:baz`; anything else -> `None`
pub fn parse_dependency_line(line: &str) -> Option<&str> {
    DEPENDENCY_PATTERN
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
