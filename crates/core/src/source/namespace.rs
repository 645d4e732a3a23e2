//! Detection of a source file's declared package

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Error, Result};

// `package a.b.c;` (Java) or `package a.b.c` (Kotlin)
static PACKAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*package\s+([\w.]+)\s*;?\s*$").expect("package pattern is a valid regex")
});

/// A dotted namespace such as `com.acme`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(dotted: impl Into<String>) -> Self {
        Self(dotted.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// `com.acme` -> `com/acme`
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scan `path` for its first package declaration.
///
/// Returns `Ok(None)` when the file has none; read failures are errors.
pub fn parse_declared_namespace(path: &Path) -> Result<Option<Namespace>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let reader = BufReader::new(file);

    for line in reader.lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if let Some(caps) = PACKAGE_PATTERN.captures(&line) {
            return Ok(Some(Namespace::new(&caps[1])));
        }
    }

    Ok(None)
}
