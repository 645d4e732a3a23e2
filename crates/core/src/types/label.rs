use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A Bazel label such as `//path/to:name` or `@repo//pkg:name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Label {
    repository: Option<String>,
    package: String,
    name: String,
}

impl Label {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Configuration("target label is empty".to_string()));
        }

        let (repository, rest) = match trimmed.strip_prefix('@') {
            Some(after_at) => {
                let (repo, rest) = after_at.split_once("//").ok_or_else(|| {
                    Error::Configuration(format!("label `{trimmed}` has a repository but no `//`"))
                })?;
                (Some(repo.to_string()), format!("//{rest}"))
            }
            None => (None, trimmed.to_string()),
        };

        let (package, name) = if let Some(absolute) = rest.strip_prefix("//") {
            match absolute.split_once(':') {
                Some((package, name)) => (package.to_string(), name.to_string()),
                // `//foo/bar` is shorthand for `//foo/bar:bar`
                None => {
                    let name = absolute.rsplit('/').next().unwrap_or_default();
                    (absolute.to_string(), name.to_string())
                }
            }
        } else if let Some(name) = rest.strip_prefix(':') {
            (String::new(), name.to_string())
        } else {
            return Err(Error::Configuration(format!(
                "label `{trimmed}` must start with `//`, `@` or `:`"
            )));
        };

        let package = package.trim_end_matches('/').to_string();
        if name.is_empty() {
            return Err(Error::Configuration(format!(
                "label `{trimmed}` has an empty target name"
            )));
        }
        if name.contains(':') || package.contains(':') {
            return Err(Error::Configuration(format!(
                "label `{trimmed}` contains more than one `:`"
            )));
        }

        Ok(Self {
            repository,
            package,
            name,
        })
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Package path relative to the workspace root, e.g. `path/to`
    pub fn package_path(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label with `:` mapped onto a path separator, e.g. `path/to/name`
    pub fn host_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.name);
        path
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(repo) = &self.repository {
            write!(f, "@{repo}")?;
        }
        write!(f, "//{}:{}", self.package, self.name)
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Label::parse(s)
    }
}

impl TryFrom<String> for Label {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Label::parse(&value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

/// A main target and its optional test counterpart, resolved once per pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_label: Option<Label>,
}

impl Target {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            test_label: None,
        }
    }

    pub fn with_test(mut self, test_label: Label) -> Self {
        self.test_label = Some(test_label);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_label() {
        let label = Label::parse("//path/to:name").unwrap();
        assert_eq!(label.package_path(), "path/to");
        assert_eq!(label.name(), "name");
        assert_eq!(label.repository(), None);
        assert_eq!(label.to_string(), "//path/to:name");
    }

    #[test]
    fn test_parse_shorthand_label() {
        let label = Label::parse("//java/com/acme").unwrap();
        assert_eq!(label.name(), "acme");
        assert_eq!(label.to_string(), "//java/com/acme:acme");
    }

    #[test]
    fn test_parse_repository_and_relative_labels() {
        let label = Label::parse("@maven//lib:guava").unwrap();
        assert_eq!(label.repository(), Some("maven"));
        assert_eq!(label.to_string(), "@maven//lib:guava");

        let label = Label::parse(":app").unwrap();
        assert_eq!(label.package_path(), "");
        assert_eq!(label.to_string(), "//:app");
    }

    #[test]
    fn test_host_path() {
        let label = Label::parse("//path/to:name").unwrap();
        assert_eq!(label.host_path(), PathBuf::from("path/to/name"));

        let label = Label::parse("//:root").unwrap();
        assert_eq!(label.host_path(), PathBuf::from("root"));
    }

    #[test]
    fn test_rejects_malformed_labels() {
        for raw in ["", "   ", "foo/bar:baz", "//foo:", "//a:b:c", "@repo"] {
            let result = Label::parse(raw);
            assert!(
                matches!(result, Err(Error::Configuration(_))),
                "expected configuration error for {raw:?}"
            );
        }
    }

    #[test]
    fn test_label_serde_as_string() {
        let label = Label::parse("//foo:bar").unwrap();
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"//foo:bar\"");

        let parsed: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, label);
    }
}
