use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::namespace::{parse_declared_namespace, Namespace};
use super::path_resolver::WorkspacePathResolver;

/// How one source file contributed to the root set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFileEntry {
    pub path: PathBuf,
    pub namespace: Option<Namespace>,
    pub root: PathBuf,
}

/// Infers source roots by stripping each file's declared package from its directory.
///
/// `src/com/acme/Foo.java` declaring `package com.acme;` has root `src`.
/// The namespace of a directory is read from the first file seen in it and
/// cached for the rest of the call only.
pub struct SourceRootResolver;

impl SourceRootResolver {
    /// Distinct source roots for `files`
    pub fn resolve_roots<I, P, W>(files: I, workspace: &W) -> Result<BTreeSet<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        W: WorkspacePathResolver + ?Sized,
    {
        let entries = Self::resolve_entries(files, workspace)?;
        Ok(entries.into_iter().map(|entry| entry.root).collect())
    }

    /// Per-file breakdown, in input order
    pub fn resolve_entries<I, P, W>(files: I, workspace: &W) -> Result<Vec<SourceFileEntry>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        W: WorkspacePathResolver + ?Sized,
    {
        let mut namespaces: HashMap<PathBuf, Option<Namespace>> = HashMap::new();
        let mut entries = Vec::new();

        for file in files {
            let path = workspace.resolve(file.as_ref());
            let dir = path
                .parent()
                .ok_or_else(|| {
                    Error::parse(path.display(), "source path", "file has no parent directory")
                })?
                .to_path_buf();

            let namespace = match namespaces.get(&dir) {
                Some(cached) => cached.clone(),
                None => {
                    let parsed = parse_declared_namespace(&path)?;
                    debug!(
                        "Namespace of {} is {} (from {})",
                        dir.display(),
                        parsed.as_ref().map_or("<none>", Namespace::as_str),
                        path.display()
                    );
                    namespaces.insert(dir.clone(), parsed.clone());
                    parsed
                }
            };

            let root = match &namespace {
                Some(ns) => strip_namespace(&dir, ns),
                None => dir,
            };

            entries.push(SourceFileEntry {
                path,
                namespace,
                root,
            });
        }

        Ok(entries)
    }
}

/// `dir` with the namespace's path length taken off its end.
///
/// When the trailing components spell the namespace they are popped. Otherwise
/// the same number of characters is cut, and a directory shorter than the
/// namespace path is kept as is.
fn strip_namespace(dir: &Path, namespace: &Namespace) -> PathBuf {
    let suffix = namespace.to_relative_path();
    if dir.ends_with(&suffix) {
        let mut root = dir.to_path_buf();
        for _ in namespace.segments() {
            root.pop();
        }
        return root;
    }

    let dir_str = dir.to_string_lossy();
    let suffix_len = suffix.to_string_lossy().chars().count();
    let dir_len = dir_str.chars().count();
    if dir_len <= suffix_len {
        warn!(
            "Directory {} is shorter than package `{}`, using it as the source root",
            dir.display(),
            namespace
        );
        return dir.to_path_buf();
    }

    let root: String = dir_str.chars().take(dir_len - suffix_len).collect();
    warn!(
        "Directory {} does not end with package `{}`, using {} as the source root",
        dir.display(),
        namespace,
        root
    );
    PathBuf::from(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_same_package_files_share_root() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "src/x/y/A.java", "package x.y;\nclass A {}\n");
        write(ws, "src/x/y/B.java", "package x.y;\nclass B {}\n");

        let roots =
            SourceRootResolver::resolve_roots(["src/x/y/A.java", "src/x/y/B.java"], ws).unwrap();
        assert_eq!(roots, BTreeSet::from([ws.join("src")]));
    }

    #[test]
    fn test_file_without_namespace_roots_at_its_directory() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "scripts/Main.java", "class Main {}\n");

        let roots = SourceRootResolver::resolve_roots(["scripts/Main.java"], ws).unwrap();
        assert_eq!(roots, BTreeSet::from([ws.join("scripts")]));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "java/com/acme/Foo.java", "package com.acme;\n");
        write(ws, "javatests/com/acme/FooTest.java", "package com.acme;\n");
        write(ws, "kotlin/Bar.kt", "fun main() {}\n");
        let files = [
            "java/com/acme/Foo.java",
            "javatests/com/acme/FooTest.java",
            "kotlin/Bar.kt",
        ];

        let first = SourceRootResolver::resolve_roots(files, ws).unwrap();
        let second = SourceRootResolver::resolve_roots(files, ws).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_kotlin_package_without_semicolon() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "src/main/kotlin/com/acme/App.kt", "package com.acme\n\nfun main() {}\n");

        let roots =
            SourceRootResolver::resolve_roots(["src/main/kotlin/com/acme/App.kt"], ws).unwrap();
        assert_eq!(roots, BTreeSet::from([ws.join("src/main/kotlin")]));
    }

    #[test]
    fn test_absolute_paths_are_not_rejoined() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "src/com/acme/Foo.java", "package com.acme;\n");
        let absolute = ws.join("src/com/acme/Foo.java");

        let roots =
            SourceRootResolver::resolve_roots([absolute], Path::new("/somewhere/else")).unwrap();
        assert_eq!(roots, BTreeSet::from([ws.join("src")]));
    }

    #[test]
    fn test_first_file_decides_directory_namespace() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "src/a/b/One.java", "package a.b;\n");
        write(ws, "src/a/b/Two.java", "package b;\n");

        let entries =
            SourceRootResolver::resolve_entries(["src/a/b/One.java", "src/a/b/Two.java"], ws)
                .unwrap();
        assert_eq!(entries[1].namespace, Some(Namespace::new("a.b")));
        assert_eq!(entries[0].root, entries[1].root);
        assert_eq!(entries[1].root, ws.join("src"));
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();

        match SourceRootResolver::resolve_roots(["src/Missing.java"], ws) {
            Err(Error::Io { path, .. }) => assert_eq!(path, ws.join("src/Missing.java")),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_directory_loses_namespace_length() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "src/xcom/acme/Foo.java", "package com.acme;\n");

        let roots = SourceRootResolver::resolve_roots(["src/xcom/acme/Foo.java"], ws).unwrap();
        assert_eq!(roots, BTreeSet::from([ws.join("src/x")]));
    }

    #[test]
    fn test_kotlin_file_outside_package_directories_still_resolves() {
        let temp_dir = TempDir::new().unwrap();
        let ws = temp_dir.path();
        write(ws, "src/main/kotlin/App.kt", "package com.acme\n");

        let entries = SourceRootResolver::resolve_entries(["src/main/kotlin/App.kt"], ws).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].namespace, Some(Namespace::new("com.acme")));
        assert_eq!(entries[0].root, ws.join("src/mai"));
    }

    #[test]
    fn test_directory_shorter_than_namespace_is_kept() {
        let namespace = Namespace::new("com.acme.util");
        assert_eq!(
            strip_namespace(Path::new("lib"), &namespace),
            PathBuf::from("lib")
        );
    }
}
