//! Source-root inference from Bazel source file lists

pub mod namespace;
pub mod path_resolver;
pub mod resolver;

pub use namespace::{parse_declared_namespace, Namespace};
pub use path_resolver::WorkspacePathResolver;
pub use resolver::{SourceFileEntry, SourceRootResolver};
