pub mod label;

// Re-export commonly used types
pub use label::{Label, Target};
