use bazel_leaf_core::{Artifact, SourceFileEntry, TargetOutcome, TaskRegistry};

pub fn print_outcome_summary(outcome: &TargetOutcome) {
    println!(
        "🎯 {} ({}, {} strategy)",
        outcome.label, outcome.rule_kind, outcome.strategy
    );
    println!("   task: {}", outcome.task);
    for root in &outcome.source_roots {
        println!("   source root: {}", root.display());
    }
}

/// List artifacts, marking the ones whose task has not succeeded yet
pub fn print_artifacts<R: TaskRegistry + ?Sized>(artifacts: &[Artifact], host: &R) {
    for artifact in artifacts {
        if artifact.is_valid(host) {
            println!("📦 {}", artifact.path.display());
        } else {
            println!("⏳ {} (not built)", artifact.path.display());
        }
    }
}

pub fn print_source_entries(entries: &[SourceFileEntry]) {
    for entry in entries {
        let namespace = entry
            .namespace
            .as_ref()
            .map(|ns| ns.as_str())
            .unwrap_or("<none>");
        println!(
            "{} [{}] -> {}",
            entry.path.display(),
            namespace,
            entry.root.display()
        );
    }
}
