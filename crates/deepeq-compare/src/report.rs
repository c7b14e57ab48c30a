//! Mismatch taxonomy and aggregated comparison reports.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of divergence was detected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum MismatchKind {
    /// Runtime types differ at a compared position.
    Type,
    /// Same type, different number of structural children.
    Arity,
    /// Same position, different field label; descent continues regardless.
    Label,
    /// A registered per-type predicate returned false.
    CustomMatcher,
    /// Enumerant tags differ.
    Enum,
    /// Terminal leaf values differ.
    Leaf,
    /// One side closes a reference cycle where the other does not.
    Loop,
    /// No comparison strategy applies: the introspector's classification is
    /// incomplete for this value, a coverage gap rather than a test failure.
    Uncomparable,
}

/// A single divergence, reported at the point of detection with the full
/// field paths from both roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub message: String,
    pub path_expected: String,
    pub path_actual: String,
}

impl core::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Aggregation of every mismatch one traversal produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub mismatches: Vec<Mismatch>,
}

impl ComparisonReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one mismatch.
    pub fn record(&mut self, mismatch: Mismatch) {
        self.mismatches.push(mismatch);
    }

    /// True if the traversal found no divergence.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Number of recorded mismatches of the given kind.
    pub fn count_of(&self, kind: MismatchKind) -> usize {
        self.mismatches.iter().filter(|m| m.kind == kind).count()
    }

    /// Human-readable multi-line summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("============================================================\n");
        out.push_str(&format!(
            "Reflective comparison: {}\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));
        out.push_str(&format!("{} mismatch(es)\n", self.mismatches.len()));
        for mismatch in &self.mismatches {
            out.push_str(&format!("  {}\n", mismatch));
        }
        out.push_str("============================================================");
        out
    }

    /// Print the summary to stdout.
    pub fn print_summary(&self) {
        println!("{}", self.render());
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

/// Error returned by the `Result`-style entry point when the two values are
/// not reflectively equal.
#[derive(Debug, Error)]
#[error("reflective comparison found {} mismatch(es)", .mismatches.len())]
pub struct NotEqual {
    pub mismatches: Vec<Mismatch>,
}
