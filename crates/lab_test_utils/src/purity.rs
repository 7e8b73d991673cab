//! Purity testing utilities.
//!
//! Engine views must be pure: the same document and selection always give
//! the same output, and the document is never touched. This harness runs a
//! view several times against one snapshot and checks both.
//!
//! Outputs are compared through their JSON form, so any `Serialize` result
//! works. Infinite values serialize as `null`, which still compares
//! consistently between runs.

use lab_core::data::Document;
use serde::Serialize;

/// Result of a purity test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurityResult {
    /// Every run produced the same output.
    pub outputs_match: bool,
    /// The document equals its snapshot after all runs.
    pub document_unchanged: bool,
    /// JSON fingerprint of each run's output.
    pub fingerprints: Vec<String>,
}

impl PurityResult {
    /// Whether the view behaved as a pure function.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.outputs_match && self.document_unchanged
    }

    /// Number of distinct outputs (should be 1).
    #[must_use]
    pub fn unique_outputs(&self) -> usize {
        let mut unique = self.fingerprints.clone();
        unique.sort_unstable();
        unique.dedup();
        unique.len()
    }

    /// Assert purity, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if outputs differ between runs or the document changed.
    pub fn assert_pure(&self) {
        assert!(
            self.is_pure(),
            "View is not pure!\n\
             Runs: {}\n\
             Unique outputs: {} (expected 1)\n\
             Document unchanged: {}",
            self.fingerprints.len(),
            self.unique_outputs(),
            self.document_unchanged
        );
    }
}

/// Stable text fingerprint of a serializable value.
///
/// Values that fail to serialize fingerprint as their error message.
#[must_use]
pub fn fingerprint<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

/// Run `view` `runs` times against `document` and check purity.
///
/// # Example
///
/// ```ignore
/// use lab_core::tables::class_table;
/// use lab_core::selection::Selection;
/// use lab_test_utils::{fixtures::example_document, purity::verify_purity};
///
/// let doc = example_document();
/// let selection = Selection::from_config(&doc.config);
/// verify_purity(&doc, 3, |d| class_table(d, &selection)).assert_pure();
/// ```
pub fn verify_purity<T, F>(document: &Document, runs: usize, view: F) -> PurityResult
where
    T: Serialize,
    F: Fn(&Document) -> T,
{
    let snapshot = document.clone();
    let fingerprints: Vec<String> = (0..runs).map(|_| fingerprint(&view(document))).collect();

    let outputs_match = fingerprints.windows(2).all(|w| w[0] == w[1]);
    let document_unchanged = *document == snapshot;

    tracing::trace!(runs, outputs_match, document_unchanged, "purity check");

    PurityResult {
        outputs_match,
        document_unchanged,
        fingerprints,
    }
}
