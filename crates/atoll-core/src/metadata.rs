//! # Append-Only Metadata Log
//!
//! Every asset record carries a log of document references and event
//! annotations (hash pointers, amendments, oracle readings). The log only
//! grows: fragments are appended in call order and never rewritten in
//! place, preserving the audit trail.
//!
//! The rendered form is the pipe-delimited string the platform has always
//! exported: the seed fragment followed by each appended fragment, joined
//! with `|`.

use serde::{Deserialize, Serialize};

/// Delimiter between rendered fragments.
const SEPARATOR: char = '|';

/// An append-only log of metadata fragments.
///
/// Fragment content is not validated — callers are trusted to append
/// well-formed annotations (`"appraisal:<hash>"`, `"trigger:<hash>"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataLog {
    fragments: Vec<String>,
}

impl MetadataLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A log seeded with an initial fragment (typically the primary
    /// documentation hash supplied at asset creation).
    pub fn seeded(seed: impl Into<String>) -> Self {
        Self { fragments: vec![seed.into()] }
    }

    /// Append a fragment. Appending is the only mutation the log supports.
    pub fn append(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Number of fragments recorded so far.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the log holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments in append order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(String::as_str)
    }

    /// Render the full log as the pipe-delimited export string.
    ///
    /// The result equals the concatenation of all fragments in call order,
    /// regardless of which module appended them.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(fragment);
        }
        out
    }
}

impl std::fmt::Display for MetadataLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_log_renders_empty() {
        assert_eq!(MetadataLog::new().render(), "");
        assert!(MetadataLog::new().is_empty());
    }

    #[test]
    fn test_seeded_log() {
        let log = MetadataLog::seeded("QmDeed");
        assert_eq!(log.render(), "QmDeed");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_append_preserves_call_order() {
        let mut log = MetadataLog::seeded("QmDeed");
        log.append("appraisal:QmA");
        log.append("trigger:QmB");
        assert_eq!(log.render(), "QmDeed|appraisal:QmA|trigger:QmB");
    }

    #[test]
    fn test_iter_matches_append_order() {
        let mut log = MetadataLog::new();
        log.append("a");
        log.append("b");
        let collected: Vec<&str> = log.iter().collect();
        assert_eq!(collected, vec!["a", "b"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut log = MetadataLog::seeded("QmDeed");
        log.append("survey:QmS");
        let json = serde_json::to_string(&log).unwrap();
        let parsed: MetadataLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }

    proptest! {
        // The rendered log is always the in-order join of the appended
        // fragments, whatever the fragments contain (short of the
        // delimiter itself).
        #[test]
        fn prop_render_is_ordered_join(fragments in prop::collection::vec("[a-zA-Z0-9:._-]{0,12}", 0..8)) {
            let mut log = MetadataLog::new();
            for f in &fragments {
                log.append(f.clone());
            }
            prop_assert_eq!(log.render(), fragments.join("|"));
            prop_assert_eq!(log.len(), fragments.len());
        }
    }
}
