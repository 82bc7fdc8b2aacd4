//! Non-fatal diagnostics emitted during conversion.
//!
//! Conversion never fails on bad data: a malformed cardinality or a missing
//! type degrades to a documented default. Each such fallback is reported as a
//! [`Diagnostic`] to a [`DiagnosticSink`] passed into the converter, so
//! callers decide whether warnings are logged, collected, or both.

use std::fmt;

/// Which cardinality bound a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardinalityBound {
    Min,
    Max,
}

impl fmt::Display for CardinalityBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => f.write_str("min_card"),
            Self::Max => f.write_str("max_card"),
        }
    }
}

/// A recoverable data-quality issue found while converting.
///
/// `owner` is the short representation of the offending element, e.g.
/// `<Property "volume" (3b0a...)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A cardinality value is not an integer; the bound falls back to its
    /// default (`0` for min, unbounded for max).
    MalformedCardinality {
        bound: CardinalityBound,
        value: String,
        owner: String,
    },
    /// A property has no resolvable type; `data_type` falls back to
    /// `"string"`.
    UnresolvedType { owner: String },
    /// A package contains itself along the containment path; the repeated
    /// occurrence is skipped.
    CyclicContainment { owner: String },
}

impl Diagnostic {
    /// Returns the short representation of the offending element.
    pub fn owner(&self) -> &str {
        match self {
            Self::MalformedCardinality { owner, .. }
            | Self::UnresolvedType { owner }
            | Self::CyclicContainment { owner } => owner,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCardinality {
                bound,
                value,
                owner,
            } => write!(
                f,
                "Cannot convert {bound} value {value:?} of {owner} to int, ignoring"
            ),
            Self::UnresolvedType { owner } => {
                write!(f, "No type set, falling back to 'string' for {owner}")
            }
            Self::CyclicContainment { owner } => {
                write!(f, "Skipping {owner}: it already contains itself")
            }
        }
    }
}

/// Receiver for conversion diagnostics.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in emission order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Emits each diagnostic as a `tracing` warning and counts them.
///
/// # Examples
///
/// ```
/// use capella_schema_export::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
///
/// let mut sink = TracingSink::default();
/// sink.report(Diagnostic::UnresolvedType { owner: "<Property \"x\" (p-1)>".into() });
/// assert_eq!(sink.emitted(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TracingSink {
    emitted: usize,
}

impl TracingSink {
    /// Returns how many diagnostics were emitted.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.emitted += 1;
        tracing::warn!(owner = diagnostic.owner(), "{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_cardinality_message() {
        let diagnostic = Diagnostic::MalformedCardinality {
            bound: CardinalityBound::Max,
            value: "many".to_string(),
            owner: r#"<Property "tags" (p-1)>"#.to_string(),
        };

        assert_eq!(
            diagnostic.to_string(),
            r#"Cannot convert max_card value "many" of <Property "tags" (p-1)> to int, ignoring"#
        );
    }

    #[test]
    fn test_unresolved_type_message() {
        let diagnostic = Diagnostic::UnresolvedType {
            owner: "<Property \"lid\" (p-2)>".to_string(),
        };

        assert_eq!(
            diagnostic.to_string(),
            "No type set, falling back to 'string' for <Property \"lid\" (p-2)>"
        );
        assert_eq!(diagnostic.owner(), "<Property \"lid\" (p-2)>");
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::UnresolvedType {
            owner: "a".to_string(),
        });
        sink.report(Diagnostic::CyclicContainment {
            owner: "b".to_string(),
        });

        let owners: Vec<&str> = sink.iter().map(Diagnostic::owner).collect();
        assert_eq!(owners, vec!["a", "b"]);
    }
}
