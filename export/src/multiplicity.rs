//! Multiplicity normalization.
//!
//! Turns a property's raw cardinality bounds into the canonical multiplicity
//! string of the output schema:
//!
//! | min | max | multiplicity |
//! |-----|-----|--------------|
//! | absent / `0` | absent / `*` | `*` |
//! | `1` | `1` | `1` |
//! | `0` | `5` | `0..5` |
//! | `1` | `*` | `1..*` |
//! | `2` | `0` | `2..*` |
//!
//! A bound that does not parse as an integer falls back to its default and is
//! reported once to the diagnostics sink. Normalization itself never fails.

use std::fmt;

use capella_schema_core::UNBOUNDED;

use crate::diagnostics::{CardinalityBound, Diagnostic, DiagnosticSink};

/// Resolved cardinality bounds of a property.
///
/// `Display` renders the canonical multiplicity string. A maximum of `0`
/// only counts when the minimum is `0` too; otherwise the range is open.
///
/// # Examples
///
/// ```
/// use capella_schema_export::multiplicity::Multiplicity;
///
/// assert_eq!(Multiplicity::new(0, None).to_string(), "*");
/// assert_eq!(Multiplicity::new(3, Some(3)).to_string(), "3");
/// assert_eq!(Multiplicity::new(1, None).to_string(), "1..*");
/// assert_eq!(Multiplicity::new(0, Some(5)).to_string(), "0..5");
/// assert_eq!(Multiplicity::new(2, Some(0)).to_string(), "2..*");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    pub min: i64,
    /// `None` means unbounded.
    pub max: Option<i64>,
}

impl Multiplicity {
    pub fn new(min: i64, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Parses raw bound values, reporting malformed ones to `sink`.
    ///
    /// `owner` identifies the property in diagnostics. Values are trimmed, and
    /// empty ones count as absent.
    pub fn parse(
        min: Option<&str>,
        max: Option<&str>,
        owner: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Self {
        let max = match max
            .filter(|v| *v != UNBOUNDED)
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            Some(value) => parse_bound(value, CardinalityBound::Max, owner, sink),
            None => None,
        };
        let min = match min.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => parse_bound(value, CardinalityBound::Min, owner, sink).unwrap_or(0),
            None => 0,
        };

        Self { min, max }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let collapsed = (self.min == 0 && self.max.is_none()) || self.max == Some(self.min);
        match (collapsed, self.max) {
            (true, Some(max)) => write!(f, "{max}"),
            (true, None) => f.write_str(UNBOUNDED),
            (false, Some(max)) if max != 0 => write!(f, "{}..{max}", self.min),
            (false, _) => write!(f, "{}..{UNBOUNDED}", self.min),
        }
    }
}

fn parse_bound(
    value: &str,
    bound: CardinalityBound,
    owner: &str,
    sink: &mut dyn DiagnosticSink,
) -> Option<i64> {
    match value.parse::<i64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            sink.report(Diagnostic::MalformedCardinality {
                bound,
                value: value.to_string(),
                owner: owner.to_string(),
            });
            None
        }
    }
}

/// Normalizes raw cardinality bounds into a canonical multiplicity string.
///
/// # Examples
///
/// ```
/// use capella_schema_export::diagnostics::Diagnostic;
/// use capella_schema_export::multiplicity::normalize;
///
/// let mut diagnostics: Vec<Diagnostic> = Vec::new();
/// assert_eq!(normalize(None, Some("*"), "p", &mut diagnostics), "*");
/// assert_eq!(normalize(Some("1"), Some("1"), "p", &mut diagnostics), "1");
/// assert_eq!(normalize(Some("0"), Some("5"), "p", &mut diagnostics), "0..5");
/// assert!(diagnostics.is_empty());
/// ```
pub fn normalize(
    min: Option<&str>,
    max: Option<&str>,
    owner: &str,
    sink: &mut dyn DiagnosticSink,
) -> String {
    Multiplicity::parse(min, max, owner, sink).to_string()
}
