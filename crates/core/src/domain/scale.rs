use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from letter-grade symbol to numeric point value.
///
/// Symbols are normalized (trimmed, uppercased) on lookup, so "a" and "A"
/// resolve identically. Symbols outside the mapping score zero - the same
/// policy the sheet applies to unreleased results - but `recognizes` lets a
/// caller flag them without affecting the computation. The mapping is a
/// value, not hardcoded logic, so alternate scales can be swapped in from
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeScale {
    points: BTreeMap<String, u32>,
}

impl GradeScale {
    /// Build a scale from (symbol, points) pairs. Symbols are normalized on
    /// the way in; later duplicates win.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let points = pairs
            .into_iter()
            .map(|(symbol, value)| (Self::normalize(symbol.as_ref()), value))
            .collect();
        Self { points }
    }

    /// Point value for a grade symbol; 0 for anything outside the scale.
    pub fn points(&self, symbol: &str) -> u32 {
        self.points
            .get(&Self::normalize(symbol))
            .copied()
            .unwrap_or(0)
    }

    /// Whether the symbol is part of the scale (after normalization).
    pub fn recognizes(&self, symbol: &str) -> bool {
        self.points.contains_key(&Self::normalize(symbol))
    }

    /// Highest point value in the scale - the per-unit obtainable ceiling.
    /// 0 for an empty scale.
    pub fn max_point(&self) -> u32 {
        self.points.values().copied().max().unwrap_or(0)
    }

    /// The scale's symbols in point order, highest first.
    pub fn symbols(&self) -> Vec<&str> {
        let mut entries: Vec<_> = self.points.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        entries.into_iter().map(|(s, _)| s.as_str()).collect()
    }

    fn normalize(symbol: &str) -> String {
        symbol.trim().to_uppercase()
    }
}

impl Default for GradeScale {
    /// The conventional five-point scale: A=5 down to F=0.
    fn default() -> Self {
        Self::from_pairs([("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1), ("F", 0)])
    }
}
