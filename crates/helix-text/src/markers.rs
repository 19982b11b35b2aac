use regex::{Regex, RegexBuilder};

use crate::error::TextError;

/// A weighted word or phrase, matched on word boundaries.
#[derive(Debug, Clone)]
pub struct Marker {
    pub term: String,
    pub weight: f64,
    pattern: Regex,
}

/// How often one marker occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHit {
    pub term: String,
    pub count: usize,
    pub weight: f64,
}

/// Result of scanning one text against a [`MarkerSet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    pub hits: Vec<MarkerHit>,
}

impl Scan {
    /// Sum of `count * weight` over all hits.
    pub fn weighted(&self) -> f64 {
        self.hits.iter().map(|h| h.count as f64 * h.weight).sum()
    }

    /// Total occurrences, ignoring weights.
    pub fn occurrences(&self) -> usize {
        self.hits.iter().map(|h| h.count).sum()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|h| h.term.as_str())
    }
}

/// A named dictionary of weighted markers.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    name: String,
    markers: Vec<Marker>,
}

impl MarkerSet {
    /// Compile a dictionary. Empty tables, blank terms and non-positive weights are rejected.
    pub fn new(name: &str, entries: &[(&str, f64)]) -> Result<Self, TextError> {
        if entries.is_empty() {
            return Err(TextError::EmptyMarkerTable {
                table: name.to_string(),
            });
        }
        let markers = entries
            .iter()
            .map(|(term, weight)| compile(name, term, *weight))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            markers,
        })
    }

    /// A dictionary where every marker counts once.
    pub fn unweighted(name: &str, terms: &[&str]) -> Result<Self, TextError> {
        let entries: Vec<(&str, f64)> = terms.iter().map(|t| (*t, 1.0)).collect();
        Self::new(name, &entries)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Count every marker in `text`. Hits are reported in dictionary order.
    pub fn scan(&self, text: &str) -> Scan {
        let normalized = normalize(text);
        let hits = self
            .markers
            .iter()
            .filter_map(|m| {
                let count = m.pattern.find_iter(&normalized).count();
                (count > 0).then(|| MarkerHit {
                    term: m.term.clone(),
                    count,
                    weight: m.weight,
                })
            })
            .collect();
        Scan { hits }
    }
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn compile(table: &str, term: &str, weight: f64) -> Result<Marker, TextError> {
    let invalid = |reason: String| TextError::InvalidMarker {
        table: table.to_string(),
        term: term.to_string(),
        reason,
    };
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(invalid("term is blank".into()));
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(invalid(format!("weight {weight} must be positive")));
    }
    // phrases match across any run of whitespace
    let body = trimmed
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let pattern = RegexBuilder::new(&format!(r"\b{body}\b"))
        .case_insensitive(true)
        .build()
        .map_err(|e| invalid(e.to_string()))?;
    Ok(Marker {
        term: trimmed.to_lowercase(),
        weight,
        pattern,
    })
}

/// Fold typographic apostrophes so "can’t" matches "can't".
fn normalize(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
}
