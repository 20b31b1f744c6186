//! Field-weighted TF-IDF inverted index over tool catalog entries.
//!
//! Each tool contributes postings from four fields, each carrying a
//! different weight: `name` (3.0), `aliases` (2.5), `keywords` (2.0), and
//! `description` (1.0). The index tracks, per normalized term, which tools
//! contain it, in which field, and with what term frequency — the minimum
//! needed to compute TF-IDF contributions at ranking time.

use std::collections::HashMap;

use crate::types::ToolName;

/// Catalog field a term was found in, carrying the field's scoring weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Aliases,
    Keywords,
    Description,
}

impl Field {
    pub fn weight(self) -> f32 {
        match self {
            Self::Name => 3.0,
            Self::Aliases => 2.5,
            Self::Keywords => 2.0,
            Self::Description => 1.0,
        }
    }
}

/// One (tool, field) occurrence of a term, with its raw term frequency.
#[derive(Debug, Clone)]
pub struct Posting {
    pub tool: ToolName,
    pub field: Field,
    pub tf: u32,
}

/// Inverted index: normalized term → postings, plus the document count `N`
/// needed for IDF.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
    /// Tools currently contributing at least one posting, for `N` and for
    /// `remove_tool`'s cleanup pass.
    tools: std::collections::HashSet<ToolName>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one term occurrence for `tool` in `field`. Call once per
    /// distinct term per field with its term frequency; repeated terms
    /// within a field should be pre-aggregated into a single `tf`.
    pub fn add_posting(&mut self, term: &str, tool: ToolName, field: Field, tf: u32) {
        self.tools.insert(tool.clone());
        self.postings.entry(term.to_string()).or_default().push(Posting { tool, field, tf });
    }

    /// Remove every posting belonging to `tool`. Terms left with zero
    /// postings are dropped entirely so `term_count` reflects only live
    /// vocabulary.
    pub fn remove_tool(&mut self, tool: &ToolName) {
        self.tools.remove(tool);
        self.postings.retain(|_, postings| {
            postings.retain(|p| &p.tool != tool);
            !postings.is_empty()
        });
    }

    /// Number of distinct tools that contributed at least one posting, i.e.
    /// the `N` in the IDF formula.
    pub fn doc_count(&self) -> usize {
        self.tools.len()
    }

    /// Number of distinct tools containing `term` in any field.
    pub fn doc_freq(&self, term: &str) -> usize {
        self.postings
            .get(term)
            .map(|postings| {
                let mut seen = std::collections::HashSet::new();
                postings.iter().filter(|p| seen.insert(&p.tool)).count()
            })
            .unwrap_or(0)
    }

    /// `idf(t) = ln((N+1)/(doc_freq(t)+1)) + 1` — smoothed so a term
    /// present in every tool still contributes a small positive weight.
    pub fn idf(&self, term: &str) -> f32 {
        let n = self.doc_count() as f32;
        let df = self.doc_freq(term) as f32;
        ((n + 1.0) / (df + 1.0)).ln() + 1.0
    }

    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings.get(term).map_or(&[], Vec::as_slice)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }
}

/// `length_bonus(term) = 1 + 0.1 * max(0, len(term) - 3)` — rewards longer,
/// more specific terms over short, ambiguous ones.
pub fn length_bonus(term: &str) -> f32 {
    let len = term.chars().count() as f32;
    1.0 + 0.1 * (len - 3.0).max(0.0)
}

/// Per-(term, field) score contribution: `weight(field) * tf * idf * length_bonus`.
pub fn score_contribution(field: Field, tf: u32, idf: f32, term: &str) -> f32 {
    field.weight() * tf as f32 * idf * length_bonus(term)
}
