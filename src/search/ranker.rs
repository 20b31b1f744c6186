//! Ranks catalog tools against a tokenized query buffer.
//!
//! The last token of a streaming buffer is treated specially: it may still
//! be a partial word (the user hasn't finished typing it), so in addition
//! to being scored as an exact term it is expanded against the [`Trie`]
//! into every complete term it could become, each expansion contributing a
//! score damped by how much of the completed term the prefix actually
//! covers (`min(1, len(prefix)/len(expansion))`) — a two-character prefix
//! shouldn't earn full credit for matching an eight-character term.

use std::collections::{HashMap, HashSet};

use crate::search::index::{Field, InvertedIndex, length_bonus, score_contribution};
use crate::search::trie::Trie;
use crate::types::ToolName;

/// One ranked tool with enough detail to build a `Suggestion`.
#[derive(Debug, Clone)]
pub struct RankedTool {
    pub tool: ToolName,
    pub score: f32,
    pub matched_terms: usize,
    /// Human-readable summary of which fields/terms matched, e.g.
    /// `"name: export, keywords: csv"`.
    pub reason: String,
}

#[derive(Default)]
struct Accumulator {
    score: f32,
    matched_terms: HashSet<String>,
    matched_fields: Vec<(Field, String)>,
}

/// Scores and ranks tools given a tokenized query.
pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    trie: &'a Trie,
}

impl<'a> Ranker<'a> {
    pub fn new(index: &'a InvertedIndex, trie: &'a Trie) -> Self {
        Self { index, trie }
    }

    /// Rank tools for `tokens` (already normalized/tokenized), keeping only
    /// those scoring at least `min_score`, returning at most `top_k`.
    ///
    /// `is_prefix` marks `tokens`'s last element as a possibly-partial word
    /// still being typed, eligible for trie expansion in addition to being
    /// scored as an exact term. Finalized/submitted text, and any non-final
    /// intent window, passes `false` — every token there is complete.
    pub fn rank(&self, tokens: &[String], is_prefix: bool, min_score: f32, top_k: usize) -> Vec<RankedTool> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut acc: HashMap<ToolName, Accumulator> = HashMap::new();

        if is_prefix {
            let (complete_terms, prefix_token) = tokens.split_at(tokens.len() - 1);
            let prefix_token = &prefix_token[0];

            for term in complete_terms {
                self.accumulate_exact(term, &mut acc);
            }

            self.accumulate_exact(prefix_token, &mut acc);
            for expansion in self.trie.prefix_terms(prefix_token, None) {
                if expansion == *prefix_token {
                    continue;
                }
                let damping = (prefix_token.chars().count() as f32 / expansion.chars().count() as f32)
                    .min(1.0);
                self.accumulate_expansion(&expansion, damping, &mut acc);
            }
        } else {
            for term in tokens {
                self.accumulate_exact(term, &mut acc);
            }
        }

        let mut results: Vec<RankedTool> = acc
            .into_iter()
            .filter(|(_, a)| a.score >= min_score)
            .map(|(tool, a)| RankedTool {
                tool,
                score: a.score,
                matched_terms: a.matched_terms.len(),
                reason: build_reason(&a.matched_fields),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.matched_terms.cmp(&a.matched_terms))
                .then_with(|| a.tool.as_str().cmp(b.tool.as_str()))
        });
        results.truncate(top_k);
        results
    }

    fn accumulate_exact(&self, term: &str, acc: &mut HashMap<ToolName, Accumulator>) {
        if !self.index.contains_term(term) {
            return;
        }
        let idf = self.index.idf(term);
        for posting in self.index.postings(term) {
            let entry = acc.entry(posting.tool.clone()).or_default();
            entry.score += score_contribution(posting.field, posting.tf, idf, term);
            entry.matched_terms.insert(term.to_string());
            entry.matched_fields.push((posting.field, term.to_string()));
        }
    }

    fn accumulate_expansion(
        &self,
        term: &str,
        damping: f32,
        acc: &mut HashMap<ToolName, Accumulator>,
    ) {
        if damping <= 0.0 {
            return;
        }
        let idf = self.index.idf(term);
        for posting in self.index.postings(term) {
            let entry = acc.entry(posting.tool.clone()).or_default();
            let contribution =
                posting.field.weight() * posting.tf as f32 * idf * length_bonus(term) * damping;
            entry.score += contribution;
            entry.matched_terms.insert(term.to_string());
            entry.matched_fields.push((posting.field, term.to_string()));
        }
    }
}

fn build_reason(matches: &[(Field, String)]) -> String {
    let mut seen: HashSet<(Field, String)> = HashSet::new();
    let mut by_field: Vec<(Field, Vec<String>)> = Vec::new();

    for (field, term) in matches {
        let field = *field;
        if !seen.insert((field, term.clone())) {
            continue;
        }
        match by_field.iter_mut().find(|(f, _)| *f == field) {
            Some((_, terms)) => terms.push(term.clone()),
            None => by_field.push((field, vec![term.clone()])),
        }
    }

    by_field.sort_by_key(|(f, _)| field_order(*f));
    by_field
        .into_iter()
        .map(|(field, mut terms)| {
            terms.sort();
            format!("{}: {}", field_label(field), terms.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn field_order(field: Field) -> u8 {
    match field {
        Field::Name => 0,
        Field::Aliases => 1,
        Field::Keywords => 2,
        Field::Description => 3,
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "name",
        Field::Aliases => "aliases",
        Field::Keywords => "keywords",
        Field::Description => "description",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn tool(name: &str) -> ToolName {
        ToolName::new(name).unwrap()
    }

    fn sample() -> (InvertedIndex, Trie) {
        let mut index = InvertedIndex::new();
        let mut trie = Trie::new();

        index.add_posting("export", tool("export_csv"), Field::Name, 1);
        index.add_posting("csv", tool("export_csv"), Field::Keywords, 1);
        index.add_posting("data", tool("export_csv"), Field::Description, 1);
        trie.insert("export");
        trie.insert("csv");
        trie.insert("data");

        index.add_posting("send", tool("send_email"), Field::Name, 1);
        index.add_posting("email", tool("send_email"), Field::Name, 1);
        trie.insert("send");
        trie.insert("email");

        (index, trie)
    }

    #[test]
    fn exact_complete_terms_rank_matching_tool_first() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        let tokens = vec!["export".to_string(), "data".to_string()];
        let ranked = ranker.rank(&tokens, false, 0.0, 10);
        check!(!ranked.is_empty());
        check!(ranked[0].tool == tool("export_csv"));
    }

    #[test]
    fn partial_prefix_expands_via_trie() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        let tokens = vec!["exp".to_string()];
        let ranked = ranker.rank(&tokens, true, 0.0, 10);
        check!(ranked.iter().any(|r| r.tool == tool("export_csv")));
    }

    #[test]
    fn non_prefix_mode_does_not_expand_partial_word() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        let tokens = vec!["exp".to_string()];
        check!(ranker.rank(&tokens, false, 0.0, 10).is_empty());
    }

    #[test]
    fn min_score_filters_weak_matches() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        let tokens = vec!["exp".to_string()];
        let ranked = ranker.rank(&tokens, true, 1_000_000.0, 10);
        check!(ranked.is_empty());
    }

    #[test]
    fn top_k_truncates_results() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        let tokens = vec!["e".to_string()];
        let ranked = ranker.rank(&tokens, true, 0.0, 1);
        check!(ranked.len() <= 1);
    }

    #[test]
    fn empty_tokens_yield_no_suggestions() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        check!(ranker.rank(&[], true, 0.0, 10).is_empty());
    }

    #[test]
    fn reason_lists_matched_fields() {
        let (index, trie) = sample();
        let ranker = Ranker::new(&index, &trie);
        let tokens = vec!["export".to_string(), "csv".to_string()];
        let ranked = ranker.rank(&tokens, false, 0.0, 10);
        let top = ranked.iter().find(|r| r.tool == tool("export_csv")).unwrap();
        check!(top.reason.contains("name"));
        check!(top.reason.contains("keywords"));
    }
}
