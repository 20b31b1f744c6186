//! Splits a tokenized query buffer into multiple intent windows and
//! recombines per-tool scores across them.
//!
//! `"export data and send email"` names two separate goals; scoring it as
//! one bag of tokens would blend `export_csv` and `send_email` into a
//! muddled ranking for both. Splitting on separator tokens (`and`, `then`,
//! `also`, `or`, `plus` in English; `e`, `depois`, `também`, `ou` in
//! Portuguese) lets each goal get its own ranking pass, then [`combine`]
//! merges the per-window results back into one list.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::search::RankedTool;
use crate::types::{Locale, LocaleSet, ToolName};

const SEPARATORS_EN: &[&str] = &["and", "then", "also", "or", "plus"];
const SEPARATORS_PT: &[&str] = &["e", "depois", "tambem", "ou"];

fn separator_list(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::English => SEPARATORS_EN,
        Locale::Portuguese => SEPARATORS_PT,
    }
}

/// Whether `token` is a separator in any locale active in `locales`.
fn is_separator(token: &str, locales: &LocaleSet) -> bool {
    locales.iter().any(|locale| separator_list(locale).contains(&token))
}

/// How scores from multiple intent windows are merged for a tool that
/// appears in more than one window's ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineStrategy {
    /// Keep the best single-window score — the tool is a strong match for
    /// at least one stated goal.
    Max,
    /// Add scores across windows — the tool is relevant to multiple stated
    /// goals, which should rank it higher than a single-goal match.
    Sum,
}

impl CombineStrategy {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "max" => Ok(Self::Max),
            "sum" => Ok(Self::Sum),
            other => Err(ConfigError::InvalidCombineStrategy {
                value: other.to_string(),
            }),
        }
    }
}

/// Splits tokenized input into up to `max_intents` windows around
/// separator tokens.
pub struct IntentSegmenter {
    max_intents: usize,
}

impl IntentSegmenter {
    pub fn new(max_intents: usize) -> Self {
        Self { max_intents }
    }

    /// Split `tokens` into windows. A window is never empty; separators
    /// with no tokens on either side (leading/trailing/doubled) produce no
    /// extra window. If splitting would produce more than `max_intents`
    /// windows, the trailing windows are merged into the last kept one so
    /// no token is dropped.
    pub fn segment(&self, tokens: &[String], locales: &LocaleSet) -> Vec<Vec<String>> {
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut windows: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for token in tokens {
            if is_separator(token, locales) {
                if !current.is_empty() {
                    windows.push(std::mem::take(&mut current));
                }
            } else {
                current.push(token.clone());
            }
        }
        if !current.is_empty() {
            windows.push(current);
        }

        if windows.is_empty() {
            return Vec::new();
        }

        if windows.len() > self.max_intents {
            let keep = self.max_intents.max(1);
            let overflow: Vec<String> = windows.split_off(keep - 1).into_iter().flatten().collect();
            windows.push(overflow);
        }

        windows
    }
}

/// Merge per-window ranked-tool lists into one list, combining a tool's
/// score across windows per `strategy` and concatenating its distinct
/// reasons (adjacent duplicates collapsed).
pub fn combine(
    per_window: Vec<Vec<RankedTool>>,
    strategy: CombineStrategy,
    top_k: usize,
) -> Vec<RankedTool> {
    let mut merged: Vec<RankedTool> = Vec::new();
    let mut index_of: std::collections::HashMap<ToolName, usize> = std::collections::HashMap::new();

    for window in per_window {
        for ranked in window {
            match index_of.get(&ranked.tool) {
                Some(&i) => {
                    let existing = &mut merged[i];
                    existing.score = match strategy {
                        CombineStrategy::Max => existing.score.max(ranked.score),
                        CombineStrategy::Sum => existing.score + ranked.score,
                    };
                    existing.matched_terms += ranked.matched_terms;
                    if !existing.reason.ends_with(&ranked.reason) {
                        existing.reason = format!("{}; {}", existing.reason, ranked.reason);
                    }
                }
                None => {
                    index_of.insert(ranked.tool.clone(), merged.len());
                    merged.push(ranked);
                }
            }
        }
    }

    let mut seen_reasons: HashSet<ToolName> = HashSet::new();
    for tool in &mut merged {
        if seen_reasons.insert(tool.tool.clone()) {
            // dedup adjacent identical clauses produced by repeated windows
            let parts: Vec<&str> = tool.reason.split("; ").collect();
            let mut deduped: Vec<&str> = Vec::new();
            for part in parts {
                if deduped.last() != Some(&part) {
                    deduped.push(part);
                }
            }
            tool.reason = deduped.join("; ");
        }
    }

    merged.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.matched_terms.cmp(&a.matched_terms))
            .then_with(|| a.tool.as_str().cmp(b.tool.as_str()))
    });
    merged.truncate(top_k);
    merged
}
