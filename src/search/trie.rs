//! Character-keyed prefix trie over normalized terms.
//!
//! Used by the `Ranker` to expand a trailing partial word (the token still
//! being typed) into the complete terms it could become, so `"exp"` can
//! match the indexed term `"export"`.

use std::collections::BTreeMap;

const DEFAULT_PREFIX_LIMIT: usize = 64;

#[derive(Default, Clone)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    /// `true` if a term ends at this node. A node can be both a terminal and
    /// have children (e.g. "export" is a prefix of "exporter").
    terminal: bool,
}

/// A prefix trie over lowercase, normalized terms.
///
/// Deletion is soft: `remove` clears the terminal flag but leaves the node
/// path in place, since other terms may still route through it.
#[derive(Default, Clone)]
pub struct Trie {
    root: TrieNode,
    term_count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a term. Idempotent — inserting the same term twice has no
    /// additional effect.
    pub fn insert(&mut self, term: &str) {
        let mut node = &mut self.root;
        for c in term.chars() {
            node = node.children.entry(c).or_default();
        }
        if !node.terminal {
            node.terminal = true;
            self.term_count += 1;
        }
    }

    /// Soft-delete a term: it will no longer be returned by `prefix_terms`
    /// or matched by `contains`, but the trie structure under it is kept
    /// (other terms may share the path).
    pub fn remove(&mut self, term: &str) {
        let mut node = &mut self.root;
        for c in term.chars() {
            match node.children.get_mut(&c) {
                Some(next) => node = next,
                None => return,
            }
        }
        if node.terminal {
            node.terminal = false;
            self.term_count -= 1;
        }
    }

    /// Whether `term` is currently a live (non-removed) entry.
    pub fn contains(&self, term: &str) -> bool {
        let mut node = &self.root;
        for c in term.chars() {
            match node.children.get(&c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.terminal
    }

    /// All complete terms beginning with `prefix`, up to `limit` (default
    /// 64), in deterministic ascending-character DFS order.
    ///
    /// An empty prefix matches every term in the trie (subject to `limit`).
    pub fn prefix_terms(&self, prefix: &str, limit: Option<usize>) -> Vec<String> {
        let limit = limit.unwrap_or(DEFAULT_PREFIX_LIMIT);
        if limit == 0 {
            return Vec::new();
        }

        let mut node = &self.root;
        for c in prefix.chars() {
            match node.children.get(&c) {
                Some(next) => node = next,
                None => return Vec::new(),
            }
        }

        let mut results = Vec::new();
        let mut buf = prefix.to_string();
        collect_terms(node, &mut buf, &mut results, limit);
        results
    }

    pub fn term_count(&self) -> usize {
        self.term_count
    }
}

fn collect_terms(node: &TrieNode, buf: &mut String, out: &mut Vec<String>, limit: usize) {
    if out.len() >= limit {
        return;
    }
    if node.terminal {
        out.push(buf.clone());
        if out.len() >= limit {
            return;
        }
    }
    for (c, child) in &node.children {
        buf.push(*c);
        collect_terms(child, buf, out, limit);
        buf.pop();
        if out.len() >= limit {
            return;
        }
    }
}
