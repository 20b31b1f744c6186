//! Tool catalog: the specs an engine ranks against, and their published,
//! queryable index.
//!
//! The catalog is published via [`arc_swap::ArcSwap`] so readers (every
//! `submit`/`feed` call) never block on a writer (`add_tools`/`remove_tool`):
//! a mutation builds a brand new snapshot — trie, inverted index, and spec
//! map all rebuilt together — and atomically swaps it in. Readers that
//! started before the swap keep using their already-loaded `Arc` until they
//! finish; no lock is held across a query.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::search::{Field, InvertedIndex, Trie, tokenize};
use crate::types::{LocaleSet, ToolName};

/// A tool as registered into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: ToolName,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_arguments_template")]
    pub arguments_template: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_arguments_template() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Metadata block of a `Suggestion`, per the gateway's stable JSON shape.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A single ranked suggestion, in the gateway's stable wire shape:
/// `{id, kind, score, label, reason, arguments_template, metadata:{tags?}}`.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub id: String,
    pub kind: String,
    pub score: f32,
    pub label: String,
    pub reason: String,
    pub arguments_template: serde_json::Value,
    pub metadata: SuggestionMetadata,
}

/// Outcome of an `add_tools` call — duplicates are reported, not raised as
/// an error, so a batch registration can't be aborted by one bad entry.
#[derive(Debug, Clone, Default)]
pub struct AddToolsReport {
    pub added: Vec<ToolName>,
    pub duplicates: Vec<ToolName>,
}

struct Snapshot {
    specs: HashMap<ToolName, ToolSpec>,
    trie: Trie,
    index: InvertedIndex,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            specs: HashMap::new(),
            trie: Trie::new(),
            index: InvertedIndex::new(),
        }
    }

    /// Full re-tokenize/re-insert of every spec, from scratch. Used only by
    /// `remove_tool` — incremental removal would need to track, per term,
    /// whether any other tool still posts it, which a full rebuild gets for
    /// free and removal is expected to be rare.
    fn rebuild(&self, locales: &LocaleSet) -> Self {
        let mut trie = Trie::new();
        let mut index = InvertedIndex::new();
        for spec in self.specs.values() {
            index_spec(spec, locales, &mut trie, &mut index);
        }
        Self {
            specs: self.specs.clone(),
            trie,
            index,
        }
    }
}

fn index_spec(spec: &ToolSpec, locales: &LocaleSet, trie: &mut Trie, index: &mut InvertedIndex) {
    index_field(spec.name.as_str(), Field::Name, spec, locales, trie, index);
    index_field(&spec.aliases.join(" "), Field::Aliases, spec, locales, trie, index);
    index_field(&spec.keywords.join(" "), Field::Keywords, spec, locales, trie, index);
    index_field(&spec.description, Field::Description, spec, locales, trie, index);
}

fn index_field(
    text: &str,
    field: Field,
    spec: &ToolSpec,
    locales: &LocaleSet,
    trie: &mut Trie,
    index: &mut InvertedIndex,
) {
    let tokens = tokenize(text, locales, false);
    let mut counts: HashMap<String, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    for (term, tf) in counts {
        trie.insert(&term);
        index.add_posting(&term, spec.name.clone(), field, tf);
    }
}

/// The catalog of registered tools, plus its derived trie and inverted
/// index, published as one atomic unit.
pub struct Catalog {
    snapshot: ArcSwap<Snapshot>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::empty()),
        }
    }

    pub fn with_tools(tools: Vec<ToolSpec>, locales: &LocaleSet) -> Self {
        let catalog = Self::new();
        catalog.add_tools(tools, locales);
        catalog
    }

    /// Register new tools incrementally: only the newly added specs are
    /// tokenized and inserted into the existing trie/index, with no
    /// re-indexing of tools already present. Names already present are
    /// reported as duplicates and left untouched — the rest of the batch
    /// still applies. Logs at `info` on completion.
    pub fn add_tools(&self, tools: Vec<ToolSpec>, locales: &LocaleSet) -> AddToolsReport {
        let current = self.snapshot.load();
        let mut specs = current.specs.clone();
        let mut trie = current.trie.clone();
        let mut index = current.index.clone();

        let mut report = AddToolsReport::default();
        for spec in tools {
            if specs.contains_key(&spec.name) {
                report.duplicates.push(spec.name);
                continue;
            }
            index_spec(&spec, locales, &mut trie, &mut index);
            report.added.push(spec.name.clone());
            specs.insert(spec.name.clone(), spec);
        }

        let total = specs.len();
        let next = Snapshot { specs, trie, index };
        tracing::info!(
            added = report.added.len(),
            duplicates = report.duplicates.len(),
            total,
            "catalog updated"
        );
        self.snapshot.store(Arc::new(next));
        report
    }

    /// Remove one tool by name. Implemented as a full rebuild of the
    /// trie/index from the remaining specs — removal is expected to be
    /// rare, unlike `add_tools`, so the simplicity is worth the cost.
    pub fn remove_tool(&self, name: &ToolName, locales: &LocaleSet) -> Result<(), CatalogError> {
        let current = self.snapshot.load();
        if !current.specs.contains_key(name) {
            return Err(CatalogError::UnknownTool { name: name.clone() });
        }
        let mut next = Snapshot {
            specs: current.specs.clone(),
            trie: Trie::new(),
            index: InvertedIndex::new(),
        };
        next.specs.remove(name);
        let rebuilt = next.rebuild(locales);
        tracing::info!(name = %name, total = rebuilt.specs.len(), "tool removed from catalog");
        self.snapshot.store(Arc::new(rebuilt));
        Ok(())
    }

    /// Acquire a read-only handle to the current snapshot's trie and index,
    /// for the duration of one ranking pass.
    pub fn read(&self) -> CatalogView {
        CatalogView {
            snapshot: self.snapshot.load_full(),
        }
    }

    pub fn tool_count(&self) -> usize {
        self.snapshot.load().specs.len()
    }

    pub fn term_count(&self) -> usize {
        self.snapshot.load().index.term_count()
    }
}

/// A consistent, point-in-time view of the catalog held for one ranking
/// pass. Cheap to acquire (an `Arc` clone) and immune to concurrent
/// mutation — a writer publishing a new snapshot never affects a view
/// already in hand.
pub struct CatalogView {
    snapshot: Arc<Snapshot>,
}

impl CatalogView {
    pub fn trie(&self) -> &Trie {
        &self.snapshot.trie
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.snapshot.index
    }

    pub fn spec(&self, name: &ToolName) -> Option<&ToolSpec> {
        self.snapshot.specs.get(name)
    }
}

/// Build the stable-shape `Suggestion` for a ranked tool.
pub fn to_suggestion(spec: &ToolSpec, score: f32, reason: String) -> Suggestion {
    Suggestion {
        id: spec.name.to_string(),
        kind: spec.name.kind().to_string(),
        score,
        label: spec.name.to_string(),
        reason,
        arguments_template: spec.arguments_template.clone(),
        metadata: SuggestionMetadata {
            tags: spec.tags.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn english() -> LocaleSet {
        LocaleSet::parse(&["en".to_string()])
    }

    fn spec(name: &str, description: &str) -> ToolSpec {
        ToolSpec {
            name: ToolName::new(name).unwrap(),
            aliases: vec![],
            keywords: vec![],
            description: description.to_string(),
            arguments_template: default_arguments_template(),
            tags: vec![],
        }
    }

    #[test]
    fn add_tools_reports_duplicates_without_erroring() {
        let catalog = Catalog::new();
        catalog.add_tools(vec![spec("export_csv", "export data")], &english());
        let report = catalog.add_tools(vec![spec("export_csv", "again")], &english());
        check!(report.duplicates == vec![ToolName::new("export_csv").unwrap()]);
        check!(report.added.is_empty());
        check!(catalog.tool_count() == 1);
    }

    #[test]
    fn remove_tool_rejects_unknown_name() {
        let catalog = Catalog::new();
        let err = catalog
            .remove_tool(&ToolName::new("nope").unwrap(), &english())
            .unwrap_err();
        check!(matches!(err, CatalogError::UnknownTool { .. }));
    }

    #[test]
    fn remove_tool_drops_it_from_the_index() {
        let catalog = Catalog::new();
        catalog.add_tools(vec![spec("export_csv", "export data")], &english());
        catalog
            .remove_tool(&ToolName::new("export_csv").unwrap(), &english())
            .unwrap();
        check!(catalog.tool_count() == 0);
        let view = catalog.read();
        check!(!view.index().contains_term("export"));
    }

    #[test]
    fn read_view_survives_concurrent_mutation() {
        let catalog = Catalog::new();
        catalog.add_tools(vec![spec("export_csv", "export data")], &english());
        let view = catalog.read();
        catalog.add_tools(vec![spec("send_email", "send an email")], &english());
        // the view taken before the second add_tools still only sees one tool
        check!(view.spec(&ToolName::new("send_email").unwrap()).is_none());
    }
}
