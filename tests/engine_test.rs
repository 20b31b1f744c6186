//! End-to-end scenarios against the public `SuggestionEngine` API.

use assert2::check;
use toolsense::{EngineConfig, SessionId, SuggestionEngine, ToolName, ToolSpec};

fn demo_tools() -> Vec<ToolSpec> {
    serde_json::from_str(
        r#"[
            {
                "name": "export_csv",
                "aliases": ["export to csv"],
                "keywords": ["csv", "spreadsheet"],
                "description": "Export the current dataset to a CSV file",
                "arguments_template": {"path": "string"},
                "tags": ["data"]
            },
            {
                "name": "send_email",
                "aliases": ["email"],
                "keywords": ["mail", "notify"],
                "description": "Send an email message to one or more recipients",
                "arguments_template": {"to": "string"},
                "tags": []
            },
            {
                "name": "db_query",
                "aliases": ["database query"],
                "keywords": ["sql", "database"],
                "description": "Run a query against the database",
                "arguments_template": {"sql": "string"},
                "tags": []
            }
        ]"#,
    )
    .unwrap()
}

fn sid(s: &str) -> SessionId {
    SessionId::new(s).unwrap()
}

fn engine() -> SuggestionEngine {
    SuggestionEngine::with_tools(EngineConfig::default(), demo_tools()).unwrap()
}

#[test]
fn export_scenario_ranks_export_csv_first() {
    let engine = engine();
    let suggestions = engine.submit(&sid("s1"), "export data to csv");
    check!(!suggestions.is_empty());
    check!(suggestions[0].id == "export_csv");
}

#[test]
fn prefix_mode_matches_partial_word() {
    let engine = engine();
    let suggestions = engine.feed(&sid("s1"), "exp");
    check!(suggestions.iter().any(|s| s.id == "export_csv"));
}

#[test]
fn send_email_scenario_ranks_send_email_first() {
    let engine = engine();
    let suggestions = engine.submit(&sid("s1"), "send an email");
    check!(!suggestions.is_empty());
    check!(suggestions[0].id == "send_email");
}

#[test]
fn database_scenario_ranks_db_query_first() {
    let engine = engine();
    let suggestions = engine.submit(&sid("s1"), "query the database");
    check!(!suggestions.is_empty());
    check!(suggestions[0].id == "db_query");
}

#[test]
fn multi_intent_sum_surfaces_both_tools_for_export_and_send() {
    let engine = SuggestionEngine::with_tools(
        EngineConfig {
            combine_strategy: "sum".to_string(),
            max_intents: 4,
            ..EngineConfig::default()
        },
        demo_tools(),
    )
    .unwrap();
    let suggestions = engine.submit(&sid("s1"), "export data and send email");
    check!(suggestions.iter().any(|s| s.id == "export_csv"));
    check!(suggestions.iter().any(|s| s.id == "send_email"));
}

#[test]
fn remove_tool_then_requery_excludes_it() {
    let engine = engine();
    engine
        .remove_tool(&ToolName::new("export_csv").unwrap())
        .unwrap();
    let suggestions = engine.submit(&sid("s1"), "export data to csv");
    check!(!suggestions.iter().any(|s| s.id == "export_csv"));
}

#[test]
fn empty_buffer_yields_no_suggestions() {
    let engine = engine();
    check!(engine.submit(&sid("s1"), "").is_empty());
}

#[test]
fn input_shorter_than_two_characters_yields_no_suggestions() {
    let engine = engine();
    check!(engine.feed(&sid("s1"), "e").is_empty());
    check!(engine.submit(&sid("s1"), "e").is_empty());
}

#[test]
fn stopword_only_input_yields_no_suggestions() {
    let engine = engine();
    check!(engine.submit(&sid("s1"), "the of and").is_empty());
}

#[test]
fn sessions_are_independent_across_ids() {
    let engine = engine();
    engine.feed(&sid("a"), "export data");
    engine.feed(&sid("b"), "send email");
    let a = engine.finalize(&sid("a"));
    let b = engine.finalize(&sid("b"));
    check!(a.iter().any(|s| s.id == "export_csv"));
    check!(b.iter().any(|s| s.id == "send_email"));
}

#[test]
fn reset_on_unknown_session_does_not_error() {
    let engine = engine();
    engine.reset(&sid("never-existed"));
}

#[test]
fn stats_reflect_catalog_and_sessions() {
    let engine = engine();
    engine.feed(&sid("s1"), "export");
    let stats = engine.stats();
    check!(stats.tool_count == 3);
    check!(stats.session_count == 1);
}

#[test]
fn suggestion_shape_matches_stable_wire_contract() {
    let engine = engine();
    let suggestions = engine.submit(&sid("s1"), "export data to csv");
    let top = &suggestions[0];
    let json = serde_json::to_value(top).unwrap();
    for field in ["id", "kind", "score", "label", "reason", "arguments_template", "metadata"] {
        check!(json.get(field).is_some(), "missing field {field}");
    }
}
