//! Retrieval execution and citation formatting
//!
//! Issues the hybrid query produced by criteria resolution and reshapes
//! each hit into the citation contract consumed downstream:
//! `"[key]: body\n-----\n"`, concatenated in collaborator order. The model
//! is instructed to cite the bracketed keys verbatim, so keys and bodies
//! are escaped against delimiter forgery and hits are never reordered.

use futures::StreamExt;

use crate::error::Result;

use super::grounding::is_safe_key_char;
use super::{FilterOutcome, HitStream, QuerySpec, RetrievalConfig, SearchIndex, VectorQuery};

/// Run the criteria-search query and assemble the citation-tagged result.
///
/// `FilterOutcome::Empty` (constraints supplied, nothing eligible) returns
/// the empty result without touching the collaborator.
pub async fn run_criteria_search(
    index: &dyn SearchIndex,
    config: &RetrievalConfig,
    free_text: Option<&str>,
    filter: &FilterOutcome,
) -> Result<String> {
    if matches!(filter, FilterOutcome::Empty) {
        return Ok(String::new());
    }

    let text = match free_text {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => config.fallback_term.clone(),
    };

    let hits = index
        .query(QuerySpec {
            search_text: text.clone(),
            vector_query: VectorQuery {
                text,
                k_nearest_neighbors: config.knn,
                fields: config.vector_fields.clone(),
            },
            filter: filter.as_filter().map(|f| f.to_string()),
            top: config.criteria_top,
        })
        .await?;

    format_citations(hits).await
}

/// Run an unfiltered knowledge-base query (destination info, generic search)
pub async fn run_text_search(
    index: &dyn SearchIndex,
    config: &RetrievalConfig,
    query: &str,
    top: usize,
) -> Result<String> {
    let hits = index
        .query(QuerySpec {
            search_text: query.to_string(),
            vector_query: VectorQuery {
                text: query.to_string(),
                k_nearest_neighbors: config.knn,
                fields: config.vector_fields.clone(),
            },
            filter: None,
            top,
        })
        .await?;

    format_citations(hits).await
}

/// Format hits into the citation contract, preserving collaborator order
pub async fn format_citations(mut hits: HitStream) -> Result<String> {
    let mut result = String::new();

    while let Some(hit) = hits.next().await {
        let hit = hit?;
        result.push_str(&format!(
            "[{}]: {}\n-----\n",
            sanitize_key(&hit.key),
            escape_body(&hit.body)
        ));
    }

    Ok(result)
}

/// Keep keys citable: anything outside the grounding allow-list charset
/// becomes '_', so a surfaced key can always be claimed back.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if is_safe_key_char(c) { c } else { '_' })
        .collect()
}

/// A body line spelling the record delimiter would forge a boundary;
/// pad it with a leading space.
fn escape_body(body: &str) -> String {
    if !body.contains("-----") {
        return body.to_string();
    }
    body.lines()
        .map(|line| {
            if line.trim_end() == "-----" {
                format!(" {}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
