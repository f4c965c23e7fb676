//! Grounding verification for claimed citation keys
//!
//! The model reports which sources it actually used; the claimed keys are
//! client-influenced input and go through a strict allow-list before the
//! index is asked for the authoritative records. A key that fails the
//! pattern is an adversarial or malformed citation, dropped silently.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::types::RetrievalHit;

use super::SearchIndex;

/// Allow-list for citation keys
static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_=\-]+$").unwrap());

/// Whether a character may appear in a citation key
pub fn is_safe_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '=' | '-')
}

/// Filter claimed keys through the allow-list, deduplicated.
/// Non-matching keys are dropped, never reported as errors.
pub fn verify_keys(claimed: &[String]) -> BTreeSet<String> {
    claimed
        .iter()
        .filter(|key| KEY_PATTERN.is_match(key))
        .cloned()
        .collect()
}

/// Validate claimed keys and re-resolve them against the index.
///
/// Only records that were both well-formed and present in the index come
/// back; client-asserted titles and bodies are never trusted.
pub async fn resolve_grounding(
    index: &dyn SearchIndex,
    claimed: &[String],
) -> Result<Vec<RetrievalHit>> {
    let keys: Vec<String> = verify_keys(claimed).into_iter().collect();

    if keys.is_empty() {
        tracing::debug!("No well-formed citation keys to ground");
        return Ok(vec![]);
    }

    tracing::debug!(keys = ?keys, "Grounding citation keys");
    index.fetch_by_keys(&keys).await
}
