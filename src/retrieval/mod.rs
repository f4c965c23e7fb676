//! Retrieval pipeline for the knowledge base
//!
//! Implements:
//! - Eligibility combination over resolver constraint sets
//! - Search filter synthesis with injection-safe interpolation
//! - Hybrid (lexical + vector) query execution and citation formatting
//! - Grounding verification for claimed citation keys

mod eligibility;
mod executor;
mod filter;
mod grounding;
mod index;

pub use eligibility::{combine, Eligibility};
pub use executor::{format_citations, run_criteria_search, run_text_search};
pub use filter::{synthesize, FilterOutcome};
pub use grounding::{is_safe_key_char, resolve_grounding, verify_keys};
pub use index::{HitStream, HttpSearchIndex, QuerySpec, SearchIndex, VectorQuery};

/// Configuration for retrieval queries
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Hits returned for criteria-based destination search
    pub criteria_top: usize,
    /// Hits returned for a single-destination lookup
    pub destination_top: usize,
    /// Hits returned for generic knowledge-base search
    pub search_top: usize,
    /// Nearest neighbors requested on the vector side of a hybrid query
    pub knn: usize,
    /// Embedding field queried on the vector side
    pub vector_fields: String,
    /// Text signal used when the caller supplied none; the hybrid query
    /// never runs with an empty text signal
    pub fallback_term: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            criteria_top: 5,
            destination_top: 3,
            search_top: 5,
            knn: 50,
            vector_fields: "text_vector".to_string(),
            // The knowledge base is Portuguese
            fallback_term: "destino".to_string(),
        }
    }
}
