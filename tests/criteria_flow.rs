//! End-to-end criteria search flow over an in-memory flight store and a
//! scripted search index.
//!
//! Run with: cargo test --test criteria_flow

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use wayfarer::error::Result;
use wayfarer::flights::FlightStore;
use wayfarer::retrieval::{HitStream, QuerySpec, RetrievalConfig, SearchIndex};
use wayfarer::tools::ToolRouter;
use wayfarer::types::{RetrievalHit, ToolDirection};

/// Scripted index: returns canned hits and records every query
struct ScriptedIndex {
    hits: Vec<RetrievalHit>,
    queries: Mutex<Vec<QuerySpec>>,
}

impl ScriptedIndex {
    fn new(hits: Vec<RetrievalHit>) -> Arc<Self> {
        Arc::new(Self {
            hits,
            queries: Mutex::new(vec![]),
        })
    }
}

#[async_trait]
impl SearchIndex for ScriptedIndex {
    async fn query(&self, spec: QuerySpec) -> Result<HitStream> {
        self.queries.lock().push(spec);
        Ok(stream::iter(self.hits.clone().into_iter().map(Ok)).boxed())
    }

    async fn fetch_by_keys(&self, keys: &[String]) -> Result<Vec<RetrievalHit>> {
        Ok(self
            .hits
            .iter()
            .filter(|hit| keys.contains(&hit.key))
            .cloned()
            .collect())
    }
}

fn hit(key: &str, body: &str) -> RetrievalHit {
    RetrievalHit {
        key: key.to_string(),
        title: format!("{} title", key),
        body: body.to_string(),
    }
}

/// Flight data for the scenario: from LIS, three hours covers BCN and MAD,
/// 200 EUR covers MAD only.
fn scenario_store() -> FlightStore {
    let store = FlightStore::open_in_memory().unwrap();
    store
        .with_connection(|conn| {
            conn.execute_batch(
                r#"
                INSERT INTO FlightDuration (Source, Destination, Duration) VALUES
                    ('LIS', 'BCN', 2.0),
                    ('LIS', 'MAD', 1.5),
                    ('LIS', 'FCO', 3.5),
                    ('LIS', 'JFK', 8.0);
                INSERT INTO FlightPrice (Source, Destination, StartDate, EndDate, Price) VALUES
                    ('LIS', 'MAD', '2024-01-01', '2025-12-31', 147.0),
                    ('LIS', 'BCN', '2024-01-01', '2025-12-31', 238.0),
                    ('LIS', 'FCO', '2024-01-01', '2025-12-31', 180.0),
                    ('LIS', 'JFK', '2024-01-01', '2025-12-31', 520.0);
                "#,
            )?;
            Ok(())
        })
        .unwrap();
    store
}

#[tokio::test]
async fn test_lis_praia_scenario_resolves_to_madrid() {
    let index = ScriptedIndex::new(vec![hit(
        "Madrid-KB",
        "Madrid tem excelente gastronomia e vida noturna.",
    )]);
    let router = ToolRouter::new(scenario_store(), index.clone(), RetrievalConfig::default());

    let result = router
        .dispatch(
            "find_destination",
            serde_json::json!({
                "current_location": "LIS",
                "max_flight_duration": 3,
                "max_price": 200,
                "categories": ["Praia"]
            }),
        )
        .await
        .unwrap();

    // Duration set {BCN, MAD} ∩ price set {FCO, MAD} = {MAD}
    let queries = index.queries.lock();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0].filter.as_deref(),
        Some("(destination == 'MAD') AND (category CONTAINS 'Praia')")
    );

    assert_eq!(result.direction, ToolDirection::ToServer);
    assert_eq!(
        result.payload,
        serde_json::json!("[Madrid-KB]: Madrid tem excelente gastronomia e vida noturna.\n-----\n")
    );
}

#[tokio::test]
async fn test_duration_only_keeps_every_destination_within_range() {
    let index = ScriptedIndex::new(vec![]);
    let router = ToolRouter::new(scenario_store(), index.clone(), RetrievalConfig::default());

    router
        .dispatch(
            "find_destination",
            serde_json::json!({"current_location": "LIS", "max_flight_duration": 3}),
        )
        .await
        .unwrap();

    let queries = index.queries.lock();
    assert_eq!(
        queries[0].filter.as_deref(),
        Some("(destination == 'BCN') OR (destination == 'MAD')")
    );
}

#[tokio::test]
async fn test_formatted_hits_keep_collaborator_order() {
    let index = ScriptedIndex::new(vec![
        hit("A", "primeiro"),
        hit("B", "segundo"),
        hit("C", "terceiro"),
    ]);
    let router = ToolRouter::new(scenario_store(), index, RetrievalConfig::default());

    let result = router
        .dispatch(
            "search",
            serde_json::json!({"query": "praias com surf"}),
        )
        .await
        .unwrap();

    assert_eq!(
        result.payload,
        serde_json::json!(
            "[A]: primeiro\n-----\n[B]: segundo\n-----\n[C]: terceiro\n-----\n"
        )
    );
}

#[tokio::test]
async fn test_grounding_round_trip() {
    let index = ScriptedIndex::new(vec![
        hit("Madrid-KB", "Madrid"),
        hit("Paris-KB", "Paris"),
    ]);
    let router = ToolRouter::new(scenario_store(), index, RetrievalConfig::default());

    let result = router
        .dispatch(
            "report_grounding",
            serde_json::json!({"sources": ["Paris-KB", "'; DROP--", "Paris-KB"]}),
        )
        .await
        .unwrap();

    assert_eq!(result.direction, ToolDirection::ToClient);
    let sources = result.payload["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["key"], "Paris-KB");
    assert_eq!(sources[0]["title"], "Paris-KB title");
    assert_eq!(sources[0]["body"], "Paris");
}

#[tokio::test]
async fn test_conflicting_constraints_yield_empty_answer_without_query() {
    let index = ScriptedIndex::new(vec![hit("Madrid-KB", "Madrid")]);
    let router = ToolRouter::new(scenario_store(), index.clone(), RetrievalConfig::default());

    // One hour from LIS matches nothing; the empty eligibility set must
    // short-circuit rather than search unfiltered.
    let result = router
        .dispatch(
            "find_destination",
            serde_json::json!({"current_location": "LIS", "max_flight_duration": 1}),
        )
        .await
        .unwrap();

    assert_eq!(result.payload, serde_json::json!(""));
    assert!(index.queries.lock().is_empty());
}
