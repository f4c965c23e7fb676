//! Tool dispatch
//!
//! `ToolRouter` is the immutable dispatch table over the flight store and
//! the search index. It is built once at startup and shared with the relay
//! as an `Arc`; nothing registers tools after construction.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::Result;
use crate::flights::{queries, FlightStore};
use crate::retrieval::{
    combine, resolve_grounding, run_criteria_search, run_text_search, synthesize, RetrievalConfig,
    SearchIndex,
};
use crate::types::{FlightInfo, ToolResult};

use super::request::{
    FindDestinationArgs, GetDestinationInfoArgs, GetFlightInfoArgs, ReportGroundingArgs,
    SearchArgs, ToolRequest,
};

/// Immutable dispatch table for tool invocations
pub struct ToolRouter {
    flights: FlightStore,
    index: Arc<dyn SearchIndex>,
    config: RetrievalConfig,
}

impl ToolRouter {
    pub fn new(flights: FlightStore, index: Arc<dyn SearchIndex>, config: RetrievalConfig) -> Self {
        Self {
            flights,
            index,
            config,
        }
    }

    /// Dispatch a named tool invocation.
    ///
    /// Arguments are parsed and validated before any collaborator call;
    /// collaborator failures propagate once, unmodified, to the caller.
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<ToolResult> {
        let request = ToolRequest::parse(name, args)?;
        tracing::info!(tool = request.name(), "Dispatching tool call");

        match request {
            ToolRequest::FindDestination(args) => self.find_destination(args).await,
            ToolRequest::GetDestinationInfo(args) => self.get_destination_info(args).await,
            ToolRequest::GetFlightInfo(args) => self.get_flight_info(args).await,
            ToolRequest::Search(args) => self.search(args).await,
            ToolRequest::ReportGrounding(args) => self.report_grounding(args).await,
        }
    }

    /// Criteria search: resolve constraints, intersect, synthesize the
    /// filter, run one hybrid query, format citations.
    async fn find_destination(&self, args: FindDestinationArgs) -> Result<ToolResult> {
        tracing::debug!(
            origin = %args.current_location,
            max_hours = ?args.max_flight_duration,
            max_price = ?args.max_price,
            categories = ?args.categories,
            "Resolving destination criteria"
        );

        // One scoped connection acquisition per invocation; both resolver
        // queries complete before filter synthesis starts.
        let (duration_set, price_set) = self.flights.with_connection(|conn| {
            let duration_set = args
                .max_flight_duration
                .map(|hours| queries::destinations_within_duration(conn, &args.current_location, hours))
                .transpose()?;
            let price_set = args
                .max_price
                .map(|price| queries::destinations_within_price(conn, &args.current_location, price))
                .transpose()?;
            Ok((duration_set, price_set))
        })?;

        let eligibility = combine(duration_set, price_set);
        let filter = synthesize(&eligibility, &args.categories)?;
        tracing::debug!(filter = ?filter.as_filter(), "Synthesized search filter");

        let result = run_criteria_search(
            self.index.as_ref(),
            &self.config,
            args.content.as_deref(),
            &filter,
        )
        .await?;

        Ok(ToolResult::server_text(result))
    }

    async fn get_destination_info(&self, args: GetDestinationInfoArgs) -> Result<ToolResult> {
        let result = run_text_search(
            self.index.as_ref(),
            &self.config,
            &args.query,
            self.config.destination_top,
        )
        .await?;

        Ok(ToolResult::server_text(result))
    }

    async fn get_flight_info(&self, args: GetFlightInfoArgs) -> Result<ToolResult> {
        let info = self.flights.with_connection(|conn| {
            let duration = queries::flight_duration(conn, &args.current_location, &args.destination)?;
            let price = queries::flight_price(
                conn,
                &args.current_location,
                &args.destination,
                &args.trip_date,
            )?;
            Ok(FlightInfo {
                source: args.current_location.clone(),
                destination: args.destination.clone(),
                price,
                duration,
                trip_date: args.trip_date.clone(),
            })
        })?;

        tracing::debug!(?info, "Flight information");
        Ok(ToolResult::server_json(serde_json::to_value(info)?))
    }

    async fn search(&self, args: SearchArgs) -> Result<ToolResult> {
        let result = run_text_search(
            self.index.as_ref(),
            &self.config,
            &args.query,
            self.config.search_top,
        )
        .await?;

        Ok(ToolResult::server_text(result))
    }

    async fn report_grounding(&self, args: ReportGroundingArgs) -> Result<ToolResult> {
        let docs = resolve_grounding(self.index.as_ref(), &args.sources).await?;
        Ok(ToolResult::client_json(json!({ "sources": docs })))
    }
}
