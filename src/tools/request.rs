//! Typed tool requests
//!
//! Tool arguments arrive as loose JSON from the session. Each tool gets
//! one typed variant, deserialized and validated here, once, before any
//! collaborator is contacted.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, WayfarerError};
use crate::types::{validate_category_tag, validate_destination_code};

/// Arguments for criteria-based destination search
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FindDestinationArgs {
    pub current_location: String,
    #[serde(default)]
    pub max_flight_duration: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Absent categories mean no category restriction
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Arguments for a single-destination knowledge-base lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetDestinationInfoArgs {
    pub query: String,
}

/// Arguments for a specific flight lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetFlightInfoArgs {
    pub current_location: String,
    pub destination: String,
    pub trip_date: String,
}

/// Arguments for a generic knowledge-base search
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchArgs {
    pub query: String,
}

/// Arguments for citation grounding
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportGroundingArgs {
    pub sources: Vec<String>,
}

/// One variant per tool name
#[derive(Debug, Clone)]
pub enum ToolRequest {
    FindDestination(FindDestinationArgs),
    GetDestinationInfo(GetDestinationInfoArgs),
    GetFlightInfo(GetFlightInfoArgs),
    Search(SearchArgs),
    ReportGrounding(ReportGroundingArgs),
}

fn decode<T: serde::de::DeserializeOwned>(name: &str, args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| WayfarerError::InvalidInput(format!("Invalid arguments for '{}': {}", name, e)))
}

impl ToolRequest {
    /// Parse and validate a named tool invocation
    pub fn parse(name: &str, args: Value) -> Result<Self> {
        let request = match name {
            "find_destination" => ToolRequest::FindDestination(decode(name, args)?),
            "get_destination_info" => ToolRequest::GetDestinationInfo(decode(name, args)?),
            "get_flight_info" => ToolRequest::GetFlightInfo(decode(name, args)?),
            "search" => ToolRequest::Search(decode(name, args)?),
            "report_grounding" => ToolRequest::ReportGrounding(decode(name, args)?),
            other => return Err(WayfarerError::UnknownTool(other.to_string())),
        };

        request.validate()?;
        Ok(request)
    }

    /// The tool name this request answers to
    pub fn name(&self) -> &'static str {
        match self {
            ToolRequest::FindDestination(_) => "find_destination",
            ToolRequest::GetDestinationInfo(_) => "get_destination_info",
            ToolRequest::GetFlightInfo(_) => "get_flight_info",
            ToolRequest::Search(_) => "search",
            ToolRequest::ReportGrounding(_) => "report_grounding",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ToolRequest::FindDestination(args) => {
                validate_destination_code(&args.current_location)
                    .map_err(|e| WayfarerError::InvalidInput(e.to_string()))?;
                for tag in &args.categories {
                    validate_category_tag(tag)
                        .map_err(|e| WayfarerError::InvalidInput(e.to_string()))?;
                }
                if let Some(hours) = args.max_flight_duration {
                    if !hours.is_finite() || hours < 0.0 {
                        return Err(WayfarerError::InvalidInput(format!(
                            "max_flight_duration must be a non-negative number, got {}",
                            hours
                        )));
                    }
                }
                if let Some(price) = args.max_price {
                    if !price.is_finite() || price < 0.0 {
                        return Err(WayfarerError::InvalidInput(format!(
                            "max_price must be a non-negative number, got {}",
                            price
                        )));
                    }
                }
                Ok(())
            }
            ToolRequest::GetFlightInfo(args) => {
                validate_destination_code(&args.current_location)
                    .map_err(|e| WayfarerError::InvalidInput(e.to_string()))?;
                validate_destination_code(&args.destination)
                    .map_err(|e| WayfarerError::InvalidInput(e.to_string()))?;
                NaiveDate::parse_from_str(&args.trip_date, "%Y-%m-%d").map_err(|_| {
                    WayfarerError::InvalidInput(format!(
                        "trip_date must be 'YYYY-MM-DD', got '{}'",
                        args.trip_date
                    ))
                })?;
                Ok(())
            }
            ToolRequest::GetDestinationInfo(_)
            | ToolRequest::Search(_)
            | ToolRequest::ReportGrounding(_) => Ok(()),
        }
    }
}
