//! Tool definitions published to the realtime session

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A tool declaration: name, description, and argument schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// All tool definitions as (name, description, parameter schema) triples
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        "find_destination",
        "Find a destination using a set of criteria. Possible criteria is the user's current location, \
         the maximum flight duration, the maximum flight price, the categories of the destination, and \
         generic content to search for about the destination. The knowledge base is in Portuguese, \
         translate to and from Portuguese if needed. Results are formatted as a source name first in \
         square brackets, followed by the text content, and a line with '-----' at the end of each result.",
        r#"{
            "type": "object",
            "properties": {
                "current_location": {
                    "type": "string",
                    "description": "The user's current location using the IATA code for the city"
                },
                "max_flight_duration": {
                    "type": "number",
                    "description": "The maximum flight duration in hours"
                },
                "max_price": {
                    "type": "number",
                    "description": "The maximum price in EUR"
                },
                "categories": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "The categories of the destination"
                },
                "content": {
                    "type": "string",
                    "description": "Generic content to search for about the destination"
                }
            },
            "required": ["current_location"],
            "additionalProperties": false
        }"#,
    ),
    (
        "get_destination_info",
        "Get information about a specific destination using the knowledge base. The knowledge base is \
         in Portuguese, translate to and from Portuguese if needed. Results are formatted as a source \
         name first in square brackets, followed by the text content, and a line with '-----' at the \
         end of each result.",
        r#"{
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The question about the destination"
                }
            },
            "required": ["query"],
            "additionalProperties": false
        }"#,
    ),
    (
        "get_flight_info",
        "Get the price and duration of a specific flight between two cities at a specific date. The \
         flight information is returned as a JSON object with 5 properties: 'source', 'destination', \
         'price', 'duration', and 'trip_date'.",
        r#"{
            "type": "object",
            "properties": {
                "current_location": {
                    "type": "string",
                    "description": "The user's current location using the IATA code for the city"
                },
                "destination": {
                    "type": "string",
                    "description": "The destination using the IATA code for the city"
                },
                "trip_date": {
                    "type": "string",
                    "description": "The date of the trip in the format 'YYYY-MM-DD'"
                }
            },
            "required": ["current_location", "destination", "trip_date"],
            "additionalProperties": false
        }"#,
    ),
    (
        "search",
        "Search the knowledge base for a generic query. The knowledge base is in Portuguese, translate \
         to and from Portuguese if needed. Results are formatted as a source name first in square \
         brackets, followed by the text content, and a line with '-----' at the end of each result.",
        r#"{
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                }
            },
            "required": ["query"],
            "additionalProperties": false
        }"#,
    ),
    (
        "report_grounding",
        "Report use of a source from the knowledge base as part of an answer (effectively, cite the \
         source). Sources appear in square brackets before each knowledge base passage. Always use this \
         tool to cite sources when responding with information from the knowledge base.",
        r#"{
            "type": "object",
            "properties": {
                "sources": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "List of source names from last statement actually used, do not include the ones not used to formulate a response"
                }
            },
            "required": ["sources"],
            "additionalProperties": false
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            tool_type: "function".to_string(),
            name: name.to_string(),
            description: description.to_string(),
            parameters: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_schemas_parse() {
        let definitions = get_tool_definitions();
        assert_eq!(definitions.len(), TOOL_DEFINITIONS.len());

        for definition in &definitions {
            assert_eq!(definition.tool_type, "function");
            assert!(definition.parameters.is_object(), "{}", definition.name);
            assert_eq!(definition.parameters["additionalProperties"], false);
        }
    }

    #[test]
    fn test_find_destination_requires_location_only() {
        let definitions = get_tool_definitions();
        let find = definitions
            .iter()
            .find(|d| d.name == "find_destination")
            .unwrap();
        assert_eq!(
            find.parameters["required"],
            serde_json::json!(["current_location"])
        );
    }
}
