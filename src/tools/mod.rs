//! Tool invocation boundary
//!
//! Each tool is named, carries a JSON-schema-validated argument object,
//! and returns a direction-tagged result. Arguments are deserialized into
//! typed request variants once at the boundary; dispatch goes through an
//! immutable router built at startup.

pub mod request;
pub mod router;
pub mod schema;

pub use request::ToolRequest;
pub use router::ToolRouter;
pub use schema::{get_tool_definitions, ToolDefinition, TOOL_DEFINITIONS};
