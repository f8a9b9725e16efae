//! The `read_docs` tool: read files or directories from the document root.

use crate::config::ResponseFormat;
use crate::format::render;
use crate::fs::DocFs;
use crate::query::QueryHandler;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadDocsRequest {
    /// Paths to read, relative to the documentation root (e.g. "index.md",
    /// "guides/", "reference/api.md"). Directories return a listing.
    #[schemars(length(min = 1))]
    pub paths: Vec<String>,
    /// Optional keywords used to suggest related documents when a path is
    /// missing or a directory is broad
    #[serde(default)]
    pub query_keywords: Option<Vec<String>>,
}

/// Execute a read request and render the response.
pub async fn handle_read_docs<F: DocFs>(
    handler: &QueryHandler<F>,
    request: ReadDocsRequest,
    format: ResponseFormat,
) -> Result<String, String> {
    if request.paths.is_empty() {
        return Err("At least one path is required.".to_string());
    }

    let keywords = request.query_keywords.unwrap_or_default();
    let results = handler.handle(&request.paths, &keywords).await;

    Ok(render(&results, format))
}
