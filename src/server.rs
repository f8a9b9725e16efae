//! MCP server implementation exposing the document tree.

use crate::config::{DocRoot, ResponseFormat};
use crate::fs::LocalFs;
use crate::query::QueryHandler;
use crate::search::WalkCachePolicy;
use crate::tools::read_docs::{ReadDocsRequest, handle_read_docs};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP Server for Markdown documentation queries
#[derive(Clone)]
pub struct DocsServer {
    /// Shared query engine (resolver, suggester, walk cache)
    handler: Arc<QueryHandler<LocalFs>>,

    /// How tool responses are rendered
    format: ResponseFormat,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("root", self.handler.root())
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[tool_router]
impl DocsServer {
    /// Create a server for one document root on the local filesystem.
    pub fn new(root: DocRoot, format: ResponseFormat, walk_cache: WalkCachePolicy) -> Self {
        Self {
            handler: Arc::new(QueryHandler::new(Arc::new(root), LocalFs, walk_cache)),
            format,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Read Markdown documentation by path. Accepts one or more paths relative to the documentation root; files return their content, directories return a listing with the content of their Markdown files. Missing paths return the available top-level paths and suggestions ranked by the path's words plus any queryKeywords.",
        input_schema = inline_schema_for_type::<ReadDocsRequest>()
    )]
    async fn read_docs(
        &self,
        Parameters(request): Parameters<ReadDocsRequest>,
    ) -> std::result::Result<String, String> {
        handle_read_docs(&self.handler, request, self.format).await
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(format!(
                "mdocs-mcp: serves the Markdown documentation under '{}'. \
                 Start with read_docs on \".\" to see the top-level layout, then read \
                 individual files. Pass queryKeywords to get better suggestions for missing paths.",
                self.handler.root().relative_path()
            ))
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Sets `inline_subschemas = true` so nested types are emitted inline rather
/// than as `$ref` definitions, which some MCP clients fail to render.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();

    match serde_json::to_value(schema).expect("failed to serialize schema") {
        serde_json::Value::Object(object) => Arc::new(object),
        _ => panic!("Schema serialization produced non-object value"),
    }
}
