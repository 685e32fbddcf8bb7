//! MCP server handler backed by `ToolRegistry`.

use std::sync::Arc;

use doctor_tool_core::{TextOptions, ToolContext, ToolRegistry};
use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::json;

use crate::resources::UiResource;

const INSTRUCTIONS: &str = "Use search_doctors to find US healthcare providers in the NPPES NPI Registry by name, city, state or specialty. Specialties use registry vocabulary such as \"Cardiovascular Disease\" or \"Dermatology\". Results can be rendered with the ui://doctor_card resource.";

/// Output mode for tool results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Return results as formatted text only.
    Text,
    /// Also publish output schemas and return `structured_content`. Default,
    /// since the doctor card renders from it.
    #[default]
    Structured,
}

/// MCP server handler for the doctor search tools.
///
/// - **Structured** (default): `list_tools` publishes `output_schema` and
///   `call_tool` also returns the JSON data as `structured_content`.
/// - **Text**: `call_tool` returns the tool's text rendering only and
///   `list_tools` omits `output_schema`.
///
/// Every registered tool is advertised as a read-only, closed-world lookup.
#[derive(Clone)]
pub struct DoctorServer {
    registry: Arc<ToolRegistry>,
    ui: UiResource,
    output_mode: OutputMode,
    name: String,
    version: String,
}

impl DoctorServer {
    /// Create a server from a registry and the doctor card resource.
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, ui: UiResource) -> Self {
        Self {
            registry,
            ui,
            output_mode: OutputMode::default(),
            name: "doctor-listing".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Set the output mode for tool results.
    #[must_use]
    pub const fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Set the server name and version.
    #[must_use]
    pub fn with_info(mut self, name: &str, version: &str) -> Self {
        self.name = name.to_string();
        self.version = version.to_string();
        self
    }

    /// Get the server name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the output mode.
    #[must_use]
    pub const fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Tool definitions as `list_tools` returns them.
    #[must_use]
    pub fn tool_listing(&self) -> Vec<m::Tool> {
        self.registry
            .iter()
            .map(|erased| {
                let name = erased.name();
                let title = display_title(name);

                let input_schema = erased
                    .input_schema()
                    .as_object()
                    .cloned()
                    .unwrap_or_default();

                let output_schema = if self.output_mode == OutputMode::Structured {
                    erased
                        .output_schema()
                        .and_then(|s| s.as_object().cloned())
                        .map(Arc::new)
                } else {
                    None
                };

                m::Tool {
                    name: name.into(),
                    title: Some(title.clone()),
                    description: Some(erased.description().into()),
                    input_schema: Arc::new(input_schema),
                    annotations: Some(lookup_annotations(&title)),
                    output_schema,
                    icons: None,
                    meta: None,
                }
            })
            .collect()
    }

    /// Run a tool call. Failures come back as error results, never as
    /// protocol errors.
    pub async fn call(&self, name: &str, arguments: Option<m::JsonObject>) -> m::CallToolResult {
        let args = serde_json::Value::Object(arguments.unwrap_or_default());
        let ctx = ToolContext::for_host("mcp");
        let text_opts = TextOptions::default();

        match self
            .registry
            .dispatch_json_formatted(name, args, &ctx, &text_opts)
            .await
        {
            Ok(res) => {
                let structured_content = if self.output_mode == OutputMode::Structured
                    && self
                        .registry
                        .get(name)
                        .and_then(|t| t.output_schema())
                        .is_some()
                {
                    Some(res.data)
                } else {
                    None
                };

                m::CallToolResult {
                    content: vec![m::Content::text(res.text)],
                    structured_content,
                    is_error: Some(false),
                    meta: None,
                }
            }
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                m::CallToolResult::error(vec![m::Content::text(e.message())])
            }
        }
    }

    /// Resources as `list_resources` returns them.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the resource descriptor cannot be built.
    pub fn resource_listing(&self) -> Result<Vec<m::Resource>, m::ErrorData> {
        Ok(vec![self.ui.listing()?])
    }

    /// Resource templates as `list_resource_templates` returns them.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the template descriptor cannot be built.
    pub fn resource_template_listing(&self) -> Result<Vec<m::ResourceTemplate>, m::ErrorData> {
        Ok(vec![self.ui.template()?])
    }

    /// Read a resource by URI.
    ///
    /// # Errors
    ///
    /// Returns `resource_not_found` for any URI other than the doctor card.
    pub async fn read(&self, uri: &str) -> Result<m::ReadResourceResult, m::ErrorData> {
        if uri != self.ui.uri() {
            return Err(m::ErrorData::resource_not_found(
                format!("Unknown resource: {uri}"),
                Some(json!({ "uri": uri })),
            ));
        }
        self.ui.read().await
    }
}

/// `search_doctors` becomes `Search Doctors`.
fn display_title(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |c| {
                c.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup_annotations(title: &str) -> m::ToolAnnotations {
    m::ToolAnnotations {
        title: Some(title.to_string()),
        read_only_hint: Some(true),
        destructive_hint: Some(false),
        idempotent_hint: Some(true),
        open_world_hint: Some(false),
    }
}

impl ServerHandler for DoctorServer {
    fn get_info(&self) -> m::ServerInfo {
        m::InitializeResult {
            server_info: m::Implementation {
                name: self.name.clone(),
                title: Some("Doctor Listing".to_string()),
                version: self.version.clone(),
                website_url: None,
                icons: None,
            },
            capabilities: m::ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tool_listing(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move { Ok(self.call(&req.name, req.arguments).await) }
    }

    fn list_resources(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourcesResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListResourcesResult {
                resources: self.resource_listing()?,
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn list_resource_templates(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListResourceTemplatesResult, m::ErrorData>>
    + Send
    + '_ {
        async move {
            Ok(m::ListResourceTemplatesResult {
                resource_templates: self.resource_template_listing()?,
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn read_resource(
        &self,
        req: m::ReadResourceRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ReadResourceResult, m::ErrorData>> + Send + '_
    {
        async move { self.read(&req.uri).await }
    }
}
