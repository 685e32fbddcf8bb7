//! Tool registry for dynamic dispatch.

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::fmt::{TextFormat, TextOptions};
use crate::schema::mcp_schema;
use crate::tool::{Tool, ToolCodec};
use futures::future::BoxFuture;
use schemars::Schema;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Result of [`ToolRegistry::dispatch_json_formatted`]: JSON data plus text.
#[derive(Debug, Clone)]
pub struct FormattedResult {
    /// The JSON-serialized output data.
    pub data: Value,
    /// Human-readable rendering from the output's [`TextFormat`] impl.
    pub text: String,
}

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    /// Get the tool's name.
    fn name(&self) -> &'static str;

    /// Get the tool's description.
    fn description(&self) -> &'static str;

    /// Get the input JSON schema.
    fn input_schema(&self) -> Schema;

    /// Get the output JSON schema, if its root is an object.
    fn output_schema(&self) -> Option<Schema>;

    /// Call the tool with JSON arguments.
    fn call_json(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Value, ToolError>>;

    /// Call the tool with JSON arguments, returning JSON data and text.
    fn call_json_formatted(
        &self,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> BoxFuture<'static, Result<FormattedResult, ToolError>>;
}

/// Registry of tools keyed by name.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    map: BTreeMap<String, Arc<dyn ErasedTool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_names())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new registry builder.
    #[must_use]
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// List all tool names, sorted.
    #[must_use]
    pub fn list_names(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    /// Get a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    /// Iterate over the registered tools in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ErasedTool>> {
        self.map.values()
    }

    /// Check if a tool is registered by name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Get the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Dispatch a tool call using JSON arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for an unregistered name, otherwise
    /// whatever the tool or its codec returns.
    pub async fn dispatch_json(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<Value, ToolError> {
        let entry = self.entry(name)?;
        tracing::debug!(tool = name, host = ctx.host(), "dispatching tool call");
        entry.call_json(args, ctx).await
    }

    /// Dispatch a tool call using JSON arguments, returning data and text.
    ///
    /// # Errors
    ///
    /// Same as [`ToolRegistry::dispatch_json`].
    pub async fn dispatch_json_formatted(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> Result<FormattedResult, ToolError> {
        let entry = self.entry(name)?;
        tracing::debug!(tool = name, host = ctx.host(), "dispatching formatted tool call");
        entry.call_json_formatted(args, ctx, text_opts).await
    }

    fn entry(&self, name: &str) -> Result<&Arc<dyn ErasedTool>, ToolError> {
        self.map
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))
    }
}

/// Builder for constructing a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    items: Vec<Arc<dyn ErasedTool>>,
}

struct Registered<T, C> {
    tool: T,
    _codec: PhantomData<C>,
}

impl<T, C> Registered<T, C>
where
    T: Tool + Clone,
    C: ToolCodec<T>,
{
    /// Decode the arguments and start the call; decoding errors surface
    /// before any tool work begins.
    fn start(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<BoxFuture<'static, Result<T::Output, ToolError>>, ToolError> {
        let wire: C::WireIn =
            serde_json::from_value(args).map_err(|e| ToolError::invalid_input(e.to_string()))?;
        let native = C::decode(wire)?;
        Ok(self.tool.call(native, ctx))
    }
}

impl<T, C> ErasedTool for Registered<T, C>
where
    T: Tool + Clone,
    C: ToolCodec<T>,
    T::Output: TextFormat,
{
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn input_schema(&self) -> Schema {
        mcp_schema::cached_schema_for::<C::WireIn>()
            .as_ref()
            .clone()
    }

    fn output_schema(&self) -> Option<Schema> {
        mcp_schema::cached_output_schema_for::<C::WireOut>()
            .ok()
            .map(|arc| arc.as_ref().clone())
    }

    fn call_json(
        &self,
        args: Value,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Value, ToolError>> {
        match self.start(args, ctx) {
            Err(e) => Box::pin(async move { Err(e) }),
            Ok(fut) => Box::pin(async move {
                let wired = C::encode(fut.await?)?;
                serde_json::to_value(wired).map_err(|e| ToolError::internal(e.to_string()))
            }),
        }
    }

    fn call_json_formatted(
        &self,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> BoxFuture<'static, Result<FormattedResult, ToolError>> {
        let text_opts = text_opts.clone();
        match self.start(args, ctx) {
            Err(e) => Box::pin(async move { Err(e) }),
            Ok(fut) => Box::pin(async move {
                let out = fut.await?;
                let text = out.fmt_text(&text_opts);
                let wired = C::encode(out)?;
                let data =
                    serde_json::to_value(&wired).map_err(|e| ToolError::internal(e.to_string()))?;
                Ok(FormattedResult { data, text })
            }),
        }
    }
}

impl ToolRegistryBuilder {
    /// Register a tool with its codec.
    ///
    /// Use `()` as the codec when the tool's Input/Output types already
    /// implement serde and schemars traits.
    #[must_use]
    pub fn register<T, C>(mut self, tool: T) -> Self
    where
        T: Tool + Clone,
        C: ToolCodec<T>,
        T::Output: TextFormat,
    {
        self.items.push(Arc::new(Registered::<T, C> {
            tool,
            _codec: PhantomData,
        }));
        self
    }

    /// Build the registry. A later registration replaces an earlier one with
    /// the same name.
    #[must_use]
    pub fn finish(self) -> ToolRegistry {
        let map = self
            .items
            .into_iter()
            .map(|erased| (erased.name().to_string(), erased))
            .collect();
        ToolRegistry { map }
    }
}
