//! Core tool traits.

use crate::context::ToolContext;
use crate::error::ToolError;
use futures::future::BoxFuture;

/// A callable tool with native input and output types.
///
/// Serialization is handled separately by [`ToolCodec`] at protocol
/// boundaries, so `call` can be used directly from Rust without JSON.
///
/// # Example
///
/// ```ignore
/// use doctor_tool_core::{BoxFuture, Tool, ToolContext, ToolError};
///
/// #[derive(Clone)]
/// struct CountTool;
///
/// impl Tool for CountTool {
///     type Input = Vec<String>;
///     type Output = usize;
///     const NAME: &'static str = "count";
///     const DESCRIPTION: &'static str = "Count the given names";
///
///     fn call(&self, input: Self::Input, _ctx: &ToolContext)
///         -> BoxFuture<'static, Result<Self::Output, ToolError>>
///     {
///         Box::pin(async move { Ok(input.len()) })
///     }
/// }
/// ```
pub trait Tool: Send + Sync + 'static {
    /// Input type for the tool.
    type Input: Send + 'static;

    /// Output type for the tool.
    type Output: Send + 'static;

    /// Unique name identifying the tool.
    const NAME: &'static str;

    /// Human-readable description shown to the model.
    const DESCRIPTION: &'static str;

    /// Execute the tool with the given input and context.
    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>>;
}

/// Codec for converting tool inputs/outputs at protocol boundaries.
///
/// Serde and schemars bounds live here, not on [`Tool`]. When `T::Input`
/// and `T::Output` already carry them, use `()` as the codec.
pub trait ToolCodec<T: Tool>: Send + Sync + 'static {
    /// Wire format for input.
    type WireIn: serde::de::DeserializeOwned + schemars::JsonSchema + Send + 'static;

    /// Wire format for output.
    type WireOut: serde::Serialize + schemars::JsonSchema + Send + 'static;

    /// Decode wire input to native input.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidInput`] when the wire value has no native form.
    fn decode(wire: Self::WireIn) -> Result<T::Input, ToolError>;

    /// Encode native output to wire output.
    ///
    /// # Errors
    ///
    /// Returns an error when the native value cannot be represented on the wire.
    fn encode(native: T::Output) -> Result<Self::WireOut, ToolError>;
}

/// Identity codec.
impl<T> ToolCodec<T> for ()
where
    T: Tool,
    T::Input: serde::de::DeserializeOwned + schemars::JsonSchema,
    T::Output: serde::Serialize + schemars::JsonSchema,
{
    type WireIn = T::Input;
    type WireOut = T::Output;

    fn decode(wire: Self::WireIn) -> Result<T::Input, ToolError> {
        Ok(wire)
    }

    fn encode(native: T::Output) -> Result<Self::WireOut, ToolError> {
        Ok(native)
    }
}
