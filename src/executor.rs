//! Tool executor trait

use async_trait::async_trait;

use crate::error::ToolError;

/// Runs tool calls requested by a model
///
/// Implementations look the tool up by name and pass it the JSON arguments the
/// model produced.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool call
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the tool to execute
    /// * `arguments` - Tool arguments as a JSON object
    async fn execute(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError>;
}
