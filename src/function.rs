//! Callable tool functions
//!
//! A [`ToolFunction`] pairs a [`FunctionSignature`] with the code to run when a
//! model calls the tool. Arguments arrive as a JSON object and the result is
//! returned as JSON.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ToolError;
use crate::schema::FunctionSignature;

/// Type-erased tool body
pub type ToolCallable =
    Arc<dyn Fn(serde_json::Value) -> BoxFuture<'static, Result<serde_json::Value, ToolError>> + Send + Sync>;

/// A tool function ready to be registered
#[derive(Clone)]
pub struct ToolFunction {
    signature: FunctionSignature,
    callable: ToolCallable,
}

impl fmt::Debug for ToolFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolFunction")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl ToolFunction {
    /// Wrap an async function taking the raw JSON argument object
    pub fn new<F, Fut>(signature: FunctionSignature, func: F) -> Self
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, ToolError>> + Send + 'static,
    {
        let callable: ToolCallable = Arc::new(move |args: serde_json::Value| {
            Box::pin(func(args)) as BoxFuture<'static, _>
        });
        Self {
            signature,
            callable,
        }
    }

    /// Wrap a synchronous function over typed arguments
    ///
    /// Arguments are deserialized into `Args` and the result serialized back to
    /// JSON. An `Err(String)` from the function becomes [`ToolError::Execution`].
    pub fn from_sync<F, Args, R>(signature: FunctionSignature, func: F) -> Self
    where
        F: Fn(Args) -> Result<R, String> + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let callable: ToolCallable = Arc::new(move |args_json: serde_json::Value| {
            let result = serde_json::from_value::<Args>(args_json)
                .map_err(|e| ToolError::parameter(format!("Failed to deserialize arguments: {}", e)))
                .and_then(|args| func(args).map_err(ToolError::Execution))
                .and_then(|value| serde_json::to_value(value).map_err(ToolError::from));
            Box::pin(async move { result }) as BoxFuture<'static, _>
        });
        Self {
            signature,
            callable,
        }
    }

    /// Wrap an async function over typed arguments
    pub fn from_async<F, Args, R, Fut>(signature: FunctionSignature, func: F) -> Self
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        Fut: Future<Output = Result<R, String>> + Send + 'static,
    {
        let func = Arc::new(func);
        let callable: ToolCallable = Arc::new(move |args_json: serde_json::Value| {
            let args = match serde_json::from_value::<Args>(args_json) {
                Ok(args) => args,
                Err(e) => {
                    let err = ToolError::parameter(format!("Failed to deserialize arguments: {}", e));
                    return Box::pin(async move { Err(err) }) as BoxFuture<'static, _>;
                }
            };
            let future = func(args);
            Box::pin(async move {
                let value = future.await.map_err(ToolError::Execution)?;
                Ok(serde_json::to_value(value)?)
            }) as BoxFuture<'static, _>
        });
        Self {
            signature,
            callable,
        }
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    /// The declared function name
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn callable(&self) -> ToolCallable {
        Arc::clone(&self.callable)
    }

    /// Run the function with a JSON argument object
    pub async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        (self.callable)(args).await
    }
}

/// Named JSON arguments for a single tool call
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl FunctionCall {
    pub fn new(
        name: impl Into<String>,
        parameters: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Accepts an object, or `null` for a call without arguments
    pub fn from_value(
        name: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Result<Self, ToolError> {
        match parameters {
            serde_json::Value::Object(map) => Ok(Self::new(name, map)),
            serde_json::Value::Null => Ok(Self::new(name, serde_json::Map::new())),
            _ => Err(ToolError::parameter("Parameters must be an object")),
        }
    }

    /// Deserializes a required parameter by name.
    pub fn get_param<T: DeserializeOwned>(&self, name: &str) -> Result<T, ToolError> {
        let value = self
            .parameters
            .get(name)
            .ok_or_else(|| ToolError::parameter(format!("Missing parameter: {}", name)))?;

        serde_json::from_value(value.clone()).map_err(|err| {
            ToolError::parameter(format!("Failed to deserialize parameter '{}': {}", name, err))
        })
    }

    /// Deserializes an optional parameter by name. Missing and `null` are `None`.
    pub fn get_optional_param<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, ToolError> {
        match self.parameters.get(name) {
            None => Ok(None),
            Some(value) if value.is_null() => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|err| {
                ToolError::parameter(format!("Failed to deserialize parameter '{}': {}", name, err))
            }),
        }
    }
}
