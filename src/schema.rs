//! Schema extraction from function signatures
//!
//! A [`FunctionSignature`] captures what the compiler knows about a tool
//! function: its name, doc comment and parameters. The `#[tool]` macro builds
//! one from a Rust `fn`; it can also be assembled by hand. [`SchemaExtractor`]
//! turns it into the JSON-Schema-like [`ToolSchema`] handed to models.

use serde::{Deserialize, Serialize};

use crate::descriptor::{JsonType, ParameterSchema, PropertySchema, ToolSchema};
use crate::error::SchemaError;

/// Declared type of a parameter, as far as the schema is concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeHint {
    Text,
    Integer,
    Float,
    Boolean,
    /// Any other declared type, by name
    Other(String),
    Unannotated,
}

impl TypeHint {
    /// Map to a JSON Schema primitive. Unknown types fall back to `string`.
    pub fn json_type(&self) -> JsonType {
        match self {
            TypeHint::Integer => JsonType::Integer,
            TypeHint::Float => JsonType::Number,
            TypeHint::Boolean => JsonType::Boolean,
            TypeHint::Text | TypeHint::Other(_) | TypeHint::Unannotated => JsonType::String,
        }
    }
}

/// A single named parameter of a tool function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSignature {
    pub name: String,
    pub type_hint: TypeHint,
    /// Parameter doc comment, if any
    pub description: Option<String>,
    /// Default value; `Some` means the parameter is optional
    pub default: Option<serde_json::Value>,
}

impl ParamSignature {
    /// Create a required parameter
    pub fn new(name: impl Into<String>, type_hint: TypeHint) -> Self {
        Self {
            name: name.into(),
            type_hint,
            description: None,
            default: None,
        }
    }

    /// Set the parameter description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Give the parameter a default value, making it optional
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Name, documentation and parameters of a tool function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<ParamSignature>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
        }
    }

    /// Set the documentation text
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Append a parameter (signature order is preserved)
    pub fn param(mut self, param: ParamSignature) -> Self {
        self.params.push(param);
        self
    }
}

/// Derives tool schemas from function signatures
///
/// Extraction is a pure function of the signature: the same signature always
/// yields the same schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaExtractor;

impl SchemaExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a schema, using the signature's own name
    pub fn extract(&self, signature: &FunctionSignature) -> Result<ToolSchema, SchemaError> {
        self.extract_as(signature, &signature.name)
    }

    /// Extract a schema under an overriding name
    pub fn extract_as(
        &self,
        signature: &FunctionSignature,
        name: &str,
    ) -> Result<ToolSchema, SchemaError> {
        let description = signature
            .doc
            .as_deref()
            .map(str::trim)
            .filter(|doc| !doc.is_empty())
            .ok_or_else(|| SchemaError::MissingDocumentation {
                name: name.to_string(),
            })?;

        let mut parameters = ParameterSchema::new();
        for param in &signature.params {
            let label = param
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Parameter {}", param.name));

            parameters.properties.insert(
                param.name.clone(),
                PropertySchema {
                    json_type: param.type_hint.json_type(),
                    description: label,
                },
            );

            if param.is_required() {
                parameters.required.push(param.name.clone());
            }
        }

        Ok(ToolSchema {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        })
    }
}
