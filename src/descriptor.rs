//! Tool descriptors and the function-calling wire format

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JSON Schema primitive types a tool parameter can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
}

/// Schema for a single parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,
    pub description: String,
}

/// Object schema describing a tool's parameters
///
/// Serializes as
/// `{"type": "object", "properties": {...}, "required": [...], "additionalProperties": false}`.
/// Properties keep signature order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", with = "object_tag")]
    schema_type: (),
    pub properties: IndexMap<String, PropertySchema>,
    pub required: Vec<String>,
    #[serde(rename = "additionalProperties", with = "closed_flag")]
    additional_properties: (),
}

impl ParameterSchema {
    /// Create a schema with no parameters
    pub fn new() -> Self {
        Self {
            schema_type: (),
            properties: IndexMap::new(),
            required: Vec::new(),
            additional_properties: (),
        }
    }

    /// Undeclared parameters are never accepted
    pub fn additional_properties(&self) -> bool {
        false
    }
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// `"type"` is always `"object"`
mod object_tag {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("object")
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag == "object" {
            Ok(())
        } else {
            Err(D::Error::custom(format!("expected \"object\", got \"{}\"", tag)))
        }
    }
}

/// `"additionalProperties"` is always `false`
mod closed_flag {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(false)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
        if bool::deserialize(deserializer)? {
            Err(D::Error::custom("additionalProperties must be false"))
        } else {
            Ok(())
        }
    }
}

/// Name, description and parameter schema derived from a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

/// The canonical persisted record for a registered tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
    pub embedding: Vec<f32>,
}

impl ToolDescriptor {
    /// Attach an embedding vector to an extracted schema
    pub fn new(schema: ToolSchema, embedding: Vec<f32>) -> Self {
        Self {
            name: schema.name,
            description: schema.description,
            parameters: schema.parameters,
            embedding,
        }
    }

    /// Render as a function-calling tool spec. The embedding is dropped.
    pub fn to_spec(&self) -> ToolSpec {
        ToolSpec::function(FunctionSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
        })
    }
}

impl From<ToolDescriptor> for ToolSpec {
    fn from(descriptor: ToolDescriptor) -> Self {
        ToolSpec::function(FunctionSpec {
            name: descriptor.name,
            description: descriptor.description,
            parameters: descriptor.parameters,
        })
    }
}

/// The function part of a [`ToolSpec`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

/// Kind tag of a [`ToolSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Function,
}

/// Caller-facing tool spec:
/// `{"type": "function", "function": {"name", "description", "parameters"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    #[serde(rename = "type")]
    pub kind: ToolKind,
    pub function: FunctionSpec,
}

impl ToolSpec {
    pub fn function(function: FunctionSpec) -> Self {
        Self {
            kind: ToolKind::Function,
            function,
        }
    }
}
