// Core types for provider-invocable tools
//
// Compatible with Claude API tool use format

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition (Claude API-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// JSON Schema for tool input parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String, // Usually "object"
    pub properties: Value,
    pub required: Vec<String>,
}

/// Parameter type understood by `ToolInputSchema::object`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
}

impl ParamType {
    fn as_str(self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
        }
    }
}

impl ToolInputSchema {
    /// Build an object schema where every listed parameter is required
    pub fn object(params: &[(&str, ParamType, &str)]) -> Self {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for (param_name, param_type, param_desc) in params {
            properties.insert(
                param_name.to_string(),
                serde_json::json!({
                    "type": param_type.as_str(),
                    "description": param_desc
                }),
            );
            required.push(param_name.to_string());
        }

        Self {
            schema_type: "object".to_string(),
            properties: Value::Object(properties),
            required,
        }
    }
}

/// Tool use request as emitted by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUse {
    pub id: String,   // Format: toolu_[random]
    pub name: String, // Tool name
    pub input: Value, // Tool parameters (JSON object)
}
