//! Tool contract types: definitions, calls, and results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use maitre_models::Modifications;

/// Definition of an operation a toolset exposes to the runtime.
///
/// `parameters` is a JSON schema describing the named arguments; it is what
/// the runtime hands to the model for function calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Operation name, e.g. "allot_table".
    pub name: String,

    /// Human-readable description of what the operation does.
    pub description: String,

    /// JSON schema of the named arguments.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Creates a tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A request from the runtime to execute a named operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call, echoed back in the result.
    pub id: String,

    /// Name of the operation to execute.
    pub name: String,

    /// Named arguments as a JSON object.
    pub arguments: Value,
}

impl ToolCall {
    /// Creates a call with a fresh id.
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: format!("call-{}", Uuid::new_v4()),
            name: name.into(),
            arguments,
        }
    }

    /// Returns a raw argument value.
    pub fn get_arg(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }

    /// Returns a required string argument.
    pub fn get_string_arg(&self, key: &str) -> std::result::Result<&str, String> {
        self.get_arg(key)
            .and_then(Value::as_str)
            .ok_or_else(|| format!("missing required argument: {}", key))
    }

    /// Returns an optional string argument.
    pub fn get_optional_string_arg(&self, key: &str) -> Option<&str> {
        self.get_arg(key).and_then(Value::as_str)
    }

    /// Returns a required array-of-strings argument.
    pub fn get_string_list_arg(&self, key: &str) -> std::result::Result<Vec<String>, String> {
        let items = self
            .get_arg(key)
            .and_then(Value::as_array)
            .ok_or_else(|| format!("missing required argument: {}", key))?;

        items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| format!("argument {} must be an array of strings", key))
            })
            .collect()
    }

    /// Returns an optional array-of-strings argument (absent means empty).
    pub fn get_optional_string_list_arg(
        &self,
        key: &str,
    ) -> std::result::Result<Vec<String>, String> {
        if self.get_arg(key).is_none() {
            return Ok(Vec::new());
        }
        self.get_string_list_arg(key)
    }

    /// Returns a required modification-set argument: a JSON object mapping
    /// ingredient to instruction.
    pub fn get_modifications_arg(
        &self,
        key: &str,
    ) -> std::result::Result<Modifications, String> {
        let map = self
            .get_arg(key)
            .and_then(Value::as_object)
            .ok_or_else(|| format!("missing required argument: {}", key))?;

        map.iter()
            .map(|(ingredient, instruction)| {
                instruction
                    .as_str()
                    .map(|i| (ingredient.clone(), i.to_string()))
                    .ok_or_else(|| {
                        format!("argument {} must map ingredients to string instructions", key)
                    })
            })
            .collect()
    }
}

/// Result of a tool execution.
///
/// `success` carries the accept/reject outcome for negotiation-style
/// operations; `output` is the message or serialized payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Id of the call this result answers.
    pub call_id: String,

    /// Whether the operation was accepted.
    pub success: bool,

    /// Message or serialized payload.
    pub output: String,
}

impl ToolResult {
    /// An accepted result.
    pub fn success(call_id: &str, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.to_string(),
            success: true,
            output: output.into(),
        }
    }

    /// A rejected result with the given reason.
    pub fn rejected(call_id: &str, reason: impl Into<String>) -> Self {
        Self {
            call_id: call_id.to_string(),
            success: false,
            output: reason.into(),
        }
    }
}
