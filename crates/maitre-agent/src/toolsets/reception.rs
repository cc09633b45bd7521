//! Guest registration tools for the introduction phase.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use maitre_models::Guest;
use maitre_persistence::JsonStore;
use maitre_session::SessionContext;

use crate::error::{AgentError, Result};
use crate::tool::{ToolCall, ToolDefinition, ToolResult};

/// Tools for registering a guest and capturing preferences and allergies.
pub struct ReceptionToolset {
    guests: Arc<JsonStore<Guest>>,
}

impl ReceptionToolset {
    /// Creates the toolset over the guest store.
    pub fn new(guests: Arc<JsonStore<Guest>>) -> Self {
        Self { guests }
    }

    /// The operations this toolset exposes.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "new_guest",
                "Register a new guest and bind them to this visit",
                json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Full name of the guest"
                        }
                    },
                    "required": ["name"]
                }),
            ),
            ToolDefinition::new(
                "set_preferences",
                "Add to the guest's preference list (cuisines, seating qualities)",
                json!({
                    "type": "object",
                    "properties": {
                        "preferences": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Preferences to add"
                        }
                    },
                    "required": ["preferences"]
                }),
            ),
            ToolDefinition::new(
                "set_allergies",
                "Add to the guest's allergy list",
                json!({
                    "type": "object",
                    "properties": {
                        "allergies": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Ingredients the guest must not be served"
                        }
                    },
                    "required": ["allergies"]
                }),
            ),
        ]
    }

    /// Executes one of this toolset's operations.
    pub async fn execute(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        match call.name.as_str() {
            "new_guest" => self.execute_new_guest(ctx, call),
            "set_preferences" => self.execute_set_preferences(ctx, call),
            "set_allergies" => self.execute_set_allergies(ctx, call),
            other => Err(AgentError::ToolNotFound(other.to_string())),
        }
    }

    fn execute_new_guest(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        let name = call
            .get_string_arg("name")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;

        let guest = Guest::new(name);
        self.guests.save(&guest)?;
        ctx.bind_guest(guest.id.clone());

        info!(guest_id = %guest.id, name = %guest.name, "guest registered");
        Ok(ToolResult::success(
            &call.id,
            format!("guest registered: {}", guest.id),
        ))
    }

    fn execute_set_preferences(
        &self,
        ctx: &mut SessionContext,
        call: &ToolCall,
    ) -> Result<ToolResult> {
        let preferences =
            call.get_string_list_arg("preferences")
                .map_err(|e| AgentError::InvalidArguments {
                    tool_name: call.name.clone(),
                    message: e,
                })?;

        let mut guest = self.current_guest(ctx, call)?;
        guest.add_preferences(preferences);
        self.guests.save(&guest)?;

        Ok(ToolResult::success(
            &call.id,
            format!("preferences updated for {}", guest.name),
        ))
    }

    fn execute_set_allergies(
        &self,
        ctx: &mut SessionContext,
        call: &ToolCall,
    ) -> Result<ToolResult> {
        let allergies =
            call.get_string_list_arg("allergies")
                .map_err(|e| AgentError::InvalidArguments {
                    tool_name: call.name.clone(),
                    message: e,
                })?;

        let mut guest = self.current_guest(ctx, call)?;
        guest.add_allergies(allergies);
        self.guests.save(&guest)?;

        Ok(ToolResult::success(
            &call.id,
            format!("allergies updated for {}", guest.name),
        ))
    }

    fn current_guest(&self, ctx: &SessionContext, call: &ToolCall) -> Result<Guest> {
        let guest_id = ctx
            .guest_id()
            .ok_or_else(|| AgentError::ToolExecution {
                tool_name: call.name.clone(),
                message: "no guest registered".to_string(),
            })?;

        self.guests
            .get(guest_id.as_str())
            .ok_or_else(|| AgentError::ToolExecution {
                tool_name: call.name.clone(),
                message: format!("guest not found: {}", guest_id),
            })
    }
}
