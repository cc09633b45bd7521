//! Dish recommendation tools for the selection phase.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use maitre_dining::{Admission, ModificationNegotiator, REASON_DISH_NOT_AVAILABLE};
use maitre_persistence::DishCatalog;
use maitre_session::SessionContext;

use crate::error::{AgentError, Result};
use crate::tool::{ToolCall, ToolDefinition, ToolResult};

/// Tools for browsing the menu and negotiating dish modifications.
pub struct RecommendationToolset {
    catalog: Arc<DishCatalog>,
    negotiator: Arc<ModificationNegotiator>,
}

impl RecommendationToolset {
    /// Creates the toolset over the catalog and negotiator.
    pub fn new(catalog: Arc<DishCatalog>, negotiator: Arc<ModificationNegotiator>) -> Self {
        Self { catalog, negotiator }
    }

    /// The operations this toolset exposes.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "specials",
                "Today's special dishes",
                json!({ "type": "object", "properties": {} }),
            ),
            ToolDefinition::new(
                "get_dish",
                "Look up a dish by name",
                json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Exact dish name, e.g. Margherita Pizza"
                        }
                    },
                    "required": ["name"]
                }),
            ),
            ToolDefinition::new(
                "request_modification",
                "Ask the kitchen whether a dish can be modified as requested",
                json!({
                    "type": "object",
                    "properties": {
                        "dish_name": {
                            "type": "string",
                            "description": "Name of the dish to modify"
                        },
                        "modifications": {
                            "type": "object",
                            "additionalProperties": { "type": "string" },
                            "description": "Ingredient to instruction, e.g. {\"basil\": \"remove\"}"
                        }
                    },
                    "required": ["dish_name", "modifications"]
                }),
            ),
            ToolDefinition::new(
                "save_recommendation",
                "Record an accepted modification set for a dish in the guest's ledger",
                json!({
                    "type": "object",
                    "properties": {
                        "dish_name": {
                            "type": "string",
                            "description": "Name of the dish"
                        },
                        "modifications": {
                            "type": "object",
                            "additionalProperties": { "type": "string" },
                            "description": "Ingredient to instruction, as accepted"
                        }
                    },
                    "required": ["dish_name", "modifications"]
                }),
            ),
        ]
    }

    /// Executes one of this toolset's operations.
    pub async fn execute(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        match call.name.as_str() {
            "specials" => self.execute_specials(call),
            "get_dish" => self.execute_get_dish(call),
            "request_modification" => self.execute_request_modification(call),
            "save_recommendation" => self.execute_save_recommendation(ctx, call),
            other => Err(AgentError::ToolNotFound(other.to_string())),
        }
    }

    fn execute_specials(&self, call: &ToolCall) -> Result<ToolResult> {
        let output = serde_json::to_string_pretty(&self.catalog.specials())?;
        Ok(ToolResult::success(&call.id, output))
    }

    fn execute_get_dish(&self, call: &ToolCall) -> Result<ToolResult> {
        let name = call
            .get_string_arg("name")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;

        match self.catalog.by_name(name) {
            Some(dish) => Ok(ToolResult::success(
                &call.id,
                serde_json::to_string_pretty(&dish)?,
            )),
            None => Ok(ToolResult::rejected(&call.id, REASON_DISH_NOT_AVAILABLE)),
        }
    }

    fn execute_request_modification(&self, call: &ToolCall) -> Result<ToolResult> {
        let dish_name = call
            .get_string_arg("dish_name")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;
        let modifications = call
            .get_modifications_arg("modifications")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;

        let admission = match self.catalog.by_name(dish_name) {
            Some(dish) => self.negotiator.request_modification(&dish.id, &modifications),
            None => Admission::denied(REASON_DISH_NOT_AVAILABLE),
        };

        debug!(
            dish_name,
            allowed = admission.allowed,
            reason = %admission.reason,
            "modification request"
        );

        Ok(if admission.allowed {
            ToolResult::success(&call.id, admission.reason)
        } else {
            ToolResult::rejected(&call.id, admission.reason)
        })
    }

    fn execute_save_recommendation(
        &self,
        ctx: &mut SessionContext,
        call: &ToolCall,
    ) -> Result<ToolResult> {
        let dish_name = call
            .get_string_arg("dish_name")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;
        let modifications = call
            .get_modifications_arg("modifications")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;

        let dish = match self.catalog.by_name(dish_name) {
            Some(dish) => dish,
            None => return Ok(ToolResult::rejected(&call.id, REASON_DISH_NOT_AVAILABLE)),
        };

        let ledger = ctx.ledger_mut().ok_or_else(|| AgentError::ToolExecution {
            tool_name: call.name.clone(),
            message: "recommendation ledger not open".to_string(),
        })?;

        ledger.store_modifications(dish.id.clone(), &modifications)?;

        Ok(ToolResult::success(
            &call.id,
            format!("recommendation stored for {}", dish.name),
        ))
    }
}
