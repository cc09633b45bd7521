//! Order assembly tools for the order-placement phase.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use maitre_dining::{DiningError, OrderAggregator};
use maitre_models::{DishId, Modifications};
use maitre_persistence::DishCatalog;
use maitre_session::SessionContext;

use crate::error::{AgentError, Result};
use crate::tool::{ToolCall, ToolDefinition, ToolResult};

/// Tools for assembling and placing the guest's order.
pub struct OrderingToolset {
    catalog: Arc<DishCatalog>,
}

impl OrderingToolset {
    /// Creates the toolset over the dish catalog.
    pub fn new(catalog: Arc<DishCatalog>) -> Self {
        Self { catalog }
    }

    /// The operations this toolset exposes.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "get_order",
                "The current order with dish modifications",
                json!({ "type": "object", "properties": {} }),
            ),
            ToolDefinition::new(
                "add_dish",
                "Add a dish to the order, carrying its accepted modifications",
                json!({
                    "type": "object",
                    "properties": {
                        "dish_name": {
                            "type": "string",
                            "description": "Name of the dish to add"
                        }
                    },
                    "required": ["dish_name"]
                }),
            ),
            ToolDefinition::new(
                "update_dishes",
                "Set the ordered dishes, pulling each dish's modifications from the ledger",
                json!({
                    "type": "object",
                    "properties": {
                        "dish_names": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Names of the dishes to order"
                        }
                    },
                    "required": ["dish_names"]
                }),
            ),
            ToolDefinition::new(
                "place_order",
                "Place the order; it becomes immutable",
                json!({ "type": "object", "properties": {} }),
            ),
        ]
    }

    /// Executes one of this toolset's operations.
    pub async fn execute(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        match call.name.as_str() {
            "get_order" => self.execute_get_order(ctx, call),
            "add_dish" => self.execute_add_dish(ctx, call),
            "update_dishes" => self.execute_update_dishes(ctx, call),
            "place_order" => self.execute_place_order(ctx, call),
            other => Err(AgentError::ToolNotFound(other.to_string())),
        }
    }

    fn execute_get_order(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        let order = self.require_order(ctx, call)?;
        let output = serde_json::to_string_pretty(order.order())?;
        Ok(ToolResult::success(&call.id, output))
    }

    fn execute_add_dish(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        let dish_name = call
            .get_string_arg("dish_name")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;

        let dish = match self.catalog.by_name(dish_name) {
            Some(dish) => dish,
            None => return Ok(ToolResult::rejected(&call.id, "dish not available")),
        };

        let modifications = ctx
            .ledger()
            .map(|l| l.modifications_for(&dish.id))
            .unwrap_or_default();

        let order = self.require_order(ctx, call)?;
        match order.add_or_update(dish.id.clone(), modifications) {
            Ok(()) => Ok(ToolResult::success(
                &call.id,
                format!("{} added to order", dish.name),
            )),
            Err(err @ DiningError::OrderAlreadyPlaced(_)) => {
                Ok(ToolResult::rejected(&call.id, err.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn execute_update_dishes(
        &self,
        ctx: &mut SessionContext,
        call: &ToolCall,
    ) -> Result<ToolResult> {
        let dish_names =
            call.get_string_list_arg("dish_names")
                .map_err(|e| AgentError::InvalidArguments {
                    tool_name: call.name.clone(),
                    message: e,
                })?;

        let mut dish_ids: Vec<DishId> = Vec::with_capacity(dish_names.len());
        for name in &dish_names {
            match self.catalog.by_name(name) {
                Some(dish) => dish_ids.push(dish.id),
                None => {
                    return Ok(ToolResult::rejected(
                        &call.id,
                        format!("dish not available: {}", name),
                    ))
                }
            }
        }

        let (ledger, order) = ctx.ledger_and_order_mut();
        let order = order.ok_or_else(|| AgentError::ToolExecution {
            tool_name: call.name.clone(),
            message: "order not open".to_string(),
        })?;

        let outcome = match ledger {
            Some(ledger) => order.update_from_ledger(&dish_ids, ledger),
            None => dish_ids
                .iter()
                .try_for_each(|id| order.add_or_update(id.clone(), Modifications::new())),
        };

        match outcome {
            Ok(()) => Ok(ToolResult::success(
                &call.id,
                format!("order updated with {} dish(es)", dish_ids.len()),
            )),
            Err(err @ DiningError::OrderAlreadyPlaced(_)) => {
                Ok(ToolResult::rejected(&call.id, err.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn execute_place_order(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        let order = self.require_order(ctx, call)?;

        match order.place() {
            Ok(()) => Ok(ToolResult::success(&call.id, "order placed")),
            // Empty orders and double placement are reject outcomes, not
            // retryable errors.
            Err(err @ (DiningError::EmptyOrder(_) | DiningError::OrderAlreadyPlaced(_))) => {
                debug!(reason = %err, "placement rejected");
                ctx.record_error(err.to_string());
                Ok(ToolResult::rejected(&call.id, err.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn require_order<'a>(
        &self,
        ctx: &'a mut SessionContext,
        call: &ToolCall,
    ) -> Result<&'a mut OrderAggregator> {
        ctx.order_mut().ok_or_else(|| AgentError::ToolExecution {
            tool_name: call.name.clone(),
            message: "order not open".to_string(),
        })
    }
}
