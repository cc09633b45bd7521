//! Table selection tools for the introduction phase.

use serde_json::json;
use tracing::debug;

use maitre_dining::{DiningError, TableAllocator};
use maitre_models::TableId;
use maitre_session::SessionContext;

use crate::error::{AgentError, Result};
use crate::tool::{ToolCall, ToolDefinition, ToolResult};

/// Tools for listing and allotting tables.
pub struct SeatingToolset {
    allocator: TableAllocator,
}

impl SeatingToolset {
    /// Creates the toolset over a table allocator.
    pub fn new(allocator: TableAllocator) -> Self {
        Self { allocator }
    }

    /// The operations this toolset exposes.
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition::new(
                "list_tables",
                "List available tables, best preference matches first",
                json!({
                    "type": "object",
                    "properties": {
                        "preferences": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Environment tags to match, e.g. window, quiet"
                        }
                    }
                }),
            ),
            ToolDefinition::new(
                "allot_table",
                "Allot a table to the guest currently being served",
                json!({
                    "type": "object",
                    "properties": {
                        "table_id": {
                            "type": "string",
                            "description": "Id of the table to allot"
                        }
                    },
                    "required": ["table_id"]
                }),
            ),
            ToolDefinition::new(
                "release_table",
                "Release a table so it can be allotted again",
                json!({
                    "type": "object",
                    "properties": {
                        "table_id": {
                            "type": "string",
                            "description": "Id of the table to release"
                        }
                    },
                    "required": ["table_id"]
                }),
            ),
        ]
    }

    /// Executes one of this toolset's operations.
    pub async fn execute(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        match call.name.as_str() {
            "list_tables" => self.execute_list_tables(call),
            "allot_table" => self.execute_allot_table(ctx, call),
            "release_table" => self.execute_release_table(ctx, call),
            other => Err(AgentError::ToolNotFound(other.to_string())),
        }
    }

    fn execute_list_tables(&self, call: &ToolCall) -> Result<ToolResult> {
        let preferences = call
            .get_optional_string_list_arg("preferences")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?;

        let tables = self.allocator.available(&preferences);
        let output = serde_json::to_string_pretty(&tables)?;

        Ok(ToolResult::success(&call.id, output))
    }

    fn execute_allot_table(&self, ctx: &mut SessionContext, call: &ToolCall) -> Result<ToolResult> {
        let table_id: TableId = call
            .get_string_arg("table_id")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?
            .into();

        let guest_id = ctx
            .guest_id()
            .ok_or_else(|| AgentError::ToolExecution {
                tool_name: call.name.clone(),
                message: "no guest registered".to_string(),
            })?
            .clone();

        match self.allocator.allot(&table_id, guest_id) {
            Ok(table) => {
                ctx.set_table(table.id.clone());
                ctx.mark_introduction_complete();
                Ok(ToolResult::success(
                    &call.id,
                    format!("table {} allotted", table.id),
                ))
            }
            // Occupancy conflicts travel in-band as a reject outcome.
            Err(err @ DiningError::TableOccupied(_)) => {
                debug!(table_id = %table_id, "allotment rejected");
                ctx.record_error(err.to_string());
                Ok(ToolResult::rejected(&call.id, err.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn execute_release_table(
        &self,
        ctx: &mut SessionContext,
        call: &ToolCall,
    ) -> Result<ToolResult> {
        let table_id: TableId = call
            .get_string_arg("table_id")
            .map_err(|e| AgentError::InvalidArguments {
                tool_name: call.name.clone(),
                message: e,
            })?
            .into();

        let table = self.allocator.release(&table_id)?;
        if ctx.table_id() == Some(&table.id) {
            ctx.clear_table();
        }

        Ok(ToolResult::success(
            &call.id,
            format!("table {} released", table.id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use maitre_models::{GuestId, Table};
    use maitre_persistence::JsonStore;
    use tempfile::tempdir;

    fn seating(tables: Vec<Table>) -> (SeatingToolset, Arc<JsonStore<Table>>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonStore::create(dir.path(), tables).unwrap());
        (
            SeatingToolset::new(TableAllocator::new(store.clone())),
            store,
            dir,
        )
    }

    fn table(id: &str, tags: &[&str]) -> Table {
        let mut t = Table::new(2).with_environment(tags.iter().copied());
        t.id = TableId::from(id);
        t
    }

    fn seated_ctx() -> SessionContext {
        let mut ctx = SessionContext::new();
        ctx.bind_guest(GuestId::from("guest-1"));
        ctx
    }

    #[tokio::test]
    async fn test_list_tables_returns_json() {
        let (tools, _, _dir) = seating(vec![table("T1", &["window"])]);
        let mut ctx = seated_ctx();

        let call = ToolCall::new("list_tables", json!({}));
        let result = tools.execute(&mut ctx, &call).await.unwrap();

        assert!(result.success);
        assert!(result.output.contains("T1"));
    }

    #[tokio::test]
    async fn test_allot_table_completes_introduction() {
        let (tools, store, _dir) = seating(vec![table("T1", &[])]);
        let mut ctx = seated_ctx();

        let call = ToolCall::new("allot_table", json!({"table_id": "T1"}));
        let result = tools.execute(&mut ctx, &call).await.unwrap();

        assert!(result.success);
        assert!(ctx.introduction_complete());
        assert_eq!(ctx.table_id().map(|t| t.as_str()), Some("T1"));
        assert!(store.get("T1").unwrap().occupied);
    }

    #[tokio::test]
    async fn test_allot_occupied_table_is_rejected_in_band() {
        let (tools, _, _dir) = seating(vec![table("T1", &[])]);
        let mut first = seated_ctx();
        let call = ToolCall::new("allot_table", json!({"table_id": "T1"}));
        tools.execute(&mut first, &call).await.unwrap();

        let mut second = SessionContext::new();
        second.bind_guest(GuestId::from("guest-2"));
        let call = ToolCall::new("allot_table", json!({"table_id": "T1"}));
        let result = tools.execute(&mut second, &call).await.unwrap();

        assert!(!result.success);
        assert!(result.output.contains("already occupied"));
        assert!(second.last_error().is_some());
        assert!(!second.introduction_complete());
    }

    #[tokio::test]
    async fn test_allot_unknown_table_is_typed_error() {
        let (tools, _, _dir) = seating(Vec::new());
        let mut ctx = seated_ctx();

        let call = ToolCall::new("allot_table", json!({"table_id": "T9"}));
        let result = tools.execute(&mut ctx, &call).await;

        assert!(matches!(
            result,
            Err(AgentError::Dining(DiningError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_release_table_clears_context() {
        let (tools, store, _dir) = seating(vec![table("T1", &[])]);
        let mut ctx = seated_ctx();
        let call = ToolCall::new("allot_table", json!({"table_id": "T1"}));
        tools.execute(&mut ctx, &call).await.unwrap();

        let call = ToolCall::new("release_table", json!({"table_id": "T1"}));
        let result = tools.execute(&mut ctx, &call).await.unwrap();

        assert!(result.success);
        assert!(ctx.table_id().is_none());
        assert!(!store.get("T1").unwrap().occupied);
    }
}
