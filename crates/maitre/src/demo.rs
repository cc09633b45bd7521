//! Scripted guest visit.
//!
//! Walks one guest through registration, seating, recommendation
//! refinement, and ordering, issuing the same tool calls the
//! agent runtime would, so the printed transcript shows the orchestration
//! core behaving end to end.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use maitre_agent::ToolCall;
use maitre_dining::FixedLoad;
use maitre_models::Table;
use maitre_orchestrator::VisitOrchestrator;
use maitre_persistence::DishCatalog;
use maitre_session::Phase;

use crate::Result;

/// Runs the scripted visit.
pub async fn run(
    data_dir: &Path,
    guest: &str,
    allergies: &[String],
    preferences: &[String],
    load: u8,
) -> Result<()> {
    let catalog = DishCatalog::open(data_dir)?;
    let mut orch = VisitOrchestrator::open(data_dir, Arc::new(FixedLoad(load)))?;

    println!("== visit: {} (kitchen load {}) ==", guest, load);
    orch.note_utterance(format!(
        "a table please{}",
        if allergies.is_empty() {
            String::new()
        } else {
            format!(", and note: no {}", allergies.join(", no "))
        }
    ));

    // Introduction: registration.
    let call = ToolCall::new("new_guest", json!({ "name": guest }));
    let result = orch.dispatch(Phase::Introduction, &call).await?;
    println!("-> {}", result.output);

    if !allergies.is_empty() {
        let call = ToolCall::new("set_allergies", json!({ "allergies": allergies }));
        let result = orch.dispatch(Phase::Introduction, &call).await?;
        println!("-> {}", result.output);
    }
    if !preferences.is_empty() {
        let call = ToolCall::new("set_preferences", json!({ "preferences": preferences }));
        let result = orch.dispatch(Phase::Introduction, &call).await?;
        println!("-> {}", result.output);
    }

    // Seating: take the best available table, falling back down the
    // ranking if another visit grabbed one in the meantime.
    let call = ToolCall::new("list_tables", json!({ "preferences": preferences }));
    let listing = orch.dispatch(Phase::Introduction, &call).await?;
    let tables: Vec<Table> = serde_json::from_str(&listing.output)
        .map_err(maitre_agent::AgentError::Serialization)?;
    if tables.is_empty() {
        println!("no tables available, visit over");
        return Ok(());
    }

    for table in &tables {
        let call = ToolCall::new("allot_table", json!({ "table_id": table.id.as_str() }));
        let result = orch.dispatch(Phase::Introduction, &call).await?;
        if result.success {
            println!("-> {}", result.output);
            break;
        }
        debug!(table_id = %table.id, reason = %result.output, "trying next table");
    }

    // Selection: bounded critique/refine negotiation.
    let outcome = orch.refine_recommendations().await?;
    println!(
        "-> recommendations settled in {} round(s) ({})",
        outcome.rounds,
        if outcome.converged {
            "converged"
        } else {
            "round budget reached"
        }
    );
    for (dish_id, modifications) in &outcome.candidate.dishes {
        let name = catalog
            .by_id(dish_id)
            .map(|d| d.name)
            .unwrap_or_else(|| dish_id.to_string());
        if modifications.is_empty() {
            println!("   {} (as is)", name);
        } else {
            let mods: Vec<String> = modifications
                .iter()
                .map(|(ingredient, instruction)| format!("{}: {}", ingredient, instruction))
                .collect();
            println!("   {} ({})", name, mods.join(", "));
        }
    }

    // Ordering: pull the settled dishes into the order and place it.
    let dish_names: Vec<String> = outcome
        .candidate
        .dishes
        .keys()
        .filter_map(|id| catalog.by_id(id).map(|d| d.name))
        .collect();
    if dish_names.is_empty() {
        println!("nothing could be recommended, visit over");
        return Ok(());
    }

    let call = ToolCall::new("update_dishes", json!({ "dish_names": dish_names }));
    let result = orch.dispatch(Phase::OrderPlacement, &call).await?;
    println!("-> {}", result.output);

    let call = ToolCall::new("place_order", json!({}));
    let result = orch.dispatch(Phase::OrderPlacement, &call).await?;
    println!("-> {}", result.output);

    orch.enter_phase(Phase::Completed)?;

    let guest = orch.current_guest()?;
    println!(
        "== visit complete: {} dish(es) in {}'s history ==",
        guest.history.len(),
        guest.name
    );
    Ok(())
}
