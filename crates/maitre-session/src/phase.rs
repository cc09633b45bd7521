//! Visit phases and the gating state machine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use maitre_dining::{OrderAggregator, RecommendationLedger};
use maitre_models::{Guest, Order, Recommendation};
use maitre_persistence::JsonStore;

use crate::context::SessionContext;
use crate::error::{Result, SessionError};

/// One stage of the guest-session workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing has happened yet.
    #[default]
    Uninitialized,
    /// Registration and seating.
    Introduction,
    /// Recommendation refinement.
    Selection,
    /// Order assembly and placement.
    OrderPlacement,
    /// Terminal: the order has been placed.
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Introduction => "introduction",
            Phase::Selection => "selection",
            Phase::OrderPlacement => "order_placement",
            Phase::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}

/// Gates phase entry on prerequisite state and initializes phase state.
///
/// `enter` runs before a phase's handler. A violated guard is a
/// recoverable [`SessionError::PrerequisiteNotMet`]; the orchestration
/// layer re-routes to the correct phase instead of crashing. Entry is
/// idempotent: re-entering a phase whose state already exists (a ledger or
/// order already opened for this guest) is a no-op, so retries from the
/// calling runtime never discard accumulated state.
pub struct PhaseMachine {
    recommendations: Arc<JsonStore<Recommendation>>,
    orders: Arc<JsonStore<Order>>,
    guests: Arc<JsonStore<Guest>>,
}

impl PhaseMachine {
    /// Creates a machine over the stores needed for lazy phase state.
    pub fn new(
        recommendations: Arc<JsonStore<Recommendation>>,
        orders: Arc<JsonStore<Order>>,
        guests: Arc<JsonStore<Guest>>,
    ) -> Self {
        Self {
            recommendations,
            orders,
            guests,
        }
    }

    /// Enters a phase, checking its guard and initializing its state.
    pub fn enter(&self, phase: Phase, ctx: &mut SessionContext) -> Result<()> {
        debug!(from = %ctx.phase(), to = %phase, "entering phase");

        match phase {
            Phase::Uninitialized => {}
            Phase::Introduction => {
                ctx.clear_error();
            }
            Phase::Selection => {
                let guest_id = ctx
                    .guest_id()
                    .ok_or_else(|| SessionError::PrerequisiteNotMet {
                        phase,
                        missing: "guest not registered".to_string(),
                    })?
                    .clone();

                if ctx.ledger().is_none() {
                    let ledger =
                        RecommendationLedger::open(self.recommendations.clone(), guest_id);
                    ctx.install_ledger(ledger);
                }
            }
            Phase::OrderPlacement => {
                let guest_id = ctx
                    .guest_id()
                    .ok_or_else(|| SessionError::PrerequisiteNotMet {
                        phase,
                        missing: "guest not registered".to_string(),
                    })?
                    .clone();

                if !ctx.introduction_complete() {
                    return Err(SessionError::PrerequisiteNotMet {
                        phase,
                        missing: "introduction not complete".to_string(),
                    });
                }

                if ctx.order().is_none() {
                    let order =
                        OrderAggregator::open(self.orders.clone(), self.guests.clone(), guest_id);
                    ctx.install_order(order);
                }
            }
            Phase::Completed => {
                let placed = ctx.order().map(OrderAggregator::is_placed).unwrap_or(false);
                if !placed {
                    return Err(SessionError::PrerequisiteNotMet {
                        phase,
                        missing: "order not placed".to_string(),
                    });
                }
            }
        }

        ctx.set_phase(phase);
        Ok(())
    }
}
