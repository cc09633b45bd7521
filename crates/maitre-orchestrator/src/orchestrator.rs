//! The visit orchestrator.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use maitre_agent::{
    AdmissionCritic, AgentError, OrderingToolset, ReceptionToolset, RecommendationToolset,
    SeatingToolset, SpecialsProducer, ToolCall, ToolDefinition, ToolResult,
};
use maitre_dining::{LoadSignal, ModificationNegotiator, TableAllocator};
use maitre_models::{Guest, Order, Recommendation, Table};
use maitre_persistence::{DishCatalog, JsonStore};
use maitre_session::{Phase, PhaseMachine, RefinementLoop, RefinementOutcome, SessionContext};

use crate::error::{OrchestratorError, Result};

/// Drives one guest's visit.
///
/// The orchestration runtime calls [`dispatch`] with the phase it believes
/// the conversation is in; the phase machine gates entry before the call
/// reaches a toolset, and a refused guard comes back as a recoverable
/// error the runtime can use to re-route. The recommendation phase's
/// critique/refine cycle runs through [`refine_recommendations`].
///
/// [`dispatch`]: VisitOrchestrator::dispatch
/// [`refine_recommendations`]: VisitOrchestrator::refine_recommendations
pub struct VisitOrchestrator {
    ctx: SessionContext,
    machine: PhaseMachine,
    reception: ReceptionToolset,
    seating: SeatingToolset,
    recommendation: RecommendationToolset,
    ordering: OrderingToolset,
    refinement: RefinementLoop,
    producer: SpecialsProducer,
    critic: AdmissionCritic,
    guests: Arc<JsonStore<Guest>>,
}

impl VisitOrchestrator {
    /// Opens every store under `data_dir` and wires the services.
    ///
    /// Fails if any backing file is missing or corrupt; stores are seeded
    /// by an explicit operator action, never auto-created here.
    pub fn open(data_dir: &Path, load: Arc<dyn LoadSignal>) -> Result<Self> {
        info!(data_dir = %data_dir.display(), "opening visit orchestrator");

        let catalog = Arc::new(DishCatalog::open(data_dir)?);
        let guests: Arc<JsonStore<Guest>> = Arc::new(JsonStore::open(data_dir)?);
        let tables: Arc<JsonStore<Table>> = Arc::new(JsonStore::open(data_dir)?);
        let recommendations: Arc<JsonStore<Recommendation>> =
            Arc::new(JsonStore::open(data_dir)?);
        let orders: Arc<JsonStore<Order>> = Arc::new(JsonStore::open(data_dir)?);

        let negotiator = Arc::new(ModificationNegotiator::new(catalog.clone(), load));

        Ok(Self {
            ctx: SessionContext::new(),
            machine: PhaseMachine::new(recommendations, orders, guests.clone()),
            reception: ReceptionToolset::new(guests.clone()),
            seating: SeatingToolset::new(TableAllocator::new(tables)),
            recommendation: RecommendationToolset::new(catalog.clone(), negotiator.clone()),
            ordering: OrderingToolset::new(catalog.clone()),
            refinement: RefinementLoop::new(),
            producer: SpecialsProducer::new(catalog.clone()),
            critic: AdmissionCritic::new(catalog, negotiator),
            guests,
        })
    }

    /// Enters a phase, running its guard and initialization.
    pub fn enter_phase(&mut self, phase: Phase) -> Result<()> {
        self.machine.enter(phase, &mut self.ctx)?;
        Ok(())
    }

    /// Enters the phase and routes the call to that phase's toolset.
    pub async fn dispatch(&mut self, phase: Phase, call: &ToolCall) -> Result<ToolResult> {
        self.machine.enter(phase, &mut self.ctx)?;
        debug!(phase = %phase, tool = %call.name, "dispatching tool call");

        let result = match phase {
            Phase::Introduction => {
                if has_tool(&ReceptionToolset::definitions(), &call.name) {
                    self.reception.execute(&mut self.ctx, call).await?
                } else if has_tool(&SeatingToolset::definitions(), &call.name) {
                    self.seating.execute(&mut self.ctx, call).await?
                } else {
                    return Err(AgentError::ToolNotFound(call.name.clone()).into());
                }
            }
            Phase::Selection => self.recommendation.execute(&mut self.ctx, call).await?,
            Phase::OrderPlacement => self.ordering.execute(&mut self.ctx, call).await?,
            Phase::Uninitialized | Phase::Completed => {
                return Err(AgentError::ToolNotFound(call.name.clone()).into());
            }
        };

        Ok(result)
    }

    /// Runs the bounded critique/refine cycle for the current guest and
    /// stores the accepted candidate's modification sets in the ledger.
    pub async fn refine_recommendations(&mut self) -> Result<RefinementOutcome> {
        self.machine.enter(Phase::Selection, &mut self.ctx)?;

        let guest = self.current_guest()?;
        let outcome = self
            .refinement
            .run(&guest, &self.producer, &self.critic)
            .await?;

        let ledger = self
            .ctx
            .ledger_mut()
            .ok_or_else(|| OrchestratorError::VisitState("ledger not open".to_string()))?;
        for (dish_id, modifications) in &outcome.candidate.dishes {
            ledger.store_modifications(dish_id.clone(), modifications)?;
        }

        info!(
            rounds = outcome.rounds,
            converged = outcome.converged,
            dishes = outcome.candidate.len(),
            "refinement finished"
        );
        Ok(outcome)
    }

    /// Records the guest's most recent utterance.
    pub fn note_utterance(&mut self, text: impl Into<String>) {
        self.ctx.set_utterance(text);
    }

    /// The visit's session context.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// The phase the visit is currently in.
    pub fn phase(&self) -> Phase {
        self.ctx.phase()
    }

    /// Loads the guest bound to this visit.
    pub fn current_guest(&self) -> Result<Guest> {
        let guest_id = self
            .ctx
            .guest_id()
            .ok_or_else(|| OrchestratorError::VisitState("no guest registered".to_string()))?;

        self.guests
            .get(guest_id.as_str())
            .ok_or_else(|| OrchestratorError::VisitState(format!("guest not found: {}", guest_id)))
    }
}

fn has_tool(definitions: &[ToolDefinition], name: &str) -> bool {
    definitions.iter().any(|d| d.name == name)
}
