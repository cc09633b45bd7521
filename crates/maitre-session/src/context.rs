//! Typed session state for one guest's visit.

use maitre_dining::{OrderAggregator, RecommendationLedger};
use maitre_models::{GuestId, TableId};

use crate::phase::Phase;

/// Mutable state scoped to one guest's visit.
///
/// Every field a phase handler may need is declared here: the current
/// phase, the bound guest, the allotted table, the lazily opened
/// recommendation ledger and order aggregator, the last recoverable error,
/// and the guest's most recent utterance (opaque to this core). Phase
/// handlers read and write this struct; nothing else carries per-visit
/// state.
#[derive(Default)]
pub struct SessionContext {
    phase: Phase,
    guest_id: Option<GuestId>,
    introduction_complete: bool,
    table_id: Option<TableId>,
    ledger: Option<RecommendationLedger>,
    order: Option<OrderAggregator>,
    last_error: Option<String>,
    last_utterance: Option<String>,
}

impl SessionContext {
    /// Creates a fresh context for a new visit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The phase the visit is currently in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// The guest being served, once registered.
    pub fn guest_id(&self) -> Option<&GuestId> {
        self.guest_id.as_ref()
    }

    /// Binds the registered guest to the visit.
    pub fn bind_guest(&mut self, guest_id: GuestId) {
        self.guest_id = Some(guest_id);
    }

    /// True once registration and seating are done.
    pub fn introduction_complete(&self) -> bool {
        self.introduction_complete
    }

    /// Marks the introduction phase complete (guest registered and seated).
    pub fn mark_introduction_complete(&mut self) {
        self.introduction_complete = true;
    }

    /// The allotted table, if seated.
    pub fn table_id(&self) -> Option<&TableId> {
        self.table_id.as_ref()
    }

    /// Records the allotted table.
    pub fn set_table(&mut self, table_id: TableId) {
        self.table_id = Some(table_id);
    }

    /// Clears the table after a release.
    pub fn clear_table(&mut self) {
        self.table_id = None;
    }

    /// The guest's recommendation ledger, once the selection phase opened it.
    pub fn ledger(&self) -> Option<&RecommendationLedger> {
        self.ledger.as_ref()
    }

    /// Mutable access to the ledger.
    pub fn ledger_mut(&mut self) -> Option<&mut RecommendationLedger> {
        self.ledger.as_mut()
    }

    pub(crate) fn install_ledger(&mut self, ledger: RecommendationLedger) {
        self.ledger = Some(ledger);
    }

    /// The guest's order aggregator, once the ordering phase opened it.
    pub fn order(&self) -> Option<&OrderAggregator> {
        self.order.as_ref()
    }

    /// Mutable access to the order aggregator.
    pub fn order_mut(&mut self) -> Option<&mut OrderAggregator> {
        self.order.as_mut()
    }

    pub(crate) fn install_order(&mut self, order: OrderAggregator) {
        self.order = Some(order);
    }

    /// Borrows the ledger and the order aggregator together, for operations
    /// that copy accepted modifications into the order.
    pub fn ledger_and_order_mut(
        &mut self,
    ) -> (Option<&RecommendationLedger>, Option<&mut OrderAggregator>) {
        (self.ledger.as_ref(), self.order.as_mut())
    }

    /// The last recoverable error surfaced to the caller, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Records a recoverable error for the caller to inspect.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    /// Clears the recorded error.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// The guest's most recent utterance. Opaque to this core.
    pub fn last_utterance(&self) -> Option<&str> {
        self.last_utterance.as_deref()
    }

    /// Stores the guest's most recent utterance.
    pub fn set_utterance(&mut self, text: impl Into<String>) {
        self.last_utterance = Some(text.into());
    }
}
