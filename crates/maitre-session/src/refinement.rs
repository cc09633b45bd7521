//! Bounded produce/critique refinement loop.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use maitre_models::{DishId, Guest, Modifications};

use crate::error::Result;

/// Default number of produce/critique rounds before the candidate is
/// accepted as-is.
pub const DEFAULT_MAX_ROUNDS: usize = 5;

/// A proposed set of dish recommendations with modifications, produced in
/// one round of the loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    /// Proposed dishes and their modification sets.
    pub dishes: BTreeMap<DishId, Modifications>,
}

impl Candidate {
    /// Creates an empty candidate (round one starts from nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Proposes a dish with the given modifications, replacing any prior
    /// proposal for the same dish.
    pub fn propose(&mut self, dish_id: DishId, modifications: Modifications) {
        self.dishes.insert(dish_id, modifications);
    }

    /// Withdraws a dish from the candidate.
    pub fn withdraw(&mut self, dish_id: &DishId) {
        self.dishes.remove(dish_id);
    }

    /// Returns true if nothing is proposed.
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Number of proposed dishes.
    pub fn len(&self) -> usize {
        self.dishes.len()
    }
}

/// One unresolved problem found by the critique step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// A proposed dish contains an ingredient the guest is allergic to and
    /// the candidate does not remove it.
    Allergen {
        /// The offending dish.
        dish_id: DishId,
        /// The conflicting ingredient.
        ingredient: String,
    },

    /// The kitchen declined the dish's modification set.
    ModificationDenied {
        /// The affected dish.
        dish_id: DishId,
        /// The admission-control reason.
        reason: String,
    },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Allergen {
                dish_id,
                ingredient,
            } => write!(f, "{} contains allergen {}", dish_id, ingredient),
            Problem::ModificationDenied { dish_id, reason } => {
                write!(f, "modification of {} denied: {}", dish_id, reason)
            }
        }
    }
}

/// Structured feedback on a candidate: the problems a further round should
/// resolve. An empty critique never travels; completion is the
/// [`RoundOutcome::Done`] variant instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Critique {
    /// Unresolved problems, in discovery order.
    pub problems: Vec<Problem>,
}

impl Critique {
    /// Creates a critique from the given problems.
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// One-line summary for logs and transcripts.
    pub fn summary(&self) -> String {
        self.problems
            .iter()
            .map(Problem::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Tagged result of one critique step.
///
/// The step reports what it found; the loop controller alone decides
/// whether another round runs. There is no escalation flag mutated from
/// inside a leaf operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Problems remain; continue with this critique.
    Continue(Critique),
    /// The candidate is acceptable; stop the loop.
    Done,
}

/// The produce half of a round: emits a new candidate from the current one
/// and the most recent critique (none on round one).
#[async_trait]
pub trait ProduceStep: Send + Sync {
    /// Produces the next candidate.
    async fn produce(
        &self,
        guest: &Guest,
        current: &Candidate,
        critique: Option<&Critique>,
    ) -> Result<Candidate>;
}

/// The critique half of a round: evaluates a candidate and either reports
/// problems or signals completion.
#[async_trait]
pub trait CritiqueStep: Send + Sync {
    /// Evaluates the candidate.
    async fn critique(&self, guest: &Guest, candidate: &Candidate) -> Result<RoundOutcome>;
}

/// What the loop settled on.
#[derive(Debug, Clone)]
pub struct RefinementOutcome {
    /// The final candidate. When the budget ran out this is the last
    /// produced candidate, accepted as-is.
    pub candidate: Candidate,
    /// Rounds actually run.
    pub rounds: usize,
    /// True if the critique step signalled completion; false if the
    /// iteration budget ended the loop.
    pub converged: bool,
}

/// Drives the fixed produce-then-critique cycle for at most `max_rounds`.
///
/// Termination: the first [`RoundOutcome::Done`] or the round budget,
/// whichever comes first. Running out of budget is not an error; this is
/// an at-most-N-round negotiation with a convergence escape hatch, never an
/// unbounded loop.
pub struct RefinementLoop {
    max_rounds: usize,
}

impl Default for RefinementLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RefinementLoop {
    /// Creates a loop with the default round budget.
    pub fn new() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Creates a loop with a custom round budget.
    pub fn with_max_rounds(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    /// The configured round budget.
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Runs the cycle for a guest.
    pub async fn run(
        &self,
        guest: &Guest,
        producer: &dyn ProduceStep,
        critic: &dyn CritiqueStep,
    ) -> Result<RefinementOutcome> {
        let mut candidate = Candidate::new();
        let mut last_critique: Option<Critique> = None;

        for round in 1..=self.max_rounds {
            candidate = producer
                .produce(guest, &candidate, last_critique.as_ref())
                .await?;

            match critic.critique(guest, &candidate).await? {
                RoundOutcome::Done => {
                    debug!(round, dishes = candidate.len(), "refinement converged");
                    return Ok(RefinementOutcome {
                        candidate,
                        rounds: round,
                        converged: true,
                    });
                }
                RoundOutcome::Continue(critique) => {
                    debug!(round, problems = critique.problems.len(), "refinement continues");
                    last_critique = Some(critique);
                }
            }
        }

        debug!(
            rounds = self.max_rounds,
            "round budget exhausted, accepting last candidate"
        );
        Ok(RefinementOutcome {
            candidate,
            rounds: self.max_rounds,
            converged: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Producer that stamps the round number into the candidate.
    struct CountingProducer {
        calls: AtomicUsize,
    }

    impl CountingProducer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProduceStep for CountingProducer {
        async fn produce(
            &self,
            _guest: &Guest,
            _current: &Candidate,
            _critique: Option<&Critique>,
        ) -> Result<Candidate> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let mut candidate = Candidate::new();
            candidate.propose(DishId::from(format!("D{:03}", n)), Modifications::new());
            Ok(candidate)
        }
    }

    /// Critic that signals completion after a fixed number of rounds.
    struct DoneAfter {
        rounds_before_done: usize,
        seen: AtomicUsize,
    }

    impl DoneAfter {
        fn new(rounds_before_done: usize) -> Self {
            Self {
                rounds_before_done,
                seen: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CritiqueStep for DoneAfter {
        async fn critique(&self, _guest: &Guest, candidate: &Candidate) -> Result<RoundOutcome> {
            let seen = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
            if seen > self.rounds_before_done {
                Ok(RoundOutcome::Done)
            } else {
                let dish_id = candidate.dishes.keys().next().unwrap().clone();
                Ok(RoundOutcome::Continue(Critique::new(vec![
                    Problem::Allergen {
                        dish_id,
                        ingredient: "basil".to_string(),
                    },
                ])))
            }
        }
    }

    /// Critic that never signals completion.
    struct NeverDone;

    #[async_trait]
    impl CritiqueStep for NeverDone {
        async fn critique(&self, _guest: &Guest, candidate: &Candidate) -> Result<RoundOutcome> {
            let dish_id = candidate.dishes.keys().next().unwrap().clone();
            Ok(RoundOutcome::Continue(Critique::new(vec![
                Problem::ModificationDenied {
                    dish_id,
                    reason: "capacity exceeded".to_string(),
                },
            ])))
        }
    }

    #[tokio::test]
    async fn test_early_exit_on_first_done() {
        let producer = CountingProducer::new();
        let critic = DoneAfter::new(0);
        let guest = Guest::new("Ada");

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_converges_mid_budget() {
        let producer = CountingProducer::new();
        let critic = DoneAfter::new(2);
        let guest = Guest::new("Ada");

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.rounds, 3);
    }

    #[tokio::test]
    async fn test_budget_bounds_loop_without_done() {
        let producer = CountingProducer::new();
        let critic = NeverDone;
        let guest = Guest::new("Ada");

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.rounds, DEFAULT_MAX_ROUNDS);
        assert_eq!(producer.calls.load(Ordering::SeqCst), DEFAULT_MAX_ROUNDS);
        // The last-produced candidate is accepted as final.
        assert!(outcome.candidate.dishes.contains_key(&DishId::from("D005")));
    }

    #[tokio::test]
    async fn test_custom_round_budget() {
        let producer = CountingProducer::new();
        let critic = NeverDone;
        let guest = Guest::new("Ada");

        let outcome = RefinementLoop::with_max_rounds(2)
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert_eq!(outcome.rounds, 2);
        assert_eq!(producer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_critique_summary() {
        let critique = Critique::new(vec![
            Problem::Allergen {
                dish_id: DishId::from("D001"),
                ingredient: "basil".to_string(),
            },
            Problem::ModificationDenied {
                dish_id: DishId::from("D002"),
                reason: "capacity exceeded".to_string(),
            },
        ]);

        assert_eq!(
            critique.summary(),
            "D001 contains allergen basil; modification of D002 denied: capacity exceeded"
        );
    }

    #[test]
    fn test_candidate_propose_and_withdraw() {
        let mut candidate = Candidate::new();
        let dish = DishId::from("D001");

        candidate.propose(dish.clone(), Modifications::new());
        assert_eq!(candidate.len(), 1);

        candidate.withdraw(&dish);
        assert!(candidate.is_empty());
    }
}
