//! Deterministic refinement steps.
//!
//! In a deployment the produce step is model-driven; these implementations
//! stand in for it with the same contract, so the loop's behavior is
//! testable end to end. The critique step's semantics are fixed either
//! way: a candidate passes when no proposed dish conflicts with the
//! guest's allergies and every modification set clears admission control.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use maitre_dining::{ModificationNegotiator, REASON_DISH_NOT_AVAILABLE};
use maitre_models::{modifications::REMOVE_INSTRUCTION, Guest};
use maitre_persistence::DishCatalog;
use maitre_session::{
    Candidate, Critique, CritiqueStep, Problem, ProduceStep, RoundOutcome,
    Result as SessionResult,
};

/// Proposes today's specials, then repairs the candidate round by round
/// from the critique: allergen conflicts become removal modifications,
/// denied dishes are withdrawn.
pub struct SpecialsProducer {
    catalog: Arc<DishCatalog>,
}

impl SpecialsProducer {
    /// Creates the producer over the dish catalog.
    pub fn new(catalog: Arc<DishCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ProduceStep for SpecialsProducer {
    async fn produce(
        &self,
        _guest: &Guest,
        current: &Candidate,
        critique: Option<&Critique>,
    ) -> SessionResult<Candidate> {
        let mut candidate = if current.is_empty() {
            let mut fresh = Candidate::new();
            for dish in self.catalog.specials() {
                fresh.propose(dish.id, Default::default());
            }
            fresh
        } else {
            current.clone()
        };

        if let Some(critique) = critique {
            for problem in &critique.problems {
                match problem {
                    Problem::Allergen {
                        dish_id,
                        ingredient,
                    } => {
                        let mut mods = candidate
                            .dishes
                            .get(dish_id)
                            .cloned()
                            .unwrap_or_default();
                        mods.set(ingredient.clone(), REMOVE_INSTRUCTION);
                        candidate.propose(dish_id.clone(), mods);
                    }
                    Problem::ModificationDenied { dish_id, .. } => {
                        candidate.withdraw(dish_id);
                    }
                }
            }
        }

        debug!(dishes = candidate.len(), "produced candidate");
        Ok(candidate)
    }
}

/// Evaluates a candidate against the guest's allergy list and the
/// negotiator's admission result for every contained modification set.
pub struct AdmissionCritic {
    catalog: Arc<DishCatalog>,
    negotiator: Arc<ModificationNegotiator>,
}

impl AdmissionCritic {
    /// Creates the critic over the catalog and negotiator.
    pub fn new(catalog: Arc<DishCatalog>, negotiator: Arc<ModificationNegotiator>) -> Self {
        Self { catalog, negotiator }
    }
}

#[async_trait]
impl CritiqueStep for AdmissionCritic {
    async fn critique(&self, guest: &Guest, candidate: &Candidate) -> SessionResult<RoundOutcome> {
        let mut problems = Vec::new();

        for (dish_id, modifications) in &candidate.dishes {
            let dish = match self.catalog.by_id(dish_id) {
                Some(dish) => dish,
                None => {
                    problems.push(Problem::ModificationDenied {
                        dish_id: dish_id.clone(),
                        reason: REASON_DISH_NOT_AVAILABLE.to_string(),
                    });
                    continue;
                }
            };

            for ingredient in &dish.ingredients {
                if guest.is_allergic_to(ingredient) && !modifications.removes(ingredient) {
                    problems.push(Problem::Allergen {
                        dish_id: dish_id.clone(),
                        ingredient: ingredient.clone(),
                    });
                }
            }

            let admission = self.negotiator.request_modification(dish_id, modifications);
            if !admission.allowed {
                problems.push(Problem::ModificationDenied {
                    dish_id: dish_id.clone(),
                    reason: admission.reason,
                });
            }
        }

        if problems.is_empty() {
            debug!("candidate accepted");
            Ok(RoundOutcome::Done)
        } else {
            debug!(problems = problems.len(), "candidate critiqued");
            Ok(RoundOutcome::Continue(Critique::new(problems)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use maitre_dining::FixedLoad;
    use maitre_models::Dish;
    use maitre_persistence::JsonStore;
    use maitre_session::RefinementLoop;
    use tempfile::tempdir;

    fn menu() -> Vec<Dish> {
        vec![
            Dish::new("Margherita Pizza", 299.0)
                .with_ingredients(["flour", "tomato", "mozzarella", "basil"]),
            Dish::new("Penne Alfredo", 349.0)
                .with_ingredients(["penne pasta", "cream", "parmesan", "garlic", "butter"]),
        ]
    }

    fn steps(load: u8) -> (SpecialsProducer, AdmissionCritic, Arc<DishCatalog>) {
        let dir = tempdir().unwrap();
        let catalog = Arc::new(DishCatalog::from_store(
            JsonStore::create(dir.path(), menu()).unwrap(),
        ));
        let negotiator = Arc::new(ModificationNegotiator::new(
            catalog.clone(),
            Arc::new(FixedLoad(load)),
        ));
        (
            SpecialsProducer::new(catalog.clone()),
            AdmissionCritic::new(catalog.clone(), negotiator),
            catalog,
        )
    }

    #[tokio::test]
    async fn test_no_allergies_converges_first_round() {
        let (producer, critic, _) = steps(10);
        let guest = Guest::new("Ada");

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.candidate.len(), 2);
    }

    #[tokio::test]
    async fn test_allergy_resolved_by_removal() {
        let (producer, critic, catalog) = steps(10);
        let mut guest = Guest::new("Ada");
        guest.add_allergies(["basil"]);

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(outcome.converged);
        // Round 1 proposes plain specials, round 2 repairs the conflict.
        assert_eq!(outcome.rounds, 2);

        let margherita = catalog.by_name("Margherita Pizza").unwrap();
        let mods = outcome.candidate.dishes.get(&margherita.id).unwrap();
        assert!(mods.removes("basil"));
    }

    #[tokio::test]
    async fn test_capacity_denial_withdraws_dish() {
        // Load 100: any single-modification dish scores 100 (allowed), but
        // the allergic guest needs one removal on the margherita, which is
        // allowed, while a two-modification repair would be withdrawn.
        let (producer, critic, catalog) = steps(100);
        let mut guest = Guest::new("Ada");
        guest.add_allergies(["basil", "cream"]);

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(outcome.converged);
        // Both dishes carry exactly one removal each (score 100, allowed).
        let margherita = catalog.by_name("Margherita Pizza").unwrap();
        let alfredo = catalog.by_name("Penne Alfredo").unwrap();
        assert!(outcome
            .candidate
            .dishes
            .get(&margherita.id)
            .unwrap()
            .removes("basil"));
        assert!(outcome
            .candidate
            .dishes
            .get(&alfredo.id)
            .unwrap()
            .removes("cream"));
    }

    #[tokio::test]
    async fn test_unresolvable_allergy_withdraws_dish_via_denial() {
        // Load 60: one removal scores 60 (fine), two score 120 (denied).
        let (producer, critic, catalog) = steps(60);
        let mut guest = Guest::new("Ada");
        guest.add_allergies(["basil", "flour"]);

        let outcome = RefinementLoop::new()
            .run(&guest, &producer, &critic)
            .await
            .unwrap();

        assert!(outcome.converged);
        // The margherita needed two removals, was denied, and got
        // withdrawn; the alfredo survives untouched.
        let margherita = catalog.by_name("Margherita Pizza").unwrap();
        let alfredo = catalog.by_name("Penne Alfredo").unwrap();
        assert!(!outcome.candidate.dishes.contains_key(&margherita.id));
        assert!(outcome.candidate.dishes.contains_key(&alfredo.id));
    }
}
