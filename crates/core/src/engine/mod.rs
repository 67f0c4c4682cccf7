pub mod packs;

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::domain::answers::{CompletedAnswers, Condition, Irrigation, Objective, Sunlight};
use crate::domain::plan::{Plan, PlanItem};
use crate::domain::product::Product;
use crate::errors::DomainError;

pub use packs::pack_breakdown;

/// Alert attached whenever the low-irrigation safety factor fires.
pub const LOW_IRRIGATION_ALERT: &str =
    "Irrigação quase inexistente: doses reduzidas em 30% para evitar queima do gramado.";

pub trait RecommendationEngine {
    fn recommend(
        &self,
        answers: &CompletedAnswers,
        catalog: &Catalog,
    ) -> Result<Plan, DomainError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DeterministicRecommendationEngine;

impl RecommendationEngine for DeterministicRecommendationEngine {
    fn recommend(
        &self,
        answers: &CompletedAnswers,
        catalog: &Catalog,
    ) -> Result<Plan, DomainError> {
        recommend_plan(answers, catalog)
    }
}

/// Pure transform from a completed answer set to a plan. Identical
/// input always yields an identical plan; share links rely on this.
pub fn recommend_plan(
    answers: &CompletedAnswers,
    catalog: &Catalog,
) -> Result<Plan, DomainError> {
    let selected = select_products(answers, catalog)?;

    let mut alerts = Vec::new();
    if answers.irrigation == Irrigation::AlmostNever {
        alerts.push(LOW_IRRIGATION_ALERT.to_string());
    }

    let items = selected.into_iter().map(|product| build_item(product, answers)).collect();

    Ok(Plan { area_m2: answers.area_m2, answers: answers.clone(), items, alerts })
}

fn poor_condition(condition: Condition) -> bool {
    matches!(condition, Condition::WeakYellowing | Condition::SparsePatchy)
}

fn select_products<'a>(
    answers: &CompletedAnswers,
    catalog: &'a Catalog,
) -> Result<Vec<&'a Product>, DomainError> {
    let mut candidates = catalog.serving(answers.objective);
    if candidates.is_empty() {
        return Err(DomainError::NoProductsForObjective { objective: answers.objective });
    }

    if poor_condition(answers.condition) {
        let mut biased: Vec<&Product> = Vec::with_capacity(candidates.len() + 1);
        for product in candidates {
            match &product.recovery_variant {
                Some(variant_id) => {
                    let variant = catalog.find(variant_id).ok_or_else(|| {
                        DomainError::MissingCatalogProduct { product_id: variant_id.0.clone() }
                    })?;
                    // A maintenance-only plan swaps in the recovery
                    // variant; a multi-product regimen keeps both.
                    if answers.objective == Objective::GreenVigor {
                        biased.push(variant);
                    } else {
                        biased.push(product);
                        biased.push(variant);
                    }
                }
                None => biased.push(product),
            }
        }
        candidates = biased;
    }

    // An implanting lawn gets the establishment products on top of
    // whatever the chosen objective selected.
    if answers.implanting && answers.objective != Objective::Establishment {
        candidates.extend(catalog.serving(Objective::Establishment));
    }

    let mut seen = HashSet::new();
    candidates.retain(|product| seen.insert(product.id.clone()));
    candidates.sort_by_key(|product| catalog.position(&product.id).unwrap_or(usize::MAX));

    Ok(candidates)
}

fn build_item(product: &Product, answers: &CompletedAnswers) -> PlanItem {
    let mut dose = product.base_dose_g_m2;
    let mut reapply_days = product.reapply_days;

    if answers.sunlight == Sunlight::HeavyShade {
        if let Some(shade) = &product.shade {
            if let Some(factor) = shade.dose_factor {
                dose *= factor;
            }
            if let Some(days) = shade.reapply_days {
                reapply_days = days;
            }
        }
    }

    if answers.irrigation == Irrigation::AlmostNever {
        // Safety reduction: inconsistent watering concentrates the
        // product and burns the lawn at full dose.
        dose *= Decimal::new(70, 2);
    }

    let total_need_g = dose * answers.area_m2;
    let packs = pack_breakdown(total_need_g, &product.pack_sizes_g);

    PlanItem {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        dose_g_m2: dose,
        total_need_g,
        packs,
        reapply_days,
        application_steps: product.application_steps.clone(),
        notes: product.notes.clone(),
    }
}
