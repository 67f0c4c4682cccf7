pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod pricing;
pub mod wizard;

pub use catalog::{default_catalog, Catalog, CatalogError};
pub use domain::answers::{
    Answer, AnswerSet, Climate, CompletedAnswers, Condition, Irrigation, Objective, Sunlight,
    Traffic,
};
pub use domain::plan::{PackLine, Plan, PlanItem};
pub use domain::product::{Product, ProductId, ShadeGuidance};
pub use engine::{recommend_plan, DeterministicRecommendationEngine, RecommendationEngine};
pub use errors::{DomainError, ParseAnswerError};
pub use pricing::{FrequencyTier, LawnCondition};
pub use wizard::{Step, Wizard};
