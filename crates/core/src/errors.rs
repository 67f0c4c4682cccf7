use thiserror::Error;

use crate::domain::answers::Objective;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("answer set is incomplete: missing {missing:?}")]
    IncompleteAnswers { missing: Vec<&'static str> },
    #[error("catalog has no product serving objective {objective:?}")]
    NoProductsForObjective { objective: Objective },
    #[error("catalog is missing product `{product_id}` referenced by selection rules")]
    MissingCatalogProduct { product_id: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown {field} value `{value}` (expected one of {expected})")]
pub struct ParseAnswerError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseAnswerError {
    pub fn new(field: &'static str, value: &str, expected: &'static str) -> Self {
        Self { field, value: value.to_string(), expected }
    }
}
