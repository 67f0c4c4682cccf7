use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::answers::Objective;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-product shade guidance. These come straight from the catalog
/// entry (agronomist-documented), never from a computed formula.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadeGuidance {
    #[serde(default)]
    pub dose_factor: Option<Decimal>,
    #[serde(default)]
    pub reapply_days: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Base application rate before any conditional adjustment.
    pub base_dose_g_m2: Decimal,
    /// Reapplication interval in days; zero means one-time application.
    pub reapply_days: u32,
    /// Retail unit contents in grams.
    pub pack_sizes_g: Vec<u32>,
    /// Objectives whose plans include this product.
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub shade: Option<ShadeGuidance>,
    #[serde(default)]
    pub recovery_variant: Option<ProductId>,
    pub application_steps: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Product {
    pub fn serves(&self, objective: Objective) -> bool {
        self.objectives.contains(&objective)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductId};
    use crate::domain::answers::Objective;

    #[test]
    fn serves_matches_declared_objectives_only() {
        let product = Product {
            id: ProductId("fertilizante-verde-intenso".to_string()),
            name: "Fertilizante Verde Intenso".to_string(),
            base_dose_g_m2: Decimal::from(25),
            reapply_days: 45,
            pack_sizes_g: vec![750, 3000],
            objectives: vec![Objective::GreenVigor, Objective::FullPlan],
            shade: None,
            recovery_variant: None,
            application_steps: vec!["Espalhe uniformemente".to_string()],
            notes: Vec::new(),
        };

        assert!(product.serves(Objective::GreenVigor));
        assert!(product.serves(Objective::FullPlan));
        assert!(!product.serves(Objective::Establishment));
    }
}
