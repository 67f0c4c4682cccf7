use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::answers::Objective;
use crate::domain::product::{Product, ProductId, ShadeGuidance};

/// Read-only product table. Loaded once, passed explicitly into the
/// recommendation engine, never mutated at runtime. Vec order is the
/// catalog priority order and plans preserve it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "product", default)]
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate_products(&products)?;
        Ok(Self { products })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.products)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    /// Products serving `objective`, in catalog priority order.
    pub fn serving(&self, objective: Objective) -> Vec<&Product> {
        self.products.iter().filter(|product| product.serves(objective)).collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Index used to restore catalog priority order after selection.
    pub fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.products.iter().position(|product| &product.id == product_id)
    }
}

fn validate_products(products: &[Product]) -> Result<(), CatalogError> {
    if products.is_empty() {
        return Err(CatalogError::Validation("catalog has no products".to_string()));
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    for product in products {
        let id = product.id.0.trim();
        if id.is_empty() {
            return Err(CatalogError::Validation("product with empty id".to_string()));
        }
        if !seen_ids.insert(id) {
            return Err(CatalogError::Validation(format!("duplicate product id `{id}`")));
        }

        if product.base_dose_g_m2 <= Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "product `{id}` has non-positive base dose"
            )));
        }

        if product.pack_sizes_g.is_empty() {
            return Err(CatalogError::Validation(format!("product `{id}` has no pack sizes")));
        }
        if product.pack_sizes_g.iter().any(|&size| size == 0) {
            return Err(CatalogError::Validation(format!("product `{id}` has a zero pack size")));
        }

        if product.objectives.is_empty() {
            return Err(CatalogError::Validation(format!(
                "product `{id}` serves no objective and is unreachable"
            )));
        }

        if let Some(shade) = &product.shade {
            if shade.dose_factor.is_some_and(|factor| factor <= Decimal::ZERO) {
                return Err(CatalogError::Validation(format!(
                    "product `{id}` has a non-positive shade dose factor"
                )));
            }
        }
    }

    Ok(())
}

/// Built-in catalog mirroring the retail line-up. Swappable by pointing
/// `catalog.path` at a TOML file with the same shape.
pub fn default_catalog() -> Catalog {
    Catalog { products: default_products() }
}

fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId("semeador-premium".to_string()),
            name: "Semeador Premium".to_string(),
            base_dose_g_m2: Decimal::from(35),
            reapply_days: 0,
            pack_sizes_g: vec![2000, 500],
            objectives: vec![Objective::Establishment],
            shade: Some(ShadeGuidance {
                dose_factor: None,
                // Germination is slower under heavy shade; the label
                // asks for a second pass after three weeks.
                reapply_days: Some(21),
            }),
            recovery_variant: None,
            application_steps: vec![
                "Prepare o solo removendo pedras e entulhos".to_string(),
                "Distribua as sementes uniformemente em duas passadas cruzadas".to_string(),
                "Cubra com uma camada fina de terra peneirada".to_string(),
                "Irrigue diariamente até a germinação completa".to_string(),
            ],
            notes: vec![
                "Evite pisoteio nas primeiras 4 semanas".to_string(),
                "Germinação esperada entre 7 e 14 dias".to_string(),
            ],
        },
        Product {
            id: ProductId("fertilizante-verde-intenso".to_string()),
            name: "Fertilizante Verde Intenso".to_string(),
            base_dose_g_m2: Decimal::from(25),
            reapply_days: 45,
            pack_sizes_g: vec![3000, 750],
            objectives: vec![Objective::GreenVigor, Objective::FullPlan],
            shade: Some(ShadeGuidance {
                dose_factor: Some(Decimal::new(80, 2)),
                reapply_days: Some(60),
            }),
            recovery_variant: Some(ProductId("recupera-total".to_string())),
            application_steps: vec![
                "Aplique com o gramado seco e o solo úmido".to_string(),
                "Espalhe uniformemente com espalhador ou à mão".to_string(),
                "Irrigue logo após a aplicação para fixar o produto".to_string(),
            ],
            notes: vec![
                "Não aplique em horários de sol forte".to_string(),
                "Mantenha animais fora do gramado por 24 horas".to_string(),
            ],
        },
        Product {
            id: ProductId("recupera-total".to_string()),
            name: "Recupera Total".to_string(),
            base_dose_g_m2: Decimal::from(30),
            reapply_days: 30,
            pack_sizes_g: vec![1000],
            objectives: vec![Objective::FullPlan],
            shade: None,
            recovery_variant: None,
            application_steps: vec![
                "Corte o gramado baixo antes da primeira aplicação".to_string(),
                "Aplique em todo o gramado, reforçando as falhas".to_string(),
                "Irrigue abundantemente após aplicar".to_string(),
            ],
            notes: vec![
                "Resultados visíveis a partir da segunda semana".to_string(),
            ],
        },
        Product {
            id: ProductId("defensor-raizes".to_string()),
            name: "Defensor de Raízes".to_string(),
            base_dose_g_m2: Decimal::from(20),
            reapply_days: 60,
            pack_sizes_g: vec![1600, 800],
            objectives: vec![Objective::FullPlan],
            shade: None,
            recovery_variant: None,
            application_steps: vec![
                "Aplique após o corte, com o solo levemente úmido".to_string(),
                "Distribua uniformemente em toda a área".to_string(),
            ],
            notes: vec![
                "Indicado para áreas com pisoteio frequente".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{default_catalog, Catalog, CatalogError};
    use crate::domain::answers::Objective;
    use crate::domain::product::ProductId;

    #[test]
    fn default_catalog_passes_its_own_validation() {
        let catalog = default_catalog();
        let revalidated =
            Catalog::new(catalog.products().to_vec()).expect("default catalog must be valid");
        assert_eq!(revalidated, catalog);
    }

    #[test]
    fn serving_preserves_catalog_priority_order() {
        let catalog = default_catalog();
        let full_plan: Vec<&str> = catalog
            .serving(Objective::FullPlan)
            .iter()
            .map(|product| product.id.0.as_str())
            .collect();

        assert_eq!(full_plan, vec!["fertilizante-verde-intenso", "recupera-total", "defensor-raizes"]);
    }

    #[test]
    fn find_resolves_known_ids_only() {
        let catalog = default_catalog();
        assert!(catalog.find(&ProductId("recupera-total".to_string())).is_some());
        assert!(catalog.find(&ProductId("nao-existe".to_string())).is_none());
    }

    #[test]
    fn toml_catalog_round_trips_products() {
        let raw = r#"
[[product]]
id = "adubo-teste"
name = "Adubo Teste"
base_dose_g_m2 = 12.5
reapply_days = 30
pack_sizes_g = [500]
objectives = ["verde_vigor"]
application_steps = ["Espalhe uniformemente"]
notes = ["Uso geral"]

[product.shade]
dose_factor = 0.75
"#;

        let catalog = Catalog::from_toml_str(raw).expect("valid catalog toml");
        let product =
            catalog.find(&ProductId("adubo-teste".to_string())).expect("product present");

        assert_eq!(product.base_dose_g_m2, Decimal::new(125, 1));
        assert_eq!(product.objectives, vec![Objective::GreenVigor]);
        let shade = product.shade.as_ref().expect("shade guidance parsed");
        assert_eq!(shade.dose_factor, Some(Decimal::new(75, 2)));
        assert_eq!(shade.reapply_days, None);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let error = Catalog::from_toml_str("").expect_err("empty catalog must fail");
        assert!(matches!(error, CatalogError::Validation(ref message) if message.contains("no products")));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let raw = r#"
[[product]]
id = "dup"
name = "A"
base_dose_g_m2 = 10
reapply_days = 0
pack_sizes_g = [500]
objectives = ["verde_vigor"]
application_steps = ["Espalhe"]

[[product]]
id = "dup"
name = "B"
base_dose_g_m2 = 10
reapply_days = 0
pack_sizes_g = [500]
objectives = ["verde_vigor"]
application_steps = ["Espalhe"]
"#;

        let error = Catalog::from_toml_str(raw).expect_err("duplicate ids must fail");
        assert!(matches!(error, CatalogError::Validation(ref message) if message.contains("dup")));
    }
}
