use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::answers::CompletedAnswers;
use crate::domain::product::ProductId;

/// One retail pack line of a plan entry: `units` packs of `unit_g` grams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackLine {
    pub unit_g: u32,
    pub units: u32,
}

impl PackLine {
    pub fn purchased_g(&self) -> Decimal {
        Decimal::from(self.unit_g) * Decimal::from(self.units)
    }
}

/// One recommended product with its computed dose and purchase breakdown.
/// Built once when the wizard resolves; a new calculation replaces the
/// whole plan, entries are never patched in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub dose_g_m2: Decimal,
    pub total_need_g: Decimal,
    pub packs: Vec<PackLine>,
    /// Zero means a one-time application.
    pub reapply_days: u32,
    pub application_steps: Vec<String>,
    pub notes: Vec<String>,
}

impl PlanItem {
    pub fn purchased_g(&self) -> Decimal {
        self.packs.iter().map(PackLine::purchased_g).sum()
    }

    /// Human-readable quantity, switching to kilograms from 1000 g up.
    pub fn need_display(&self) -> String {
        let thousand = Decimal::from(1000);
        if self.total_need_g >= thousand {
            format!("{} kg", (self.total_need_g / thousand).normalize())
        } else {
            format!("{} g", self.total_need_g.normalize())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub area_m2: Decimal,
    /// Original answer context, kept for redisplay and share links.
    pub answers: CompletedAnswers,
    /// Entries in catalog priority order.
    pub items: Vec<PlanItem>,
    pub alerts: Vec<String>,
}
