use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::answers::{CompletedAnswers, Condition, Objective};
use crate::errors::ParseAnswerError;

/// Closed set of subscription delivery intervals. Discounts are
/// catalog-defined per tier, not a continuous formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyTier {
    #[serde(rename = "30")]
    Every30Days,
    #[serde(rename = "45")]
    Every45Days,
    #[serde(rename = "60")]
    Every60Days,
    #[serde(rename = "90")]
    Every90Days,
}

impl FrequencyTier {
    pub const ALL: [FrequencyTier; 4] =
        [Self::Every30Days, Self::Every45Days, Self::Every60Days, Self::Every90Days];

    pub fn days(self) -> u32 {
        match self {
            Self::Every30Days => 30,
            Self::Every45Days => 45,
            Self::Every60Days => 60,
            Self::Every90Days => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.days() == days)
    }

    /// Fixed discount table: shorter intervals commit to more product
    /// and earn the larger percentage.
    pub fn discount_percent(self) -> Decimal {
        match self {
            Self::Every30Days => Decimal::from(20),
            Self::Every45Days => Decimal::from(17),
            Self::Every60Days => Decimal::from(15),
            Self::Every90Days => Decimal::from(10),
        }
    }

    pub fn deliveries_per_year(self) -> u32 {
        365 / self.days()
    }
}

impl std::str::FromStr for FrequencyTier {
    type Err = ParseAnswerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_days)
            .ok_or_else(|| ParseAnswerError::new("frequency", value, "30|45|60|90"))
    }
}

/// `base_price` with the tier discount applied, rounded to cents.
/// Applied exactly once per quote; quotes are recomputed from the base
/// price on every input change, never re-discounted.
pub fn subscription_price(base_price: Decimal, tier: FrequencyTier) -> Decimal {
    let factor = Decimal::ONE - tier.discount_percent() / Decimal::ONE_HUNDRED;
    (base_price * factor).round_dp(2)
}

pub fn savings_per_delivery(base_price: Decimal, tier: FrequencyTier, quantity: u32) -> Decimal {
    (base_price - subscription_price(base_price, tier)) * Decimal::from(quantity)
}

pub fn annual_savings(base_price: Decimal, tier: FrequencyTier, quantity: u32) -> Decimal {
    savings_per_delivery(base_price, tier, quantity) * Decimal::from(tier.deliveries_per_year())
}

/// Relatable phrase for a savings amount, by threshold band.
pub fn savings_analogy(amount: Decimal) -> &'static str {
    if amount < Decimal::from(50) {
        "alguns cafés especiais"
    } else if amount < Decimal::from(150) {
        "uma noite de pizza em família"
    } else if amount < Decimal::from(400) {
        "meses de serviço de streaming"
    } else {
        "uma escapada de fim de semana"
    }
}

/// Coarse lawn classification driving the smart frequency-tier
/// pre-selection in the subscription flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawnCondition {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl LawnCondition {
    pub fn classify(answers: &CompletedAnswers) -> Self {
        // A lawn being established needs the tightest cadence no
        // matter how its current state was described.
        if answers.objective == Objective::Establishment || answers.implanting {
            return Self::Poor;
        }

        match answers.condition {
            Condition::SparsePatchy => Self::Poor,
            Condition::WeakYellowing => Self::Fair,
            Condition::Average => Self::Good,
            Condition::Lush => Self::Excellent,
        }
    }

    pub fn recommended_tier(self) -> FrequencyTier {
        match self {
            Self::Poor => FrequencyTier::Every30Days,
            Self::Fair => FrequencyTier::Every45Days,
            Self::Good => FrequencyTier::Every60Days,
            Self::Excellent => FrequencyTier::Every90Days,
        }
    }
}
