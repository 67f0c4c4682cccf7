use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use gramado_core::pricing::{
    annual_savings, savings_analogy, savings_per_delivery, subscription_price, FrequencyTier,
};

use crate::commands::CommandResult;

#[derive(Args, Debug)]
pub struct PricingArgs {
    #[arg(long = "base-price", help = "One-off price of a single delivery")]
    pub base_price: String,
    #[arg(long, help = "Delivery interval in days: 30|45|60|90")]
    pub frequency: String,
    #[arg(long, default_value_t = 1, help = "Units per delivery")]
    pub quantity: u32,
}

pub fn run(args: &PricingArgs) -> CommandResult {
    let base_price = match args.base_price.trim().parse::<Decimal>() {
        Ok(price) if price > Decimal::ZERO => price,
        _ => {
            return CommandResult::failure(
                "pricing",
                "invalid_input",
                format!("base price `{}` must be a positive number", args.base_price),
                2,
            );
        }
    };

    let tier = match args.frequency.parse::<FrequencyTier>() {
        Ok(tier) => tier,
        Err(error) => {
            return CommandResult::failure("pricing", "invalid_input", error.to_string(), 2);
        }
    };

    let discounted = subscription_price(base_price, tier);
    let per_delivery = savings_per_delivery(base_price, tier, args.quantity);
    let annual = annual_savings(base_price, tier, args.quantity);

    CommandResult::success_with_data(
        "pricing",
        format!("subscription every {} days: {} per delivery", tier.days(), discounted),
        json!({
            "base_price": base_price,
            "frequency_days": tier.days(),
            "quantity": args.quantity,
            "discount_percent": tier.discount_percent(),
            "subscription_price": discounted,
            "savings_per_delivery": per_delivery,
            "deliveries_per_year": tier.deliveries_per_year(),
            "annual_savings": annual,
            "savings_analogy": savings_analogy(annual),
        }),
    )
}
