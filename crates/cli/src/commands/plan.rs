use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use gramado_core::config::{AppConfig, LoadOptions};
use gramado_core::domain::answers::Answer;
use gramado_core::errors::{DomainError, ParseAnswerError};
use gramado_core::pricing::LawnCondition;
use gramado_core::wizard::{Step, Wizard};

use crate::commands::CommandResult;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[arg(long, help = "Lawn area in square meters (must be positive)")]
    pub area: String,
    #[arg(long, help = "The lawn is still being established from seed or sod")]
    pub implanting: bool,
    #[arg(long, help = "implantacao|verde_vigor|plano_completo")]
    pub objective: String,
    #[arg(long, help = "quente|ameno|frio")]
    pub climate: String,
    #[arg(long, help = "sol_pleno|meia_sombra|sombra")]
    pub sunlight: String,
    #[arg(long, help = "todo_dia|3x_semana|1x_semana|quase_nao")]
    pub irrigation: String,
    #[arg(long, help = "baixo|medio|alto")]
    pub traffic: String,
    #[arg(long, help = "bonito|normal|fraco_amarelado|ralo_falhas")]
    pub condition: String,
}

pub fn run(args: &PlanArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure(
                "plan",
                "catalog_load",
                format!("could not load catalog: {error}"),
                3,
            );
        }
    };

    let answers = match parse_answers(args) {
        Ok(answers) => answers,
        Err(error) => {
            return CommandResult::failure("plan", "invalid_answer", error.to_string(), 4);
        }
    };

    let mut wizard = Wizard::new(catalog);
    for answer in answers {
        wizard.set_answer(answer);
    }

    while wizard.current_step() != Step::Result {
        let before = wizard.current_step();
        let after = match wizard.next_step() {
            Ok(step) => step,
            Err(error) => return failure_for_domain_error(&error),
        };

        // A one-shot session supplies every answer up front, so a
        // blocked step means its answer was rejected.
        if after == before {
            let step_name = format!("{before:?}").to_ascii_lowercase();
            return CommandResult::failure(
                "plan",
                "invalid_answer",
                format!("step `{step_name}` rejected its answer"),
                4,
            );
        }
    }

    let Some(plan) = wizard.plan() else {
        return CommandResult::failure(
            "plan",
            "internal",
            "wizard reached the result step without a plan",
            7,
        );
    };

    let lawn_condition = LawnCondition::classify(&plan.answers);
    let message = format!(
        "plan computed: {} product(s) for {} m2",
        plan.items.len(),
        plan.area_m2
    );

    CommandResult::success_with_data(
        "plan",
        message,
        json!({
            "plan": plan,
            "lawn_condition": lawn_condition,
            "recommended_frequency_days": lawn_condition.recommended_tier().days(),
            "progress_percent": wizard.progress(),
        }),
    )
}

fn parse_answers(args: &PlanArgs) -> Result<Vec<Answer>, ParseAnswerError> {
    let area = args
        .area
        .trim()
        .parse::<Decimal>()
        .map_err(|_| ParseAnswerError::new("area_m2", &args.area, "a number of square meters"))?;

    Ok(vec![
        Answer::Area(area),
        Answer::Implanting(args.implanting),
        Answer::Objective(args.objective.parse()?),
        Answer::Climate(args.climate.parse()?),
        Answer::Sunlight(args.sunlight.parse()?),
        Answer::Irrigation(args.irrigation.parse()?),
        Answer::Traffic(args.traffic.parse()?),
        Answer::Condition(args.condition.parse()?),
    ])
}

fn failure_for_domain_error(error: &DomainError) -> CommandResult {
    match error {
        DomainError::IncompleteAnswers { .. } => {
            CommandResult::failure("plan", "invalid_answer", error.to_string(), 4)
        }
        DomainError::NoProductsForObjective { .. } | DomainError::MissingCatalogProduct { .. } => {
            CommandResult::failure("plan", "catalog_gap", error.to_string(), 5)
        }
    }
}
