pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "gramado",
    about = "Gramado lawn-care calculator CLI",
    long_about = "Compute lawn-care product plans, quote subscription pricing, and inspect the catalog and effective configuration.",
    after_help = "Examples:\n  gramado plan --area 60 --objective verde_vigor --climate ameno --sunlight sol_pleno --irrigation 3x_semana --traffic medio --condition bonito\n  gramado pricing --base-price 100 --frequency 60\n  gramado catalog\n  gramado config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Answer the calculator wizard in one shot and print the recommended plan")]
    Plan(commands::plan::PlanArgs),
    #[command(about = "Quote a subscription price and savings for a delivery frequency tier")]
    Pricing(commands::pricing::PricingArgs),
    #[command(about = "List the products in the effective catalog")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Command::Plan(_) => "plan",
        Command::Pricing(_) => "pricing",
        Command::Catalog => "catalog",
        Command::Config => "config",
    };
    tracing::debug!(event_name = "cli.command.start", command = command_name, "dispatching command");

    let result = match cli.command {
        Command::Plan(args) => commands::plan::run(&args),
        Command::Pricing(args) => commands::pricing::run(&args),
        Command::Catalog => commands::catalog::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    tracing::debug!(
        event_name = "cli.command.finish",
        command = command_name,
        exit_code = result.exit_code,
        "command completed"
    );

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
