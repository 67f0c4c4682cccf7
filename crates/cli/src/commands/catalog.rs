use serde_json::json;

use gramado_core::config::{AppConfig, LoadOptions};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "catalog",
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
                "catalog",
                "catalog_load",
                format!("could not load catalog: {error}"),
                3,
            );
        }
    };

    let products = catalog.products();
    CommandResult::success_with_data(
        "catalog",
        format!("{} product(s) available", products.len()),
        json!({ "products": products }),
    )
}
