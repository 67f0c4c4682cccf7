use std::env;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use gramado_cli::commands::{catalog, config, plan, pricing};
use rust_decimal::Decimal;
use serde_json::Value;

fn plan_args() -> plan::PlanArgs {
    plan::PlanArgs {
        area: "60".to_string(),
        implanting: false,
        objective: "verde_vigor".to_string(),
        climate: "ameno".to_string(),
        sunlight: "sol_pleno".to_string(),
        irrigation: "3x_semana".to_string(),
        traffic: "medio".to_string(),
        condition: "bonito".to_string(),
    }
}

#[test]
fn plan_computes_the_green_vigor_reference_session() {
    with_env(&[], || {
        let result = plan::run(&plan_args());
        assert_eq!(result.exit_code, 0, "expected successful plan run: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "plan");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["progress_percent"], 100);
        assert_eq!(payload["data"]["recommended_frequency_days"], 90);

        let items = payload["data"]["plan"]["items"].as_array().expect("plan items array");
        assert_eq!(items.len(), 1, "reference session recommends a single product");
        assert_eq!(items[0]["product_id"], "fertilizante-verde-intenso");
        assert_eq!(decimal_field(&items[0]["total_need_g"]), Decimal::from(1500));

        let packs = items[0]["packs"].as_array().expect("pack lines array");
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0]["unit_g"], 750);
        assert_eq!(packs[0]["units"], 2);
    });
}

#[test]
fn plan_rejects_a_non_positive_area() {
    with_env(&[], || {
        let mut args = plan_args();
        args.area = "0".to_string();

        let result = plan::run(&args);
        assert_eq!(result.exit_code, 4, "expected invalid answer exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "plan");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_answer");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("area"), "message should name the area step: {message}");
    });
}

#[test]
fn plan_rejects_an_unknown_choice_value() {
    with_env(&[], || {
        let mut args = plan_args();
        args.objective = "dourado".to_string();

        let result = plan::run(&args);
        assert_eq!(result.exit_code, 4, "expected invalid answer exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_answer");
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("objective"), "message should name the field: {message}");
    });
}

#[test]
fn plan_reports_an_unreadable_catalog_path() {
    with_env(&[("GRAMADO_CATALOG_PATH", "/definitely/not/here/catalog.toml")], || {
        let result = plan::run(&plan_args());
        assert_eq!(result.exit_code, 3, "expected catalog load exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "catalog_load");
    });
}

#[test]
fn pricing_quotes_the_sixty_day_worked_example() {
    with_env(&[], || {
        let args = pricing::PricingArgs {
            base_price: "100".to_string(),
            frequency: "60".to_string(),
            quantity: 1,
        };

        let result = pricing::run(&args);
        assert_eq!(result.exit_code, 0, "expected successful pricing run: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "pricing");
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["data"]["frequency_days"], 60);
        assert_eq!(payload["data"]["deliveries_per_year"], 6);
        assert_eq!(decimal_field(&payload["data"]["subscription_price"]), Decimal::from(85));
        assert_eq!(decimal_field(&payload["data"]["annual_savings"]), Decimal::from(90));
        assert_eq!(payload["data"]["savings_analogy"], "uma noite de pizza em família");
    });
}

#[test]
fn pricing_rejects_an_unsupported_frequency() {
    with_env(&[], || {
        let args = pricing::PricingArgs {
            base_price: "100".to_string(),
            frequency: "40".to_string(),
            quantity: 1,
        };

        let result = pricing::run(&args);
        assert_eq!(result.exit_code, 2, "expected invalid input exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn pricing_rejects_a_non_positive_base_price() {
    with_env(&[], || {
        let args = pricing::PricingArgs {
            base_price: "-10".to_string(),
            frequency: "30".to_string(),
            quantity: 1,
        };

        let result = pricing::run(&args);
        assert_eq!(result.exit_code, 2, "expected invalid input exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "invalid_input");
    });
}

#[test]
fn catalog_lists_the_builtin_products() {
    with_env(&[], || {
        let result = catalog::run();
        assert_eq!(result.exit_code, 0, "expected successful catalog listing");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "catalog");
        assert_eq!(payload["status"], "ok");

        let products = payload["data"]["products"].as_array().expect("products array");
        assert_eq!(products.len(), 4);

        let ids: Vec<&str> =
            products.iter().filter_map(|product| product["id"].as_str()).collect();
        assert!(ids.contains(&"fertilizante-verde-intenso"));
        assert!(ids.contains(&"semeador-premium"));
    });
}

#[test]
fn config_reports_default_sources_without_env_or_file() {
    with_env(&[], || {
        let output = config::run();
        assert!(output.contains("- catalog.path = <builtin> (source: default)"), "{output}");
        assert!(output.contains("- logging.level = info (source: default)"), "{output}");
    });
}

#[test]
fn config_attributes_env_overrides() {
    with_env(&[("GRAMADO_LOG_LEVEL", "debug")], || {
        let output = config::run();
        assert!(
            output.contains("- logging.level = debug (source: env (GRAMADO_LOG_LEVEL))"),
            "{output}"
        );
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn decimal_field(value: &Value) -> Decimal {
    let raw = value.as_str().expect("decimal fields serialize as strings");
    Decimal::from_str(raw).expect("decimal fields parse back")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "GRAMADO_CATALOG_PATH",
        "GRAMADO_LOGGING_LEVEL",
        "GRAMADO_LOGGING_FORMAT",
        "GRAMADO_LOG_LEVEL",
        "GRAMADO_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
