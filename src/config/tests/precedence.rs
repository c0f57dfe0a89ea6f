//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::{Layer, compose};
use crate::config::OperationMode;

#[rstest]
#[case::file_overrides_defaults(
    vec![(Layer::Defaults, json!({"model": "default-model"})), (Layer::File, json!({"model": "file-model"}))],
    "model",
    "file-model",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![(Layer::File, json!({"api_key": "file-key"})), (Layer::Environment, json!({"api_key": "env-key"}))],
    "api_key",
    "env-key",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![(Layer::Environment, json!({"preset": "basic"})), (Layer::Cli, json!({"preset": "executive"}))],
    "preset",
    "executive",
    "CLI should override environment"
)]
#[case::base_url_defaults_file_env_cli(
    vec![
        (Layer::Defaults, json!({"base_url": "https://default.example/v1"})),
        (Layer::File, json!({"base_url": "https://file.example/v1"})),
        (Layer::Environment, json!({"base_url": "https://env.example/v1"})),
        (Layer::Cli, json!({"base_url": "https://cli.example/v1"}))
    ],
    "base_url",
    "https://cli.example/v1",
    "CLI should win for base_url"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(Layer, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = compose(&layers);

    let actual = match field {
        "model" => Some(config.model.as_str()),
        "api_key" => config.api_key.as_deref(),
        "preset" => config.preset.as_deref(),
        "base_url" => Some(config.base_url.as_str()),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn each_layer_overrides_the_ones_below_it() {
    let mut layers = Vec::new();
    for (rank, layer) in Layer::ASCENDING.into_iter().enumerate() {
        layers.push((layer, json!({"model": format!("model-{rank}")})));
        let config = compose(&layers);

        assert_eq!(
            config.model,
            format!("model-{rank}"),
            "{layer:?} should win over every lower layer"
        );
    }
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let config = compose(&[(Layer::Defaults, json!({"api_key": null}))]);

    assert!(config.api_key.is_none(), "api_key should be None");
    assert_eq!(config.base_url, "https://api.mistral.ai/v1");
    assert_eq!(config.model, "mistral-small-latest");
    assert_eq!(config.request_timeout_seconds, 30);
    assert_eq!(config.validation_timeout_seconds, 10);
    assert_eq!(config.cache_ttl_seconds, 300);
    assert_eq!(config.max_text_length, 5000);
    assert!(!config.health, "health should default to false");
    assert!(!config.telemetry, "telemetry should default to false");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = compose(&[
        (Layer::Defaults, json!({"model": "default-model", "api_key": "default-key"})),
        (Layer::Cli, json!({"model": "cli-model"})),
    ]);

    assert_eq!(config.model, "cli-model", "CLI should override model");
    assert_eq!(
        config.api_key.as_deref(),
        Some("default-key"),
        "default key should be preserved"
    );
}

#[rstest]
#[case::file_overrides_defaults(
    vec![
        (Layer::Defaults, json!({"cache_ttl_seconds": 10})),
        (Layer::File, json!({"cache_ttl_seconds": 20}))
    ],
    20
)]
#[case::environment_overrides_file(
    vec![
        (Layer::File, json!({"cache_ttl_seconds": 10})),
        (Layer::Environment, json!({"cache_ttl_seconds": 20}))
    ],
    20
)]
#[case::cli_overrides_environment(
    vec![
        (Layer::Environment, json!({"cache_ttl_seconds": 10})),
        (Layer::Cli, json!({"cache_ttl_seconds": 20}))
    ],
    20
)]
fn cache_ttl_seconds_layer_precedence(#[case] layers: Vec<(Layer, Value)>, #[case] expected: u64) {
    let config = compose(&layers);

    assert_eq!(
        config.cache_ttl_seconds, expected,
        "cache_ttl_seconds should follow standard precedence rules"
    );
}

#[rstest]
#[case::health(json!({"health": true}), OperationMode::HealthCheck)]
#[case::adjust(json!({"text": "hello"}), OperationMode::Adjust)]
#[case::health_wins_over_text(json!({"health": true, "text": "hello"}), OperationMode::HealthCheck)]
fn operation_mode_follows_health_flag(#[case] cli: Value, #[case] expected: OperationMode) {
    let config = compose(&[(Layer::Cli, cli)]);

    assert_eq!(config.operation_mode(), expected);
}
