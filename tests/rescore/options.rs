//! Host options in, validated config out.

use super::common::example_window;
use mixup::{
    rescore, Descent, RescoreConfig, RescoreError, RescoreOptions, StrategyKind, Validation,
    MAX_WINDOW_SIZE,
};

fn config_from(json: &str) -> Result<RescoreConfig, RescoreError> {
    RescoreConfig::try_from(RescoreOptions::from_json(json)?)
}

#[test]
fn test_empty_options_mean_round_robin_defaults() {
    let config = config_from("{}").unwrap();
    assert_eq!(config.strategy().kind(), StrategyKind::RoundRobin);
    assert_eq!(config.window_size(), MAX_WINDOW_SIZE);
    assert_eq!(config.group_cap(), 0);
    assert_eq!(config.descent(), Descent::Strict);
    assert_eq!(config.validation(), Validation::Lenient);
}

#[test]
fn test_full_options_round_trip_into_rescore() {
    let config = config_from(
        r#"{
            "strategy": "seeded_shuffle",
            "seed": 42,
            "window_size": 3,
            "group_cap": 1,
            "epsilon": 0.001,
            "descent": "non_strict",
            "validation": "strict"
        }"#,
    )
    .unwrap();
    assert_eq!(config.window_size(), 3);

    let output = rescore(&example_window(), &config).unwrap();
    assert_eq!(output.len(), 5);
    assert!(output[3].group_position.is_none());
}

#[test]
fn test_decline_options() {
    let config = config_from(
        r#"{"strategy": "position_decline", "decline": {"m": 2.0, "a": 1.0, "b": 2.0}}"#,
    )
    .unwrap();
    assert_eq!(config.strategy().kind(), StrategyKind::PositionDecline);
}

#[test]
fn test_rejected_options() {
    for json in [
        r#"{"strategy": "random"}"#,
        r#"{"strategy": "seeded_shuffle"}"#,
        r#"{"window_size": 0}"#,
        r#"{"window_size": -5}"#,
        r#"{"group_cap": -1}"#,
        r#"{"epsilon": -0.5}"#,
        r#"{"unknown_field": true}"#,
        r#"{"strategy": "#,
    ] {
        assert!(
            matches!(
                config_from(json),
                Err(RescoreError::InvalidConfiguration { .. })
            ),
            "accepted {}",
            json
        );
    }
}

#[test]
fn test_oversized_window_is_capped() {
    let config = config_from(r#"{"window_size": 1000000}"#).unwrap();
    assert_eq!(config.window_size(), MAX_WINDOW_SIZE);
}
