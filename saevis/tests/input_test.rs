mod common;

use common::{activations_list, feature_labels, renderer, tokens};
use saevis::{ErrorKind, input::props_from_value, render_props};
use serde_json::json;

#[test]
fn test_input_file_matches_typed_call() {
    let input = json!({
        "tokens": tokens(),
        "featureActivations": activations_list(),
        "featureLabels": feature_labels(),
        "initialRankingMetric": "l0",
        "height": "80vh"
    });
    let props = props_from_value(input).unwrap();
    let rendered = render_props(&renderer(), &props).unwrap();

    let typed = saevis::sae_vis_with(
        &renderer(),
        tokens(),
        activations_list(),
        feature_labels(),
        saevis::SaeVisOptions::default()
            .with_initial_ranking_metric(saevis::RankingMetric::L0)
            .with_height("80vh"),
    )
    .unwrap();
    assert_eq!(rendered.props(), typed.props());
}

#[test]
fn test_input_tokens_as_string() {
    let input = json!({
        "tokens": "not a list",
        "featureActivations": activations_list(),
        "featureLabels": feature_labels()
    });
    let error = props_from_value(input).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(error.to_string(), "`tokens` must be a list of strings.");
}

#[test]
fn test_input_invalid_ranking_metric() {
    let input = json!({
        "tokens": tokens(),
        "featureActivations": activations_list(),
        "featureLabels": feature_labels(),
        "initialRankingMetric": "invalid"
    });
    let error = props_from_value(input).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Value);
    assert!(error.to_string().contains("`initial_ranking_metric` must be one of"));
}
