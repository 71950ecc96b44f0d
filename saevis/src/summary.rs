//! Per-feature statistics over a validated activation grid.
//!
//! Mirrors the scoring the `SaeVis` component uses for its overall ranking
//! and token tooltips, so the same ordering can be printed without a browser.

use serde::Serialize;

use crate::{options::RankingMetric, props::SaeVisProps};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSummary {
    pub index: usize,
    pub id: i64,
    pub label: String,
    pub max_activation: f64,
    pub mean_abs_activation: f64,
    pub non_zero_count: usize,
}

impl FeatureSummary {
    pub fn score(
        &self,
        metric: RankingMetric,
    ) -> f64 {
        match metric {
            RankingMetric::Max => self.max_activation,
            RankingMetric::L1 => self.mean_abs_activation,
            RankingMetric::L0 => self.non_zero_count as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenFeature {
    pub index: usize,
    pub label: String,
    pub activation: f64,
}

/// Statistics for every feature. A token counts towards `non_zero_count`
/// when `|activation|` exceeds the threshold, or zero when none is set.
pub fn summarize_features(props: &SaeVisProps) -> Vec<FeatureSummary> {
    let grid = props.feature_activations();
    if grid.rows() == 0 || grid.cols() == 0 {
        return Vec::new();
    }
    let threshold = props.activation_threshold().unwrap_or(0.0);

    (0..grid.cols())
        .map(|index| {
            let mut max_activation = f64::NEG_INFINITY;
            let mut sum_abs = 0.0;
            let mut non_zero_count = 0;
            for activation in grid.column(index) {
                max_activation = max_activation.max(activation);
                sum_abs += activation.abs();
                if activation.abs() > threshold {
                    non_zero_count += 1;
                }
            }
            FeatureSummary {
                index,
                id: props.feature_ids()[index],
                label: props.feature_labels()[index].clone(),
                max_activation,
                mean_abs_activation: sum_abs / grid.rows() as f64,
                non_zero_count,
            }
        })
        .collect()
}

/// Sorts features by descending score. Ties keep their original order.
pub fn rank_features(
    mut features: Vec<FeatureSummary>,
    metric: RankingMetric,
) -> Vec<FeatureSummary> {
    features.sort_by(|a, b| b.score(metric).total_cmp(&a.score(metric)));
    features
}

/// Strongest features on one token by `|activation|`, limited to `count`.
/// With a threshold set, only activations with `|activation| >= threshold`
/// are considered.
pub fn top_features_for_token(
    props: &SaeVisProps,
    token_index: usize,
    count: usize,
) -> Vec<TokenFeature> {
    let Some(row) = props.feature_activations().row(token_index) else {
        return Vec::new();
    };
    let threshold = props.activation_threshold();

    let mut features: Vec<TokenFeature> = row
        .iter()
        .enumerate()
        .filter(|(_, activation)| {
            threshold.is_none_or(|threshold| activation.abs() >= threshold)
        })
        .map(|(index, &activation)| TokenFeature {
            index,
            label: props.feature_labels()[index].clone(),
            activation,
        })
        .collect();
    features.sort_by(|a, b| b.activation.abs().total_cmp(&a.activation.abs()));
    features.truncate(count);
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SaeVisOptions;

    fn props(options: SaeVisOptions) -> SaeVisProps {
        SaeVisProps::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec![0.0_f64, 3.0, -0.5],
                vec![0.2, 0.0, -4.0],
                vec![0.1, 0.0, 0.0],
            ],
            vec!["zero".to_string(), "one".to_string(), "two".to_string()],
            options,
        )
        .unwrap()
    }

    fn order(features: &[FeatureSummary]) -> Vec<usize> {
        features.iter().map(|feature| feature.index).collect()
    }

    #[test]
    fn test_summarize_features() {
        let features = summarize_features(&props(SaeVisOptions::default()));
        assert_eq!(features.len(), 3);
        assert_eq!(features[1].max_activation, 3.0);
        assert_eq!(features[1].mean_abs_activation, 1.0);
        assert_eq!(features[1].non_zero_count, 1);
        assert_eq!(features[2].max_activation, 0.0);
        assert_eq!(features[2].mean_abs_activation, 1.5);
        assert_eq!(features[0].non_zero_count, 2);
    }

    #[test]
    fn test_rank_features_by_metric() {
        let features = summarize_features(&props(SaeVisOptions::default()));
        assert_eq!(
            order(&rank_features(features.clone(), RankingMetric::Max)),
            vec![1, 0, 2]
        );
        assert_eq!(
            order(&rank_features(features.clone(), RankingMetric::L1)),
            vec![2, 1, 0]
        );
        assert_eq!(
            order(&rank_features(features, RankingMetric::L0)),
            vec![0, 2, 1]
        );
    }

    #[test]
    fn test_l0_respects_threshold() {
        let features = summarize_features(&props(
            SaeVisOptions::default().with_activation_threshold(0.15),
        ));
        assert_eq!(features[0].non_zero_count, 1);
        assert_eq!(features[2].non_zero_count, 2);
    }

    #[test]
    fn test_top_features_for_token() {
        let props = props(SaeVisOptions::default());
        let top = top_features_for_token(&props, 1, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label, "two");
        assert_eq!(top[0].activation, -4.0);
        assert_eq!(top[1].label, "zero");
        assert!(top_features_for_token(&props, 3, 5).is_empty());
    }

    #[test]
    fn test_top_features_for_token_threshold() {
        let props = props(SaeVisOptions::default().with_activation_threshold(0.5));
        let top = top_features_for_token(&props, 0, 5);
        let labels: Vec<&str> =
            top.iter().map(|feature| feature.label.as_str()).collect();
        assert_eq!(labels, vec!["one", "two"]);
    }
}
