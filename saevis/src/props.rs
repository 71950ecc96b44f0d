use serde::Serialize;

use crate::{
    activations::{ActivationGrid, FeatureActivations},
    error::ValidationError,
    options::{Height, RankingMetric, SaeVisOptions},
};

/// Name of the front-end component that consumes [`SaeVisProps`].
pub const SAE_VIS_COMPONENT: &str = "SaeVis";

/// Validated configuration bundle handed to the renderer.
///
/// Serializes with the camelCase keys the `SaeVis` component expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaeVisProps {
    tokens: Vec<String>,
    feature_activations: ActivationGrid,
    feature_labels: Vec<String>,
    num_top_features_per_token: usize,
    num_top_features_overall: usize,
    initial_ranking_metric: RankingMetric,
    activation_threshold: Option<f64>,
    color_map: String,
    #[serde(rename = "featureIDs")]
    feature_ids: Vec<i64>,
    height: Height,
}

impl SaeVisProps {
    /// Validates the inputs and fills unset options with their defaults.
    pub fn new(
        tokens: Vec<String>,
        feature_activations: impl Into<FeatureActivations>,
        feature_labels: Vec<String>,
        options: SaeVisOptions,
    ) -> Result<Self, ValidationError> {
        let grid = feature_activations.into().normalize()?;
        Self::from_grid(tokens, grid, feature_labels, options)
    }

    pub(crate) fn from_grid(
        tokens: Vec<String>,
        grid: ActivationGrid,
        feature_labels: Vec<String>,
        options: SaeVisOptions,
    ) -> Result<Self, ValidationError> {
        if grid.rows() != tokens.len() {
            return Err(ValidationError::TokenCountMismatch {
                num_tokens: tokens.len(),
                rows: grid.rows(),
            });
        }

        let num_features = grid.cols();
        if feature_labels.len() != num_features {
            return Err(ValidationError::LabelCountMismatch {
                num_labels: feature_labels.len(),
                columns: num_features,
            });
        }

        if !options.has_known_color_map() {
            log::warn!(
                "unknown color map `{}`, the component will fall back to its default",
                options.color_map
            );
        }

        let feature_ids = match options.feature_ids {
            Some(ids) if ids.len() != num_features => {
                return Err(ValidationError::FeatureIdCountMismatch {
                    num_ids: ids.len(),
                    columns: num_features,
                });
            },
            Some(ids) => ids,
            None => (0..num_features as i64).collect(),
        };

        Ok(Self {
            tokens,
            feature_activations: grid,
            feature_labels,
            num_top_features_per_token: options.num_top_features_per_token,
            num_top_features_overall: options.num_top_features_overall,
            initial_ranking_metric: options.initial_ranking_metric,
            activation_threshold: options.activation_threshold,
            color_map: options.color_map,
            feature_ids,
            height: options.height,
        })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn feature_activations(&self) -> &ActivationGrid {
        &self.feature_activations
    }

    pub fn feature_labels(&self) -> &[String] {
        &self.feature_labels
    }

    pub fn feature_ids(&self) -> &[i64] {
        &self.feature_ids
    }

    pub fn num_tokens(&self) -> usize {
        self.tokens.len()
    }

    pub fn num_features(&self) -> usize {
        self.feature_activations.cols()
    }

    pub fn num_top_features_per_token(&self) -> usize {
        self.num_top_features_per_token
    }

    pub fn num_top_features_overall(&self) -> usize {
        self.num_top_features_overall
    }

    pub fn initial_ranking_metric(&self) -> RankingMetric {
        self.initial_ranking_metric
    }

    pub fn activation_threshold(&self) -> Option<f64> {
        self.activation_threshold
    }

    pub fn color_map(&self) -> &str {
        &self.color_map
    }

    pub fn height(&self) -> &Height {
        &self.height
    }
}
