use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

pub const DEFAULT_NUM_TOP_FEATURES_PER_TOKEN: usize = 5;
pub const DEFAULT_NUM_TOP_FEATURES_OVERALL: usize = 20;
pub const DEFAULT_COLOR_MAP: &str = "reds";

/// Color maps understood by the `SaeVis` front-end component.
pub const KNOWN_COLOR_MAPS: &[&str] = &[
    "viridis", "plasma", "inferno", "magma", "cividis", "gray", "coolwarm",
    "rdylbu", "piyg", "prgn", "spectral", "blues", "greens", "reds", "oranges",
    "purples",
];

/// Rule used to order features by overall salience.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "lowercase")]
pub enum RankingMetric {
    /// Maximum activation across tokens.
    #[default]
    Max,
    /// Mean absolute activation.
    L1,
    /// Number of tokens with a non-zero activation.
    L0,
}

impl RankingMetric {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMetric::Max => "max",
            RankingMetric::L1 => "l1",
            RankingMetric::L0 => "l0",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RankingMetric::Max => "Max Activation",
            RankingMetric::L1 => "Mean Abs Activation (L1)",
            RankingMetric::L0 => "Non-Zero Count (L0)",
        }
    }
}

impl FromStr for RankingMetric {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "max" => Ok(RankingMetric::Max),
            "l1" => Ok(RankingMetric::L1),
            "l0" => Ok(RankingMetric::L0),
            other => Err(ValidationError::UnknownRankingMetric(other.to_string())),
        }
    }
}

impl fmt::Display for RankingMetric {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Height of the visualization container.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum Height {
    /// Size to content.
    #[default]
    Auto,
    /// Pixels.
    Pixels(u32),
    /// Any CSS length, e.g. `"75vh"`.
    Css(String),
}

impl From<u32> for Height {
    fn from(pixels: u32) -> Self {
        Height::Pixels(pixels)
    }
}

impl From<&str> for Height {
    fn from(value: &str) -> Self {
        Height::from(value.to_string())
    }
}

impl From<String> for Height {
    fn from(value: String) -> Self {
        if value == "auto" {
            Height::Auto
        } else {
            Height::Css(value)
        }
    }
}

impl Serialize for Height {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match self {
            Height::Auto => serializer.serialize_str("auto"),
            Height::Pixels(pixels) => serializer.serialize_u32(*pixels),
            Height::Css(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for Height {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D
    ) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawHeight {
            Pixels(u32),
            Css(String),
        }

        Ok(match RawHeight::deserialize(deserializer)? {
            RawHeight::Pixels(pixels) => Height::Pixels(pixels),
            RawHeight::Css(value) => Height::from(value),
        })
    }
}

/// Display options of the visualization.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaeVisOptions {
    pub num_top_features_per_token: usize,
    pub num_top_features_overall: usize,
    pub initial_ranking_metric: RankingMetric,
    pub activation_threshold: Option<f64>,
    pub color_map: String,
    pub height: Height,
    pub feature_ids: Option<Vec<i64>>,
}

impl Default for SaeVisOptions {
    fn default() -> Self {
        Self {
            num_top_features_per_token: DEFAULT_NUM_TOP_FEATURES_PER_TOKEN,
            num_top_features_overall: DEFAULT_NUM_TOP_FEATURES_OVERALL,
            initial_ranking_metric: RankingMetric::default(),
            activation_threshold: None,
            color_map: DEFAULT_COLOR_MAP.to_string(),
            height: Height::default(),
            feature_ids: None,
        }
    }
}

impl SaeVisOptions {
    pub fn with_num_top_features_per_token(
        mut self,
        count: usize,
    ) -> Self {
        self.num_top_features_per_token = count;
        self
    }

    pub fn with_num_top_features_overall(
        mut self,
        count: usize,
    ) -> Self {
        self.num_top_features_overall = count;
        self
    }

    pub fn with_initial_ranking_metric(
        mut self,
        metric: RankingMetric,
    ) -> Self {
        self.initial_ranking_metric = metric;
        self
    }

    pub fn with_activation_threshold(
        mut self,
        threshold: f64,
    ) -> Self {
        self.activation_threshold = Some(threshold);
        self
    }

    pub fn with_color_map(
        mut self,
        color_map: impl Into<String>,
    ) -> Self {
        self.color_map = color_map.into();
        self
    }

    pub fn with_height(
        mut self,
        height: impl Into<Height>,
    ) -> Self {
        self.height = height.into();
        self
    }

    pub fn with_feature_ids(
        mut self,
        feature_ids: Vec<i64>,
    ) -> Self {
        self.feature_ids = Some(feature_ids);
        self
    }

    pub fn has_known_color_map(&self) -> bool {
        KNOWN_COLOR_MAPS.contains(&self.color_map.as_str())
    }
}

/// Options as they appear in an input file. The ranking metric stays a
/// string here so that an unknown value surfaces as a value error rather
/// than a parse failure.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub(crate) struct RawOptions {
    num_top_features_per_token: Option<usize>,
    num_top_features_overall: Option<usize>,
    initial_ranking_metric: Option<String>,
    activation_threshold: Option<f64>,
    color_map: Option<String>,
    height: Option<Height>,
    #[serde(alias = "featureIDs")]
    feature_ids: Option<Vec<i64>>,
}

impl RawOptions {
    pub(crate) fn resolve(self) -> Result<SaeVisOptions, ValidationError> {
        let defaults = SaeVisOptions::default();
        let initial_ranking_metric = match self.initial_ranking_metric {
            Some(metric) => metric.parse()?,
            None => defaults.initial_ranking_metric,
        };
        Ok(SaeVisOptions {
            num_top_features_per_token: self
                .num_top_features_per_token
                .unwrap_or(defaults.num_top_features_per_token),
            num_top_features_overall: self
                .num_top_features_overall
                .unwrap_or(defaults.num_top_features_overall),
            initial_ranking_metric,
            activation_threshold: self.activation_threshold,
            color_map: self.color_map.unwrap_or(defaults.color_map),
            height: self.height.unwrap_or(defaults.height),
            feature_ids: self.feature_ids,
        })
    }
}

impl<'de> Deserialize<'de> for SaeVisOptions {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D
    ) -> Result<Self, D::Error> {
        let raw = RawOptions::deserialize(deserializer)?;
        raw.resolve().map_err(serde::de::Error::custom)
    }
}
