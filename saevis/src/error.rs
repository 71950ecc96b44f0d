use std::path::PathBuf;

use crate::DataType;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value of the wrong category was supplied.
    Type,
    /// Dimensionality or length mismatch.
    Shape,
    /// A value outside its enumerated set.
    Value,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Input must be a JSON object")]
    InputNotObject,
    #[error("Missing required field: `{0}`")]
    MissingField(&'static str),
    #[error("`tokens` must be a list of strings.")]
    TokensNotStrings,
    #[error("`feature_labels` must be a list of strings.")]
    LabelsNotStrings,
    #[error(
        "`feature_activations` must be an ndarray array, a tensor, or list of lists."
    )]
    UnsupportedActivations,
    #[error("`feature_activations` as list must be a list of lists.")]
    ActivationsNotNested,
    #[error(
        "`feature_activations` contains a non-numeric value at row {row}, column {column}."
    )]
    NonNumericActivation {
        row: usize,
        column: usize,
    },
    #[error(
        "`feature_activations` must be a 2D array/tensor, but got shape {shape:?}"
    )]
    NotTwoDimensional {
        shape: Vec<usize>,
    },
    #[error(
        "Row {row} of `feature_activations` has {actual} values, but the first row has {expected}."
    )]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Tensor with shape {shape:?} and data type {data_type} requires {expected} bytes, but got {actual}."
    )]
    TensorSizeMismatch {
        shape: Vec<usize>,
        data_type: DataType,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Tensor with shape {shape:?} and data type {data_type} is too large to address."
    )]
    TensorTooLarge {
        shape: Vec<usize>,
        data_type: DataType,
    },
    #[error(
        "Activation grid with shape {shape:?} requires {expected} values, but got {actual}."
    )]
    GridSizeMismatch {
        shape: [usize; 2],
        expected: usize,
        actual: usize,
    },
    #[error(
        "Mismatch between number of tokens ({num_tokens}) and first dimension of `feature_activations` ({rows}). Shape must be [num_tokens, num_features]."
    )]
    TokenCountMismatch {
        num_tokens: usize,
        rows: usize,
    },
    #[error(
        "Mismatch between number of feature labels ({num_labels}) and second dimension of `feature_activations` ({columns}). Shape must be [num_tokens, num_features]."
    )]
    LabelCountMismatch {
        num_labels: usize,
        columns: usize,
    },
    #[error(
        "Mismatch between number of feature ids ({num_ids}) and second dimension of `feature_activations` ({columns})."
    )]
    FeatureIdCountMismatch {
        num_ids: usize,
        columns: usize,
    },
    #[error("`initial_ranking_metric` must be one of 'max', 'l1', 'l0', got '{0}'.")]
    UnknownRankingMetric(String),
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::InputNotObject
            | ValidationError::MissingField(_)
            | ValidationError::TokensNotStrings
            | ValidationError::LabelsNotStrings
            | ValidationError::UnsupportedActivations
            | ValidationError::ActivationsNotNested
            | ValidationError::NonNumericActivation {
                ..
            }
            | ValidationError::InvalidOptions(_) => ErrorKind::Type,
            ValidationError::NotTwoDimensional {
                ..
            }
            | ValidationError::RaggedRows {
                ..
            }
            | ValidationError::TensorSizeMismatch {
                ..
            }
            | ValidationError::TensorTooLarge {
                ..
            }
            | ValidationError::GridSizeMismatch {
                ..
            }
            | ValidationError::TokenCountMismatch {
                ..
            }
            | ValidationError::LabelCountMismatch {
                ..
            }
            | ValidationError::FeatureIdCountMismatch {
                ..
            } => ErrorKind::Shape,
            ValidationError::UnknownRankingMetric(_) => ErrorKind::Value,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unable to read bundle at {path:?}")]
    UnableToReadBundle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to read render config at {path:?}")]
    UnableToReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse render config")]
    UnableToParseConfig(#[source] serde_json::Error),
    #[error("Unable to load template `{name}`")]
    UnableToLoadTemplate {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
    #[error("Unable to render template `{name}`")]
    UnableToRenderTemplate {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
    #[error("Unable to serialize props")]
    UnableToSerializeProps(#[source] serde_json::Error),
    #[error("Invalid component name: `{0}`")]
    InvalidComponentName(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    /// Validation category, `None` for render failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Validation(error) => Some(error.kind()),
            Error::Render(_) => None,
        }
    }
}
