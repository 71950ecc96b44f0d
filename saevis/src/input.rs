use serde_json::{Map, Value};

use crate::{
    activations::FeatureActivations,
    error::ValidationError,
    options::RawOptions,
    props::SaeVisProps,
};

/// Validates an untyped input object, e.g. one read from a JSON file.
///
/// The object uses the same camelCase keys as the serialized props:
/// `tokens`, `featureActivations`, `featureLabels` and, optionally, any of
/// the display options.
pub fn props_from_value(value: Value) -> Result<SaeVisProps, ValidationError> {
    let Value::Object(mut object) = value else {
        return Err(ValidationError::InputNotObject);
    };

    let tokens = string_list(
        take_field(&mut object, "tokens")?,
        ValidationError::TokensNotStrings,
    )?;
    let grid = FeatureActivations::Json(take_field(
        &mut object,
        "featureActivations",
    )?)
    .normalize()?;
    if grid.rows() != tokens.len() {
        return Err(ValidationError::TokenCountMismatch {
            num_tokens: tokens.len(),
            rows: grid.rows(),
        });
    }
    let feature_labels = string_list(
        take_field(&mut object, "featureLabels")?,
        ValidationError::LabelsNotStrings,
    )?;

    if feature_labels.len() != grid.cols() {
        return Err(ValidationError::LabelCountMismatch {
            num_labels: feature_labels.len(),
            columns: grid.cols(),
        });
    }

    let options = serde_json::from_value::<RawOptions>(Value::Object(object))
        .map_err(|error| ValidationError::InvalidOptions(error.to_string()))?
        .resolve()?;

    SaeVisProps::from_grid(tokens, grid, feature_labels, options)
}

fn take_field(
    object: &mut Map<String, Value>,
    name: &'static str,
) -> Result<Value, ValidationError> {
    object.remove(name).ok_or(ValidationError::MissingField(name))
}

fn string_list(
    value: Value,
    error: ValidationError,
) -> Result<Vec<String>, ValidationError> {
    let Value::Array(items) = value else {
        return Err(error);
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => Ok(text),
            _ => Err(error.clone()),
        })
        .collect()
}
