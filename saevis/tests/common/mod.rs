#![allow(dead_code)]

use ndarray::Array2;
use saevis::{HtmlRenderer, RenderConfig, Tensor};

pub const TOKENS: [&str; 5] = ["This", " is", " a", " test", "."];
pub const NUM_TOKENS: usize = TOKENS.len();
pub const NUM_FEATURES: usize = 10;

pub fn tokens() -> Vec<String> {
    TOKENS.iter().map(|token| token.to_string()).collect()
}

pub fn feature_labels() -> Vec<String> {
    (0..NUM_FEATURES).map(|index| format!("Feature {}", index)).collect()
}

pub fn activations_list() -> Vec<Vec<f64>> {
    (0..NUM_TOKENS)
        .map(|i| (0..NUM_FEATURES).map(|j| (i * NUM_FEATURES + j) as f64).collect())
        .collect()
}

pub fn activations_ndarray() -> Array2<f64> {
    Array2::from_shape_fn((NUM_TOKENS, NUM_FEATURES), |(i, j)| {
        (i * NUM_FEATURES + j) as f64
    })
}

pub fn activations_tensor() -> Tensor {
    let values: Vec<f32> = activations_list()
        .into_iter()
        .flatten()
        .map(|value| value as f32)
        .collect();
    Tensor::from_slice(&values, &[NUM_TOKENS, NUM_FEATURES]).unwrap()
}

pub fn renderer() -> HtmlRenderer {
    HtmlRenderer::new(RenderConfig::default()).unwrap()
}
