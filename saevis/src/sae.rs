use crate::{
    activations::FeatureActivations,
    error::Error,
    options::SaeVisOptions,
    props::{SAE_VIS_COMPONENT, SaeVisProps},
    render::{HtmlRenderer, RenderedHtml, Renderer},
};

/// Visualizes SAE feature activations on a token sequence.
///
/// `feature_activations` has shape `[num_tokens, num_features]` and may be an
/// `ndarray` array, a [`crate::Tensor`], nested rows or a JSON value.
/// `feature_labels` names each feature column. Unset options take their
/// documented defaults; feature ids default to `0..num_features`.
///
/// The fragment references the front-end bundle on the CDN; set
/// `SAEVIS_BUNDLE_PATH` to additionally inline a local bundle.
pub fn sae_vis(
    tokens: Vec<String>,
    feature_activations: impl Into<FeatureActivations>,
    feature_labels: Vec<String>,
    options: SaeVisOptions,
) -> Result<RenderedHtml, Error> {
    let props =
        SaeVisProps::new(tokens, feature_activations, feature_labels, options)?;
    let renderer = HtmlRenderer::from_env()?;
    render_props(&renderer, &props)
}

/// Same as [`sae_vis`] with an explicit renderer.
pub fn sae_vis_with<R: Renderer>(
    renderer: &R,
    tokens: Vec<String>,
    feature_activations: impl Into<FeatureActivations>,
    feature_labels: Vec<String>,
    options: SaeVisOptions,
) -> Result<RenderedHtml, Error> {
    let props =
        SaeVisProps::new(tokens, feature_activations, feature_labels, options)?;
    render_props(renderer, &props)
}

/// Renders an already validated bundle.
pub fn render_props<R: Renderer>(
    renderer: &R,
    props: &SaeVisProps,
) -> Result<RenderedHtml, Error> {
    log::debug!(
        "Rendering {} tokens x {} features",
        props.num_tokens(),
        props.num_features()
    );
    Ok(renderer.render(SAE_VIS_COMPONENT, props)?)
}
