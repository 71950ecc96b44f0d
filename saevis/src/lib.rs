pub mod activations;
pub use activations::{ActivationGrid, FeatureActivations};

pub mod data_type;
pub use data_type::{ArrayElement, DataType};

pub mod error;
pub use error::{Error, ErrorKind, RenderError, ValidationError};

pub mod input;
pub mod options;
pub use options::{Height, RankingMetric, SaeVisOptions};

pub mod props;
pub use props::{SAE_VIS_COMPONENT, SaeVisProps};

pub mod render;
pub use render::{HtmlRenderer, RenderConfig, RenderedHtml, Renderer};

mod sae;
pub use sae::{render_props, sae_vis, sae_vis_with};

pub mod summary;
pub mod tensor;
pub use tensor::Tensor;
