mod config;
mod html_renderer;
mod rendered_html;
mod templates;

pub use config::{
    BUNDLE_PATH_ENV, CDN_URL_ENV, DEFAULT_CDN_URL, RenderConfig,
};
pub use html_renderer::{HtmlRenderer, script_safe_json};
pub use rendered_html::RenderedHtml;
use serde::Serialize;

use crate::error::RenderError;

/// Turns a component name and its props into an embeddable handle.
pub trait Renderer: Send + Sync {
    fn render<P: Serialize + ?Sized>(
        &self,
        component: &str,
        props: &P,
    ) -> Result<RenderedHtml, RenderError>;
}
