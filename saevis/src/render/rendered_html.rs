use std::fmt;

use minijinja::{Environment, context};
use serde_json::Value;

use super::templates::{DOCUMENT_TEMPLATE, DOCUMENT_TEMPLATE_NAME};
use crate::error::RenderError;

/// Renderable handle: HTML that mounts a front-end component with its props.
#[derive(Debug, Clone)]
pub struct RenderedHtml {
    mount_id: String,
    props: Value,
    cdn_src: String,
    local_src: Option<String>,
}

impl RenderedHtml {
    pub fn new(
        mount_id: String,
        props: Value,
        cdn_src: String,
        local_src: Option<String>,
    ) -> Self {
        Self {
            mount_id,
            props,
            cdn_src,
            local_src,
        }
    }

    /// Id of the element the component mounts into.
    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// The configuration bundle embedded in the fragments.
    pub fn props(&self) -> &Value {
        &self.props
    }

    pub fn cdn_src(&self) -> &str {
        &self.cdn_src
    }

    pub fn local_src(&self) -> Option<&str> {
        self.local_src.as_deref()
    }

    /// Fragment for notebook display, preferring the self-contained one.
    pub fn html(&self) -> &str {
        self.local_src().unwrap_or(&self.cdn_src)
    }

    /// Displays the fragment in an evcxr Jupyter kernel.
    pub fn evcxr_display(&self) {
        println!(
            "EVCXR_BEGIN_CONTENT text/html\n{}\nEVCXR_END_CONTENT",
            self.html()
        );
    }

    /// Wraps the fragment into a standalone HTML page.
    pub fn to_document(
        &self,
        title: &str,
    ) -> Result<String, RenderError> {
        let mut environment = Environment::new();
        environment
            .add_template(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)
            .map_err(|source| RenderError::UnableToLoadTemplate {
                name: DOCUMENT_TEMPLATE_NAME,
                source,
            })?;
        let template =
            environment.get_template(DOCUMENT_TEMPLATE_NAME).map_err(|source| {
                RenderError::UnableToLoadTemplate {
                    name: DOCUMENT_TEMPLATE_NAME,
                    source,
                }
            })?;
        template
            .render(context!(title => title, fragment => self.html()))
            .map_err(|source| RenderError::UnableToRenderTemplate {
                name: DOCUMENT_TEMPLATE_NAME,
                source,
            })
    }
}

impl fmt::Display for RenderedHtml {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.cdn_src)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rendered() -> RenderedHtml {
        RenderedHtml::new(
            "circuits-vis-1234".to_string(),
            json!({"a": 1}),
            "<div>cdn</div>".to_string(),
            None,
        )
    }

    #[test]
    fn test_display_uses_cdn_source() {
        let rendered = rendered();
        assert_eq!(rendered.to_string(), "<div>cdn</div>");
        assert_eq!(rendered.html(), "<div>cdn</div>");
    }

    #[test]
    fn test_to_document_escapes_title() {
        let document = rendered().to_document("SAE <features>").unwrap();
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("<title>SAE &lt;features&gt;</title>"));
        assert!(document.contains("<body>\n<div>cdn</div>\n</body>"));
    }
}
