use std::fs;

use minijinja::{Environment, context};
use serde::Serialize;
use uuid::Uuid;

use super::{
    RenderConfig, RenderedHtml, Renderer,
    templates::{
        CDN_TEMPLATE, CDN_TEMPLATE_NAME, LOCAL_TEMPLATE, LOCAL_TEMPLATE_NAME,
    },
};
use crate::error::RenderError;

const MOUNT_ID_PREFIX: &str = "circuits-vis-";
const MOUNT_ID_UUID_LENGTH: usize = 13;

/// Embeds props into HTML fragments that mount a front-end component.
///
/// A CDN fragment is always produced. A local fragment, with the bundle
/// inlined, is produced only when the config names a bundle file.
#[derive(Debug)]
pub struct HtmlRenderer {
    config: RenderConfig,
    bundle: Option<String>,
    environment: Environment<'static>,
}

impl HtmlRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        let bundle = match &config.bundle_path {
            Some(path) => {
                log::info!("Inlining bundle from {:?}", path);
                let bundle = fs::read_to_string(path).map_err(|source| {
                    RenderError::UnableToReadBundle {
                        path: path.clone(),
                        source,
                    }
                })?;
                Some(bundle)
            },
            None => None,
        };

        let mut environment = Environment::new();
        for (name, source) in [
            (CDN_TEMPLATE_NAME, CDN_TEMPLATE),
            (LOCAL_TEMPLATE_NAME, LOCAL_TEMPLATE),
        ] {
            environment.add_template(name, source).map_err(|source| {
                RenderError::UnableToLoadTemplate {
                    name,
                    source,
                }
            })?;
        }

        Ok(Self {
            config,
            bundle,
            environment,
        })
    }

    pub fn from_env() -> Result<Self, RenderError> {
        Self::new(RenderConfig::from_env())
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn has_local_bundle(&self) -> bool {
        self.bundle.is_some()
    }

    fn render_template<S: Serialize>(
        &self,
        name: &'static str,
        context: S,
    ) -> Result<String, RenderError> {
        let template = self.environment.get_template(name).map_err(|source| {
            RenderError::UnableToLoadTemplate {
                name,
                source,
            }
        })?;
        template.render(context).map_err(|source| {
            RenderError::UnableToRenderTemplate {
                name,
                source,
            }
        })
    }
}

impl Renderer for HtmlRenderer {
    fn render<P: Serialize + ?Sized>(
        &self,
        component: &str,
        props: &P,
    ) -> Result<RenderedHtml, RenderError> {
        if !is_identifier(component) {
            return Err(RenderError::InvalidComponentName(
                component.to_string(),
            ));
        }

        let props = serde_json::to_value(props)
            .map_err(RenderError::UnableToSerializeProps)?;
        let props_json = script_safe_json(&props)?;
        let bundle_url = script_safe_json(&self.config.cdn_url)?;
        let mount_id = new_mount_id();

        let cdn_src = self.render_template(
            CDN_TEMPLATE_NAME,
            context!(
                mount_id => &mount_id,
                component => component,
                bundle_url => &bundle_url,
                props => &props_json
            ),
        )?;
        let local_src = self
            .bundle
            .as_ref()
            .map(|bundle| {
                self.render_template(
                    LOCAL_TEMPLATE_NAME,
                    context!(
                        mount_id => &mount_id,
                        component => component,
                        bundle => bundle,
                        props => &props_json
                    ),
                )
            })
            .transpose()?;

        log::debug!(
            "Rendered {} into #{} ({} bytes of props)",
            component,
            mount_id,
            props_json.len()
        );
        Ok(RenderedHtml::new(mount_id, props, cdn_src, local_src))
    }
}

fn new_mount_id() -> String {
    let uuid = Uuid::new_v4().to_string();
    format!("{}{}", MOUNT_ID_PREFIX, &uuid[..MOUNT_ID_UUID_LENGTH])
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Serializes `value` to JSON that can sit inside a `<script>` element.
///
/// `<`, `>` and `&` only ever occur inside JSON strings, so replacing them
/// with `\u` escapes keeps the document valid JSON.
pub fn script_safe_json<T: Serialize + ?Sized>(
    value: &T
) -> Result<String, RenderError> {
    let json = serde_json::to_string(value)
        .map_err(RenderError::UnableToSerializeProps)?;
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            _ => escaped.push(c),
        }
    }
    Ok(escaped)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::render::DEFAULT_CDN_URL;

    #[test]
    fn test_render_cdn_fragment() {
        let renderer = HtmlRenderer::new(RenderConfig::default()).unwrap();
        let rendered =
            renderer.render("Hello", &json!({"name": "Bob"})).unwrap();

        let mount_id = rendered.mount_id();
        assert!(mount_id.starts_with("circuits-vis-"));
        assert_eq!(mount_id.len(), "circuits-vis-".len() + 13);

        let cdn_src = rendered.cdn_src();
        assert!(cdn_src.starts_with(&format!(
            r#"<div id="{}" style="margin: 15px 0;"/>"#,
            mount_id
        )));
        assert!(cdn_src.contains(&format!(
            r#"import {{ render, Hello }} from "{}";"#,
            DEFAULT_CDN_URL
        )));
        assert!(cdn_src.contains(r#"{"name":"Bob"}"#));
        assert!(rendered.local_src().is_none());
        assert_eq!(rendered.html(), cdn_src);
    }

    #[test]
    fn test_render_local_fragment() {
        let bundle = tempfile::NamedTempFile::new().unwrap();
        fs::write(bundle.path(), "var CircuitsVis = {};").unwrap();
        let renderer = HtmlRenderer::new(RenderConfig {
            bundle_path: Some(bundle.path().to_path_buf()),
            ..RenderConfig::default()
        })
        .unwrap();
        assert!(renderer.has_local_bundle());

        let rendered = renderer.render("Hello", &json!({})).unwrap();
        let local_src = rendered.local_src().unwrap();
        assert!(local_src.contains("var CircuitsVis = {};"));
        assert!(local_src.contains("CircuitsVis.Hello,"));
        assert!(local_src.contains(rendered.mount_id()));
        assert_eq!(rendered.html(), local_src);
    }

    #[test]
    fn test_missing_bundle() {
        let error = HtmlRenderer::new(RenderConfig {
            bundle_path: Some("/nonexistent/iife.js".into()),
            ..RenderConfig::default()
        })
        .unwrap_err();
        assert!(matches!(error, RenderError::UnableToReadBundle { .. }));
    }

    #[test]
    fn test_invalid_component_name() {
        let renderer = HtmlRenderer::new(RenderConfig::default()).unwrap();
        for name in ["", "1abc", "a-b", "alert(1)"] {
            let error = renderer.render(name, &json!({})).unwrap_err();
            assert!(matches!(error, RenderError::InvalidComponentName(_)));
        }
    }

    #[test]
    fn test_script_safe_json() {
        let value = json!({"token": "</script><b>&amp;\u{2028}"});
        let escaped = script_safe_json(&value).unwrap();
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('&'));
        let parsed: Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_non_finite_values_become_null() {
        let renderer = HtmlRenderer::new(RenderConfig::default()).unwrap();
        let rendered = renderer.render("Hello", &vec![f64::NAN, 1.5]).unwrap();
        assert_eq!(rendered.props(), &json!([null, 1.5]));
        assert!(rendered.cdn_src().contains("[null,1.5]"));
    }
}
