use std::{
    fs,
    path::{Path, PathBuf},
};

use console::Style;
use saevis::{HtmlRenderer, RenderConfig, render_props};

use super::load_props;

pub struct RenderArguments {
    pub input_path: String,
    pub output_path: Option<String>,
    pub title: String,
    pub config_path: Option<String>,
    pub bundle_path: Option<String>,
    pub cdn_url: Option<String>,
}

pub fn render_config(
    arguments: &RenderArguments
) -> Result<RenderConfig, Box<dyn std::error::Error>> {
    let mut config = match &arguments.config_path {
        Some(config_path) => RenderConfig::from_file(Path::new(config_path))?,
        None => RenderConfig::default(),
    }
    .with_env_overrides();

    if let Some(cdn_url) = &arguments.cdn_url {
        config.cdn_url = cdn_url.clone();
    }
    if let Some(bundle_path) = &arguments.bundle_path {
        config.bundle_path = Some(PathBuf::from(bundle_path));
    }
    Ok(config)
}

pub fn handle_render(
    arguments: RenderArguments
) -> Result<(), Box<dyn std::error::Error>> {
    let props = load_props(&arguments.input_path)?;
    let renderer = HtmlRenderer::new(render_config(&arguments)?)?;
    let rendered = render_props(&renderer, &props)?;
    let document = rendered.to_document(&arguments.title)?;

    match &arguments.output_path {
        Some(output_path) => {
            fs::write(output_path, document)?;
            let style = Style::new().bold();
            eprintln!(
                "{} {} ({} tokens, {} features)",
                style.apply_to("Wrote"),
                output_path,
                props.num_tokens(),
                props.num_features()
            );
        },
        None => println!("{}", document),
    }
    Ok(())
}
