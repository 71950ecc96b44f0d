use std::fs;

use saevis::{SaeVisProps, input::props_from_value};

pub fn load_props(
    input_path: &str
) -> Result<SaeVisProps, Box<dyn std::error::Error>> {
    let input_data = fs::read_to_string(input_path)?;
    let input: serde_json::Value = serde_json::from_str(&input_data)?;
    let props = props_from_value(input)?;
    log::info!(
        "Loaded {} tokens x {} features from {}",
        props.num_tokens(),
        props.num_features(),
        input_path
    );
    Ok(props)
}
