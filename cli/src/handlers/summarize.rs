use comfy_table::{
    CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};
use console::Style;
use saevis::{
    RankingMetric, SaeVisProps,
    summary::{rank_features, summarize_features, top_features_for_token},
};

use super::load_props;

pub fn handle_summarize(
    input_path: String,
    metric: Option<String>,
    top: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let props = load_props(&input_path)?;
    let metric = match metric {
        Some(metric) => metric.parse::<RankingMetric>()?,
        None => props.initial_ranking_metric(),
    };
    let top = top.unwrap_or(props.num_top_features_overall());

    println!("{}", format_summary(&props, metric, top));
    Ok(())
}

pub fn format_summary(
    props: &SaeVisProps,
    metric: RankingMetric,
    top: usize,
) -> String {
    let style_title = Style::new().bold();

    let mut features_table = Table::new();
    features_table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "ID", "Label", "Max", "Mean |act|", "Non-zero"]);
    for (rank, feature) in rank_features(summarize_features(props), metric)
        .into_iter()
        .take(top)
        .enumerate()
    {
        features_table.add_row(vec![
            (rank + 1).to_string(),
            feature.id.to_string(),
            feature.label,
            format!("{:.3}", feature.max_activation),
            format!("{:.3}", feature.mean_abs_activation),
            feature.non_zero_count.to_string(),
        ]);
    }
    for index in [0, 1, 3, 4, 5] {
        if let Some(column) = features_table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    let mut tokens_table = Table::new();
    tokens_table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Token", "Top features"]);
    for (index, token) in props.tokens().iter().enumerate() {
        let features = top_features_for_token(
            props,
            index,
            props.num_top_features_per_token(),
        )
        .into_iter()
        .map(|feature| format!("{} ({:.3})", feature.label, feature.activation))
        .collect::<Vec<_>>();
        let features = if features.is_empty() {
            "(None above threshold)".to_string()
        } else {
            features.join(", ")
        };
        tokens_table.add_row(vec![format!("{:?}", token), features]);
    }

    format!(
        "{}\n{features_table}\n\n{}\n{tokens_table}",
        style_title.apply_to(format!("Features by {}", metric.display_name())),
        style_title.apply_to("Top features per token"),
    )
}

#[cfg(test)]
mod tests {
    use saevis::SaeVisOptions;

    use super::*;

    #[test]
    fn test_format_summary() {
        let props = SaeVisProps::new(
            vec!["Hello".to_string(), " world".to_string()],
            vec![vec![0.0_f64, 4.0], vec![2.0, 0.0]],
            vec!["greeting".to_string(), "noun".to_string()],
            SaeVisOptions::default().with_activation_threshold(1.0),
        )
        .unwrap();

        let summary = format_summary(&props, RankingMetric::Max, 1);
        assert!(summary.contains("Features by Max Activation"));
        assert!(summary.contains("noun"));
        assert!(summary.contains("\"Hello\""));
        assert!(summary.contains("noun (4.000)"));
        assert!(summary.contains("greeting (2.000)"));
        let ranked = summary.split("Top features per token").next().unwrap();
        assert!(!ranked.contains("greeting"));
    }
}
