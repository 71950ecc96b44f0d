use clap::{CommandFactory, Parser, Subcommand};
use cli::handlers::{RenderArguments, handle_render, handle_summarize};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an input file into a standalone HTML page
    Render {
        /// JSON file with tokens, featureActivations and featureLabels
        input_path: String,
        /// Where to write the page, stdout when omitted
        #[arg(short, long)]
        output_path: Option<String>,
        /// Page title
        #[arg(long, default_value = "SAE feature activations")]
        title: String,
        /// JSON render config
        #[arg(long)]
        config_path: Option<String>,
        /// Bundle to inline into the page
        #[arg(long)]
        bundle_path: Option<String>,
        /// Module to import the component from
        #[arg(long)]
        cdn_url: Option<String>,
    },
    /// Print features ranked by a metric and the top features of each token
    Summarize {
        /// JSON file with tokens, featureActivations and featureLabels
        input_path: String,
        /// One of max, l1, l0; defaults to the input's initial ranking metric
        #[arg(short, long)]
        metric: Option<String>,
        /// Number of ranked features to print
        #[arg(short, long)]
        top: Option<usize>,
    },
}

fn main() {
    let _ = env_logger::try_init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input_path,
            output_path,
            title,
            config_path,
            bundle_path,
            cdn_url,
        }) => handle_render(RenderArguments {
            input_path,
            output_path,
            title,
            config_path,
            bundle_path,
            cdn_url,
        }),
        Some(Commands::Summarize {
            input_path,
            metric,
            top,
        }) => handle_summarize(input_path, metric, top),
        None => {
            let mut cmd = Cli::command();
            cmd.print_help().map_err(Into::into)
        },
    };

    if let Err(error) = result {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
