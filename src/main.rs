#![forbid(unsafe_code)]
//! Bottleneck Quiz Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use quiz::commands::{
    execute_diagnose, execute_play, execute_validate, execute_zones, is_config_failure,
    DiagnoseOptions, PlayOptions, ValidateOptions, ZonesOptions,
};
use quiz::diagnosis::{CliOverrides, OutputFormat};
use quiz::Config;

#[derive(Parser)]
#[command(name = "quiz")]
#[command(about = "Bottleneck quiz - find what is really holding growth back")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".quiz.config.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Flags shared by commands that render results
#[derive(clap::Args, Debug, Clone, Default)]
struct TemplateArgs {
    /// Twist threshold in [0, 1]
    #[arg(long)]
    threshold: Option<f64>,

    /// Expert name for {EXPERT}
    #[arg(long)]
    expert: Option<String>,

    /// Product name for {PRODUCT}
    #[arg(long)]
    product: Option<String>,

    /// Code word for {CODE_WORD}
    #[arg(long)]
    code_word: Option<String>,
}

impl From<TemplateArgs> for CliOverrides {
    fn from(args: TemplateArgs) -> Self {
        CliOverrides {
            twist_threshold: args.threshold,
            expert_name: args.expert,
            product: args.product,
            code_word: args.code_word,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Play {
        /// Skip the self-diagnosis question
        #[arg(long)]
        short: bool,

        /// Print the session outcome as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        template: TemplateArgs,
    },

    /// Diagnose a finished answer state
    Diagnose {
        /// JSON file with a serialized answer state
        #[arg(short, long)]
        answers: Option<PathBuf>,

        /// Raw score as zone=points (can specify multiple)
        #[arg(short, long = "score")]
        scores: Vec<String>,

        /// Zone the user believes is the problem
        #[arg(short, long)]
        perceived: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Shorthand for --format json
        #[arg(long)]
        json: bool,

        /// Print the score breakdown
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        template: TemplateArgs,
    },

    /// Validate a content file
    Validate {
        /// Content file (JSON or YAML); the configured one when omitted
        file: Option<PathBuf>,
    },

    /// List zones in tie-break order
    Zones {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", style("✗").red(), err);
        if is_config_failure(&err) {
            eprintln!("  Run 'quiz validate' to check the content file");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Load config
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { short, json, template } => {
            let options = PlayOptions {
                short,
                json,
                overrides: template.into(),
            };
            execute_play(options, &config)?;
        }

        Commands::Diagnose { answers, scores, perceived, format, json, explain, template } => {
            let options = DiagnoseOptions {
                answers,
                scores,
                perceived,
                format: if json { OutputFormat::Json } else { format },
                explain,
                overrides: template.into(),
            };
            execute_diagnose(options, &config)?;
        }

        Commands::Validate { file } => {
            let options = ValidateOptions { file };
            execute_validate(options, &config)?;
        }

        Commands::Zones { json } => {
            execute_zones(ZonesOptions { json }, &config)?;
        }
    }

    Ok(())
}

/// RUST_LOG wins, then --verbose, then the configured level
fn init_logging(config: &Config, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.logging.level.as_str() };
        EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
