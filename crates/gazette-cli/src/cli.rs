//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Gazette - Turn scraped news articles into a structured daily brief.
#[derive(Debug, Parser)]
#[command(name = "gazette")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (headings only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the pipeline over a batch of scraped articles
    Run(RunArgs),

    /// Classify a single article by keyword scoring
    Classify(ClassifyArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// JSON file holding an array of {title, url, text, image_path?}
    #[arg(short, long)]
    pub input: Option<String>,

    /// Read the article array from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Skip remote tiers and use only the deterministic summarizer
    #[arg(long)]
    pub offline: bool,

    /// Disable web enrichment
    #[arg(long)]
    pub no_enrich: bool,

    /// Print run metrics after the records
    #[arg(long)]
    pub metrics: bool,

    /// API key for the primary tier
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub primary_key: Option<String>,

    /// API key for the secondary tier
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub secondary_key: Option<String>,

    /// API key for web search enrichment
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub search_key: Option<String>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Article title
    #[arg(short, long)]
    pub title: String,

    /// Article text
    #[arg(short = 'x', long)]
    pub text: String,

    /// Category label proposed by a model, tried before keyword scoring
    #[arg(short, long)]
    pub label: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Start from a preset instead of the defaults
        #[arg(short, long, value_enum)]
        preset: Option<PresetArg>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Pipeline configuration presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Tight caps, short budgets
    Aggressive,
    /// Loose caps, generous budgets
    Lenient,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for gazette_pipeline::PipelineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Aggressive => gazette_pipeline::PipelineConfig::aggressive(),
            PresetArg::Lenient => gazette_pipeline::PipelineConfig::lenient(),
        }
    }
}
