//! Run command implementation.

use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use gazette_domain::RawArticle;
use gazette_llm::ChatCompletionsProvider;
use gazette_pipeline::{BatchRunner, Enricher, Orchestrator, Pipeline, PipelineConfig};
use gazette_web::{HttpPageFetcher, TavilySearcher};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::{info, warn};

type LivePipeline = Pipeline<ChatCompletionsProvider, TavilySearcher, HttpPageFetcher>;

/// Execute the run command.
///
/// The HTTP collaborators use blocking clients, so the pipeline is built and
/// dropped outside the runtime that drives the batch.
pub fn execute_run(
    args: RunArgs,
    pipeline_config: PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = &args.input {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --input or --stdin".to_string(),
        ));
    };

    let base_dir = args
        .input
        .as_deref()
        .and_then(|p| Path::new(p).parent())
        .map(Path::to_path_buf);
    let articles = parse_articles(&json_data, base_dir.as_deref())?;
    if articles.is_empty() {
        return Err(CliError::InvalidInput("No articles provided".to_string()));
    }

    let mut config = pipeline_config;
    if args.no_enrich {
        config.enrichment.enabled = false;
    }

    let pipeline = build_pipeline(&args, config)?;
    eprintln!("{}", formatter.info(&format!("Processing {} article(s)", articles.len())));

    let runner = BatchRunner::new(pipeline);
    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(runner.run(articles));
    drop(runtime);

    println!("{}", formatter.format_records(&report.records)?);
    if args.metrics {
        eprintln!("{}", formatter.format_metrics(&report.metrics));
    }

    Ok(())
}

/// Wire remote tiers and enrichment from the available keys.
fn build_pipeline(args: &RunArgs, config: PipelineConfig) -> Result<LivePipeline> {
    let mut orchestrator = Orchestrator::new(&config);

    if args.offline {
        info!("Offline mode: deterministic tier only");
    } else {
        match non_blank(&args.primary_key) {
            Some(key) => {
                let provider = remote_provider(
                    &config.tiers.primary_endpoint,
                    &config.tiers.primary_model,
                    key,
                    &config,
                )?;
                orchestrator = orchestrator.with_primary(provider);
            }
            None => warn!("No primary API key; primary tier disabled"),
        }

        match non_blank(&args.secondary_key) {
            Some(key) => {
                let provider = remote_provider(
                    &config.tiers.secondary_endpoint,
                    &config.tiers.secondary_model,
                    key,
                    &config,
                )?;
                orchestrator = orchestrator.with_secondary(provider);
            }
            None => warn!("No secondary API key; secondary tier disabled"),
        }
    }

    let search_key = non_blank(&args.search_key).filter(|_| !args.offline);
    let enrich = config.enrichment.enabled;
    let mut pipeline = Pipeline::new(orchestrator, config.clone());

    if enrich {
        match search_key {
            Some(key) => {
                let searcher = TavilySearcher::new(key)?
                    .with_max_retries(config.enrichment.max_retries)
                    .with_backoff(config.enrichment.backoff());
                let fetcher = HttpPageFetcher::new()?
                    .with_max_retries(config.enrichment.max_retries)
                    .with_backoff(config.enrichment.backoff());
                let enricher = Enricher::new(searcher, fetcher, &config);
                pipeline = pipeline.with_enricher(enricher);
            }
            None => warn!("No search API key; enrichment disabled"),
        }
    }

    Ok(pipeline)
}

fn remote_provider(
    endpoint: &str,
    model: &str,
    key: &str,
    config: &PipelineConfig,
) -> Result<ChatCompletionsProvider> {
    Ok(ChatCompletionsProvider::new(endpoint, model, key)?
        .with_timeout(config.tiers.request_timeout())?
        .with_max_retries(config.tiers.max_retries)
        .with_backoff(config.tiers.backoff()))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// One scraped article as supplied on input.
#[derive(Debug, Deserialize)]
struct ArticleInput {
    title: String,
    url: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    image_path: Option<String>,
}

impl ArticleInput {
    fn into_article(self, base_dir: Option<&Path>) -> RawArticle {
        let article = RawArticle::new(self.title, self.url, self.text);
        let Some(image_path) = self.image_path else {
            return article;
        };

        let path = match base_dir {
            Some(dir) if Path::new(&image_path).is_relative() => dir.join(&image_path),
            _ => Path::new(&image_path).to_path_buf(),
        };
        match fs::read(&path) {
            Ok(bytes) => article.with_image(bytes),
            Err(e) => {
                warn!(path = %path.display(), "Skipping unreadable image: {}", e);
                article
            }
        }
    }
}

/// Parse the article array, resolving relative image paths against `base_dir`.
fn parse_articles(json: &str, base_dir: Option<&Path>) -> Result<Vec<RawArticle>> {
    let inputs: Vec<ArticleInput> = serde_json::from_str(json)?;
    Ok(inputs
        .into_iter()
        .map(|input| input.into_article(base_dir))
        .collect())
}
