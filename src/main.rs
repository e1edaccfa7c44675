//! # answerbench CLI
//!
//! Command-line front end for the answerability benchmark.
//!
//! ## Subcommands
//!
//! - `run`: Crawl a site and score how well it answers a set of questions
//! - `crawl`: Crawl and chunk only, to inspect what the benchmark would see
//! - `questions`: Print the default question set
//!
//! API keys come from `--api-key` or the provider's environment variable
//! (`OPENAI_API_KEY`, `GEMINI_API_KEY`).

mod telemetry;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use answerbench::benchmark::{
    Benchmark, BenchmarkConfig, BenchmarkEvent, BenchmarkReport, QueryStatus, default_questions,
    load_questions, resolve_questions,
};
use answerbench::cancel::CancelToken;
use answerbench::crawler::{CrawlerConfig, HttpFetcher, crawl_website};
use answerbench::model::{LlmProvider, ModelConfig};
use answerbench::processor::{ChunkOptions, build_index};
use clap::{Args, CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use telemetry::TelemetryOptions;
use tokio::sync::mpsc;
use tracing::{instrument, warn};

#[derive(Parser)]
#[command(author, version, about = "Measure how well a website answers common customer questions", long_about = None)]
struct Cli {
    /// Export traces and metrics over OTLP
    #[arg(long, global = true)]
    otel: bool,

    /// Also write logs to daily files in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the answerability benchmark against a website
    Run(RunArgs),

    /// Crawl a website and chunk its content without asking any questions
    Crawl(CrawlArgs),

    /// Print the default benchmark questions
    Questions(QuestionsArgs),
}

#[derive(Args, Debug)]
struct CrawlBounds {
    /// Maximum number of pages to crawl
    #[arg(short = 'p', long, default_value = "15")]
    max_pages: usize,

    /// Maximum links followed from a single page
    #[arg(long, default_value = "50")]
    max_links: usize,

    /// Do not queue well-known paths (/contact, /pricing, ...) ahead of the seed
    #[arg(long)]
    no_priority_paths: bool,
}

impl CrawlBounds {
    fn crawler_config(&self) -> CrawlerConfig {
        let mut builder = CrawlerConfig::builder()
            .max_pages(self.max_pages)
            .max_links_per_page(self.max_links);
        if self.no_priority_paths {
            builder = builder.priority_paths(Vec::new());
        }
        builder.build()
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Website to benchmark
    #[arg(required = true)]
    url: String,

    /// Question to ask (repeatable, replaces the default set)
    #[arg(short, long = "question")]
    questions: Vec<String>,

    /// Read questions from a file, one per line or a JSON array if *.json
    #[arg(long, conflicts_with = "questions")]
    questions_file: Option<PathBuf>,

    #[command(flatten)]
    bounds: CrawlBounds,

    /// Chunks handed to the model per question
    #[arg(short = 'k', long, default_value = "3")]
    top_k: usize,

    /// Best-chunk score below which a question is not sent to the model
    #[arg(short, long, default_value = "0.2")]
    threshold: f64,

    /// Completion provider (openai|gemini)
    #[arg(long, default_value = "openai")]
    provider: LlmProvider,

    /// Model name (default depends on the provider)
    #[arg(short, long)]
    model: Option<String>,

    /// API key, overrides the provider's environment variable
    #[arg(long, hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide = true, hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, env = "GEMINI_API_KEY", hide = true, hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Base URL for an OpenAI-compatible endpoint
    #[arg(long)]
    api_base: Option<String>,

    /// Questions answered concurrently
    #[arg(short, long, default_value = "4")]
    concurrency: usize,

    /// Cancel the run after this many seconds and report what finished
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Write the JSON report to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

impl RunArgs {
    fn api_key(&self) -> Option<String> {
        let from_env = match self.provider {
            LlmProvider::OpenAi => &self.openai_api_key,
            LlmProvider::Gemini => &self.gemini_api_key,
        };
        self.api_key.clone().or_else(|| from_env.clone())
    }

    fn benchmark_config(&self) -> BenchmarkConfig {
        let mut model = ModelConfig::builder()
            .provider(self.provider)
            .maybe_api_key(self.api_key())
            .api_base(self.api_base.clone());
        if let Some(name) = &self.model {
            model = model.model(name.clone());
        }

        BenchmarkConfig::builder()
            .crawler(self.bounds.crawler_config())
            .top_k(self.top_k)
            .relevance_threshold(self.threshold)
            .model(model.build())
            .query_concurrency(self.concurrency)
            .build()
    }
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// URL to crawl
    #[arg(required = true)]
    url: String,

    #[command(flatten)]
    bounds: CrawlBounds,

    /// Chunk size in words
    #[arg(short, long, default_value = "800")]
    chunk_size: usize,

    /// Words shared by consecutive chunks
    #[arg(long, default_value = "120")]
    overlap: usize,

    /// Save crawled pages and chunks to file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct QuestionsArgs {
    /// Output format (text|json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _telemetry = telemetry::init_tracing_subscriber(TelemetryOptions {
        otel: cli.otel,
        log_dir: cli.log_dir.as_deref(),
    })?;

    match cli.command {
        Some(Commands::Run(args)) => {
            run_command(args).await?;
        }
        Some(Commands::Crawl(args)) => {
            crawl_command(args).await?;
        }
        Some(Commands::Questions(args)) => {
            questions_command(args)?;
        }
        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

#[instrument(skip(args), fields(url = %args.url))]
async fn run_command(args: RunArgs) -> anyhow::Result<()> {
    let questions = match &args.questions_file {
        Some(path) => load_questions(path).await?,
        None => resolve_questions(Some(args.questions.clone())),
    };

    // Fails on a missing key before anything is fetched
    let benchmark = Benchmark::from_config(args.benchmark_config())?;

    let cancel = CancelToken::new();
    if let Some(secs) = args.deadline_secs {
        cancel.cancel_after(Duration::from_secs(secs));
    }
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, finishing with partial results");
                cancel.cancel();
            }
        }
    });

    let (event_sender, event_receiver) = mpsc::unbounded_channel();
    let benchmark = benchmark.with_events(event_sender);
    let progress_handle = tokio::spawn(track_progress(event_receiver, questions.len()));

    let report = benchmark
        .run_with_cancel(&args.url, Some(questions), &cancel)
        .await?;

    // Closes the event channel so the progress task ends
    drop(benchmark);
    let _ = progress_handle.await;

    if let Some(output_file) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(output_file, json)
            .await
            .with_context(|| format!("Failed to write {}", output_file.display()))?;
        eprintln!("Saved report to {}", output_file.display());
    }

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_report(&report),
    }

    Ok(())
}

/// Spinner while crawling, then a bar across questions
async fn track_progress(mut events: mpsc::UnboundedReceiver<BenchmarkEvent>, total: usize) {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Crawling...");

    let progress_bar = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        progress_bar.set_style(style.progress_chars("##-"));
    }

    while let Some(event) = events.recv().await {
        match event {
            BenchmarkEvent::CrawlFinished { pages, chunks } => {
                spinner.finish_with_message(format!("Crawled {pages} pages, {chunks} chunks"));
                progress_bar.reset_elapsed();
            }
            BenchmarkEvent::QueryFinished { query, status, .. } => {
                progress_bar.inc(1);
                progress_bar.set_message(format!("{} {}", status_label(status), query));
            }
        }
    }

    spinner.finish_and_clear();
    progress_bar.finish_with_message("Done");
}

fn status_label(status: QueryStatus) -> &'static str {
    match status {
        QueryStatus::Answered => "answered",
        QueryStatus::NotFound => "not found",
    }
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn print_report(report: &BenchmarkReport) {
    println!("\nSite: {}", report.site_url);
    println!(
        "Crawled {} pages, indexed {} chunks",
        report.crawled_pages, report.indexed_chunks
    );
    if report.cancelled {
        println!("Run was cancelled before every question finished");
    }

    let scores = &report.overall_scores;
    println!("\nScores:");
    println!("  Answerability:     {}", percent(scores.answerability_rate));
    println!("  Citation coverage: {}", percent(scores.citation_coverage));
    println!("  Hallucination:     {}", percent(scores.hallucination_rate));
    println!("  Completeness:      {}", percent(scores.completeness));

    println!("\nQuestions:");
    for (i, result) in report.query_results.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, status_label(result.status), result.query);
        println!("   {}", result.answer);
        for citation in &result.citations {
            println!("   - {}", citation.url);
        }
    }

    if !report.missing_topics.is_empty() {
        println!("\nMissing topics:");
        for topic in &report.missing_topics {
            println!("  - {}", topic);
        }
    }
    println!();
}

#[instrument(skip(args), fields(url = %args.url))]
async fn crawl_command(args: CrawlArgs) -> anyhow::Result<()> {
    let chunk_options = ChunkOptions::new(args.chunk_size, args.overlap)?;
    let config = args.bounds.crawler_config();
    let fetcher = HttpFetcher::new(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Crawling {}...", args.url));

    let pages = crawl_website(&fetcher, &args.url, &config, &CancelToken::new()).await?;
    let chunks = build_index(&pages, &chunk_options)?;
    spinner.finish_and_clear();

    println!("Crawled {} pages", pages.len());
    for page in &pages {
        println!("  {} ({} chars) {}", page.url, page.text.len(), page.title);
    }
    println!("Created {} chunks", chunks.len());

    if let Some(output_file) = args.output {
        let json = serde_json::to_string_pretty(&serde_json::json!({
            "pages": pages,
            "chunks": chunks,
        }))?;
        tokio::fs::write(&output_file, json).await?;
        println!("Saved crawled content to {}", output_file.display());
    }

    Ok(())
}

fn questions_command(args: QuestionsArgs) -> anyhow::Result<()> {
    let questions = default_questions();
    match args.format.as_str() {
        "json" => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "questions": questions }))?
            );
        }
        _ => {
            for (i, question) in questions.iter().enumerate() {
                println!("{}. {}", i + 1, question);
            }
        }
    }
    Ok(())
}
