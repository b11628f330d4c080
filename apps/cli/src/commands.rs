//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};

use lokalize_core::pipeline::{self, ProgressReporter};
use lokalize_shared::{Backend, LocalizationRequest, QueryResult, init_config, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Lokalize — culturally aware fashion-marketing localization.
#[derive(Parser)]
#[command(
    name = "lokalize",
    version,
    about = "Scrape cultural sources into a knowledge base and ask localization questions.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Defaults to `demo` when no subcommand is given.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the full demo: scrape, chunk, ingest, and print sample Q&A pairs.
    Demo,

    /// Scrape, chunk, and ingest the configured sources without querying.
    Ingest,

    /// Ask one localization question against the knowledge base.
    Ask {
        /// The localization question.
        question: String,

        /// Target region (defaults to the configured region).
        #[arg(short, long)]
        region: Option<String>,

        /// Brand positioning context.
        #[arg(long)]
        brand: Option<String>,

        /// Product category.
        #[arg(long)]
        product: Option<String>,

        /// Campaign kind.
        #[arg(long)]
        campaign: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "lokalize=info",
        1 => "lokalize=debug",
        _ => "lokalize=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => cmd_demo().await,
        Command::Ingest => cmd_ingest().await,
        Command::Ask {
            question,
            region,
            brand,
            product,
            campaign,
        } => cmd_ask(question, region, brand, product, campaign).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_demo() -> Result<()> {
    let config = load_config()?;
    info!(sources = config.sources.urls.len(), "starting demo run");

    let reporter = CliProgress::new();

    let result = pipeline::run_demo(&config, &reporter).await?;
    reporter.finish();

    println!();
    println!(
        "  Demo complete in {:.1}s ({} backend)",
        result.elapsed.as_secs_f64(),
        backend_label(result.ingest.backend),
    );
    print_ingest_summary(&result.ingest);
    println!();

    for answer in &result.answers {
        print_answer(answer);
    }

    if result.ingest.backend == Backend::Mock {
        println!("  Running in mock mode. Set the configured API key and knowledge-base id");
        println!("  environment variables to run against the live service.");
        println!();
    }

    Ok(())
}

async fn cmd_ingest() -> Result<()> {
    let config = load_config()?;
    let reporter = CliProgress::new();

    let report = pipeline::run_ingest(&config, &reporter).await?;
    reporter.finish();

    println!();
    println!("  Ingestion finished ({} backend)", backend_label(report.backend));
    print_ingest_summary(&report);
    println!();

    Ok(())
}

async fn cmd_ask(
    question: String,
    region: Option<String>,
    brand: Option<String>,
    product: Option<String>,
    campaign: Option<String>,
) -> Result<()> {
    let config = load_config()?;

    let request = LocalizationRequest {
        question,
        target_region: region.unwrap_or_else(|| config.defaults.target_region.clone()),
        brand_context: brand,
        product_type: product,
        campaign_type: campaign,
    };

    info!(region = %request.target_region, "asking localization question");
    let result = pipeline::ask(&config, &request).await?;
    print_answer(&result);

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Created {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Output formatting
// ---------------------------------------------------------------------------

fn backend_label(backend: Backend) -> &'static str {
    match backend {
        Backend::Live => "live",
        Backend::Mock => "mock",
    }
}

fn print_ingest_summary(report: &pipeline::IngestReport) {
    println!(
        "  Documents: {} loaded, {} skipped",
        report.documents_loaded,
        report.failures.len()
    );
    println!(
        "  Chunks:    {} produced, {} accepted",
        report.chunk_count, report.chunks_accepted
    );
    if let Some(id) = &report.knowledge_base_id {
        println!("  KB id:     {id}");
    }
    if let Some(path) = &report.batch_path {
        println!("  Batch:     {}", path.display());
    }
    for (url, error) in &report.failures {
        println!("  Skipped:   {url} ({error})");
    }
}

fn print_answer(answer: &QueryResult) {
    println!("  ── {} ──", answer.question);
    println!();
    println!("{}", answer.advice);
    println!();
    if !answer.sources.is_empty() {
        println!("  Sources ({}):", answer.sources.len());
        for source in &answer.sources {
            let label = source.source_url.as_deref().unwrap_or("built-in profile");
            println!("   - [{:.2}] {label}", source.score);
        }
        println!();
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("static template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn question_asked(&self, question: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Asking [{current}/{total}] {question}"));
    }
}
