use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use paperscope::arxiv::client::ArxivClient;
use paperscope::config::Config;
use paperscope::output::{histogram, terminal};
use paperscope::pipeline::search::{self, SearchResult};

/// Paperscope: what are arXiv papers about a term talking about?
///
/// Fetches recent arXiv papers for a search term and reports their most
/// important title terms, publication dates and categories.
#[derive(Parser)]
#[command(name = "paperscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search arXiv and print the term/category report
    Search {
        /// The term to search for (e.g. "graph neural networks")
        term: String,

        /// Papers to fetch (default: PAPERSCOPE_MAX_RESULTS or 20)
        #[arg(long)]
        max_results: Option<usize>,

        /// Number of top terms to report (default: PAPERSCOPE_TOP_N or 10)
        #[arg(long)]
        top_n: Option<usize>,

        /// Buckets in the publication histogram
        #[arg(long, default_value_t = histogram::DEFAULT_BINS)]
        bins: usize,

        /// Print the raw result as JSON instead of the report
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("paperscope=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            term,
            max_results,
            top_n,
            bins,
            json,
        } => {
            let mut config = Config::load()?;
            if let Some(n) = max_results {
                config.max_results = n;
            }
            if let Some(n) = top_n {
                config.top_n = n;
            }
            config.validate()?;

            let term = term.trim().to_string();
            if term.is_empty() {
                anyhow::bail!("Search term is empty");
            }

            let client = ArxivClient::new(&config.api_url, config.timeout)?;
            let settings = config.search_settings();

            info!(term = %term, max_results = settings.max_results, "Searching arXiv");

            let spinner = if json { None } else { Some(searching_spinner(&term)) };
            let outcome = search::run_search(&client, &term, &settings).await;
            if let Some(pb) = spinner {
                pb.finish_and_clear();
            }

            match outcome {
                Ok(result) if json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                Ok(result) => render_report(&result, bins),
                Err(e) => {
                    eprintln!("{} {}", "Search failed:".red().bold(), e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn searching_spinner(term: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Querying arXiv for \"{term}\"..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn render_report(result: &SearchResult, bins: usize) {
    terminal::display_header(result);
    terminal::display_recent_articles(result);
    terminal::display_top_terms(result);
    terminal::display_score_chart(result);
    terminal::display_term_counts(result);
    terminal::display_histogram(&histogram::bin_dates(&result.dates(), bins));
    terminal::display_categories(&result.categories());
    println!();
}
