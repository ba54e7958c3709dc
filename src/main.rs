//! Canopy main entry point
//!
//! This is the command-line interface for the Canopy directory crawler.

use anyhow::Context;
use canopy_crawler::config::{load_config_with_hash, Config};
use canopy_crawler::console::Console;
use canopy_crawler::crawler::Coordinator;
use canopy_crawler::output::{print_report, JsonLinesSink};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Canopy: a breadth-first web directory crawler
///
/// Canopy walks every subcategory below a root category of a web
/// directory and appends each listed site to a JSON Lines file. After a
/// root category is finished it asks for the next one until `q` is entered.
#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(version)]
#[command(about = "A breadth-first web directory crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root category to crawl first (prompted for when omitted)
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// JSON Lines file to append results to (prompted for when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Exit after the first root category instead of prompting for more
    #[arg(long)]
    once: bool,

    /// Validate config and show the effective settings without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(cli, config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("canopy_crawler=info,canopy=info,warn"),
            1 => EnvFilter::new("canopy_crawler=debug,canopy=debug,info"),
            2 => EnvFilter::new("canopy_crawler=trace,canopy=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Canopy Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Locale: {}", config.site.locale);

    println!("\nHTTP:");
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!(
        "  Requests per session: {}",
        config.http.session_max_requests
    );
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nBackoff:");
    println!("  Initial wait: {}s", config.backoff.initial_secs);
    println!("  Step: {}s", config.backoff.step_secs);

    println!("\nPage selectors:");
    println!("  Container: {}", config.page.container);
    println!("  Site title: {}", config.page.site_title);
    println!("  Site link: {}", config.page.site_link);
    println!("  Category list: {}", config.page.category_list);
    println!("  Category item: {}", config.page.category_item);
    println!("  Category link: {}", config.page.category_link);

    println!("\nOutput:");
    match &config.output.path {
        Some(path) => println!("  Results file: {}", path),
        None => println!("  Results file: (prompted at start)"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl loop over operator-supplied root categories
async fn handle_crawl(cli: Cli, config: Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());

    let first = match cli.category {
        Some(name) => Some(name),
        None => console.ask_root_category()?,
    };
    let Some(mut root) = first else {
        tracing::info!("No category given, nothing to crawl");
        return Ok(());
    };

    let output = match cli.output.or(config.output.path.clone().map(PathBuf::from)) {
        Some(path) => path,
        None => match console.ask_output_file()? {
            Some(name) => PathBuf::from(name),
            None => {
                tracing::info!("No results file given, nothing to crawl");
                return Ok(());
            }
        },
    };

    let sink = JsonLinesSink::new(output);
    tracing::info!("Appending results to {}", sink.path().display());

    let mut coordinator = Coordinator::new(config).context("Failed to set up crawler")?;

    loop {
        let report = coordinator
            .crawl_one_category(&root, &sink)
            .await
            .with_context(|| format!("Crawl of '{}' failed", root))?;
        print_report(&report);

        if cli.once {
            break;
        }

        match console.ask_next_category()? {
            Some(next) => root = next,
            None => break,
        }
    }

    Ok(())
}
