//! ExamTopics scraper entry point
//!
//! Command-line surface for the crawl: parses arguments, sets up logging,
//! wires Ctrl-C into the cancellation flag, and prints the final counters.

use clap::Parser;
use examtopics_scraper::config::CrawlConfig;
use examtopics_scraper::crawler::crawl;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Scrape exam discussion content from examtopics.com
#[derive(Parser, Debug)]
#[command(name = "examtopics-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrape exam discussion content from examtopics.com", long_about = None)]
struct Cli {
    /// Company name (e.g. vmware, cisco, microsoft)
    #[arg(short, long)]
    company: String,

    /// Exam ID (e.g. 2v0-11.25, 200-301, az-104)
    #[arg(short, long)]
    exam_id: String,

    /// Output directory for scraped content
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Maximum number of listing pages to visit
    #[arg(long, default_value_t = 50)]
    max_pages: u32,

    /// Delay between requests in seconds
    #[arg(long, default_value_t = 2.0)]
    delay: f64,

    /// Run the browser with a visible window instead of headless
    #[arg(long)]
    no_headless: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if cli.delay < 0.0 {
        anyhow::bail!("delay must be >= 0 seconds, got {}", cli.delay);
    }

    let config = CrawlConfig {
        company: cli.company.to_lowercase(),
        exam_id: cli.exam_id,
        output_dir: cli.output_dir,
        max_pages: cli.max_pages,
        delay: Duration::from_secs_f64(cli.delay),
        headless: !cli.no_headless,
    };

    print_banner(&config, cli.delay);

    // Ctrl-C raises the flag; the crawl loop notices between steps, releases
    // the browser, and still reports the counters accumulated so far.
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current step");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let summary = crawl(config.clone(), cancel).await?;

    if summary.interrupted {
        println!(
            "\nScraping interrupted by user. Discussions saved: {}",
            summary.total_saved
        );
    } else {
        println!(
            "\nScraping completed! Total discussions saved: {}",
            summary.total_saved
        );
    }
    println!(
        "Files saved in: {}",
        config.output_dir.join(&config.exam_id).display()
    );

    Ok(())
}

/// Sets up the tracing subscriber based on the verbose flag
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("examtopics_scraper=debug,info")
    } else {
        EnvFilter::new("examtopics_scraper=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Echoes the effective configuration before the crawl starts
fn print_banner(config: &CrawlConfig, delay_secs: f64) {
    println!("Exam Topics Discussion Scraper");
    println!("{}", "=".repeat(40));
    println!("Company: {}", config.company);
    println!("Exam ID: {}", config.exam_id);
    println!("Output Directory: {}", config.output_dir.display());
    println!("Max Pages: {}", config.max_pages);
    println!("Delay: {}s", delay_secs);
    println!("Headless Mode: {}", config.headless);
    println!("{}", "=".repeat(40));
}
