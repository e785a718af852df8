mod config;
mod dedup;
mod error;
mod normalize;
mod record;
mod report;
mod scraper;
mod table;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use config::{BrowserConfig, Credentials};
use record::PostRecord;
use report::leaderboard::Metric;
use report::timeline::Bucket;
use report::{Dashboard, ReportOptions};

#[derive(Parser)]
#[command(name = "skool_scraper", about = "Skool community post scraper and engagement report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, crawl a community feed and save its posts as CSV
    Scrape {
        /// Community URL, e.g. https://www.skool.com/my-community
        url: String,
        /// Output file ("-" for stdout). Default: named after the community
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Directory for the default output file
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// WebDriver endpoint (falls back to WEBDRIVER_URL, then chromedriver's default)
        #[arg(long)]
        webdriver: Option<String>,
        /// Pause after each page turn, in milliseconds
        #[arg(long)]
        settle_ms: Option<u64>,
        /// Give up after this many page turns that show the same posts
        #[arg(long)]
        max_stalls: Option<u32>,
        /// Show the browser window
        #[arg(long)]
        headful: bool,
    },
    /// Engagement report from a scraped CSV
    Report {
        csv: PathBuf,
        /// Only posts from this month, e.g. "January 2024"
        #[arg(short, long)]
        month: Option<String>,
        /// Community owner, excluded from the second top-posts table
        #[arg(long)]
        owner: Option<String>,
        /// Leaderboard to show (default: all four)
        #[arg(long, value_enum)]
        metric: Option<Metric>,
        /// Time-series granularity
        #[arg(long, value_enum, default_value_t = Bucket::Week)]
        bucket: Bucket,
        /// Number of top posts to list
        #[arg(long, default_value_t = report::TOP_POSTS)]
        top: usize,
        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the month filter options present in a scraped CSV
    Months { csv: PathBuf },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape {
            url,
            out,
            out_dir,
            webdriver,
            settle_ms,
            max_stalls,
            headful,
        } => {
            dotenvy::dotenv().ok();
            let creds = Credentials::from_env()?;

            let mut config = BrowserConfig::resolve(webdriver);
            config.headless = !headful;
            if let Some(ms) = settle_ms {
                config.settle_delay = std::time::Duration::from_millis(ms);
            }
            if let Some(n) = max_stalls {
                config.max_stalls = n.max(1);
            }

            let (posts, stats) = scraper::scrape_community(&creds, config, &url).await?;
            match write_output(&posts, out, &out_dir, &url)? {
                None => println!("No data collected, CSV not saved."),
                Some(path) if path == Path::new("-") => {}
                Some(path) => println!("Wrote {}", path.display()),
            }
            eprintln!(
                "Done: {} pages, {} posts collected, {} kept after dedup ({}).",
                stats.pages, stats.collected, stats.kept, stats.stop
            );
            Ok(())
        }
        Commands::Report {
            csv,
            month,
            owner,
            metric,
            bucket,
            top,
            json,
        } => {
            let posts = report::load(&csv)?;
            let opts = ReportOptions {
                month,
                owner,
                metrics: metric.into_iter().collect(),
                bucket,
                top,
            };
            let dashboard = Dashboard::build(&report::community_name(&csv), posts, &opts)?;
            if json {
                let text = serde_json::to_string_pretty(&dashboard)
                    .context("Failed to serialize dashboard")?;
                println!("{}", text);
            } else {
                report::render::print_dashboard(&dashboard);
            }
            Ok(())
        }
        Commands::Months { csv } => {
            let posts = report::load(&csv)?;
            report::render::print_months(&report::filter::month_options(&posts));
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Save the scraped table to `out` ("-" is stdout) or to the community's
/// default file in `out_dir`. Nothing is written for an empty crawl.
fn write_output(
    posts: &[PostRecord],
    out: Option<PathBuf>,
    out_dir: &Path,
    url: &str,
) -> anyhow::Result<Option<PathBuf>> {
    if posts.is_empty() {
        return Ok(None);
    }
    let path = out.unwrap_or_else(|| out_dir.join(table::file_name_for(url)));
    if path == Path::new("-") {
        table::write_posts(std::io::stdout().lock(), posts)?;
    } else {
        table::save_posts(&path, posts)?;
    }
    Ok(Some(path))
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
