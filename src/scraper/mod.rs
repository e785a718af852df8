pub mod browser;
pub mod crawl;
pub mod extract;
pub mod selectors;
pub mod session;

#[cfg(test)]
pub mod fake;

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::{BrowserConfig, Credentials};
use crate::dedup::remove_duplicates;
use crate::record::PostRecord;
use browser::Session;
use crawl::{crawl, CrawlOutcome, StopReason};
use session::BrowserSession;

pub struct ScrapeStats {
    pub pages: usize,
    pub collected: usize,
    pub kept: usize,
    pub stop: StopReason,
}

/// Log in, crawl one community feed and return its deduplicated posts.
/// The browser session is closed on every path out of here.
pub async fn scrape_community(
    creds: &Credentials,
    config: BrowserConfig,
    community_url: &str,
) -> Result<(Vec<PostRecord>, ScrapeStats)> {
    let max_stalls = config.max_stalls;
    let session = BrowserSession::launch(config).await?;
    let outcome = crawl_session(session, creds, community_url, max_stalls, Utc::now).await?;

    let collected = outcome.records.len();
    let posts = remove_duplicates(outcome.records);
    info!("Removed {} duplicate posts", collected - posts.len());

    let stats = ScrapeStats {
        pages: outcome.pages,
        collected,
        kept: posts.len(),
        stop: outcome.stop,
    };
    Ok((posts, stats))
}

/// Sign in, crawl the feed, then quit the session whether or not any of
/// that succeeded.
async fn crawl_session<S: Session>(
    session: S,
    creds: &Credentials,
    community_url: &str,
    max_stalls: u32,
    clock: impl Fn() -> DateTime<Utc>,
) -> Result<CrawlOutcome> {
    let result = async {
        session.login(creds).await?;
        session.open_feed(community_url).await?;

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(120));
        let outcome = crawl(&session, max_stalls, clock, &pb).await;
        pb.finish_and_clear();
        outcome
    }
    .await;

    session.quit().await;
    result
}
