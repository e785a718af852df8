use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use super::browser::FeedPage;
use super::extract::extract_post;
use crate::record::{PostKey, PostRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No "next" control left.
    Exhausted,
    /// "Next" kept being clicked without the posts changing.
    Stalled,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StopReason::Exhausted => "exhausted",
            StopReason::Stalled => "stalled",
        })
    }
}

#[derive(Debug)]
pub struct CrawlOutcome {
    pub records: Vec<PostRecord>,
    pub pages: usize,
    pub stop: StopReason,
}

/// Read every page of the feed, in order. Records are returned as seen,
/// duplicates included.
///
/// A page whose posts are identical to the previous page counts as a stall;
/// `max_stalls` consecutive stalls end the crawl.
pub async fn crawl<P: FeedPage>(
    page: &P,
    max_stalls: u32,
    clock: impl Fn() -> DateTime<Utc>,
    pb: &ProgressBar,
) -> Result<CrawlOutcome> {
    let mut records = Vec::new();
    let mut pages = 0usize;
    let mut stalls = 0u32;
    let mut previous: Option<HashSet<PostKey>> = None;

    let stop = loop {
        let cards = page.post_cards().await?;
        let now = clock();
        let mut batch = Vec::with_capacity(cards.len());
        for card in &cards {
            batch.push(extract_post(card, now).await?);
        }

        let keys: HashSet<PostKey> = batch.iter().map(PostRecord::key).collect();
        if previous.as_ref() == Some(&keys) {
            stalls += 1;
            warn!("Page unchanged after clicking next ({}/{})", stalls, max_stalls);
            if stalls >= max_stalls {
                break StopReason::Stalled;
            }
        } else {
            stalls = 0;
            pages += 1;
            debug!("Page {}: {} posts", pages, batch.len());
            records.extend(batch);
            previous = Some(keys);
        }
        pb.set_message(format!("page {} · {} posts", pages, records.len()));
        pb.tick();

        if !page.next_page().await? {
            break StopReason::Exhausted;
        }
        page.settle().await?;
    };

    info!("Collected {} posts over {} pages ({})", records.len(), pages, stop);
    Ok(CrawlOutcome {
        records,
        pages,
        stop,
    })
}
