pub mod filter;
pub mod leaderboard;
pub mod post;
pub mod rank;
pub mod render;
pub mod timeline;

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::table::load_posts;
use filter::{filter_month, ALL_MONTHS};
use leaderboard::{leaderboard, Leaderboard, Metric, LEADERBOARD_SIZE};
use post::{type_records, Post};
use rank::{category_counts, owner_split, top_posts, CategoryCount, OwnerSplit, TopPosts};
use timeline::{bucket_counts, Bucket, BucketCount, StackedSeries};

pub const TOP_POSTS: usize = 10;
pub const TOP_POSTS_SHOWN: usize = 5;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub month: Option<String>,
    pub owner: Option<String>,
    /// Leaderboards to compute; empty means all of them.
    pub metrics: Vec<Metric>,
    pub bucket: Bucket,
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            month: None,
            owner: None,
            metrics: Vec::new(),
            bucket: Bucket::default(),
            top: TOP_POSTS,
        }
    }
}

/// Every view of the dashboard, computed once.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub community: String,
    pub month: String,
    pub total_posts: usize,
    pub bucket: Bucket,
    pub timeline: Vec<BucketCount>,
    pub stacked: StackedSeries,
    pub categories: Vec<CategoryCount>,
    pub top_posts: TopPosts,
    pub top_posts_excluding_owner: Option<TopPosts>,
    pub owner_split: Option<OwnerSplit>,
    pub leaderboards: Vec<Leaderboard>,
}

impl Dashboard {
    pub fn build(community: &str, posts: Vec<Post>, opts: &ReportOptions) -> Result<Self> {
        let month = opts.month.as_deref().unwrap_or(ALL_MONTHS);
        let posts = filter_month(posts, month)?;
        let owner = opts
            .owner
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty());

        let timeline = bucket_counts(&posts, opts.bucket);
        let stacked = StackedSeries::from_counts(&timeline);
        let metrics = if opts.metrics.is_empty() {
            Metric::ALL.to_vec()
        } else {
            opts.metrics.clone()
        };
        let leaderboards = metrics
            .into_iter()
            .map(|m| leaderboard(&posts, m, LEADERBOARD_SIZE))
            .collect::<Result<Vec<_>, _>>()?;
        let ranked = |exclude: Option<&str>| {
            TopPosts::new(top_posts(&posts, opts.top, exclude), TOP_POSTS_SHOWN)
        };

        Ok(Self {
            community: community.to_string(),
            month: month.to_string(),
            total_posts: posts.len(),
            bucket: opts.bucket,
            timeline,
            stacked,
            categories: category_counts(&posts),
            top_posts: ranked(None),
            top_posts_excluding_owner: owner.map(|o| ranked(Some(o))),
            owner_split: owner.map(|o| owner_split(&posts, o)),
            leaderboards,
        })
    }
}

/// Load and validate a scraped table. Nothing is rendered if any row fails.
pub fn load(path: &Path) -> Result<Vec<Post>> {
    let records = load_posts(path)?;
    let posts = type_records(records)?;
    info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

/// Community identifier shown in the report: the CSV's file stem.
pub fn community_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LoadError, ReportError};

    const FIXTURE: &str = "tests/fixtures/ai-lab.csv";

    #[test]
    fn fixture_dashboard() {
        let posts = load(Path::new(FIXTURE)).unwrap();
        assert_eq!(posts.len(), 8);

        let opts = ReportOptions {
            owner: Some("Sam Owner".into()),
            ..Default::default()
        };
        let d = Dashboard::build(&community_name(Path::new(FIXTURE)), posts, &opts).unwrap();

        assert_eq!(d.community, "ai-lab");
        assert_eq!(d.total_posts, 8);
        assert_eq!(d.categories[0].category, "General");
        assert_eq!(d.categories[0].count, 4);
        assert_eq!(d.top_posts.ranking[0].name, "Sam Owner");
        assert_eq!(d.top_posts.ranking[0].total_engagement, 57);
        // 8 rows: the top-10 ranking holds them all, the highlights the first 5
        assert_eq!(d.top_posts.ranking.len(), 8);
        assert_eq!(d.top_posts.highlights.len(), TOP_POSTS_SHOWN);
        assert_eq!(d.top_posts.highlights[..], d.top_posts.ranking[..TOP_POSTS_SHOWN]);

        let without = d.top_posts_excluding_owner.as_ref().unwrap();
        assert!(without.ranking.iter().all(|p| p.name != "Sam Owner"));
        assert_eq!(without.ranking.len(), 6);
        assert_eq!(without.highlights.len(), TOP_POSTS_SHOWN);
        assert_eq!(without.ranking[0].title, "My first automation");

        let split = d.owner_split.as_ref().unwrap();
        assert_eq!((split.owner_posts, split.member_posts), (2, 6));

        assert_eq!(d.leaderboards.len(), 4);
        assert_eq!(d.leaderboards[0].metric, Metric::Posts);
        assert_eq!(d.leaderboards[0].entries[0].name, "Lena Park");
        assert_eq!(d.leaderboards[0].entries[0].value, 3);
    }

    #[test]
    fn month_and_metric_selection() {
        let posts = load(Path::new(FIXTURE)).unwrap();
        let opts = ReportOptions {
            month: Some("February 2024".into()),
            metrics: vec![Metric::Likes],
            bucket: Bucket::Day,
            top: 2,
            ..Default::default()
        };
        let d = Dashboard::build("ai-lab", posts, &opts).unwrap();
        assert_eq!(d.total_posts, 3);
        assert_eq!(d.leaderboards.len(), 1);
        assert!(d.top_posts.ranking.len() <= 2);
        assert!(d.top_posts.highlights.len() <= 2);
        assert!(d.top_posts_excluding_owner.is_none());
        assert!(d.owner_split.is_none());
        assert!(d.timeline.iter().all(|b| b.start.format("%m").to_string() == "02"));
    }

    #[test]
    fn unknown_month_is_an_error() {
        let posts = load(Path::new(FIXTURE)).unwrap();
        let opts = ReportOptions {
            month: Some("June 1999".into()),
            ..Default::default()
        };
        let err = Dashboard::build("ai-lab", posts, &opts).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::UnknownMonth { .. })));
    }

    #[test]
    fn leaderboard_overflow_fails_the_report() {
        let mut posts = load(Path::new(FIXTURE)).unwrap();
        posts.push(post::tests::post(
            "Lena Park",
            "01/02/2024",
            "General",
            u64::MAX,
            0,
        ));
        let opts = ReportOptions {
            metrics: vec![Metric::Likes],
            ..Default::default()
        };
        let err = Dashboard::build("ai-lab", posts, &opts).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::Overflow { .. })));
    }

    #[test]
    fn bad_fixture_rejected() {
        let err = load(Path::new("tests/fixtures/bad-date.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BadDate { row: 2, .. })
        ));
    }

    #[test]
    fn dashboard_serializes() {
        let posts = load(Path::new(FIXTURE)).unwrap();
        let d = Dashboard::build("ai-lab", posts, &ReportOptions::default()).unwrap();
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["community"], "ai-lab");
        assert_eq!(json["bucket"], "week");
        assert_eq!(json["leaderboards"][3]["metric"], "total_engagement");
        assert!(json["top_posts_excluding_owner"].is_null());
        assert_eq!(json["top_posts"]["highlights"].as_array().unwrap().len(), 5);
    }
}
