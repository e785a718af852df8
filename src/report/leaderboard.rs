use std::collections::HashMap;

use clap::ValueEnum;
use serde::Serialize;

use super::post::Post;
use crate::error::ReportError;
use crate::record::NOT_AVAILABLE;

pub const LEADERBOARD_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Posts,
    Likes,
    Comments,
    #[value(name = "engagement", alias = "total-engagement")]
    TotalEngagement,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Posts,
        Metric::Likes,
        Metric::Comments,
        Metric::TotalEngagement,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Metric::Posts => "Posts",
            Metric::Likes => "Likes",
            Metric::Comments => "Comments",
            Metric::TotalEngagement => "Total Engagement",
        }
    }

    fn value(self, post: &Post) -> u64 {
        match self {
            Metric::Posts => 1,
            Metric::Likes => post.likes,
            Metric::Comments => post.comments,
            Metric::TotalEngagement => post.total_engagement(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    /// First real picture seen for this name. A user who changed avatar
    /// between posts still gets just one.
    pub profile_picture: Option<String>,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub metric: Metric,
    pub entries: Vec<LeaderboardEntry>,
}

/// Per-user totals of `metric`, highest first, top `limit`. Users with equal
/// totals keep the order they first appear in the table. A total that
/// overflows `u64` is an error, never a wrapped value.
pub fn leaderboard(
    posts: &[Post],
    metric: Metric,
    limit: usize,
) -> Result<Leaderboard, ReportError> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (u64, Option<&str>)> = HashMap::new();

    for post in posts {
        let entry = totals.entry(post.name.as_str()).or_insert_with(|| {
            order.push(post.name.as_str());
            (0, None)
        });
        entry.0 = entry
            .0
            .checked_add(metric.value(post))
            .ok_or_else(|| ReportError::Overflow {
                metric: metric.title(),
                name: post.name.clone(),
            })?;
        if entry.1.is_none() && has_picture(&post.profile_picture) {
            entry.1 = Some(post.profile_picture.as_str());
        }
    }

    let mut rows: Vec<(&str, u64, Option<&str>)> = order
        .into_iter()
        .map(|name| {
            let (value, picture) = totals[name];
            (name, value, picture)
        })
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = rows
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (name, value, picture))| LeaderboardEntry {
            rank: i + 1,
            name: name.to_string(),
            profile_picture: picture.map(str::to_string),
            value,
        })
        .collect();

    Ok(Leaderboard { metric, entries })
}

fn has_picture(url: &str) -> bool {
    let url = url.trim();
    !url.is_empty() && url != NOT_AVAILABLE
}
