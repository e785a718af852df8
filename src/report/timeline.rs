use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::Serialize;

use super::post::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Day,
    #[default]
    Week,
}

impl Bucket {
    /// First day of the bucket holding `date`. Weeks are ISO weeks and
    /// start on Monday.
    pub fn start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Day => date,
            Bucket::Week => {
                let iso = date.iso_week();
                NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon).unwrap_or(date)
            }
        }
    }

    pub fn label(self, start: NaiveDate) -> String {
        match self {
            Bucket::Day => start.format("%d %b %Y").to_string(),
            Bucket::Week => {
                let iso = start.iso_week();
                format!(
                    "{}-W{:02} (w/c {})",
                    iso.year(),
                    iso.week(),
                    start.format("%d %b %Y")
                )
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub start: NaiveDate,
    pub label: String,
    pub category: String,
    pub count: usize,
}

/// Post counts per (period, category), ordered by period then category.
pub fn bucket_counts(posts: &[Post], bucket: Bucket) -> Vec<BucketCount> {
    let mut groups: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for post in posts {
        *groups
            .entry((bucket.start(post.post_date), post.category.as_str()))
            .or_default() += 1;
    }
    groups
        .into_iter()
        .map(|((start, category), count)| BucketCount {
            start,
            label: bucket.label(start),
            category: category.to_string(),
            count,
        })
        .collect()
}

/// The same counts pivoted for a stacked chart: one row per period, one
/// column per category (sorted), zero where a category has no posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackedSeries {
    pub periods: Vec<String>,
    pub categories: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl StackedSeries {
    pub fn from_counts(counts: &[BucketCount]) -> Self {
        let categories: Vec<String> = counts
            .iter()
            .map(|c| c.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut periods: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<usize>> = Vec::new();
        let mut current: Option<NaiveDate> = None;
        for c in counts {
            if current != Some(c.start) {
                current = Some(c.start);
                periods.push(c.label.clone());
                rows.push(vec![0; categories.len()]);
            }
            if let (Some(row), Some(col)) = (rows.last_mut(), categories.iter().position(|k| *k == c.category)) {
                row[col] = c.count;
            }
        }

        Self {
            periods,
            categories,
            counts: rows,
        }
    }
}
