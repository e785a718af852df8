use chrono::NaiveDate;
use serde::Serialize;

use crate::error::LoadError;
use crate::normalize::parse_date;
use crate::record::PostRecord;

/// A post row with its date and counters parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub name: String,
    pub profile_picture: String,
    pub level: String,
    pub post_date: NaiveDate,
    pub category: String,
    pub title: String,
    pub description: String,
    pub likes: u64,
    pub comments: u64,
    /// Likes + Comments, checked when the row is typed.
    #[serde(rename = "total_engagement")]
    engagement: u64,
}

impl Post {
    pub fn total_engagement(&self) -> u64 {
        self.engagement
    }
}

/// Type every record. The first bad date or count rejects the whole table.
pub fn type_records(records: Vec<PostRecord>) -> Result<Vec<Post>, LoadError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| type_record(i + 1, r))
        .collect()
}

fn type_record(row: usize, r: PostRecord) -> Result<Post, LoadError> {
    let post_date = parse_date(&r.post_date).ok_or_else(|| LoadError::BadDate {
        row,
        value: r.post_date.clone(),
    })?;
    let likes = count(row, "Likes", &r.likes)?;
    let comments = count(row, "Comments", &r.comments)?;
    let engagement = likes
        .checked_add(comments)
        .ok_or(LoadError::EngagementOverflow { row })?;
    Ok(Post {
        name: r.name,
        profile_picture: r.profile_picture,
        level: r.level,
        post_date,
        category: r.category,
        title: r.title,
        description: r.description,
        likes,
        comments,
        engagement,
    })
}

fn count(row: usize, column: &'static str, value: &str) -> Result<u64, LoadError> {
    value.trim().parse().map_err(|_| LoadError::NotANumber {
        row,
        column,
        value: value.to_string(),
    })
}
