use chrono::NaiveDate;

use super::post::Post;
use crate::error::ReportError;

pub const ALL_MONTHS: &str = "All";

pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// "All", then each month present in the data, in the order first seen.
pub fn month_options(posts: &[Post]) -> Vec<String> {
    let mut options = vec![ALL_MONTHS.to_string()];
    for post in posts {
        let label = month_label(post.post_date);
        if !options.contains(&label) {
            options.push(label);
        }
    }
    options
}

/// Keep the posts from one month ("January 2024"), or all of them.
pub fn filter_month(posts: Vec<Post>, month: &str) -> Result<Vec<Post>, ReportError> {
    let month = month.trim();
    if month.eq_ignore_ascii_case(ALL_MONTHS) {
        return Ok(posts);
    }
    let options = month_options(&posts);
    let Some(wanted) = options.iter().find(|o| o.eq_ignore_ascii_case(month)) else {
        return Err(ReportError::UnknownMonth {
            month: month.to_string(),
            available: options,
        });
    };
    let wanted = wanted.clone();
    Ok(posts
        .into_iter()
        .filter(|p| month_label(p.post_date) == wanted)
        .collect())
}
