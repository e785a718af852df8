use anyhow::Result;
use chrono::{DateTime, Utc};

use super::browser::Element;
use super::selectors as sel;
use crate::normalize::{clean_time_label, convert_post_time, format_date};
use crate::record::{PostRecord, NOT_AVAILABLE, ZERO};

/// Build one record from a post card. Every field falls back to its own
/// default when its element is missing or blank; only transport errors fail.
pub async fn extract_post<E: Element>(card: &E, now: DateTime<Utc>) -> Result<PostRecord> {
    let name = text_or(card, sel::NAME, NOT_AVAILABLE).await?;
    let profile_picture = attr_or(card, sel::AVATAR_IMG, "src", NOT_AVAILABLE).await?;
    let level = text_or(card, sel::LEVEL_BADGE, NOT_AVAILABLE).await?;

    let time_label = text_or(card, sel::POST_TIME, NOT_AVAILABLE).await?;
    let post_date = convert_post_time(&clean_time_label(&time_label), now);

    let category = text_or(card, sel::CATEGORY, NOT_AVAILABLE).await?;
    let title = text_or(card, sel::TITLE, NOT_AVAILABLE).await?;
    let description = text_or(card, sel::DESCRIPTION, NOT_AVAILABLE).await?;
    let likes = text_or(card, sel::LIKES, ZERO).await?;
    let comments = text_or(card, sel::COMMENTS, ZERO).await?;

    Ok(PostRecord {
        name,
        profile_picture,
        level,
        post_date,
        category,
        title,
        description,
        likes,
        comments,
        date_scraped: format_date(now.date_naive()),
    })
}

async fn text_or<E: Element>(card: &E, xpath: &str, default: &str) -> Result<String> {
    let text = match card.find_optional(xpath).await? {
        Some(el) => Some(el.read_text().await?),
        None => None,
    };
    Ok(non_blank(text, default))
}

async fn attr_or<E: Element>(card: &E, xpath: &str, attr: &str, default: &str) -> Result<String> {
    let value = match card.find_optional(xpath).await? {
        Some(el) => el.read_attr(attr).await?,
        None => None,
    };
    Ok(non_blank(value, default))
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
