use serde::{Deserialize, Serialize};

/// Default for text and URL fields whose element is missing.
pub const NOT_AVAILABLE: &str = "N/A";
/// Default for count fields whose element is missing.
pub const ZERO: &str = "0";

/// Date format used for `Post Date` and `Date Scraped`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// CSV headers, in column order.
pub const COLUMNS: [&str; 10] = [
    "Name",
    "Profile Picture",
    "Level",
    "Post Date",
    "Category",
    "Title",
    "Description",
    "Likes",
    "Comments",
    "Date Scraped",
];

/// One scraped post, exactly as it is written to the table. Level,
/// Description and Date Scraped may be absent from tables read back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Profile Picture", alias = "ProfilePicture")]
    pub profile_picture: String,
    #[serde(rename = "Level", default)]
    pub level: String,
    #[serde(rename = "Post Date", alias = "PostDate")]
    pub post_date: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Likes")]
    pub likes: String,
    #[serde(rename = "Comments")]
    pub comments: String,
    #[serde(rename = "Date Scraped", alias = "DateScraped", default)]
    pub date_scraped: String,
}

/// Identity of a post across pages: (Title, Post Date, Category).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostKey {
    pub title: String,
    pub post_date: String,
    pub category: String,
}

impl PostRecord {
    pub fn key(&self) -> PostKey {
        PostKey {
            title: self.title.clone(),
            post_date: self.post_date.clone(),
            category: self.category.clone(),
        }
    }
}
