use anyhow::Result;
use async_trait::async_trait;

use crate::config::Credentials;

/// The slice of a DOM element the extractor needs.
///
/// `Err` is reserved for transport failures (dead session, protocol error);
/// an element that simply is not there is `Ok(None)`.
#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// First descendant matching the XPath, if any.
    async fn find_optional(&self, xpath: &str) -> Result<Option<Self>>;

    /// Rendered text of the element.
    async fn read_text(&self) -> Result<String>;

    async fn read_attr(&self, name: &str) -> Result<Option<String>>;
}

/// A community feed page that can be read and paged through.
#[async_trait]
pub trait FeedPage: Send + Sync {
    type Card: Element;

    /// Post cards currently rendered on the page, in display order.
    async fn post_cards(&self) -> Result<Vec<Self::Card>>;

    /// Click the "next page" control. `Ok(false)` when there is none.
    async fn next_page(&self) -> Result<bool>;

    /// Block until the page has finished loading after `next_page`.
    async fn settle(&self) -> Result<()>;
}

/// A logged-out browser session that can sign in and show one feed.
#[async_trait]
pub trait Session: FeedPage + Sized {
    async fn login(&self, creds: &Credentials) -> Result<()>;

    /// Navigate to the community feed and wait for its first posts.
    async fn open_feed(&self, community_url: &str) -> Result<()>;

    /// End the session. Failures are logged, never returned.
    async fn quit(self);
}
