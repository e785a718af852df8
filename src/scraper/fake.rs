//! In-memory stand-ins for the browser, used by the scraper tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;

use super::browser::{Element, FeedPage, Session};
use crate::config::Credentials;
use super::selectors as sel;

#[derive(Debug, Clone, Default)]
pub struct FakeCard {
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<String, FakeCard>,
    broken: bool,
}

impl FakeCard {
    pub fn post(
        name: &str,
        title: &str,
        category: &str,
        time: &str,
        likes: &str,
        comments: &str,
    ) -> Self {
        Self::default()
            .with_text(sel::NAME, name)
            .with_text(sel::TITLE, title)
            .with_text(sel::CATEGORY, category)
            .with_text(sel::POST_TIME, time)
            .with_text(sel::LIKES, likes)
            .with_text(sel::COMMENTS, comments)
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, xpath: &str, text: &str) -> Self {
        self.children.entry(xpath.to_string()).or_default().text = text.to_string();
        self
    }

    pub fn with_attr(mut self, xpath: &str, name: &str, value: &str) -> Self {
        self.children
            .entry(xpath.to_string())
            .or_default()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl Element for FakeCard {
    async fn find_optional(&self, xpath: &str) -> Result<Option<Self>> {
        if self.broken {
            bail!("invalid session id");
        }
        Ok(self.children.get(xpath).cloned())
    }

    async fn read_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    async fn read_attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attrs.get(name).cloned())
    }
}

/// A paged feed. With `endless`, the "next" control never disappears and
/// clicking it on the last page leaves the page unchanged.
#[derive(Debug, Default)]
pub struct FakeFeed {
    pages: Vec<Vec<FakeCard>>,
    endless: bool,
    current: AtomicUsize,
    pub clicks: AtomicUsize,
    pub settles: AtomicUsize,
}

impl FakeFeed {
    pub fn new(pages: Vec<Vec<FakeCard>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn endless(pages: Vec<Vec<FakeCard>>) -> Self {
        Self {
            pages,
            endless: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl FeedPage for FakeFeed {
    type Card = FakeCard;

    async fn post_cards(&self) -> Result<Vec<FakeCard>> {
        let idx = self.current.load(Ordering::SeqCst);
        Ok(self.pages.get(idx).cloned().unwrap_or_default())
    }

    async fn next_page(&self) -> Result<bool> {
        let idx = self.current.load(Ordering::SeqCst);
        let has_next = idx + 1 < self.pages.len();
        if !has_next && !self.endless {
            return Ok(false);
        }
        self.clicks.fetch_add(1, Ordering::SeqCst);
        if has_next {
            self.current.store(idx + 1, Ordering::SeqCst);
        }
        Ok(true)
    }

    async fn settle(&self) -> Result<()> {
        self.settles.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A session over a [`FakeFeed`]. `quits` is shared so a test can still
/// read it after the session has been consumed.
pub struct FakeSession {
    pub feed: FakeFeed,
    fail_login: bool,
    pub quits: Arc<AtomicUsize>,
}

impl FakeSession {
    pub fn new(feed: FakeFeed) -> Self {
        Self {
            feed,
            fail_login: false,
            quits: Arc::default(),
        }
    }

    pub fn rejecting_login(feed: FakeFeed) -> Self {
        Self {
            fail_login: true,
            ..Self::new(feed)
        }
    }
}

#[async_trait]
impl FeedPage for FakeSession {
    type Card = FakeCard;

    async fn post_cards(&self) -> Result<Vec<FakeCard>> {
        self.feed.post_cards().await
    }

    async fn next_page(&self) -> Result<bool> {
        self.feed.next_page().await
    }

    async fn settle(&self) -> Result<()> {
        self.feed.settle().await
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn login(&self, _creds: &Credentials) -> Result<()> {
        if self.fail_login {
            bail!("Login failed: feed did not appear after submitting credentials");
        }
        Ok(())
    }

    async fn open_feed(&self, _community_url: &str) -> Result<()> {
        Ok(())
    }

    async fn quit(self) {
        self.quits.fetch_add(1, Ordering::SeqCst);
    }
}
