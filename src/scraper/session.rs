use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thirtyfour::prelude::*;
use tracing::{debug, info, warn};

use super::browser::{Element, FeedPage, Session};
use super::selectors as sel;
use crate::config::{BrowserConfig, Credentials};

/// A live WebDriver session. Must be closed with [`Session::quit`]
/// whatever the outcome of the crawl.
pub struct BrowserSession {
    driver: WebDriver,
    config: BrowserConfig,
}

impl BrowserSession {
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.add_arg("--headless")?;
        }
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg(&format!("--user-agent={}", config.user_agent))?;

        let driver = WebDriver::new(config.webdriver_url.as_str(), caps)
            .await
            .with_context(|| format!("Failed to start browser via {}", config.webdriver_url))?;
        info!("WebDriver session started ({})", config.webdriver_url);
        Ok(Self { driver, config })
    }

    async fn wait_for_posts(&self, timeout: Duration) -> Result<()> {
        self.driver
            .query(By::XPath(sel::POST_CARD))
            .wait(timeout, self.config.poll_interval)
            .first()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Session for BrowserSession {
    async fn login(&self, creds: &Credentials) -> Result<()> {
        info!("Logging into Skool...");
        self.driver.goto(sel::LOGIN_URL).await?;

        let email = self
            .driver
            .query(By::Id(sel::EMAIL_INPUT_ID))
            .wait(self.config.login_timeout, self.config.poll_interval)
            .first()
            .await
            .context("Timed out waiting for the login page")?;
        debug!("Login page loaded");

        email.send_keys(creds.email.as_str()).await?;
        self.driver
            .find(By::Id(sel::PASSWORD_INPUT_ID))
            .await?
            .send_keys(creds.password.as_str())
            .await?;
        self.driver
            .find(By::ClassName(sel::LOGIN_BUTTON_CLASS))
            .await?
            .click()
            .await?;
        debug!("Login form submitted");

        self.wait_for_posts(self.config.login_timeout)
            .await
            .context("Login failed: feed did not appear after submitting credentials")?;
        info!("Logged in");
        Ok(())
    }

    async fn open_feed(&self, community_url: &str) -> Result<()> {
        self.driver.goto(community_url).await?;
        self.wait_for_posts(self.config.feed_timeout)
            .await
            .with_context(|| format!("No posts appeared on {}", community_url))?;
        Ok(())
    }

    async fn quit(self) {
        match self.driver.quit().await {
            Ok(()) => debug!("WebDriver session closed"),
            Err(e) => warn!("Failed to close WebDriver session: {}", e),
        }
    }
}

#[async_trait]
impl FeedPage for BrowserSession {
    type Card = WebElement;

    async fn post_cards(&self) -> Result<Vec<WebElement>> {
        Ok(self.driver.find_all(By::XPath(sel::POST_CARD)).await?)
    }

    async fn next_page(&self) -> Result<bool> {
        let buttons = self.driver.find_all(By::XPath(sel::NEXT_BUTTON)).await?;
        let Some(next) = buttons.into_iter().next() else {
            info!("No more pages available");
            return Ok(false);
        };
        next.scroll_into_view().await?;
        next.click().await?;
        Ok(true)
    }

    async fn settle(&self) -> Result<()> {
        tokio::time::sleep(self.config.settle_delay).await;
        self.wait_for_posts(self.config.feed_timeout)
            .await
            .context("Timed out waiting for the next page to load")
    }
}

#[async_trait]
impl Element for WebElement {
    async fn find_optional(&self, xpath: &str) -> Result<Option<Self>> {
        Ok(self.find_all(By::XPath(xpath.to_string())).await?.into_iter().next())
    }

    async fn read_text(&self) -> Result<String> {
        Ok(self.text().await?)
    }

    async fn read_attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attr(name).await?)
    }
}
