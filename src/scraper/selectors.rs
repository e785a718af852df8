// Skool renders styled-components class names. Each element carries several
// generated classes, so lookups use `contains(@class, ...)`. The hashed
// suffixes change when the site is redeployed.

pub const LOGIN_URL: &str = "https://www.skool.com/login";
pub const EMAIL_INPUT_ID: &str = "email";
pub const PASSWORD_INPUT_ID: &str = "password";
pub const LOGIN_BUTTON_CLASS: &str = "styled__LoginButton-sc-1kn1nfb-3";

pub const POST_CARD: &str = "//div[contains(@class, 'styled__PostItemWrapper-sc-e4ns84-7')]";
pub const NEXT_BUTTON: &str =
    "//button[contains(@class, 'styled__ButtonWrapper-sc-dscagy-1') and span[text()='Next']]";

// ── Relative to a post card ──

pub const NAME: &str = ".//span[contains(@class, 'UserNameText')]";
pub const AVATAR_IMG: &str = ".//div[contains(@class, 'styled__AvatarWrapper-sc-1o1lx2q-0')]//img";
pub const LEVEL_BADGE: &str = ".//*[contains(@class, 'styled__BadgeWrapper-sc-1o1lx2q-2')]";
pub const POST_TIME: &str = ".//div[contains(@class, 'PostTimeContent')]";
pub const CATEGORY: &str = ".//div[contains(@class, 'GroupFeedLinkLabel')]";
pub const TITLE: &str = ".//div[contains(@class, 'Title')]";
pub const DESCRIPTION: &str = ".//div[contains(@class, 'ContentPreviewWrapper')]";
pub const LIKES: &str = ".//div[contains(@class, 'LikesCount')]";
pub const COMMENTS: &str = ".//div[contains(@class, 'CommentsCount')]";
