use serde::Serialize;

use super::post::Post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Posts per category, most first. Ties keep the order categories were
/// first seen in.
pub fn category_counts(posts: &[Post]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for post in posts {
        match counts.iter_mut().find(|c| c.category == post.category) {
            Some(c) => c.count += 1,
            None => counts.push(CategoryCount {
                category: post.category.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPost {
    pub name: String,
    pub title: String,
    pub likes: u64,
    pub comments: u64,
    pub total_engagement: u64,
}

impl From<&Post> for RankedPost {
    fn from(p: &Post) -> Self {
        Self {
            name: p.name.clone(),
            title: p.title.clone(),
            likes: p.likes,
            comments: p.comments,
            total_engagement: p.total_engagement(),
        }
    }
}

/// Highest total engagement first. Equal scores keep table order.
pub fn top_posts(posts: &[Post], n: usize, exclude: Option<&str>) -> Vec<RankedPost> {
    let mut ranked: Vec<&Post> = posts
        .iter()
        .filter(|p| exclude.map_or(true, |owner| p.name != owner))
        .collect();
    ranked.sort_by(|a, b| b.total_engagement().cmp(&a.total_engagement()));
    ranked.into_iter().take(n).map(RankedPost::from).collect()
}

/// A ranking and its head, the few posts the dashboard highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPosts {
    pub ranking: Vec<RankedPost>,
    pub highlights: Vec<RankedPost>,
}

impl TopPosts {
    pub fn new(ranking: Vec<RankedPost>, highlights: usize) -> Self {
        let highlights = ranking.iter().take(highlights).cloned().collect();
        Self {
            ranking,
            highlights,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSplit {
    pub owner: String,
    pub owner_posts: usize,
    pub member_posts: usize,
}

pub fn owner_split(posts: &[Post], owner: &str) -> OwnerSplit {
    let owner_posts = posts.iter().filter(|p| p.name == owner).count();
    OwnerSplit {
        owner: owner.to_string(),
        owner_posts,
        member_posts: posts.len() - owner_posts,
    }
}
