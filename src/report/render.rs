use super::leaderboard::Leaderboard;
use super::rank::{RankedPost, TopPosts};
use super::timeline::StackedSeries;
use super::Dashboard;

const BAR_WIDTH: usize = 30;

pub fn print_dashboard(d: &Dashboard) {
    println!("{} · {} · {} posts", d.community, d.month, d.total_posts);

    println!("\n--- Posts per {:?} ---", d.bucket);
    print_stacked(&d.stacked);

    println!("\n--- Posts by Category ---");
    for c in &d.categories {
        println!("  {:<28} {:>5}", truncate(&c.category, 28), c.count);
    }

    println!("\n--- Top {} Performing Posts ---", d.top_posts.ranking.len());
    print_top(&d.top_posts);

    if let (Some(split), Some(top)) = (&d.owner_split, &d.top_posts_excluding_owner) {
        println!(
            "\n--- Top {} Performing Posts (excluding {}) ---",
            top.ranking.len(),
            split.owner
        );
        print_top(top);
        println!(
            "\nOwner posts: {} | Member posts: {}",
            split.owner_posts, split.member_posts
        );
    }

    for board in &d.leaderboards {
        println!("\n--- Leaderboard: {} ---", board.metric.title());
        print_leaderboard(board);
    }
}

fn print_stacked(s: &StackedSeries) {
    if s.periods.is_empty() {
        println!("  (no posts)");
        return;
    }
    let header: Vec<String> = s.categories.iter().map(|c| format!("{:>12}", truncate(c, 12))).collect();
    println!("  {:<32}{} {:>6}", "Period", header.join(""), "Total");
    for (period, row) in s.periods.iter().zip(&s.counts) {
        let cells: Vec<String> = row.iter().map(|n| format!("{:>12}", n)).collect();
        println!(
            "  {:<32}{} {:>6}",
            period,
            cells.join(""),
            row.iter().sum::<usize>()
        );
    }
}

fn print_top(top: &TopPosts) {
    print_ranking(&top.ranking);
    if top.highlights.is_empty() {
        return;
    }
    println!("\n  Top {} by Total Engagement:", top.highlights.len());
    let max = top.highlights.iter().map(|p| p.total_engagement).max().unwrap_or(0);
    for p in &top.highlights {
        println!(
            "  {:<40} {:>8} {}",
            truncate(&p.title, 40),
            p.total_engagement,
            bar(p.total_engagement, max, BAR_WIDTH)
        );
    }
}

fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (value as f64 / max as f64 * width as f64).round() as usize;
    "#".repeat(filled.min(width))
}

fn print_ranking(posts: &[RankedPost]) {
    if posts.is_empty() {
        println!("  (no posts)");
        return;
    }
    println!(
        "{:>3} | {:<20} | {:<40} | {:>5} | {:>8} | {:>10}",
        "#", "Name", "Title", "Likes", "Comments", "Engagement"
    );
    println!("{}", "-".repeat(102));
    for (i, p) in posts.iter().enumerate() {
        println!(
            "{:>3} | {:<20} | {:<40} | {:>5} | {:>8} | {:>10}",
            i + 1,
            truncate(&p.name, 20),
            truncate(&p.title, 40),
            p.likes,
            p.comments,
            p.total_engagement
        );
    }
}

fn print_leaderboard(board: &Leaderboard) {
    if board.entries.is_empty() {
        println!("  (no posts)");
        return;
    }
    for e in &board.entries {
        println!(
            "{:>4} | {:<24} | {:>8} | {}",
            e.rank,
            truncate(&e.name, 24),
            e.value,
            e.profile_picture.as_deref().unwrap_or("-")
        );
    }
}

pub fn print_months(options: &[String]) {
    for option in options {
        println!("{}", option);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Q&A 💬", 10), "Q&A 💬");
        assert_eq!(truncate("Announcements", 5), "Annou...");
    }

    #[test]
    fn bars_scale_to_the_largest() {
        assert_eq!(bar(57, 57, 10), "##########");
        assert_eq!(bar(28, 56, 10), "#####");
        assert_eq!(bar(0, 0, 10), "");
        assert_eq!(bar(u64::MAX, u64::MAX, 4), "####");
    }
}
