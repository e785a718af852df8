use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::LoadError;
use crate::record::{PostRecord, COLUMNS};

const COMMUNITY_PREFIX: &str = "https://www.skool.com/";

/// Output file name for a community URL:
/// `https://www.skool.com/ai-lab/about` → `ai-lab_about.csv`.
pub fn file_name_for(community_url: &str) -> String {
    let path = community_url
        .strip_prefix(COMMUNITY_PREFIX)
        .unwrap_or(community_url);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let stem = path.trim_matches('/').replace('/', "_");
    if stem.is_empty() {
        "community.csv".to_string()
    } else {
        format!("{}.csv", stem)
    }
}

/// Write the table with its header row.
pub fn write_posts<W: Write>(writer: W, posts: &[PostRecord]) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);
    if posts.is_empty() {
        w.write_record(COLUMNS)?;
    }
    for post in posts {
        w.serialize(post)?;
    }
    w.flush()?;
    Ok(())
}

pub fn save_posts(path: &Path, posts: &[PostRecord]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_posts(std::io::BufWriter::new(file), posts)
}

/// Headers the report cannot run without, with the compact spelling also
/// accepted on load.
const REQUIRED: [(&str, Option<&str>); 7] = [
    ("Name", None),
    ("Profile Picture", Some("ProfilePicture")),
    ("Post Date", Some("PostDate")),
    ("Category", None),
    ("Title", None),
    ("Likes", None),
    ("Comments", None),
];

fn missing_columns(headers: &csv::StringRecord) -> Vec<&'static str> {
    let has = |name: &str| headers.iter().any(|h| h == name);
    REQUIRED
        .iter()
        .filter(|(name, alias)| !has(name) && !alias.is_some_and(|a| has(a)))
        .map(|(name, _)| *name)
        .collect()
}

/// Read raw records, rejecting tables that lack a required column.
/// Optional columns (Level, Description, Date Scraped) default to empty.
pub fn read_posts<R: Read>(reader: R) -> Result<Vec<PostRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut posts = Vec::new();
    for row in rdr.deserialize::<PostRecord>() {
        posts.push(row?);
    }
    Ok(posts)
}

pub fn load_posts(path: &Path) -> Result<Vec<PostRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(read_posts(file)?)
}
