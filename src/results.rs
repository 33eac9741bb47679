use crate::parsers::text::{normalize_lines, normalize_name};
use crate::utils::group_thousands;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Ordered mapping from a display name (poem title or author name) to its
/// absolute URL.
///
/// Iteration follows insertion order. Inserting an existing name replaces its
/// URL but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let name = name.into();
        let url = url.into();
        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = url,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, url));
            }
        }
    }

    /// Merges every entry of `other` into this map
    pub fn extend(&mut self, other: LinkMap) {
        for (name, url) in other.entries {
            self.insert(name, url);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, u)| u.as_str())
    }
}

impl<N: Into<String>, U: Into<String>> FromIterator<(N, U)> for LinkMap {
    fn from_iter<I: IntoIterator<Item = (N, U)>>(iter: I) -> Self {
        let mut map = LinkMap::new();
        for (name, url) in iter {
            map.insert(name, url);
        }
        map
    }
}

impl Serialize for LinkMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, url) in &self.entries {
            map.serialize_entry(name, url)?;
        }
        map.end()
    }
}

/// Raw fields scraped from a poem detail page, before normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoemFields {
    pub url: String,
    pub title: String,
    /// Site handle of the author, e.g. `sylvia-plath`
    pub author: String,
    pub lines: Vec<String>,
    pub meta: Option<String>,
    pub views: Option<u64>,
    pub date: Option<DateTime<Utc>>,
    pub likes: Option<u64>,
    /// `None` when the page has no tags block or the block is empty
    pub tags: Option<Vec<String>>,
}

/// Raw fields scraped from an author profile page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorFields {
    pub name: String,
    pub url: String,
    /// Biography, already cleaned line by line
    pub info: String,
}

/// A poem and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    title: String,
    author: String,
    lines: Vec<String>,
    meta: Option<String>,
    url: String,
    date: Option<DateTime<Utc>>,
    likes: Option<u64>,
    views: Option<u64>,
    #[serde(default)]
    tags: Vec<String>,
}

impl Poem {
    /// Builds a poem, canonicalizing the author name and cleaning the body
    pub fn new(fields: PoemFields) -> Self {
        Self {
            title: fields.title,
            author: normalize_name(&fields.author),
            lines: normalize_lines(&fields.lines),
            meta: fields.meta,
            url: fields.url,
            date: fields.date,
            likes: fields.likes,
            views: fields.views,
            tags: fields.tags.unwrap_or_default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn likes(&self) -> Option<u64> {
        self.likes
    }

    pub fn views(&self) -> Option<u64> {
        self.views
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Poem body with line breaks restored
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of space-separated tokens in the body. Paragraph breaks count
    /// as one empty token each.
    pub fn word_count(&self) -> usize {
        self.lines.join(" ").split(' ').count()
    }
}

impl From<PoemFields> for Poem {
    fn from(fields: PoemFields) -> Self {
        Poem::new(fields)
    }
}

fn fmt_count(count: Option<u64>) -> String {
    count.map_or_else(|| "-".to_string(), group_thousands)
}

impl fmt::Display for Poem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "¯".repeat(self.title.chars().count()))?;
        writeln!(f)?;
        writeln!(f, "“{}”", self.text())?;
        writeln!(f)?;
        writeln!(f, "— {}", self.author)?;
        write!(
            f,
            "  Likes: {}, Views: {}",
            fmt_count(self.likes),
            fmt_count(self.views)
        )?;
        if !self.tags.is_empty() {
            write!(f, ", Tags: {}", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// An author profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    name: String,
    url: String,
    info: String,
}

impl Author {
    pub fn new(fields: AuthorFields) -> Self {
        Self {
            name: normalize_name(&fields.name),
            url: fields.url,
            info: fields.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn info(&self) -> &str {
        &self.info
    }
}

impl From<AuthorFields> for Author {
    fn from(fields: AuthorFields) -> Self {
        Author::new(fields)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        write!(f, "{}", self.info)
    }
}
