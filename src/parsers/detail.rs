use crate::error::{Error, Result};
use crate::parsers::html::{
    child_elements, elem_text, element_to_text, has_class, select_first, select_first_in, selector,
};
use crate::parsers::text::{normalize_lines, normalize_whitespace};
use crate::results::{AuthorFields, PoemFields};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector(".title"));
static BIO: LazyLock<Selector> = LazyLock::new(|| selector(".bio"));
static USER_LINK: LazyLock<Selector> = LazyLock::new(|| selector(".u"));
static POEM_BODY: LazyLock<Selector> = LazyLock::new(|| selector(".poem_body"));
static COPYRIGHT: LazyLock<Selector> = LazyLock::new(|| selector("div.copyright"));
static VIEWS: LazyLock<Selector> = LazyLock::new(|| selector("span#views"));
static AUTHOR_COPYRIGHT: LazyLock<Selector> = LazyLock::new(|| selector(".author_copyright"));
static TIMEAGO: LazyLock<Selector> = LazyLock::new(|| selector(".timeago"));
static COMMENT_WRAP: LazyLock<Selector> = LazyLock::new(|| selector(".cmt_wrap"));
static NUM: LazyLock<Selector> = LazyLock::new(|| selector(".num"));
static TAGS: LazyLock<Selector> = LazyLock::new(|| selector(".cats_dot"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static PROFILE_NAME: LazyLock<Selector> = LazyLock::new(|| selector(".media-body h1.notop"));
static USER_BIO: LazyLock<Selector> = LazyLock::new(|| selector(".sub_bio .clearfix"));
static POET_BIO: LazyLock<Selector> = LazyLock::new(|| selector(".media .preview"));

/// Scrapes every field of a poem detail page.
///
/// Title, author link and poem body are required and yield
/// [`Error::MalformedPage`] when missing. The remaining fields are extracted
/// independently and become `None` when absent or unparseable.
pub fn extract_poem_fields(doc: &Html, url: &str) -> Result<PoemFields> {
    let title = select_first(doc, &TITLE)
        .map(|el| normalize_whitespace(&elem_text(el)))
        .ok_or_else(|| Error::malformed(url, "title"))?;

    let author = extract_author_handle(doc).ok_or_else(|| Error::malformed(url, "author link"))?;

    let lines = extract_lines(doc).ok_or_else(|| Error::malformed(url, "poem body"))?;

    Ok(PoemFields {
        url: url.to_string(),
        title,
        author,
        lines,
        meta: extract_meta(doc),
        views: extract_views(doc),
        date: extract_date(doc),
        likes: extract_likes(doc),
        tags: extract_tags(doc),
    })
}

/// Scrapes the name and biography of an author profile page.
///
/// Regular members keep their biography in `.sub_bio`, curated poets in a
/// `.preview` block. A page with neither yields an empty biography.
pub fn extract_author_fields(doc: &Html, url: &str) -> Result<AuthorFields> {
    let name = select_first(doc, &PROFILE_NAME)
        .map(|el| normalize_whitespace(&elem_text(el)))
        .ok_or_else(|| Error::malformed(url, "profile name"))?;

    let raw_info = select_first(doc, &USER_BIO)
        .or_else(|| select_first(doc, &POET_BIO))
        .map(element_to_text)
        .unwrap_or_default();
    let raw_lines: Vec<&str> = raw_info.split('\n').collect();
    let info = normalize_lines(&raw_lines).join("\n");

    Ok(AuthorFields {
        name,
        url: url.to_string(),
        info,
    })
}

fn extract_author_handle(doc: &Html) -> Option<String> {
    let bio = select_first(doc, &BIO)?;
    let href = select_first_in(bio, &USER_LINK)?.value().attr("href")?;
    Some(href.strip_prefix('/').unwrap_or(href).to_string())
}

fn extract_lines(doc: &Html) -> Option<Vec<String>> {
    let body = select_first(doc, &POEM_BODY)?;
    let text: String = child_elements(body, "div")
        .filter(|block| !has_class(*block, "hidden") && !has_class(*block, "copyright"))
        .map(element_to_text)
        .collect();
    Some(text.split('\n').map(str::to_string).collect())
}

fn extract_meta(doc: &Html) -> Option<String> {
    select_first(doc, &COPYRIGHT).map(elem_text)
}

fn extract_views(doc: &Html) -> Option<u64> {
    let raw = elem_text(select_first(doc, &VIEWS)?);
    let count = raw.split("views").next().unwrap_or_default().trim();
    parse_view_count(count)
}

fn extract_date(doc: &Html) -> Option<DateTime<Utc>> {
    let block = select_first(doc, &AUTHOR_COPYRIGHT)?;
    let stamp = select_first_in(block, &TIMEAGO)?.value().attr("title")?;
    parse_date(stamp)
}

fn extract_likes(doc: &Html) -> Option<u64> {
    let wrap = select_first(doc, &COMMENT_WRAP)?;
    elem_text(select_first_in(wrap, &NUM)?).trim().parse().ok()
}

/// Tag names, or `None` when the page has no tags at all
fn extract_tags(doc: &Html) -> Option<Vec<String>> {
    let block = select_first(doc, &TAGS)?;
    let tags: Vec<String> = block
        .select(&LINK)
        .map(|a| elem_text(a).trim().to_string())
        .collect();
    Some(tags).filter(|t| !t.is_empty())
}

/// Parses a view counter such as `"321"` or `"541.7k"`.
///
/// Abbreviated counts are scaled by 1000 and truncated.
pub fn parse_view_count(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(count) = raw.parse::<u64>() {
        return Some(count);
    }
    if !raw.contains('k') {
        return None;
    }
    let scaled = raw.replace('k', "").trim().parse::<f64>().ok()? * 1000.0;
    if scaled.is_finite() && scaled >= 0.0 {
        Some(scaled as u64)
    } else {
        None
    }
}

/// Naive layouts tried after the offset-aware ones; values are taken as UTC
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Parses the timestamps found in `timeago` titles.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS` with an optional offset
/// or trailing `UTC`, and bare dates.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = raw
        .strip_suffix("UTC")
        .or_else(|| raw.strip_suffix('Z'))
        .unwrap_or(raw)
        .trim_end();
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
