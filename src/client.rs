use crate::config::{Config, DEFAULT_ORIGIN};
use crate::crawlers::crawler::Transport;
use crate::crawlers::paginate::Paginator;
use crate::crawlers::web::{self, HttpTransport};
use crate::error::Result;
use crate::parsers::{detail, listing};
use crate::results::{Author, LinkMap, Poem};
use crate::utils::short_label;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;

/// Longest title or name shown in progress lines
const LABEL_WIDTH: usize = 15;

/// Entry point for scraping poems and authors.
///
/// Every request goes through the wrapped [`Transport`], strictly one at a
/// time. Anonymous sessions are limited by the site to the first listing
/// pages; call [`PoetryClient::login`] first to see everything.
pub struct PoetryClient<T: Transport> {
    transport: T,
    origin: String,
    paginator: Paginator,
}

impl PoetryClient<HttpTransport> {
    /// Build an HTTP client from `config`, logging in when it carries
    /// credentials
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(HttpTransport::new(config)?)
            .with_origin(&config.origin)
            .with_max_pages(config.max_pages);
        if let Some((username, password)) = config.credentials() {
            client.login(username, password)?;
        }
        Ok(client)
    }
}

impl<T: Transport> PoetryClient<T> {
    /// Create a client for the default site origin with no page cap
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            origin: DEFAULT_ORIGIN.to_string(),
            paginator: Paginator::default(),
        }
    }

    /// Use another site origin (scheme and host)
    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.trim_end_matches('/').to_string();
        self
    }

    /// Fail pagination once more than `max_pages` pages were requested
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.paginator = Paginator::new(max_pages);
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Authenticate the session held by the transport
    pub fn login(&self, username: &str, password: &str) -> Result<()> {
        web::login(&self.transport, &self.origin, username, password)
    }

    /// Links to the poems of `author`, in listing order.
    ///
    /// `author` is the site handle as it appears in profile URLs. With a
    /// `limit`, pagination stops once at least that many links are known.
    pub fn poem_links(&self, author: &str, limit: Option<usize>) -> Result<LinkMap> {
        ::log::info!("Collecting poem links for {}", author);
        self.paginator.collect(
            |page| {
                let url = format!("{}/{}?links=1&page={}", self.origin, author, page);
                let doc = self.fetch(&url)?;
                Ok(listing::parse_listing(&doc, &self.origin))
            },
            limit,
        )
    }

    /// Fetch and parse a single poem
    pub fn poem(&self, url: &str) -> Result<Poem> {
        let doc = self.fetch(url)?;
        Ok(Poem::new(detail::extract_poem_fields(&doc, url)?))
    }

    /// Fetch the poems of `author`.
    ///
    /// Poems whose page is malformed are skipped; transport errors abort the
    /// whole fetch.
    pub fn poems(&self, author: &str, limit: Option<usize>) -> Result<Vec<Poem>> {
        let links = self.poem_links(author, limit)?;
        self.fetch_all(&links, "Poem", |url| self.poem(url), |poem: &Poem| {
            poem.title()
        })
    }

    /// Links to the curated famous poets, in listing order
    pub fn famous_author_links(&self, limit: Option<usize>) -> Result<LinkMap> {
        ::log::info!("Collecting famous author links");
        self.paginator.collect(
            |page| {
                let url = format!("{}/famous-poets?page={}", self.origin, page);
                let doc = self.fetch(&url)?;
                Ok(listing::parse_famous_authors(&doc, &self.origin))
            },
            limit,
        )
    }

    /// Fetch an author profile by site handle
    pub fn author(&self, handle: &str) -> Result<Author> {
        self.author_from_url(&format!("{}/{}", self.origin, handle))
    }

    /// Fetch an author profile by URL
    pub fn author_from_url(&self, url: &str) -> Result<Author> {
        let doc = self.fetch(url)?;
        Ok(Author::new(detail::extract_author_fields(&doc, url)?))
    }

    /// Fetch the profiles of the famous poets, skipping malformed pages
    pub fn famous_authors(&self, limit: Option<usize>) -> Result<Vec<Author>> {
        let links = self.famous_author_links(limit)?;
        self.fetch_all(
            &links,
            "Author",
            |url| self.author_from_url(url),
            |author: &Author| author.name(),
        )
    }

    fn fetch(&self, url: &str) -> Result<Html> {
        let body = self.transport.get(url)?;
        Ok(Html::parse_document(&body))
    }

    /// Fetches every link in order behind a `kind i/n` progress bar
    fn fetch_all<R, F, L>(
        &self,
        links: &LinkMap,
        kind: &str,
        mut fetch: F,
        label: L,
    ) -> Result<Vec<R>>
    where
        F: FnMut(&str) -> Result<R>,
        L: Fn(&R) -> &str,
    {
        let total = links.len();
        let mut records = Vec::with_capacity(total);
        let pb = progress_bar(total);
        for (i, (name, url)) in links.iter().enumerate() {
            pb.set_message(format!("{} {}/{}", kind, i + 1, total));
            match fetch(url) {
                Ok(record) => {
                    pb.set_prefix(short_label(label(&record), LABEL_WIDTH));
                    records.push(record);
                }
                Err(e) if e.is_malformed_page() => {
                    pb.suspend(|| {
                        ::log::warn!("{} {}/{} skipped ({}): {}", kind, i + 1, total, name, e)
                    });
                }
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
        ::log::info!("Fetched {} of {} {} pages", records.len(), total, kind.to_lowercase());
        Ok(records)
    }
}

/// Bar for bulk fetches: `{msg}` holds `Poem i/n`, `{prefix}` the current
/// title and is drawn after the bar
fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:30}] {prefix}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}
