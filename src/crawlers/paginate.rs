use crate::error::{Error, Result};
use crate::results::LinkMap;

/// Walks numbered listing pages and merges their links.
///
/// Pages are requested from 1 upwards until one comes back empty. With a
/// `limit`, the walk also stops as soon as at least that many links are
/// collected; the last page is merged whole, so the result may exceed the
/// limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    max_pages: Option<u32>,
}

impl Paginator {
    /// Create a paginator that fails once a page past `max_pages` still has
    /// links
    pub fn new(max_pages: Option<u32>) -> Self {
        Self { max_pages }
    }

    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// Collect links by calling `fetch_page` with successive page numbers.
    ///
    /// A `limit` of `Some(0)` means no limit. Errors from `fetch_page` abort
    /// the walk and are returned as is.
    pub fn collect<F>(&self, mut fetch_page: F, limit: Option<usize>) -> Result<LinkMap>
    where
        F: FnMut(u32) -> Result<LinkMap>,
    {
        let limit = limit.filter(|&n| n > 0);
        let mut links = LinkMap::new();
        let mut page: u32 = 1;

        loop {
            let new_links = fetch_page(page)?;
            if new_links.is_empty() {
                ::log::debug!("Page {} is empty, {} links collected", page, links.len());
                return Ok(links);
            }

            // Page `max + 1` is still requested so a listing of exactly `max`
            // pages ends normally
            if let Some(max) = self.max_pages {
                if page > max {
                    ::log::warn!("Stopping pagination after {} pages", max);
                    return Err(Error::PageLimitExceeded(max));
                }
            }

            ::log::debug!("Page {} yielded {} links", page, new_links.len());
            links.extend(new_links);

            if let Some(limit) = limit {
                if links.len() >= limit {
                    ::log::debug!("Reached {} links (limit {})", links.len(), limit);
                    return Ok(links);
                }
            }

            page += 1;
        }
    }
}

/// Collect links from pages 1, 2, ... until an empty page, with no page cap
pub fn collect_links<F>(fetch_page: F, limit: Option<usize>) -> Result<LinkMap>
where
    F: FnMut(u32) -> Result<LinkMap>,
{
    Paginator::default().collect(fetch_page, limit)
}
