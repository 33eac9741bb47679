use crate::parsers::html::{elem_text, select_first, select_first_in, selector};
use crate::results::LinkMap;
use crate::utils::absolute_url;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static T_LINKS: LazyLock<Selector> = LazyLock::new(|| selector(".t_links"));
static CLEARFIX: LazyLock<Selector> = LazyLock::new(|| selector(".clearfix"));
static ITM: LazyLock<Selector> = LazyLock::new(|| selector("div.itm"));
static ITEMS_GROUP: LazyLock<Selector> = LazyLock::new(|| selector(".items_group"));
static H1_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h1.title"));
static USERS_INDEX: LazyLock<Selector> = LazyLock::new(|| selector(".items.users"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// The two known structures of a poem listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Regular members: a "links" tab listing `div.itm` entries
    UserPages,
    /// Curated poets (e.g. Sylvia Plath): `h1.title` headings per poem
    CuratedPages,
}

impl LayoutKind {
    /// Entry elements of this layout; each holds one link
    fn entries<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        match self {
            LayoutKind::UserPages => select_first(doc, &T_LINKS)
                .and_then(|links| select_first_in(links, &CLEARFIX))
                .map(|block| block.select(&ITM).collect())
                .unwrap_or_default(),
            LayoutKind::CuratedPages => select_first(doc, &ITEMS_GROUP)
                .map(|group| group.select(&H1_TITLE).collect())
                .unwrap_or_default(),
        }
    }
}

/// Determines which layout the listing page uses.
///
/// The user layout wins whenever it has at least one entry, even if the
/// curated structure is also present. Returns `None` when neither layout has
/// entries, which marks the end of the listing.
pub fn detect_layout(doc: &Html) -> Option<LayoutKind> {
    [LayoutKind::UserPages, LayoutKind::CuratedPages]
        .into_iter()
        .find(|layout| !layout.entries(doc).is_empty())
}

/// Extracts the `(title, url)` links of one page of an author's poems
pub fn parse_listing(doc: &Html, origin: &str) -> LinkMap {
    match detect_layout(doc) {
        Some(layout) => {
            ::log::debug!("Listing page uses {:?} layout", layout);
            links_from_entries(layout.entries(doc), origin)
        }
        None => {
            ::log::debug!("Listing page has no entries");
            LinkMap::new()
        }
    }
}

/// Extracts the `(name, url)` links of one page of the famous poets index
pub fn parse_famous_authors(doc: &Html, origin: &str) -> LinkMap {
    let entries: Vec<ElementRef> = select_first(doc, &USERS_INDEX)
        .map(|index| index.select(&ITM).collect())
        .unwrap_or_default();
    links_from_entries(entries, origin)
}

fn links_from_entries(entries: Vec<ElementRef>, origin: &str) -> LinkMap {
    let mut links = LinkMap::new();
    for entry in entries {
        let Some(link) = select_first_in(entry, &LINK) else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            ::log::trace!("Skipping listing entry without href");
            continue;
        };
        links.insert(elem_text(link).trim(), absolute_url(origin, href));
    }
    links
}
