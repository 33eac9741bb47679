//! HTML and text parsing for allpoetry pages.
//!
//! Listing pages yield a [`LinkMap`](crate::results::LinkMap) of detail
//! URLs; detail pages yield raw [`PoemFields`](crate::results::PoemFields) or
//! [`AuthorFields`](crate::results::AuthorFields), which the record types
//! normalize on construction.

pub mod detail;
pub mod html;
pub mod listing;
pub mod text;

#[cfg(test)]
mod tests;

pub use detail::{extract_author_fields, extract_poem_fields, parse_date, parse_view_count};
pub use html::element_to_text;
pub use listing::{LayoutKind, detect_layout, parse_famous_authors, parse_listing};
pub use text::{normalize_lines, normalize_name};
