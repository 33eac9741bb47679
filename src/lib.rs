//! Scrapes poems and author profiles from allpoetry.com.
//!
//! Listing pages are walked page by page into a [`LinkMap`], detail pages are
//! parsed field by field and turned into [`Poem`] and [`Author`] records.
//! [`PoetryClient`] ties the pieces together over any [`Transport`].

pub mod client;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use client::PoetryClient;
pub use config::Config;
pub use crawlers::{HttpTransport, Transport};
pub use error::{Error, Result};
pub use results::{Author, LinkMap, Poem};
