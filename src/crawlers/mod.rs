//! Network side of the scraper: the transport abstraction, the HTTP
//! implementation with login, and the listing pagination loop.

pub mod crawler;
pub mod paginate;
pub mod web;

pub use crawler::Transport;
pub use paginate::{Paginator, collect_links};
pub use web::{HttpTransport, login};
