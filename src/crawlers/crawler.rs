use crate::error::Result;

/// Session-scoped HTTP access used by the scraper.
///
/// Implementations must persist cookies between calls so that a login made
/// through [`Transport::post_form`] authenticates later requests.
pub trait Transport {
    /// Fetch a page and return its body
    fn get(&self, url: &str) -> Result<String>;

    /// Submit a urlencoded form and return the response body
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<String> {
        (**self).get(url)
    }

    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
        (**self).post_form(url, form)
    }
}
