use crate::config::Config;
use crate::crawlers::crawler::Transport;
use crate::error::{Error, Result};
use crate::parsers::html::{elem_text, selector};
use reqwest::blocking::{Client, Response};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;

static HIDDEN_INPUTS: LazyLock<Selector> =
    LazyLock::new(|| selector("form input[type='hidden']"));
static ERRORS: LazyLock<Selector> = LazyLock::new(|| selector(".error"));

/// Blocking HTTP transport with a persistent cookie jar
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport using the user agent and timeout from `config`
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    fn read_body(url: &str, response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            ::log::warn!("{} answered {}", url, status);
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        ::log::trace!("GET {}", url);
        let response = self.client.get(url).send()?;
        Self::read_body(url, response)
    }

    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<String> {
        ::log::trace!("POST {} ({} fields)", url, form.len());
        let response = self.client.post(url).form(form).send()?;
        Self::read_body(url, response)
    }
}

/// Login form URL for the given site origin
pub fn login_url(origin: &str) -> String {
    format!("{}/login", origin.trim_end_matches('/'))
}

/// Signs in through the site's login form.
///
/// The hidden fields of the login form (authenticity token and friends) are
/// echoed back together with the credentials. Any `.error` element in the
/// response is reported as [`Error::Authentication`].
pub fn login<T: Transport + ?Sized>(
    transport: &T,
    origin: &str,
    username: &str,
    password: &str,
) -> Result<()> {
    let url = login_url(origin);
    ::log::info!("Logging in as {}", username);

    let login_page = transport.get(&url)?;
    let mut form = hidden_fields(&Html::parse_document(&login_page));
    ::log::debug!("Login form carries {} hidden fields", form.len());
    form.push(("user[name]".to_string(), username.to_string()));
    form.push(("user[password]".to_string(), password.to_string()));
    form.push(("referer".to_string(), url.clone()));

    let response = transport.post_form(&url, &form)?;
    let errors = login_errors(&Html::parse_document(&response));
    if !errors.is_empty() {
        ::log::error!("Login rejected for {}", username);
        return Err(Error::Authentication(errors.join("&&")));
    }

    ::log::info!("Logged in as {}", username);
    Ok(())
}

/// `(name, value)` pairs of the hidden inputs inside forms
fn hidden_fields(doc: &Html) -> Vec<(String, String)> {
    doc.select(&HIDDEN_INPUTS)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}

fn login_errors(doc: &Html) -> Vec<String> {
    doc.select(&ERRORS).map(elem_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawlers::crawler::fake::FakeTransport;

    const ORIGIN: &str = "https://allpoetry.com";

    const LOGIN_PAGE: &str = r#"<html><body>
        <form action="/login" method="post">
          <input type="hidden" name="utf8" value="✓">
          <input type="hidden" name="authenticity_token" value="tok123">
          <input type="hidden" value="nameless">
          <input type="text" name="user[name]">
        </form>
    </body></html>"#;

    #[test]
    fn test_login_url() {
        assert_eq!(login_url(ORIGIN), "https://allpoetry.com/login");
        assert_eq!(login_url("https://allpoetry.com/"), "https://allpoetry.com/login");
    }

    #[test]
    fn test_login_posts_hidden_fields_and_credentials() {
        let transport = FakeTransport::new()
            .with_page("https://allpoetry.com/login", LOGIN_PAGE)
            .with_post_response("<html><body><p>Welcome back</p></body></html>");

        login(&transport, ORIGIN, "keats", "nightingale").unwrap();

        let posted = transport.posted.borrow();
        assert_eq!(posted.len(), 1);
        let (url, form) = &posted[0];
        assert_eq!(url, "https://allpoetry.com/login");

        let expected: Vec<(String, String)> = [
            ("utf8", "✓"),
            ("authenticity_token", "tok123"),
            ("user[name]", "keats"),
            ("user[password]", "nightingale"),
            ("referer", "https://allpoetry.com/login"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(form, &expected);
    }

    #[test]
    fn test_login_errors_are_reported() {
        let transport = FakeTransport::new()
            .with_page("https://allpoetry.com/login", LOGIN_PAGE)
            .with_post_response(
                r#"<html><body>
                <div class="error">Invalid password</div>
                <span class="error">Too many attempts</span>
                </body></html>"#,
            );

        let err = login(&transport, ORIGIN, "keats", "wrong").unwrap_err();
        match err {
            Error::Authentication(msg) => {
                assert_eq!(msg, "Invalid password&&Too many attempts");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_login_page_failure_propagates() {
        let transport = FakeTransport::new().with_status("https://allpoetry.com/login", 500);
        let err = login(&transport, ORIGIN, "keats", "pw").unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
        assert!(transport.posted.borrow().is_empty());
    }

    #[test]
    fn test_http_transport_builds_from_default_config() {
        assert!(HttpTransport::new(&Config::new()).is_ok());
    }
}
