use url::Url;

/// Resolves a listing href against the origin.
///
/// Root-relative hrefs (`/poem/1-Ode`) are appended to the origin verbatim,
/// keeping any path on the origin and leaving the href unescaped. Other hrefs
/// go through [`Url::join`], so absolute links are returned as they are. If
/// the origin cannot be parsed the two parts are simply concatenated.
pub fn absolute_url(origin: &str, href: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        return format!("{}{}", origin.trim_end_matches('/'), href);
    }
    match Url::parse(origin).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            href.trim_start_matches('/')
        ),
    }
}

/// Formats a count with comma thousands separators: 541700 -> "541,700"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortens a label for progress lines, marking the cut with "..."
pub fn short_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url() {
        assert_eq!(
            absolute_url("https://allpoetry.com", "/poem/123-Ode"),
            "https://allpoetry.com/poem/123-Ode"
        );
        assert_eq!(
            absolute_url("https://allpoetry.com/", "/a/ode"),
            "https://allpoetry.com/a/ode"
        );
        // Already absolute links are kept
        assert_eq!(
            absolute_url("https://allpoetry.com", "https://example.org/x"),
            "https://example.org/x"
        );
        // Unparseable origin falls back to concatenation
        assert_eq!(absolute_url("not a url", "a"), "not a url/a");
    }

    #[test]
    fn test_absolute_url_keeps_href_and_origin_path() {
        assert_eq!(
            absolute_url("https://allpoetry.com", "/poem/1-Ode à Psyché"),
            "https://allpoetry.com/poem/1-Ode à Psyché"
        );
        assert_eq!(
            absolute_url("http://localhost:8080/mirror/", "/poem/1-Ode"),
            "http://localhost:8080/mirror/poem/1-Ode"
        );
        // Protocol-relative hrefs are resolved, not appended
        assert_eq!(
            absolute_url("https://allpoetry.com", "//cdn.allpoetry.com/x"),
            "https://cdn.allpoetry.com/x"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(541700), "541,700");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Ode", 15), "Ode");
        assert_eq!(short_label("The Love Song of J. Alfred", 15), "The Love Son...");
    }
}
