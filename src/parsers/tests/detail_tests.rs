use crate::error::Error;
use crate::parsers::detail::{extract_author_fields, extract_poem_fields, parse_date, parse_view_count};
use crate::results::{Author, Poem};
use chrono::{TimeZone, Utc};
use scraper::Html;

const POEM_URL: &str = "https://allpoetry.com/poem/8498255-Ode-on-a-Grecian-Urn-by-John-Keats";

const VIEWS_SPAN: &str = r#"<span id="views">541.7k views</span>"#;

/// A detail page with every optional block present. `{views}` is replaced
/// so tests can drop the views counter.
const POEM_PAGE: &str = r#"<html><body>
<div class="bio"><a class="u" href="/john-keats">John Keats</a></div>
<h1 class="title">Ode  on a Grecian
   Urn</h1>
<div class="poem_body">
  <div class="hidden">Report this poem</div>
  <div class="orig_8498255">
    Thou still unravish’d bride<br>of quietness,<br><br>
    Thou foster-child<br>
  </div>
  <div class="copyright">Copyright © John Keats | Year Posted 1819</div>
</div>
<div class="author_copyright">Posted <span class="timeago" title="2020-11-19T10:15:00Z">3 years ago</span></div>
{views}
<div class="cmt_wrap"><span class="num"> 12 </span> likes</div>
<div class="cats_dot"><a href="/t/love"> love </a><a href="/t/nature">nature</a></div>
</body></html>"#;

fn poem_page(views: &str) -> Html {
    Html::parse_document(&POEM_PAGE.replace("{views}", views))
}

#[cfg(test)]
mod poem_tests {
    use super::*;

    #[test]
    fn test_extract_all_fields() {
        let fields = extract_poem_fields(&poem_page(VIEWS_SPAN), POEM_URL).unwrap();

        assert_eq!(fields.url, POEM_URL);
        assert_eq!(fields.title, "Ode on a Grecian Urn");
        assert_eq!(fields.author, "john-keats");
        assert_eq!(
            fields.lines,
            vec!["Thou still unravish’d bride", "of quietness,", "", "Thou foster-child", ""]
        );
        assert_eq!(
            fields.meta.as_deref(),
            Some("Copyright © John Keats | Year Posted 1819")
        );
        assert_eq!(fields.views, Some(541_700));
        assert_eq!(
            fields.date,
            Some(Utc.with_ymd_and_hms(2020, 11, 19, 10, 15, 0).unwrap())
        );
        assert_eq!(fields.likes, Some(12));
        assert_eq!(
            fields.tags,
            Some(vec!["love".to_string(), "nature".to_string()])
        );
    }

    #[test]
    fn test_missing_views_keeps_other_fields() {
        let fields = extract_poem_fields(&poem_page(""), POEM_URL).unwrap();
        assert_eq!(fields.views, None);
        assert_eq!(fields.title, "Ode on a Grecian Urn");
        assert_eq!(fields.author, "john-keats");
        assert!(!fields.lines.is_empty());
        assert_eq!(fields.likes, Some(12));
    }

    #[test]
    fn test_unparseable_views_is_none() {
        let doc = poem_page(r#"<span id="views">lots of views</span>"#);
        let fields = extract_poem_fields(&doc, POEM_URL).unwrap();
        assert_eq!(fields.views, None);
    }

    #[test]
    fn test_missing_optional_blocks() {
        let doc = Html::parse_document(
            r#"<html><body>
            <div class="bio"><a class="u" href="/someone">someone</a></div>
            <div class="title">Untitled</div>
            <div class="poem_body"><div>one line</div></div>
            </body></html>"#,
        );
        let fields = extract_poem_fields(&doc, POEM_URL).unwrap();
        assert_eq!(fields.lines, vec!["one line"]);
        assert_eq!(fields.meta, None);
        assert_eq!(fields.views, None);
        assert_eq!(fields.date, None);
        assert_eq!(fields.likes, None);
        // Absent tag block is None, not an empty list
        assert_eq!(fields.tags, None);
    }

    #[test]
    fn test_empty_tags_block() {
        let doc = Html::parse_document(
            r#"<html><body>
            <div class="bio"><a class="u" href="/someone">someone</a></div>
            <div class="title">Untitled</div>
            <div class="poem_body"><div>x</div></div>
            <div class="cats_dot"></div>
            </body></html>"#,
        );
        let fields = extract_poem_fields(&doc, POEM_URL).unwrap();
        // An empty block reads the same as a missing one
        assert_eq!(fields.tags, None);
        assert!(Poem::new(fields).tags().is_empty());
    }

    #[test]
    fn test_timeago_outside_author_block_is_ignored() {
        let doc = Html::parse_document(
            r#"<html><body>
            <div class="bio"><a class="u" href="/someone">someone</a></div>
            <div class="title">Untitled</div>
            <div class="poem_body"><div>x</div></div>
            <span class="timeago" title="2020-11-19T10:15:00Z">comment time</span>
            </body></html>"#,
        );
        let fields = extract_poem_fields(&doc, POEM_URL).unwrap();
        assert_eq!(fields.date, None);
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let html = POEM_PAGE
            .replace("{views}", "")
            .replace(r#"class="title""#, r#"class="heading""#);
        let err = extract_poem_fields(&Html::parse_document(&html), POEM_URL).unwrap_err();
        assert!(err.is_malformed_page());
        assert!(matches!(err, Error::MalformedPage { field: "title", .. }));
    }

    #[test]
    fn test_missing_body_is_malformed() {
        let html = POEM_PAGE
            .replace("{views}", "")
            .replace("poem_body", "poem_gone");
        let err = extract_poem_fields(&Html::parse_document(&html), POEM_URL).unwrap_err();
        assert!(matches!(err, Error::MalformedPage { field: "poem body", .. }));
    }

    #[test]
    fn test_missing_author_link_is_malformed() {
        let html = POEM_PAGE.replace("{views}", "").replace(r#"class="u""#, "");
        let err = extract_poem_fields(&Html::parse_document(&html), POEM_URL).unwrap_err();
        assert!(matches!(err, Error::MalformedPage { field: "author link", .. }));
    }

    #[test]
    fn test_poem_from_extracted_fields() {
        let fields = extract_poem_fields(&poem_page(VIEWS_SPAN), POEM_URL).unwrap();
        let poem = Poem::new(fields);

        assert_eq!(poem.author(), "john keats");
        assert_eq!(
            poem.lines(),
            ["Thou still unravish d bride", "of quietness,", "", "Thou foster child"]
        );
        assert_eq!(poem.tags(), ["love", "nature"]);
    }
}

#[cfg(test)]
mod author_tests {
    use super::*;

    const AUTHOR_URL: &str = "https://allpoetry.com/Sylvia_Plath";

    #[test]
    fn test_famous_poet_profile() {
        let doc = Html::parse_document(
            r#"<html><body><div class="media">
                <div class="media-body"><h1 class="notop">  Sylvia
                    Plath </h1></div>
                <div class="preview">Sylvia Plath was an American poet.<br>Born 1932.<br>.............<br></div>
            </div></body></html>"#,
        );
        let fields = extract_author_fields(&doc, AUTHOR_URL).unwrap();
        assert_eq!(fields.name, "Sylvia Plath");
        assert_eq!(fields.url, AUTHOR_URL);
        assert_eq!(fields.info, "Sylvia Plath was an American poet.\nBorn 1932.");
    }

    #[test]
    fn test_user_profile_prefers_sub_bio() {
        let doc = Html::parse_document(
            r#"<html><body><div class="media">
                <div class="media-body"><h1 class="notop">river_song</h1></div>
                <div class="preview">Preview text</div>
            </div>
            <div class="sub_bio"><div class="clearfix">I write poems.<br><br><br><br>Hello there</div></div>
            </body></html>"#,
        );
        let fields = extract_author_fields(&doc, AUTHOR_URL).unwrap();
        assert_eq!(fields.info, "I write poems.\n\nHello there");

        let author = Author::new(fields);
        assert_eq!(author.name(), "river song");
    }

    #[test]
    fn test_profile_without_bio() {
        let doc = Html::parse_document(
            r#"<html><body><div class="media-body"><h1 class="notop">Anon</h1></div></body></html>"#,
        );
        let fields = extract_author_fields(&doc, AUTHOR_URL).unwrap();
        assert_eq!(fields.info, "");
    }

    #[test]
    fn test_profile_without_name_is_malformed() {
        let doc = Html::parse_document("<html><body><p>gone</p></body></html>");
        let err = extract_author_fields(&doc, AUTHOR_URL).unwrap_err();
        assert!(err.is_malformed_page());
    }
}

#[cfg(test)]
mod value_parser_tests {
    use super::*;

    #[test]
    fn test_parse_view_count() {
        assert_eq!(parse_view_count("321"), Some(321));
        assert_eq!(parse_view_count("541.7k"), Some(541_700));
        assert_eq!(parse_view_count("2k"), Some(2000));
        assert_eq!(parse_view_count(" 17 "), Some(17));
        assert_eq!(parse_view_count("not a number"), None);
        assert_eq!(parse_view_count("kilo"), None);
        assert_eq!(parse_view_count(""), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2020, 11, 19, 10, 15, 0).unwrap();
        assert_eq!(parse_date("2020-11-19T10:15:00Z"), Some(expected));
        assert_eq!(parse_date("2020-11-19T11:15:00+01:00"), Some(expected));
        assert_eq!(parse_date("2020-11-19 10:15:00 UTC"), Some(expected));
        assert_eq!(parse_date("2020-11-19 10:15:00"), Some(expected));
        assert_eq!(parse_date("Thu, 19 Nov 2020 10:15:00 +0000"), Some(expected));
        assert_eq!(
            parse_date("2020-11-19"),
            Some(Utc.with_ymd_and_hms(2020, 11, 19, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("3 years ago"), None);
    }
}
