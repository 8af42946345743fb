use lazy_static::lazy_static;
use regex::Regex;

use super::{link_marker_target, DictionaryProfile};

lazy_static! {
    static ref SCHEME_LINK_RE: Regex =
        Regex::new(r#"(href|src)\s*=\s*"(?:entry|sound|bword)://"#).unwrap();
}

/// Generic MDict export. Knows the alias marker, in-dictionary link schemes
/// and the backslash-rooted MDD key layout, but not any entry markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MdictProfile;

impl DictionaryProfile for MdictProfile {
    fn redirect_target(&self, html: &str) -> Option<String> {
        link_marker_target(html)
    }

    // `entry://word` and `sound://a.mp3` become relative links, so the browser
    // comes back through `/search/...` for both entries and media.
    fn rewrite_result(&self, html: String) -> String {
        SCHEME_LINK_RE.replace_all(&html, r#"$1="./"#).into_owned()
    }

    fn attachment_key(&self, key: &str) -> String {
        let key = key.replace('/', "\\");
        if key.starts_with('\\') {
            key
        } else {
            format!("\\{key}")
        }
    }
}
