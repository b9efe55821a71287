//! Tweet text sanitizer.
//!
//! Cleaning is split in two parts:
//!
//! - **extraction** ([`TextSanitizer::extract_body`]) runs once on a raw
//!   record block. It drops the timestamp and identifier columns and the
//!   quote delimiters of the collector's CSV-like output.
//! - **normalization** ([`TextSanitizer::normalize`]) is an ordered list of
//!   pure string rewrites. It is idempotent, so already-clean text can be fed
//!   through it again without damage.
//!
//! Stage order matters: each stage assumes the noise removed by the earlier
//! ones is gone.

use std::borrow::Cow;

use regex::Regex;
use tracing::debug;

use crate::emoji::is_whitelisted_emoji;
use crate::error::Result;

/// Pattern for the tweet identifier column
pub const IDENTIFIER_PATTERN: &str = r"\d{18}";

const MENTION_PATTERN: &str = r"(?P<pre>^|[^a-zA-Z0-9.\-])@[A-Za-z_]+[A-Za-z0-9_]+";
const URL_PATTERN: &str =
    r"(http|ftp|https)://([\w_-]+(?:(?:\.[\w_-]+)+))([\w.,@?^=%&:/~+#-]*[\w@?^=%&/~+#-])?";
const RETWEET_MARKER: &str = "RT : ";
const AMP_ENTITY: &str = "&amp;";

/// Cleans raw record blocks into single-line corpus text
#[derive(Debug, Clone)]
pub struct TextSanitizer {
    identifier_regex: Regex,
    mention_regex: Regex,
    url_regex: Regex,
}

impl TextSanitizer {
    /// Compile the sanitizer's patterns
    pub fn new() -> Result<Self> {
        Ok(Self {
            identifier_regex: Regex::new(IDENTIFIER_PATTERN)?,
            mention_regex: Regex::new(MENTION_PATTERN)?,
            url_regex: Regex::new(URL_PATTERN)?,
        })
    }

    /// Clean a raw record block: extract the body once, then normalize it.
    #[must_use]
    pub fn clean(&self, block: &str) -> String {
        self.normalize(self.extract_body(block))
    }

    /// Message body of a raw block, without identifier columns or quoting.
    ///
    /// The body is whatever follows the first `<identifier>",`; a block with
    /// no identifier is taken whole. The collector quotes every field, so the
    /// body should read `"..."` followed by the line terminator. When it does,
    /// the two quotes and the terminator are removed. When it does not, the
    /// body is returned untouched rather than cut at a fixed offset.
    #[must_use]
    pub fn extract_body<'a>(&self, block: &'a str) -> &'a str {
        let body = self
            .identifier_regex
            .find(block)
            .and_then(|id| {
                let separator = format!("{}\",", id.as_str());
                block.split_once(separator.as_str()).map(|(_, rest)| rest)
            })
            .unwrap_or(block);

        strip_quote_delimiters(body).unwrap_or_else(|| {
            debug!(body_len = body.len(), "record body is not quote-delimited, left untrimmed");
            body
        })
    }

    /// Apply every normalization stage, repeating until nothing changes.
    ///
    /// A single pass can expose new noise (`RT  : ` only becomes the retweet
    /// marker once whitespace is collapsed). Every pass after the first either
    /// removes characters or leaves the text unchanged, so the loop ends.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.normalize_once(text);
        loop {
            let next = self.normalize_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn normalize_once(&self, text: &str) -> String {
        let text = self.remove_mentions(text);
        let text = remove_retweet_markers(&text);
        let text = self.remove_urls(&text);
        let text = remove_hashtag_markers(&text);
        let text = remove_amp_entities(&text);
        let text = strip_non_ascii(&text);
        collapse_whitespace(&text)
    }

    /// Remove `@user` tokens not glued to a preceding word, address or domain
    #[must_use]
    pub fn remove_mentions<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.mention_regex.replace_all(text, "${pre}")
    }

    /// Remove http, https and ftp URLs
    #[must_use]
    pub fn remove_urls<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.url_regex.replace_all(text, "")
    }
}

/// Body between the opening quote and the closing quote before the line end
#[must_use]
pub fn strip_quote_delimiters(body: &str) -> Option<&str> {
    body.trim_end_matches(['\r', '\n'])
        .strip_prefix('"')?
        .strip_suffix('"')
}

/// Remove the literal retweet marker left after mention removal
#[must_use]
pub fn remove_retweet_markers(text: &str) -> String {
    text.replace(RETWEET_MARKER, "")
}

/// Drop `#` so hashtags read as plain words
#[must_use]
pub fn remove_hashtag_markers(text: &str) -> String {
    text.replace('#', "")
}

/// Drop the escaped ampersand entity
#[must_use]
pub fn remove_amp_entities(text: &str) -> String {
    text.replace(AMP_ENTITY, "")
}

/// Keep ASCII text and whitelisted emoji, drop everything else.
///
/// Non-whitespace ASCII control characters are dropped too.
#[must_use]
pub fn strip_non_ascii(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            if c.is_ascii() {
                !c.is_ascii_control() || c.is_whitespace()
            } else {
                is_whitelisted_emoji(c)
            }
        })
        .collect()
}

/// Collapse whitespace runs to one space and trim the ends
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> TextSanitizer {
        TextSanitizer::new().expect("patterns compile")
    }

    #[test]
    fn test_extract_body_drops_columns_and_quotes() {
        let block = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"hello there\"\n";
        assert_eq!(sanitizer().extract_body(block), "hello there");
    }

    #[test]
    fn test_extract_body_multiline() {
        let block = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"first\nsecond\"\n";
        assert_eq!(sanitizer().extract_body(block), "first\nsecond");
    }

    #[test]
    fn test_extract_body_without_identifier_uses_block() {
        assert_eq!(sanitizer().extract_body("\"just text\"\n"), "just text");
        assert_eq!(sanitizer().extract_body("no quotes here\n"), "no quotes here\n");
    }

    #[test]
    fn test_mentions() {
        let s = sanitizer();
        assert_eq!(s.remove_mentions("@alice hi @bob_2 there"), " hi  there");
        assert_eq!(s.remove_mentions("mail me@example.com"), "mail me@example.com");
        assert_eq!(s.remove_mentions("(@carol)"), "()");
    }

    #[test]
    fn test_urls() {
        let s = sanitizer();
        assert_eq!(s.remove_urls("see https://t.co/mkUvdIvyeW now"), "see  now");
        assert_eq!(s.remove_urls("ftp://files.example.org/a?b=c"), "");
        assert_eq!(s.remove_urls("http:/broken"), "http:/broken");
    }

    #[test]
    fn test_strip_non_ascii_keeps_whitelisted() {
        assert_eq!(strip_non_ascii("caf\u{e9} \u{2764}\u{fe0f} \u{1F60D}"), "caf \u{2764} \u{1F60D}");
        assert_eq!(strip_non_ascii("a\u{1}b\tc"), "ab\tc");
    }

    #[test]
    fn test_normalize_reaches_fixpoint() {
        assert_eq!(sanitizer().normalize("RT  : hello"), "hello");
    }
}
