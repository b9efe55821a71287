//! Tests for the text sanitizer stages and the full cleaning pipeline

use emotion_corpus::sanitizer::{
    collapse_whitespace, remove_amp_entities, remove_hashtag_markers, remove_retweet_markers,
    strip_non_ascii, strip_quote_delimiters, TextSanitizer,
};

const TUSHY: &str = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"RT @tushy_com: RT if you wouldn't mind being stuck in between @rileyreidx3 &amp; @AidraFOfficial! 😍 #tushy https://t.co/mkUvdIvyeW\"\n";

fn sanitizer() -> TextSanitizer {
    TextSanitizer::new().expect("Failed to create sanitizer")
}

#[test]
fn test_clean_full_tweet() {
    let cleaned = sanitizer().clean(TUSHY);
    // The mention pattern stops at punctuation, so the "!" after a removed
    // mention stays.
    assert_eq!(cleaned, "RT if you wouldn't mind being stuck in between ! 😍 tushy");
}

#[test]
fn test_clean_is_stable_under_normalize() {
    let s = sanitizer();
    let cleaned = s.clean(TUSHY);
    assert_eq!(s.normalize(&cleaned), cleaned);
}

#[test]
fn test_clean_does_not_trim_clean_text_again() {
    // Clean text has no quote delimiters, so a second extraction keeps it whole
    let s = sanitizer();
    let cleaned = s.clean(TUSHY);
    assert_eq!(s.extract_body(&cleaned), cleaned);
}

#[test]
fn test_body_split_on_first_identifier_only() {
    let block = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"replying to 123456789012345678\"\n";
    assert_eq!(sanitizer().extract_body(block), "replying to 123456789012345678");
}

#[test]
fn test_identifier_without_separator_keeps_block() {
    let block = "\"see 897898364787978241 here\"\n";
    assert_eq!(sanitizer().extract_body(block), "see 897898364787978241 here");
}

#[test]
fn test_crlf_terminated_body() {
    let block = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"windows line\"\r\n";
    assert_eq!(sanitizer().extract_body(block), "windows line");
}

#[test]
fn test_strip_quote_delimiters() {
    assert_eq!(strip_quote_delimiters("\"abc\"\n"), Some("abc"));
    assert_eq!(strip_quote_delimiters("\"\"\n"), Some(""));
    assert_eq!(strip_quote_delimiters("\"unterminated\n"), None);
    assert_eq!(strip_quote_delimiters("\""), None);
}

#[test]
fn test_mentions_not_in_emails_or_domains() {
    let s = sanitizer();
    assert_eq!(s.remove_mentions("user.@name"), "user.@name");
    assert_eq!(s.remove_mentions("a-@name"), "a-@name");
    assert_eq!(s.remove_mentions("hi,@name"), "hi,");
    // A single character after @ is not a handle
    assert_eq!(s.remove_mentions("@a b"), "@a b");
}

#[test]
fn test_retweet_marker_exact() {
    assert_eq!(remove_retweet_markers("RT : hello"), "hello");
    assert_eq!(remove_retweet_markers("RT: hello"), "RT: hello");
    assert_eq!(remove_retweet_markers("ART : x"), "Ax");
}

#[test]
fn test_urls_with_query_and_path() {
    let s = sanitizer();
    assert_eq!(s.remove_urls("go http://example.com/path?q=1&r=2#frag end"), "go  end");
    assert_eq!(s.remove_urls("https://sub.domain.co.uk"), "");
    assert_eq!(s.remove_urls("https://localhost/x"), "https://localhost/x");
}

#[test]
fn test_hashtags_and_entities() {
    assert_eq!(remove_hashtag_markers("#love #2017"), "love 2017");
    assert_eq!(remove_amp_entities("salt &amp; pepper &lt;"), "salt  pepper &lt;");
}

#[test]
fn test_non_ascii_filter() {
    // accented letters and CJK are dropped, pictographs and dingbats kept
    assert_eq!(strip_non_ascii("naïve 日本 ☀ ✨ 🚀 🤢"), "nave  ☀ ✨ 🚀 🤢");
    // variation selectors and zero-width joiners are dropped
    assert_eq!(strip_non_ascii("❤\u{fe0f}\u{200d}"), "❤");
}

#[test]
fn test_collapse_whitespace() {
    assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
    assert_eq!(collapse_whitespace(" \n "), "");
}

#[test]
fn test_normalize_order_matters() {
    // the mention is removed before the retweet marker can be seen
    assert_eq!(sanitizer().normalize("RT @someone: great news"), "great news");
}

#[test]
fn test_normalize_leaves_no_control_characters() {
    let cleaned = sanitizer().normalize("bell\u{7}\u{1b}[0m here\r\n");
    assert!(!cleaned.chars().any(char::is_control), "{cleaned:?}");
}
