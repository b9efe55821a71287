//! Emoji handling: the whitelist the sanitizer keeps, the glyph to emotion
//! table, and the presence gate applied to raw records.

use std::collections::BTreeSet;

use crate::models::EmotionLabel;

/// Glyphs that label a record, with the emotion each one implies
pub const EMOTION_TABLE: [(char, EmotionLabel); 12] = [
    ('\u{1F628}', EmotionLabel::Fear),      // 😨
    ('\u{1F631}', EmotionLabel::Fear),      // 😱
    ('\u{1F60D}', EmotionLabel::Happiness), // 😍
    ('\u{2764}', EmotionLabel::Happiness),  // ❤
    ('\u{1F633}', EmotionLabel::Surprise),  // 😳
    ('\u{1F62E}', EmotionLabel::Surprise),  // 😮
    ('\u{1F621}', EmotionLabel::Anger),     // 😡
    ('\u{1F620}', EmotionLabel::Anger),     // 😠
    ('\u{1F622}', EmotionLabel::Sadness),   // 😢
    ('\u{1F614}', EmotionLabel::Sadness),   // 😔
    ('\u{1F616}', EmotionLabel::Disgust),   // 😖
    ('\u{1F922}', EmotionLabel::Disgust),   // 🤢
];

/// Code-point ranges kept by the sanitizer's non-ASCII filter
///
/// Pictographs, emoticons, transport/map symbols, miscellaneous symbols,
/// dingbats and supplemental pictographs (needed for 🤢).
pub const WHITELIST_RANGES: [(char, char); 5] = [
    ('\u{1F300}', '\u{1F64F}'),
    ('\u{1F680}', '\u{1F6FF}'),
    ('\u{2600}', '\u{26FF}'),
    ('\u{2700}', '\u{27BF}'),
    ('\u{1F900}', '\u{1F9FF}'),
];

/// True if `c` falls in one of the whitelisted emoji ranges
#[must_use]
pub fn is_whitelisted_emoji(c: char) -> bool {
    WHITELIST_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

/// True if `c` is one of the twelve labelling glyphs
#[must_use]
pub fn is_target_glyph(c: char) -> bool {
    emotion_for(c).is_some()
}

/// Presence gate: does the text hold at least one labelling glyph?
#[must_use]
pub fn contains_target_emoji(text: &str) -> bool {
    text.chars().any(is_target_glyph)
}

/// Emotion implied by a single glyph
#[must_use]
pub fn emotion_for(c: char) -> Option<EmotionLabel> {
    EMOTION_TABLE
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|&(_, label)| label)
}

/// Remove every whitelisted glyph from `text`.
///
/// Returns the remaining text, with whitespace re-collapsed so a removed glyph
/// leaves no double space, and the glyphs in order of appearance.
#[must_use]
pub fn extract_emojis(text: &str) -> (String, Vec<char>) {
    let mut emojis = Vec::new();
    let stripped: String = text
        .chars()
        .filter(|&c| {
            if is_whitelisted_emoji(c) {
                emojis.push(c);
                false
            } else {
                true
            }
        })
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    (collapsed, emojis)
}

/// Distinct emotions implied by a list of glyphs.
///
/// Duplicate glyphs, or two glyphs for the same emotion, yield one label.
/// Glyphs outside [`EMOTION_TABLE`] contribute nothing.
#[must_use]
pub fn identify_emotions(emojis: &[char]) -> BTreeSet<EmotionLabel> {
    emojis.iter().filter_map(|&c| emotion_for(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_target_glyph_is_whitelisted() {
        for (glyph, _) in EMOTION_TABLE {
            assert!(is_whitelisted_emoji(glyph), "{glyph} would be stripped");
        }
    }

    #[test]
    fn test_table_covers_each_label_twice() {
        for label in EmotionLabel::ALL {
            let count = EMOTION_TABLE.iter().filter(|(_, l)| *l == label).count();
            assert_eq!(count, 2, "{label}");
        }
    }

    #[test]
    fn test_extract_emojis() {
        let (text, emojis) = extract_emojis("so scared 😨 of this 😱!");
        assert_eq!(text, "so scared of this !");
        assert_eq!(emojis, vec!['😨', '😱']);
    }

    #[test]
    fn test_identify_emotions_dedupes() {
        let labels = identify_emotions(&['😨', '😱', '😨']);
        assert_eq!(labels.into_iter().collect::<Vec<_>>(), vec![EmotionLabel::Fear]);
    }

    #[test]
    fn test_unmapped_glyph_gives_nothing() {
        assert!(identify_emotions(&['😀', '🚀']).is_empty());
        assert!(!contains_target_emoji("hello 😀"));
    }
}
