//! Script classification of characters.
//!
//! Two id spaces are used by the model: a small "relevant script" space keyed
//! on UTF-8 width and a handful of code point ranges, and the broader ULScript
//! space used for the dominant script of a text.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

/// Scripts the relevant-script feature distinguishes.
///
/// Discriminants are the embedding row ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum RelevantScript {
    /// Reserved for undecodable input; a Rust `char` never maps here.
    Error = 0,
    /// Any one-byte (ASCII) character.
    OtherUtf8OneByte = 1,
    /// Two-byte characters outside the ranges below.
    OtherUtf8TwoBytes = 2,
    /// Three-byte characters outside the ranges below.
    OtherUtf8ThreeBytes = 3,
    /// Any four-byte character.
    OtherUtf8FourBytes = 4,
    /// U+0370..=U+03FF
    Greek = 5,
    /// U+0400..=U+04FF
    Cyrillic = 6,
    /// U+0590..=U+05FF
    Hebrew = 7,
    /// U+0600..=U+06FF
    Arabic = 8,
    /// U+1100..=U+11FF
    HangulJamo = 9,
    /// U+3041..=U+309F
    Hiragana = 10,
    /// U+30A0..=U+30FF
    Katakana = 11,
}

impl RelevantScript {
    /// Number of ids, equal to the rows of the relevant-script embedding table.
    pub const COUNT: usize = 12;

    /// Classify a single character.
    pub fn of(c: char) -> Self {
        let cp = c as u32;
        match c.len_utf8() {
            1 => RelevantScript::OtherUtf8OneByte,
            2 => match cp {
                0x0370..=0x03FF => RelevantScript::Greek,
                0x0400..=0x04FF => RelevantScript::Cyrillic,
                0x0590..=0x05FF => RelevantScript::Hebrew,
                0x0600..=0x06FF => RelevantScript::Arabic,
                _ => RelevantScript::OtherUtf8TwoBytes,
            },
            3 => match cp {
                0x1100..=0x11FF => RelevantScript::HangulJamo,
                0x3041..=0x309F => RelevantScript::Hiragana,
                0x30A0..=0x30FF => RelevantScript::Katakana,
                _ => RelevantScript::OtherUtf8ThreeBytes,
            },
            _ => RelevantScript::OtherUtf8FourBytes,
        }
    }

    /// Embedding row id.
    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }
}

/// A script id in the ULScript space used by the dominant-script feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UlScript(pub u32);

impl UlScript {
    /// Characters shared by many scripts, and the fallback for anything unmapped.
    pub const COMMON: UlScript = UlScript(0);
    /// Latin.
    pub const LATIN: UlScript = UlScript(1);
    /// Han, also standing in for kana, Bopomofo and Hangul.
    pub const HANI: UlScript = UlScript(24);
    /// Number of real ULScript ids.
    pub const NUM_UL_SCRIPTS: u32 = 102;
    /// Sentinel for Korean text, one past the real ids.
    pub const HANGUL: UlScript = UlScript(Self::NUM_UL_SCRIPTS);
    /// Rows of the dominant-script embedding table.
    pub const TABLE_ROWS: usize = Self::NUM_UL_SCRIPTS as usize + 1;

    /// ULScript of a single character.
    pub fn of(c: char) -> Self {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        SCRIPT_SET
            .matches(s)
            .iter()
            .next()
            .map(|idx| UlScript(UNICODE_TO_UL[idx].1))
            .unwrap_or(UlScript::COMMON)
    }

    /// Embedding row id.
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Unicode script name (as understood by `\p{sc=..}`) and its ULScript id.
const UNICODE_TO_UL: &[(&str, u32)] = &[
    ("Common", 0),
    ("Latin", 1),
    ("Greek", 2),
    ("Cyrillic", 3),
    ("Armenian", 4),
    ("Hebrew", 5),
    ("Arabic", 6),
    ("Syriac", 7),
    ("Thaana", 8),
    ("Devanagari", 9),
    ("Bengali", 10),
    ("Gurmukhi", 11),
    ("Gujarati", 12),
    ("Oriya", 13),
    ("Tamil", 14),
    ("Telugu", 15),
    ("Kannada", 16),
    ("Malayalam", 17),
    ("Sinhala", 18),
    ("Thai", 19),
    ("Lao", 20),
    ("Tibetan", 21),
    ("Myanmar", 22),
    ("Georgian", 23),
    ("Han", 24),
    ("Ethiopic", 25),
    ("Cherokee", 26),
    ("Canadian_Aboriginal", 27),
    ("Ogham", 28),
    ("Runic", 29),
    ("Khmer", 30),
    ("Mongolian", 31),
    // Kana, Bopomofo and Hangul share the Han row.
    ("Hiragana", 24),
    ("Katakana", 24),
    ("Bopomofo", 24),
    ("Hangul", 24),
    ("Yi", 35),
    ("Old_Italic", 36),
    ("Gothic", 37),
    ("Deseret", 38),
    ("Inherited", 39),
    ("Tagalog", 40),
    ("Hanunoo", 41),
    ("Buhid", 42),
    ("Tagbanwa", 43),
    ("Limbu", 44),
    ("Tai_Le", 45),
    ("Linear_B", 46),
    ("Ugaritic", 47),
    ("Shavian", 48),
    ("Osmanya", 49),
    ("Cypriot", 50),
    ("Braille", 51),
    ("Buginese", 52),
    ("Coptic", 53),
    ("New_Tai_Lue", 54),
    ("Glagolitic", 55),
    ("Tifinagh", 56),
    ("Syloti_Nagri", 57),
    ("Old_Persian", 58),
    ("Kharoshthi", 59),
    ("Balinese", 60),
    ("Cuneiform", 61),
    ("Phoenician", 62),
    ("Phags_Pa", 63),
    ("Nko", 64),
    ("Sundanese", 65),
    ("Lepcha", 66),
    ("Ol_Chiki", 67),
    ("Vai", 68),
    ("Saurashtra", 69),
    ("Kayah_Li", 70),
    ("Rejang", 71),
    ("Lycian", 72),
    ("Carian", 73),
    ("Lydian", 74),
    ("Cham", 75),
    ("Tai_Tham", 76),
    ("Tai_Viet", 77),
    ("Avestan", 78),
    ("Egyptian_Hieroglyphs", 79),
    ("Samaritan", 80),
    ("Lisu", 81),
    ("Bamum", 82),
    ("Javanese", 83),
    ("Meetei_Mayek", 84),
    ("Imperial_Aramaic", 85),
    ("Old_South_Arabian", 86),
    ("Inscriptional_Parthian", 87),
    ("Inscriptional_Pahlavi", 88),
    ("Old_Turkic", 89),
    ("Kaithi", 90),
    ("Batak", 91),
    ("Brahmi", 92),
    ("Mandaic", 93),
    ("Chakma", 94),
    ("Meroitic_Cursive", 95),
    ("Meroitic_Hieroglyphs", 96),
    ("Miao", 97),
    ("Sharada", 98),
    ("Sora_Sompeng", 99),
    ("Takri", 100),
];

static SCRIPT_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(
        UNICODE_TO_UL
            .iter()
            .map(|(name, _)| format!(r"\p{{sc={name}}}")),
    )
    .expect("script patterns compile")
});

/// First letter that starts a word.
static FIRST_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\p{L}").expect("static pattern compiles"));

/// Whether `c` lies in one of the Hangul blocks.
pub fn is_hangul(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x11FF      // Jamo
            | 0xA960..=0xA97F // Jamo Extended-A
            | 0xD7B0..=0xD7FF // Jamo Extended-B
            | 0x3130..=0x318F // Compatibility Jamo
            | 0xFFA0..=0xFFDC // Halfwidth Jamo
            | 0xAC00..=0xD7AF // Syllables
    )
}

/// Whether strictly more non-space characters of `text` are Hangul than not.
pub fn is_mostly_hangul(text: &str) -> bool {
    let (hangul, other) = text
        .chars()
        .filter(|&c| c != ' ')
        .fold((0usize, 0usize), |(h, o), c| {
            if is_hangul(c) {
                (h + 1, o)
            } else {
                (h, o + 1)
            }
        });
    hangul > other
}

/// Script of the first word-initial letter, with Korean text promoted to the Hangul sentinel.
pub fn dominant_script(text: &str) -> UlScript {
    let script = FIRST_LETTER
        .find(text)
        .and_then(|m| m.as_str().chars().next())
        .map(UlScript::of)
        .unwrap_or(UlScript::COMMON);

    if script == UlScript::HANI && is_mostly_hangul(text) {
        UlScript::HANGUL
    } else {
        script
    }
}
