//! Stylized letterform normalization.
//!
//! Profile names often use "small caps" and phonetic letters to look
//! decorative (`ᴀɴɴᴀ`). These are folded onto plain ASCII before matching.

use unicode_normalization::UnicodeNormalization;

/// Stylized letter mapping table
const STYLIZED_MAPPINGS: &[(char, char)] = &[
    ('ᴀ', 'a'),
    ('ʙ', 'b'),
    ('ᴄ', 'c'),
    ('ᴅ', 'd'),
    ('ᴇ', 'e'),
    ('ꜰ', 'f'),
    ('ɢ', 'g'),
    ('ʜ', 'h'),
    ('ɪ', 'i'),
    ('ᴊ', 'j'),
    ('ᴋ', 'k'),
    ('ʟ', 'l'),
    ('ᴍ', 'm'),
    ('ɴ', 'n'),
    ('ᴏ', 'o'),
    ('ᴘ', 'p'),
    ('ǫ', 'q'),
    ('ʀ', 'r'),
    ('ꜱ', 's'),
    ('ᴛ', 't'),
    ('ᴜ', 'u'),
    ('ᴠ', 'v'),
    ('ᴡ', 'w'),
    ('ʏ', 'y'),
    ('ᴢ', 'z'),
];

/// Replaces stylized letters with their ASCII counterparts.
///
/// Characters outside the table are left untouched.
pub fn normalize(text: &str) -> String {
    text.chars().map(map_stylized).collect()
}

/// NFKC-folds the text, then applies [`normalize`].
///
/// Folds mathematical alphanumerics (`𝐚𝐧𝐧𝐚`) and fullwidth forms
/// (`ａｎｎａ`) as well as the small-caps table.
pub fn normalize_compat(text: &str) -> String {
    text.nfkc().map(map_stylized).collect()
}

fn map_stylized(c: char) -> char {
    STYLIZED_MAPPINGS
        .iter()
        .find(|(stylized, _)| *stylized == c)
        .map(|(_, plain)| *plain)
        .unwrap_or(c)
}
