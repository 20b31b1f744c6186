//! Text normalization and tokenization.
//!
//! Two stages, applied in order to every piece of input text (a tool's
//! `name`/`aliases`/`keywords`/`description`, or a session's accumulated
//! buffer):
//!
//! 1. [`normalize`] — lowercase, NFD-decompose, strip combining marks
//!    (diacritics), collapse any run of characters outside `[a-z0-9]` to a
//!    single space, trim.
//! 2. [`tokenize`] — split the normalized text on whitespace and drop
//!    stopwords, with one exception: in streaming mode (partial input still
//!    being typed) the last token is kept even if it is a stopword, since it
//!    may still grow into a non-stopword by the next keystroke.
//!
//! There is deliberately no stemming here: matching is by raw normalized
//! term and the `Ranker`'s length bonus and prefix expansion do the work a
//! stemmer would otherwise be asked to do.

use unicode_normalization::UnicodeNormalization;

use crate::types::{Locale, LocaleSet};

/// English stopwords, dropped from non-terminal tokens.
pub const STOPWORDS_EN: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "can", "did", "do", "does", "for",
    "from", "had", "has", "have", "how", "i", "if", "in", "into", "is", "it", "its", "me", "my",
    "of", "on", "or", "our", "please", "she", "should", "so", "that", "the", "their", "then",
    "there", "this", "to", "was", "we", "what", "when", "where", "which", "who", "will", "with",
    "would", "you", "your",
];

/// Portuguese stopwords, dropped from non-terminal tokens.
pub const STOPWORDS_PT: &[&str] = &[
    "a", "ao", "aos", "as", "com", "como", "da", "das", "de", "do", "dos", "e", "ela", "elas",
    "ele", "eles", "em", "entao", "essa", "esse", "esta", "este", "eu", "isso", "isto", "la",
    "mas", "me", "meu", "minha", "na", "nao", "nas", "no", "nos", "nossa", "nosso", "o", "os",
    "ou", "para", "pelo", "pela", "por", "que", "quem", "se", "sem", "ser", "seu", "sua", "so",
    "tambem", "te", "um", "uma", "voce",
];

fn stopword_list(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::English => STOPWORDS_EN,
        Locale::Portuguese => STOPWORDS_PT,
    }
}

/// Whether `word` is a stopword in any locale active in `locales` — a
/// locale hint only ever expands what's filtered, never narrows it.
fn is_stopword(word: &str, locales: &LocaleSet) -> bool {
    locales.iter().any(|locale| stopword_list(locale).contains(&word))
}

/// Lowercase, strip diacritics, and collapse non-alphanumeric runs to a
/// single space.
///
/// ```
/// use toolsense::search::tokenize::normalize;
/// assert_eq!(normalize("Exportação-CSV!"), "exportacao csv");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut wrote_any = false;

    for c in text.nfd() {
        if unicode_normalization::char::is_combining_mark(c) {
            continue;
        }
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            if pending_space && wrote_any {
                out.push(' ');
            }
            out.push(lower);
            pending_space = false;
            wrote_any = true;
        } else if c.is_alphanumeric() {
            // Non-ASCII letters/digits surviving NFD + mark-strip (rare,
            // e.g. certain scripts without a combining-mark decomposition)
            // still count as word characters, not separators.
            for lc in c.to_lowercase() {
                if pending_space && wrote_any {
                    out.push(' ');
                }
                out.push(lc);
                pending_space = false;
                wrote_any = true;
            }
        } else {
            pending_space = true;
        }
    }

    out
}

/// Split normalized text into tokens, dropping stopwords.
///
/// When `streaming` is `true`, the final token is always kept even if it is
/// a stopword — it represents a word still being typed and may not be a
/// complete stopword by the next keystroke. Non-streaming callers (e.g.
/// indexing a catalog field) should pass `false`.
pub fn tokenize(text: &str, locales: &LocaleSet, streaming: bool) -> Vec<String> {
    let normalized = normalize(text);
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let last_index = words.len().checked_sub(1);

    words
        .iter()
        .enumerate()
        .filter(|(i, word)| {
            let is_last = last_index == Some(*i);
            !is_stopword(word, locales) || (streaming && is_last)
        })
        .map(|(_, word)| (*word).to_string())
        .collect()
}
