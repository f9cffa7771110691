//! Locale-style string ordering for rendered listings.
//!
//! Documentation pages list tools and settings alphabetically with no
//! secondary sort, so the comparison must be a deterministic total order
//! that matches the CLDR root collation for the names we actually see.
//!
//! Levels, in order:
//! 1. primary: base characters with accents and case removed. Punctuation
//!    sorts before digits and digits before letters; punctuation follows
//!    the CLDR root order (`_` < `-` < `,` < ... < `.` < ... < `+`).
//! 2. secondary: accents, unaccented first.
//! 3. tertiary: case, lowercase first.
//! 4. raw code point order, so distinct strings never compare equal.
use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// ASCII punctuation and symbols in CLDR root order.
const PUNCTUATION_ORDER: &str = " _-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Weight of a base character at the primary level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Primary {
    /// Rank in [`PUNCTUATION_ORDER`] (unlisted characters rank last), then
    /// the character itself.
    Punctuation(usize, char),
    Digit(char),
    Letter(char),
}

fn primary(c: char) -> Primary {
    if c.is_alphabetic() {
        Primary::Letter(c.to_lowercase().next().unwrap_or(c))
    } else if c.is_numeric() {
        Primary::Digit(c)
    } else if c.is_whitespace() {
        Primary::Punctuation(0, c)
    } else {
        let rank = PUNCTUATION_ORDER
            .find(c)
            .unwrap_or(PUNCTUATION_ORDER.len());
        Primary::Punctuation(rank, c)
    }
}

/// A base character and the combining marks that follow it after
/// canonical decomposition.
#[derive(Debug)]
struct Unit {
    base: char,
    marks: Vec<char>,
}

fn units(s: &str) -> Vec<Unit> {
    let mut out = Vec::<Unit>::new();
    for c in s.nfd() {
        match out.last_mut() {
            Some(unit) if is_combining_mark(c) => unit.marks.push(c),
            _ => out.push(Unit {
                base: c,
                marks: Vec::new(),
            }),
        }
    }
    out
}

/// Compare two strings the way a locale-aware sort would.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let (ua, ub) = (units(a), units(b));
    ua.iter()
        .map(|u| primary(u.base))
        .cmp(ub.iter().map(|u| primary(u.base)))
        .then_with(|| ua.iter().map(|u| &u.marks).cmp(ub.iter().map(|u| &u.marks)))
        .then_with(|| {
            ua.iter()
                .map(|u| u.base.is_uppercase())
                .cmp(ub.iter().map(|u| u.base.is_uppercase()))
        })
        .then_with(|| a.cmp(b))
}

/// Sort `items` in place by a string key using [`locale_cmp`].
pub fn sort_by_key<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| locale_cmp(key(a), key(b)));
}
