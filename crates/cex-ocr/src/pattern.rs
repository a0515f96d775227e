//! # Date Pattern Scanners
//!
//! The ordered pattern list and the byte-level scanners behind it. Each
//! pattern knows how to locate the first occurrence of its shape anywhere
//! in the recognized text; disambiguation and range validation happen in
//! [`crate::extract`].
//!
//! Shapes searched, in priority order:
//!
//! 1. numeric triple with `/` separators (`01/02/1990`, `1990/01/02`)
//! 2. numeric triple with `-` separators (`01-02-1990`, `1990-01-02`)
//! 3. spelled-out month (`January 1, 1990`, `Mar 3rd 1985`)
//! 4. `DOB:`-labeled numeric date
//! 5. `Date of Birth:`-labeled numeric date
//! 6. `Birth Date:`-labeled numeric date

/// A candidate numeric date triple in document order, before
/// year/month/day disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericTriple {
    /// The three numeric tokens as they appear left to right.
    pub values: [u32; 3],
}

/// A raw pattern match, prior to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawMatch {
    /// Three numeric tokens needing year-position disambiguation.
    Numeric(NumericTriple),
    /// A spelled-out month date; component positions are unambiguous.
    MonthName {
        /// Month number resolved from the name table.
        month: u32,
        /// Day of month token.
        day: u32,
        /// Four-digit year token.
        year: u32,
    },
}

/// One entry in the ordered pattern list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// Numeric triple separated by `/`.
    NumericSlash,
    /// Numeric triple separated by `-`.
    NumericDash,
    /// Spelled-out month name.
    MonthName,
    /// `DOB:` label followed by a numeric date.
    LabeledDob,
    /// `Date of Birth:` label followed by a numeric date.
    LabeledDateOfBirth,
    /// `Birth Date:` label followed by a numeric date.
    LabeledBirthDate,
}

/// The ordered pattern list. The first pattern whose match survives
/// validation wins.
pub const PATTERN_ORDER: &[DatePattern] = &[
    DatePattern::NumericSlash,
    DatePattern::NumericDash,
    DatePattern::MonthName,
    DatePattern::LabeledDob,
    DatePattern::LabeledDateOfBirth,
    DatePattern::LabeledBirthDate,
];

impl DatePattern {
    /// Find the first occurrence of this pattern's shape in `text`.
    pub fn find(&self, text: &str) -> Option<RawMatch> {
        match self {
            Self::NumericSlash => {
                find_separated_triple(text, &[b'/']).map(RawMatch::Numeric)
            }
            Self::NumericDash => {
                find_separated_triple(text, &[b'-']).map(RawMatch::Numeric)
            }
            Self::MonthName => find_month_name_date(text),
            Self::LabeledDob => find_labeled_date(text, &["dob"]).map(RawMatch::Numeric),
            Self::LabeledDateOfBirth => {
                find_labeled_date(text, &["date", "of", "birth"]).map(RawMatch::Numeric)
            }
            Self::LabeledBirthDate => {
                find_labeled_date(text, &["birth", "date"]).map(RawMatch::Numeric)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric triple scanning
// ---------------------------------------------------------------------------

/// Length of the digit run starting at `i`.
fn digit_run(bytes: &[u8], i: usize) -> usize {
    bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse `len` ASCII digits starting at `i` as a number.
///
/// Saturates far above any calendar value, so overflow cannot produce a
/// spuriously valid date.
fn read_number(bytes: &[u8], i: usize, len: usize) -> u32 {
    bytes[i..i + len]
        .iter()
        .fold(0u32, |acc, b| acc.saturating_mul(10) + u32::from(b - b'0'))
}

/// Match a numeric token of an allowed length at `i`, requiring the byte
/// after the token to satisfy `next_ok`. Longer lengths are tried first.
fn match_token(
    bytes: &[u8],
    i: usize,
    lengths: &[usize],
    next_ok: impl Fn(Option<u8>) -> bool,
) -> Option<(u32, usize)> {
    let run = digit_run(bytes, i);
    for &len in lengths {
        if run >= len && next_ok(bytes.get(i + len).copied()) {
            return Some((read_number(bytes, i, len), len));
        }
    }
    None
}

/// Try to match a full `T sep T sep T` shape at position `i`.
///
/// The leading token is either a 4-digit year or a 1-2 digit month/day;
/// the trailing token must then be 1-2 or 4 digits respectively, so that
/// exactly one token can be the year. Each separator is drawn
/// independently from `seps`.
fn match_triple_at(bytes: &[u8], i: usize, seps: &[u8]) -> Option<NumericTriple> {
    let is_sep = |b: Option<u8>| b.map(|b| seps.contains(&b)).unwrap_or(false);

    let (first, len1) = match_token(bytes, i, &[4, 2, 1], is_sep)?;
    let mut pos = i + len1 + 1;

    let (second, len2) = match_token(bytes, pos, &[2, 1], is_sep)?;
    pos += len2 + 1;

    // Year-first shapes take a short trailing token; otherwise the year
    // must trail as exactly four digits.
    let third_lengths: &[usize] = if len1 == 4 { &[2, 1] } else { &[4] };
    let (third, _) = match_token(bytes, pos, third_lengths, |_| true)?;

    Some(NumericTriple {
        values: [first, second, third],
    })
}

/// Scan the whole text for the first separated numeric triple.
fn find_separated_triple(text: &str, seps: &[u8]) -> Option<NumericTriple> {
    let bytes = text.as_bytes();
    (0..bytes.len())
        .filter(|&i| bytes[i].is_ascii_digit())
        .find_map(|i| match_triple_at(bytes, i, seps))
}

// ---------------------------------------------------------------------------
// Month-name scanning
// ---------------------------------------------------------------------------

/// Month name table: full names before abbreviations so the longest form
/// wins at any given position.
const MONTH_NAMES: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Case-insensitive prefix match of `needle` at byte offset `i`.
fn matches_ci(bytes: &[u8], i: usize, needle: &str) -> bool {
    let n = needle.as_bytes();
    bytes.len() >= i + n.len()
        && bytes[i..i + n.len()]
            .iter()
            .zip(n)
            .all(|(a, b)| a.to_ascii_lowercase() == *b)
}

/// Skip an ordinal suffix (`st`, `nd`, `rd`, `th`) if present.
fn skip_ordinal(bytes: &[u8], i: usize) -> usize {
    for suffix in ["st", "nd", "rd", "th"] {
        if matches_ci(bytes, i, suffix) {
            return i + 2;
        }
    }
    i
}

/// Count whitespace bytes starting at `i`.
fn whitespace_run(bytes: &[u8], i: usize) -> usize {
    bytes[i..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

/// Scan for `MonthName <day>[ordinal][,] <4-digit year>`.
fn find_month_name_date(text: &str) -> Option<RawMatch> {
    let bytes = text.as_bytes();
    for i in 0..bytes.len() {
        for &(name, month) in MONTH_NAMES {
            if !matches_ci(bytes, i, name) {
                continue;
            }
            let mut pos = i + name.len();

            // Whitespace between name and day is mandatory.
            let ws = whitespace_run(bytes, pos);
            if ws == 0 {
                continue;
            }
            pos += ws;

            let day_len = digit_run(bytes, pos).min(2);
            if day_len == 0 {
                continue;
            }
            let day = read_number(bytes, pos, day_len);
            pos += day_len;

            pos = skip_ordinal(bytes, pos);
            if bytes.get(pos) == Some(&b',') {
                pos += 1;
            }

            let ws = whitespace_run(bytes, pos);
            if ws == 0 {
                continue;
            }
            pos += ws;

            if digit_run(bytes, pos) < 4 {
                continue;
            }
            let year = read_number(bytes, pos, 4);

            return Some(RawMatch::MonthName { month, day, year });
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Labeled date scanning
// ---------------------------------------------------------------------------

/// Scan for a multi-word label (case-insensitive, whitespace-separated)
/// followed by an optional colon and a `d{1,2} sep d{1,2} sep d{4}` date
/// where each separator is `/` or `-` independently.
fn find_labeled_date(text: &str, label_words: &[&str]) -> Option<NumericTriple> {
    let bytes = text.as_bytes();
    'outer: for i in 0..bytes.len() {
        let mut pos = i;
        for (w, &word) in label_words.iter().enumerate() {
            if w > 0 {
                let ws = whitespace_run(bytes, pos);
                if ws == 0 {
                    continue 'outer;
                }
                pos += ws;
            }
            if !matches_ci(bytes, pos, word) {
                continue 'outer;
            }
            pos += word.len();
        }

        if bytes.get(pos) == Some(&b':') {
            pos += 1;
        }
        pos += whitespace_run(bytes, pos);

        if !bytes.get(pos).map(u8::is_ascii_digit).unwrap_or(false) {
            continue;
        }

        let is_sep = |b: Option<u8>| matches!(b, Some(b'/') | Some(b'-'));

        let Some((first, len1)) = match_token(bytes, pos, &[2, 1], is_sep) else {
            continue;
        };
        pos += len1 + 1;
        let Some((second, len2)) = match_token(bytes, pos, &[2, 1], is_sep) else {
            continue;
        };
        pos += len2 + 1;
        let Some((third, _)) = match_token(bytes, pos, &[4], |_| true) else {
            continue;
        };

        return Some(NumericTriple {
            values: [first, second, third],
        });
    }
    None
}
