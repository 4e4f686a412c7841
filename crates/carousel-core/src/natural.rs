//! Natural ordering for file names
//!
//! Names are split into runs of ASCII digits and runs of everything else.
//! Digit runs compare by numeric value (leading zeros ignored, no upper
//! bound), text runs compare case-insensitively, and a digit run sorts
//! before a text run at the same position. When all runs compare equal
//! (`img01` vs `img1`, `A` vs `a`) the raw strings decide, so the result
//! is a total order.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// One run of a tokenized name
#[derive(Debug, Clone, Copy)]
enum Token<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl Ord for Token<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Token::Digits(a), Token::Digits(b)) => cmp_digits(a, b),
            (Token::Text(a), Token::Text(b)) => cmp_text(a, b),
            (Token::Digits(_), Token::Text(_)) => Ordering::Less,
            (Token::Text(_), Token::Digits(_)) => Ordering::Greater,
        }
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Token<'_> {}

impl PartialOrd for Token<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn tokens(s: &str) -> impl Iterator<Item = Token<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(rest.len(), |(i, _)| i);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(if digits {
            Token::Digits(run)
        } else {
            Token::Text(run)
        })
    })
}

/// Compare two digit runs by value without parsing into a fixed-width integer
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    a.cmp(b)
}

/// Compare two strings in natural order.
///
/// ```
/// use carousel_core::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("img2.png", "img10.png"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    tokens(a).cmp(tokens(b)).then_with(|| a.cmp(b))
}

/// Owned sort key wrapping a string, ordered by [`natural_cmp`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NaturalKey(pub String);

impl Ord for NaturalKey {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for NaturalKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for NaturalKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

pub fn sort_natural(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}

/// Sort paths by file name in natural order, falling back to the full path
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| {
        natural_cmp(&file_name(a), &file_name(b))
            .then_with(|| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()))
    });
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default()
}
