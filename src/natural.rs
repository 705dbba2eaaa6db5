//! Natural-order string comparison.
//!
//! Runs of ASCII digits are compared by their numeric value instead of byte by byte,
//! so `"img2"` sorts before `"img10"`. Runs that start with a `0` are compared
//! left-aligned, as the fractional part of a decimal would be, so `"1.02"` sorts
//! before `"1.1"`. Whitespace at each comparison point is skipped.

use std::cmp::Ordering;

/// Compares two strings in natural order.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use linguine::natural;
/// assert_eq!(natural::compare("img2", "img10"), Ordering::Less);
/// assert_eq!(natural::compare("img10", "img10"), Ordering::Equal);
/// ```
#[inline]
pub fn compare(a: &str, b: &str) -> Ordering {
    compare_bytes(a.as_bytes(), b.as_bytes(), false)
}

/// Compares two strings in natural order, folding ASCII case.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use linguine::natural;
/// assert_eq!(natural::compare_ignore_case("File9", "file10"), Ordering::Less);
/// assert_eq!(natural::compare_ignore_case("README", "readme"), Ordering::Equal);
/// ```
#[inline]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    compare_bytes(a.as_bytes(), b.as_bytes(), true)
}

fn compare_bytes(a: &[u8], b: &[u8], fold_case: bool) -> Ordering {
    let (mut ai, mut bi) = (0, 0);
    loop {
        while a.get(ai).is_some_and(u8::is_ascii_whitespace) {
            ai += 1;
        }
        while b.get(bi).is_some_and(u8::is_ascii_whitespace) {
            bi += 1;
        }

        let (ca, cb) = (a.get(ai).copied(), b.get(bi).copied());

        if let (Some(x), Some(y)) = (ca, cb) {
            if x.is_ascii_digit() && y.is_ascii_digit() {
                let ord = if x == b'0' || y == b'0' {
                    compare_left(&a[ai..], &b[bi..])
                } else {
                    compare_right(&a[ai..], &b[bi..])
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }

        let (ca, cb) = if fold_case {
            (
                ca.map(|c| c.to_ascii_uppercase()),
                cb.map(|c| c.to_ascii_uppercase()),
            )
        } else {
            (ca, cb)
        };

        // `None` orders before any byte, so a string that ends first is the lesser one
        match (ca, cb) {
            (None, None) => return Ordering::Equal,
            _ => match ca.cmp(&cb) {
                Ordering::Equal => {}
                ord => return ord,
            },
        }

        ai += 1;
        bi += 1;
    }
}

#[inline]
fn digit_at(s: &[u8], i: usize) -> Option<u8> {
    s.get(i).copied().filter(u8::is_ascii_digit)
}

// Right-aligned comparison of two digit runs: the longer run wins, otherwise the
// first differing digit decides.
fn compare_right(a: &[u8], b: &[u8]) -> Ordering {
    let mut bias = Ordering::Equal;
    let mut i = 0;
    loop {
        match (digit_at(a, i), digit_at(b, i)) {
            (None, None) => return bias,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => bias = bias.then(x.cmp(&y)),
        }
        i += 1;
    }
}

// Left-aligned comparison of two digit runs, used when either starts with a zero.
fn compare_left(a: &[u8], b: &[u8]) -> Ordering {
    let mut i = 0;
    loop {
        match (digit_at(a, i), digit_at(b, i)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x != y => return x.cmp(&y),
            _ => {}
        }
        i += 1;
    }
}
