//! Randomized reply generators.
//!
//! Both generators are pure apart from drawing entropy through
//! [`crate::rng::uniform`]; they never fail and never produce an empty
//! string.

use crate::rng::uniform;

/// Weighted alphabet for the purr generator. `'r'` appears twice, making
/// it twice as likely as `'p'` on an unconstrained draw.
const PURR_TABLE: [char; 3] = ['p', 'r', 'r'];

/// First code point of the scramble alphabet (ASCII space).
const SCRAMBLE_BASE: u8 = 32;

/// Width of the scramble alphabet.
const SCRAMBLE_SPAN: i64 = 84;

/// Builds a purring string such as `"prrrprrrrpr"`.
///
/// The result always starts with `"pr"` and is extended by `uniform(6, 18)`
/// characters from [`PURR_TABLE`]. A `'p'` is always followed by an `'r'`
/// so the output never contains `"pp"`.
pub fn purr() -> String {
    let extra = uniform(6, 18);
    let mut out = String::with_capacity(2 + extra as usize);
    out.push_str("pr");
    for _ in 0..extra {
        if out.ends_with('p') {
            out.push('r');
        } else {
            out.push(PURR_TABLE[uniform(0, 3) as usize]);
        }
    }
    out
}

/// Builds a string of `uniform(8, 45)` independent draws from the 84
/// printable ASCII characters starting at space.
pub fn scramble() -> String {
    let len = uniform(8, 45);
    (0..len)
        .map(|_| char::from(SCRAMBLE_BASE + uniform(0, SCRAMBLE_SPAN) as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purr_starts_with_pr() {
        for _ in 0..200 {
            assert!(purr().starts_with("pr"));
        }
    }

    #[test]
    fn test_purr_length_bounds() {
        for _ in 0..200 {
            let len = purr().len();
            assert!((8..=19).contains(&len), "unexpected length: {len}");
        }
    }

    #[test]
    fn test_purr_alphabet() {
        for _ in 0..200 {
            let out = purr();
            assert!(out.chars().all(|c| c == 'p' || c == 'r'), "bad output: {out}");
        }
    }

    #[test]
    fn test_purr_never_doubles_p() {
        for _ in 0..200 {
            let out = purr();
            assert!(!out.contains("pp"), "doubled p in: {out}");
        }
    }

    #[test]
    fn test_scramble_length_bounds() {
        for _ in 0..200 {
            let len = scramble().len();
            assert!((8..=44).contains(&len), "unexpected length: {len}");
        }
    }

    #[test]
    fn test_scramble_character_range() {
        for _ in 0..200 {
            for byte in scramble().bytes() {
                assert!((32..=115).contains(&byte), "out of range byte: {byte}");
            }
        }
    }
}
