//! Uniform random sampling backed by the operating system CSPRNG.
//!
//! Every random decision the bot makes goes through [`uniform`] so that
//! reply lengths, character picks, and the keepalive meow all draw from
//! the same unbiased source.

use tracing::{debug, error};

/// Returns a uniformly distributed integer in `[min, max)`.
///
/// When the range is empty (`max <= min`) the lower bound is returned,
/// so callers never have to special-case degenerate configuration.
pub fn uniform(min: i64, max: i64) -> i64 {
    let span = (max as i128) - (min as i128);
    if span <= 0 {
        debug!(min, max, "Degenerate range, returning the lower bound");
        return min;
    }

    // span fits in u64: the widest possible range, i64::MIN..i64::MAX,
    // spans 2^64 - 1 values.
    (min as i128 + below(span as u64) as i128) as i64
}

/// Returns a uniformly distributed integer in `[0, n)` via rejection
/// sampling, avoiding the modulo bias of a bare `% n`.
fn below(n: u64) -> u64 {
    let zone = (u64::MAX / n) * n;
    loop {
        let draw = next_u64();
        if draw < zone {
            return draw % n;
        }
    }
}

/// Draws 64 bits from the operating system entropy source.
fn next_u64() -> u64 {
    match getrandom::u64() {
        Ok(value) => value,
        Err(err) => {
            // No fallback: a bot without sound entropy should not run.
            error!(error = %err, "Entropy source failed");
            std::process::exit(1);
        }
    }
}
