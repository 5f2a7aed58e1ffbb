// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rate-limit backoff advice from provider response headers.
//!
//! Providers signal how long to wait in two shapes: a plain `retry-after`
//! seconds value (Anthropic), or `x-ratelimit-reset-*` duration strings
//! like "28ms", "1s", or "6m20s" (OpenAI). The retry loop itself lives in
//! the caller; these helpers only translate headers into a wait duration,
//! falling back to the caller's own pause when nothing parses.

use std::time::Duration;

use pageforge_core::RateLimited;

/// Backoff from a `retry-after` header carrying whole seconds.
pub fn retry_after_backoff(pause: Duration, response: &RateLimited) -> Duration {
    response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(pause)
}

/// Backoff from `x-ratelimit-reset-requests` / `x-ratelimit-reset-tokens`.
///
/// Both limits reset independently; the caller must wait for the later one.
pub fn ratelimit_reset_backoff(pause: Duration, response: &RateLimited) -> Duration {
    let requests = response
        .header("x-ratelimit-reset-requests")
        .and_then(parse_reset_duration);
    let tokens = response
        .header("x-ratelimit-reset-tokens")
        .and_then(parse_reset_duration);

    match (requests, tokens) {
        (Some(r), Some(t)) => r.max(t),
        (Some(r), None) => r,
        (None, Some(t)) => t,
        (None, None) => pause,
    }
}

/// Parse a reset duration string: concatenated `<number><unit>` segments
/// with units `h`, `m`, `s`, or `ms` (e.g. "6m20s", "1h2m", "28ms").
pub fn parse_reset_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let mut total = Duration::ZERO;
    let mut number = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }

        // Unit character(s): "ms" must be checked before bare "m".
        let unit = if c == 'm' && chars.peek() == Some(&'s') {
            chars.next();
            "ms"
        } else {
            match c {
                'h' => "h",
                'm' => "m",
                's' => "s",
                _ => return None,
            }
        };

        let amount: f64 = number.parse().ok()?;
        number.clear();

        total += match unit {
            "h" => Duration::from_secs_f64(amount * 3600.0),
            "m" => Duration::from_secs_f64(amount * 60.0),
            "s" => Duration::from_secs_f64(amount),
            _ => Duration::from_secs_f64(amount / 1000.0),
        };
    }

    // Trailing digits with no unit means a malformed value.
    if !number.is_empty() {
        return None;
    }

    Some(total)
}
