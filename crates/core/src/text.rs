// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text helpers.

/// First `max_chars` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[yare::parameterized(
        shorter   = { "abc", 5, "abc" },
        exact     = { "abcde", 5, "abcde" },
        longer    = { "abcdefg", 3, "abc" },
        zero      = { "abc", 0, "" },
        multibyte = { "héllo wörld", 4, "héll" },
    )]
    fn truncates_on_char_boundaries(input: &str, max: usize, expected: &str) {
        assert_eq!(truncate_chars(input, max), expected);
    }
}
