// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn split(input: &str) -> Vec<String> {
    split_args(input).unwrap()
}

#[yare::parameterized(
    empty          = { "", &[] },
    blank          = { "   \t ", &[] },
    simple         = { "-T4 -Pn", &["-T4", "-Pn"] },
    extra_space    = { "  -a   1 ", &["-a", "1"] },
    single_quotes  = { "-H 'X-Token: a b'", &["-H", "X-Token: a b"] },
    double_quotes  = { r#"--data "a=1&b=2""#, &["--data", "a=1&b=2"] },
    escaped_quote  = { r#""say \"hi\"""#, &[r#"say "hi""#] },
    backslash_kept = { r#""a\nb""#, &[r"a\nb"] },
    escaped_space  = { r"a\ b c", &["a b", "c"] },
    adjacent       = { r#"pre'fix'"post""#, &["prefixpost"] },
    empty_quoted   = { "'' x", &["", "x"] },
    metachars      = { "; rm -rf / | `id` $(id)", &[";", "rm", "-rf", "/", "|", "`id`", "$(id)"] },
)]
fn splits(input: &str, expected: &[&str]) {
    assert_eq!(split(input), expected);
}

#[yare::parameterized(
    single   = { "'open", SplitError::UnterminatedQuote('\'') },
    double   = { "\"open", SplitError::UnterminatedQuote('"') },
    trailing = { "abc\\", SplitError::TrailingBackslash },
)]
fn rejects(input: &str, expected: SplitError) {
    assert_eq!(split_args(input), Err(expected));
}

#[yare::parameterized(
    exact      = { &["-C", "404"], &["-C"], true },
    with_value = { &["--filter-status=404"], &["--filter-status"], true },
    prefix     = { &["-Cx"], &["-C"], false },
    absent     = { &["-t", "10"], &["-fc", "-mc"], false },
    any_of     = { &["-mc", "200"], &["-fc", "-mc"], true },
)]
fn flag_detection(words: &[&str], flags: &[&str], expected: bool) {
    let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
    assert_eq!(has_flag(&words, flags), expected);
}

proptest! {
    #[test]
    fn plain_words_split_back(words in proptest::collection::vec("[A-Za-z0-9_./=,:-]{1,12}", 0..8)) {
        prop_assert_eq!(split(&words.join(" ")), words);
    }

    #[test]
    fn single_quoted_words_keep_spaces(words in proptest::collection::vec("[A-Za-z0-9 ;|&$<>-]{0,12}", 0..6)) {
        let quoted: Vec<String> = words.iter().map(|w| format!("'{w}'")).collect();
        prop_assert_eq!(split(&quoted.join(" ")), words);
    }
}
