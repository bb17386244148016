//! Text normalization shared by the scaffold, navigation and TOC tools

use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*[(\[].*?[)\]]").unwrap());
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\(.+?\)").unwrap());

/// Convert a Roman numeral to an integer.
///
/// Scans right to left and subtracts a digit whose value is smaller than the
/// digit to its right. Matching is case-insensitive. Characters that are not
/// Roman digits count as zero instead of failing, so stray encoding noise in
/// a heading never aborts a run.
pub fn roman_to_int(s: &str) -> u32 {
    let mut total: i64 = 0;
    let mut prev = 0;

    for ch in s.chars().rev() {
        let value = match ch.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => 0,
        };

        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }

    u32::try_from(total.max(0)).unwrap_or(u32::MAX)
}

/// Convert free text to a lowercase, underscore separated slug
pub fn to_snake_case(s: &str) -> String {
    let without_punctuation = PUNCTUATION.replace_all(s, "");
    SEPARATORS.replace_all(&without_punctuation, "_").to_lowercase()
}

/// Remove `(...)` and `[...]` annotations, including the whitespace before them
pub fn remove_parentheses(s: &str) -> String {
    BRACKETED.replace_all(s, "").trim().to_string()
}

/// Replace inline Markdown links with their link text
pub fn strip_links(s: &str) -> String {
    INLINE_LINK.replace_all(s, "$1").to_string()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn int_to_roman(mut n: u32) -> String {
        const TABLE: [(u32, &str); 13] = [
            (1000, "M"),
            (900, "CM"),
            (500, "D"),
            (400, "CD"),
            (100, "C"),
            (90, "XC"),
            (50, "L"),
            (40, "XL"),
            (10, "X"),
            (9, "IX"),
            (5, "V"),
            (4, "IV"),
            (1, "I"),
        ];
        let mut out = String::new();
        for (value, digits) in TABLE {
            while n >= value {
                out.push_str(digits);
                n -= value;
            }
        }
        out
    }

    proptest! {
        #[test]
        fn roman_reads_canonical_numerals(n in 1u32..4000) {
            prop_assert_eq!(roman_to_int(&int_to_roman(n)), n);
        }

        #[test]
        fn snake_case_is_idempotent(s in "[ -~]*") {
            let once = to_snake_case(&s);
            let twice = to_snake_case(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn snake_case_has_no_spaces_or_uppercase(s in "[ -~]*") {
            let result = to_snake_case(&s);
            prop_assert!(!result.contains(' '));
            prop_assert!(!result.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert!(!result.contains("__"));
        }

        #[test]
        fn remove_parentheses_is_idempotent(s in "[a-z ()\\[\\]]*") {
            let once = remove_parentheses(&s);
            let twice = remove_parentheses(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
