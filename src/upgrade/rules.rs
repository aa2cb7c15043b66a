//! Per-language rewrite rule tables for the upgrade pipeline.
//!
//! Each table is an *ordered* list: later rules depend on transformations
//! made by earlier ones. The ordering contract is: quote and prime rules
//! first (they consume the ambiguous `'` and `"` before anything else
//! interprets them), then dash and ellipsis normalization, then spacing,
//! grouping and currency rules, then language-specific ligature
//! restoration. Currency rules run after quote smartening, so currency
//! codes inside already-smartened quotes are still rewritten.
//!
//! The regex engine here has no look-around; boundary conditions that the
//! heuristics need are expressed with capture groups (`(^|\W)`, `(\W|$)`)
//! and re-emitted by the replacement template.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;

/// The rewrite table used when no table matches the requested language.
pub(crate) const FAILSAFE_LANGUAGE: &str = "en";

/// One heuristic rewrite: a compiled pattern and its replacement template.
pub(crate) struct RewriteRule {
    pub pattern: Regex,
    pub replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> RewriteRule {
    RewriteRule {
        pattern: Regex::new(pattern).expect("static rule pattern"),
        replacement,
    }
}

/// Rules shared by every Latin-script table: quotes, primes, dashes,
/// ellipsis.
fn quote_and_dash_rules(open_quote: &'static str, close_quote: &'static str) -> Vec<RewriteRule> {
    vec![
        // Paired single quotes around a short phrase.
        rule(r"(^|\W)'([\w\s,.'’]+?)'(\W|$)", "${1}‘${2}’${3}"),
        // Prime after a digit (feet, minutes).
        rule(r"(\d)'", "${1}′"),
        // Any remaining single quote is an apostrophe.
        rule("'", "’"),
        // Opening double quote before a word character.
        rule(r#""(\w)"#, open_quote),
        // Double prime for inches after a leading measurement.
        rule(r#"^([^“«]+\b\d+([.,]\d+)?)""#, "${1}″"),
        // Any remaining double quote closes.
        rule("\"", close_quote),
        // Existing guillemets get the narrow no-break space convention.
        rule("«[ \u{a0}]", "«\u{202f}"),
        rule("[ \u{a0}]»", "\u{202f}»"),
        // Dashes and ellipsis.
        rule("--", "—"),
        rule(r"\.{3}", "…"),
        rule(r"(?m)^[-–—]\s", "–\u{a0}"),
        rule(r"([^\d\w-])-([^\d\w-])", "${1}–${2}"),
    ]
}

/// Currency codes adjacent to digits (or standing alone as words).
fn currency_rules() -> Vec<RewriteRule> {
    vec![
        rule(r"(\d|\b)EUR(\d|\b)", "${1}€${2}"),
        rule(r"(\d|\b)GBP(\d|\b)", "${1}£${2}"),
        rule(r"(\d|\b)JPY(\d|\b)", "${1}¥${2}"),
    ]
}

fn english_rules() -> Vec<RewriteRule> {
    let mut rules = quote_and_dash_rules("“${1}", "”");
    rules.extend(currency_rules());
    rules
}

fn french_rules() -> Vec<RewriteRule> {
    let mut rules = quote_and_dash_rules("«\u{202f}${1}", "\u{202f}»");
    rules.extend([
        // Digit grouping by thousands.
        rule("(\\d)[ \u{a0}](\\d{3})\\b", "${1}\u{202f}${2}"),
        // Narrow no-break space before tall punctuation.
        rule("[ \u{a0}]([!?:;])", "\u{202f}${1}"),
    ]);
    rules.extend(currency_rules());
    rules.extend([
        // Numero sign: "no 5", "N° 5", "No5" and friends.
        rule(r"(?i)\b(n)[o0°]\s*(\d)", "${1}º\u{a0}${2}"),
        // Ligature restoration.
        rule("oe(u|il)", "œ${1}"),
        rule("O(e|E)(u|U|il|IL)", "Œ${2}"),
    ]);
    rules
}

static TABLES: LazyLock<FxHashMap<&'static str, Vec<RewriteRule>>> = LazyLock::new(|| {
    let mut tables = FxHashMap::default();
    tables.insert("en", english_rules());
    tables.insert("fr", french_rules());
    tables
});

/// Resolves `language` to a rewrite table: exact tag, then primary
/// subtag, then the failsafe.
pub(crate) fn rules_for(language: &str) -> &'static [RewriteRule] {
    let tables = &*TABLES;
    if let Some(rules) = tables.get(language) {
        return rules;
    }
    let primary = language.split(['_', '-']).next().unwrap_or(language);
    if let Some(rules) = tables.get(primary) {
        return rules;
    }
    tables
        .get(FAILSAFE_LANGUAGE)
        .expect("failsafe language table")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rules: &[RewriteRule], text: &str) -> String {
        let mut text = text.to_string();
        for rule in rules {
            text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
        }
        text
    }

    #[test]
    fn test_full_tag_falls_back_to_primary_subtag() {
        assert_eq!(rules_for("fr_CA").as_ptr(), rules_for("fr").as_ptr());
        assert_eq!(rules_for("fr-CH").as_ptr(), rules_for("fr").as_ptr());
    }

    #[test]
    fn test_unknown_language_falls_back_to_failsafe() {
        assert_eq!(rules_for("xx").as_ptr(), rules_for("en").as_ptr());
        assert_eq!(rules_for("xx_YY").as_ptr(), rules_for("en").as_ptr());
    }

    #[test]
    fn test_paired_single_quotes() {
        let rules = rules_for("en");
        assert_eq!(apply(rules, "he said 'hi' loudly"), "he said ‘hi’ loudly");
        assert_eq!(apply(rules, "'quoted'"), "‘quoted’");
    }

    #[test]
    fn test_apostrophe_inside_word_is_not_a_quote() {
        let rules = rules_for("en");
        assert_eq!(apply(rules, "O'Brien's"), "O’Brien’s");
    }

    #[test]
    fn test_inches_after_measurement() {
        let rules = rules_for("en");
        assert_eq!(apply(rules, "a board of 12.5\""), "a board of 12.5″");
    }

    #[test]
    fn test_currency_codes() {
        let rules = rules_for("en");
        assert_eq!(apply(rules, "price 100EUR or 80GBP"), "price 100€ or 80£");
        assert_eq!(apply(rules, "JPY1500"), "¥1500");
    }

    #[test]
    fn test_french_guillemets_and_spacing() {
        let rules = rules_for("fr");
        assert_eq!(apply(rules, "\"Bonjour\""), "«\u{202f}Bonjour\u{202f}»");
        assert_eq!(apply(rules, "Ca va ?"), "Ca va\u{202f}?");
        assert_eq!(apply(rules, "10 000 ans"), "10\u{202f}000 ans");
    }

    #[test]
    fn test_french_ligatures_and_numero() {
        let rules = rules_for("fr");
        assert_eq!(apply(rules, "un oeuf, des oeil"), "un œuf, des œil");
        assert_eq!(apply(rules, "Oeuvre"), "Œuvre");
        assert_eq!(apply(rules, "no 5"), "nº\u{a0}5");
    }
}
