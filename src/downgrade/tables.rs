//! Static substitution tables for the downgrade pipeline.

use std::sync::LazyLock;

use regex::Regex;

/// An encoding-agnostic typographic rewrite, applied before the
/// per-character pass.
///
/// The first trigger character doubles as the encodability probe: when it
/// encodes natively in the target, the whole rule is irrelevant there.
/// Rules in [`typographic_rules`] are mutually independent — no rule
/// produces or consumes another's trigger characters — so their relative
/// order carries no meaning.
pub(crate) struct TypographicRule {
    pub triggers: &'static [char],
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl TypographicRule {
    /// The trigger character probed against the target encoding.
    #[inline]
    pub fn probe(&self) -> char {
        self.triggers[0]
    }
}

fn rule(triggers: &'static [char], pattern: &str, replacement: &'static str) -> TypographicRule {
    TypographicRule {
        triggers,
        pattern: Regex::new(pattern).expect("static rule pattern"),
        replacement,
    }
}

static TYPOGRAPHIC_RULES: LazyLock<Vec<TypographicRule>> = LazyLock::new(|| {
    vec![
        // Guillemets, inner spacing folded into the straight quote.
        rule(&['«', '»'], r"«\s?|\s?»", "\""),
        // Majuscule ligature digraphs before a lowercase letter.
        rule(&['Æ'], r"Æ([a-zß-öø-ÿœ])", "Ae${1}"),
        rule(&['Þ'], r"Þ([a-zß-öø-ÿœ])", "Th${1}"),
        rule(&['Œ'], r"Œ([a-zß-öø-ÿœ])", "Oe${1}"),
    ]
});

pub(crate) fn typographic_rules() -> &'static [TypographicRule] {
    &TYPOGRAPHIC_RULES
}

/// Known Unicode normalization substitutes tried before romanization.
///
/// Each substitute is closer to the original than an ASCII approximation:
/// the narrow no-break space widens to a no-break space, composed signs
/// decompose into sequences most legacy encodings carry.
pub(crate) fn unicode_substitute(c: char) -> Option<&'static str> {
    match c {
        '\u{202f}' => Some("\u{a0}"),
        '℃' => Some("°C"),
        '℉' => Some("°F"),
        '№' => Some("Nº"),
        _ => None,
    }
}
