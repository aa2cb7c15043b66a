use std::sync::Arc;

use libtranslit::prelude::*;

/// Stand-in for an iconv-style platform facility: a fixed table plus the
/// conventional `?` lossy marker for everything it does not know.
struct TableConverter {
    reject_wide: bool,
    reject_unicode3: bool,
}

impl TableConverter {
    fn full() -> Self {
        TableConverter {
            reject_wide: false,
            reject_unicode3: false,
        }
    }

    fn legacy_tables() -> Self {
        TableConverter {
            reject_wide: false,
            reject_unicode3: true,
        }
    }
}

impl CharsetConverter for TableConverter {
    fn convert(
        &self,
        text: &str,
        _to_encoding: &str,
        _mode: Option<SuffixMode>,
    ) -> Result<Vec<u8>, PlatformError> {
        if self.reject_wide || (self.reject_unicode3 && text.contains('\u{202f}')) {
            return Err(PlatformError::Conversion {
                code: 84,
                message: "invalid multibyte sequence".into(),
            });
        }
        let mut out = Vec::new();
        for c in text.chars() {
            match c {
                '€' => out.extend_from_slice(b"EUR"),
                '©' => out.extend_from_slice(b"(C)"),
                '\u{a0}' => out.push(b' '),
                '°' => out.extend_from_slice(b"deg"),
                c if c.is_ascii() => out.push(c as u8),
                _ => out.push(b'?'),
            }
        }
        Ok(out)
    }
}

#[test]
fn ascii_text_is_untouched_for_every_encoding() {
    let engine = Translit::default();
    let text = "Nothing fancy here: 42 < 43, \"plain\" quotes.";
    for encoding in ["ascii", "latin-1", "iso-8859-2", "koi8-r", "shift_jis", "utf-8"] {
        assert_eq!(engine.downgrade(text, encoding).unwrap(), text);
    }
}

#[test]
fn guillemets_are_rewritten_before_character_fallback() {
    let engine = Translit::default();
    let down = engine.downgrade("«bonjour»", "ascii").unwrap();
    assert!(!down.contains('«'));
    assert!(!down.contains('»'));
    assert_eq!(down, "\"bonjour\"");
    // Inner spacing is folded into the quote replacement.
    assert_eq!(engine.downgrade("« bonjour »", "ascii").unwrap(), "\"bonjour\"");
}

#[test]
fn guillemets_survive_when_the_target_carries_them() {
    let engine = Translit::default();
    assert_eq!(
        engine.downgrade("«bonjour»", "latin-1").unwrap(),
        "«bonjour»"
    );
}

#[test]
fn digraph_expansion() {
    let engine = Translit::default();
    let down = engine.downgrade("Æon", "ascii").unwrap();
    assert_eq!(down, "Aeon");
    assert_eq!(engine.downgrade("Þorn Œuvre", "ascii").unwrap(), "Thorn Oeuvre");
}

#[test]
fn downgrade_result_is_strictly_encodable() {
    let engine = Translit::default();
    let text = "«Déjà» — naïve ℃ № 5\u{202f}€, Œuf";
    for encoding in ["ascii", "latin-1", "iso-8859-2", "koi8-r"] {
        let down = engine.downgrade(text, encoding).unwrap();
        // encode() re-runs the pipeline; it must never report a strict
        // failure for text the pipeline produced.
        assert!(engine.encode(text, encoding).is_ok(), "encoding {encoding}: {down:?}");
    }
}

#[test]
fn unknown_encoding_is_fatal() {
    let engine = Translit::default();
    let err = engine.downgrade("hi", "martian-5").unwrap_err();
    assert_eq!(err, TranslitError::UnknownEncoding("martian-5".into()));
}

#[test]
fn purge_changes_cost_not_results() {
    let engine = Translit::default();
    let text = "«Æon» à 8\u{202f}h — ℃";
    let cold: Vec<String> = ["ascii", "latin-1"]
        .iter()
        .map(|e| engine.downgrade(text, e).unwrap())
        .collect();
    let warm: Vec<String> = ["ascii", "latin-1"]
        .iter()
        .map(|e| engine.downgrade(text, e).unwrap())
        .collect();
    engine.purge();
    let purged: Vec<String> = ["ascii", "latin-1"]
        .iter()
        .map(|e| engine.downgrade(text, e).unwrap())
        .collect();
    assert_eq!(cold, warm);
    assert_eq!(cold, purged);
}

#[test]
fn platform_converter_outranks_romanization() {
    let engine = Translit::builder()
        .converter(Arc::new(TableConverter::full()))
        .build();
    assert_eq!(engine.capability(), Capability::Native);
    assert_eq!(engine.downgrade("5 € for ©", "ascii").unwrap(), "5 EUR for (C)");
}

#[test]
fn lossy_platform_results_fall_through() {
    let engine = Translit::builder()
        .converter(Arc::new(TableConverter::full()))
        .build();
    // The converter marks é as lossy; the romanizer answers instead.
    assert_eq!(engine.downgrade("élan", "ascii").unwrap(), "elan");
}

#[test]
fn reduced_capability_still_handles_problem_points() {
    let engine = Translit::builder()
        .converter(Arc::new(TableConverter::legacy_tables()))
        .build();
    assert_eq!(engine.capability(), Capability::Reduced);
    // ℃ is substituted to °C before the converter runs; the converter
    // spells ° as "deg".
    assert_eq!(engine.downgrade("21℃", "ascii").unwrap(), "21degC");
    // U+202F never reaches the old tables either.
    assert_eq!(engine.downgrade("8\u{202f}h", "ascii").unwrap(), "8 h");
}

#[test]
fn substitutes_apply_without_any_converter() {
    let engine = Translit::default();
    assert_eq!(engine.capability(), Capability::Unavailable);
    // The substitute itself is encodable in latin-1, so it is used.
    assert_eq!(engine.downgrade("№\u{202f}5", "latin-1").unwrap(), "Nº\u{a0}5");
    // In ASCII the substitute for U+202F is not encodable; romanization
    // yields a plain space.
    assert_eq!(engine.downgrade("8\u{202f}h", "ascii").unwrap(), "8 h");
}

#[test]
fn encode_produces_target_bytes() {
    let engine = Translit::default();
    assert_eq!(engine.encode("déjà", "latin-1").unwrap(), b"d\xe9j\xe0".to_vec());
    assert_eq!(engine.encode("déjà", "ascii").unwrap(), b"deja".to_vec());
}
