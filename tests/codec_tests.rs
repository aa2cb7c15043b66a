use std::sync::Arc;

use libtranslit::prelude::*;

fn engine() -> Arc<Translit> {
    Arc::new(Translit::default())
}

#[test]
fn name_grammar() {
    let name = CodecName::parse("latin-1/translit").unwrap();
    assert_eq!(name.base, "latin-1");
    assert_eq!(name.language, None);

    let name = CodecName::parse("latin-1/translit/fr").unwrap();
    assert_eq!(name.base, "latin-1");
    assert_eq!(name.language.as_deref(), Some("fr"));

    // Names outside the grammar are declined, never an error.
    assert!(CodecName::parse("utf-8").is_none());
    assert!(CodecName::parse("latin-1/zip").is_none());
    assert!(CodecName::parse("latin-1/translit/fr/junk").is_none());
}

#[test]
fn decline_lets_other_handlers_try() {
    assert!(TranslitCodec::for_name(engine(), "utf-8").unwrap().is_none());
    assert!(TranslitCodec::for_name(engine(), "latin-1").unwrap().is_none());
}

#[test]
fn matched_name_with_unknown_base_errors() {
    let err = TranslitCodec::for_name(engine(), "martian-5/translit").unwrap_err();
    assert_eq!(err, TranslitError::UnknownEncoding("martian-5".into()));
}

#[test]
fn round_trip_through_the_adapter() {
    let codec = TranslitCodec::for_name(engine(), "ascii/translit/en")
        .unwrap()
        .unwrap();

    let (bytes, consumed) = codec.encode("«Déjà vu» — encore...").unwrap();
    assert_eq!(consumed, "«Déjà vu» — encore...".chars().count());
    // Everything landed in the target repertoire.
    assert_eq!(bytes, b"\"Deja vu\" -- encore...".to_vec());

    let (text, consumed) = codec.decode(&bytes);
    assert_eq!(consumed, bytes.len());
    // Downgrading is lossy (the accents are gone for good), but the
    // upgrade pass restores quotes, dash and ellipsis.
    assert_eq!(text, "“Deja vu” — encore…");
}

#[test]
fn rich_targets_pass_typography_through() {
    let codec = TranslitCodec::for_name(engine(), "latin-1/translit")
        .unwrap()
        .unwrap();
    // windows-1252 carries guillemets and the em dash natively; nothing
    // to downgrade.
    let (bytes, _) = codec.encode("«Déjà» — oui").unwrap();
    assert_eq!(bytes, b"\xabD\xe9j\xe0\xbb \x97 oui".to_vec());
}

#[test]
fn encode_reports_full_char_count() {
    let codec = TranslitCodec::for_name(engine(), "ascii/translit")
        .unwrap()
        .unwrap();
    let (bytes, consumed) = codec.encode("naïve Æon").unwrap();
    assert_eq!(bytes, b"naive Aeon".to_vec());
    assert_eq!(consumed, 9);
}

#[test]
fn decode_without_language_uses_the_failsafe_rules() {
    let codec = TranslitCodec::for_name(engine(), "ascii/translit")
        .unwrap()
        .unwrap();
    let (text, consumed) = codec.decode(b"go on...");
    assert_eq!(text, "go on\u{2026}");
    assert_eq!(consumed, 8);
}
