//! Target encoding resolution and byte-level conversion.
//!
//! Encoding labels arrive from callers in many spellings (`latin-1`,
//! `Latin1`, `ISO-8859-1`, ...). This module normalizes them to a single
//! [`TargetEncoding`] whose canonical [`name`](TargetEncoding::name) is
//! stable for the process lifetime and is used as part of every cache key,
//! so two spellings of one encoding share cached downgrade decisions.
//!
//! Resolution is backed by the WHATWG label table from `encoding_rs`, with
//! one deliberate divergence: WHATWG aliases `ascii` (and `us-ascii`) to
//! windows-1252, which would make every Latin-1 character "encodable" in
//! ASCII and leave the typographic substitution rules unreachable for the
//! most common downgrade target. US-ASCII labels therefore resolve to a
//! built-in strict [`TargetEncoding::Ascii`] before the WHATWG table is
//! consulted.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

use crate::error::TranslitError;

/// A resolved target encoding, usable as a cache-key component.
///
/// `Copy`, cheap to compare, and canonical: any two labels naming the same
/// encoding resolve to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetEncoding {
    /// Strict 7-bit US-ASCII.
    Ascii,
    /// Any encoding from the WHATWG Encoding Standard table.
    Whatwg(&'static Encoding),
}

/// Labels that must resolve to strict US-ASCII instead of following the
/// WHATWG aliasing to windows-1252.
const ASCII_LABELS: &[&str] = &[
    "ascii",
    "us-ascii",
    "us",
    "ansi_x3.4-1968",
    "ansi_x3.4-1986",
    "iso646-us",
    "646",
    "cp367",
    "ibm367",
];

impl TargetEncoding {
    /// Resolves an encoding label to its canonical target encoding.
    ///
    /// Matching is case-insensitive and tolerates surrounding whitespace.
    /// Python-style `latin-1` .. `latin-6` spellings are folded onto the
    /// WHATWG `latin1` .. `latin6` labels.
    ///
    /// # Errors
    ///
    /// Returns [`TranslitError::UnknownEncoding`] if the label names no
    /// known encoding. The `replacement` pseudo-encoding is rejected as
    /// well since nothing can be encoded into it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libtranslit::TargetEncoding;
    ///
    /// let a = TargetEncoding::resolve("Latin-1").unwrap();
    /// let b = TargetEncoding::resolve("iso-8859-1").unwrap();
    /// assert_eq!(a, b);
    /// assert_eq!(a.name(), "windows-1252");
    ///
    /// assert!(TargetEncoding::resolve("no-such-charset").is_err());
    /// ```
    pub fn resolve(label: &str) -> Result<Self, TranslitError> {
        let normalized = label.trim().to_ascii_lowercase();
        if ASCII_LABELS.contains(&normalized.as_str()) {
            return Ok(TargetEncoding::Ascii);
        }
        let folded = match normalized.strip_prefix("latin-") {
            Some(suffix) => Cow::Owned(format!("latin{suffix}")),
            None => Cow::Borrowed(normalized.as_str()),
        };
        Encoding::for_label_no_replacement(folded.as_bytes())
            .map(TargetEncoding::Whatwg)
            .ok_or_else(|| TranslitError::UnknownEncoding(label.to_string()))
    }

    /// Canonical name, stable for the process lifetime.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            TargetEncoding::Ascii => "us-ascii",
            TargetEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Whether `c` is representable in this encoding without loss.
    pub fn can_encode(self, c: char) -> bool {
        match self {
            TargetEncoding::Ascii => c.is_ascii(),
            TargetEncoding::Whatwg(encoding) => {
                let mut buf = [0u8; 4];
                let (_, _, unmappable) = encoding.encode(c.encode_utf8(&mut buf));
                !unmappable
            }
        }
    }

    /// Encodes `text` with strict error handling.
    ///
    /// # Errors
    ///
    /// Returns [`TranslitError::StrictEncodeFailure`] naming the first
    /// unencodable character. Downgraded text never triggers this; a
    /// failure here means the fallback chain let a character through.
    pub fn encode_strict(self, text: &str) -> Result<Vec<u8>, TranslitError> {
        match self {
            TargetEncoding::Ascii => match text.chars().find(|c| !c.is_ascii()) {
                Some(character) => Err(TranslitError::StrictEncodeFailure {
                    encoding: self.name(),
                    character,
                }),
                None => Ok(text.as_bytes().to_vec()),
            },
            TargetEncoding::Whatwg(encoding) => {
                let (bytes, _, unmappable) = encoding.encode(text);
                if unmappable {
                    let character = text
                        .chars()
                        .find(|&c| !self.can_encode(c))
                        .unwrap_or('\u{fffd}');
                    return Err(TranslitError::StrictEncodeFailure {
                        encoding: self.name(),
                        character,
                    });
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// Decodes `bytes` permissively, mapping malformed sequences to U+FFFD.
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            TargetEncoding::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { '\u{fffd}' })
                .collect(),
            TargetEncoding::Whatwg(encoding) => {
                let (text, _) = encoding.decode_without_bom_handling(bytes);
                text.into_owned()
            }
        }
    }
}

impl fmt::Display for TargetEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_variants_share_canonical_name() {
        let variants = ["latin-1", "latin1", "LATIN1", "iso-8859-1", " ISO_8859-1 ", "l1", "cp1252"];
        for label in variants {
            let enc = TargetEncoding::resolve(label).unwrap();
            assert_eq!(enc.name(), "windows-1252", "label {label:?}");
        }
    }

    #[test]
    fn test_ascii_is_not_windows_1252() {
        let enc = TargetEncoding::resolve("ascii").unwrap();
        assert_eq!(enc, TargetEncoding::Ascii);
        assert_eq!(enc.name(), "us-ascii");
        // Encodable in windows-1252, but not in real ASCII.
        assert!(!enc.can_encode('«'));
        assert!(!enc.can_encode('é'));
        assert!(enc.can_encode('"'));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = TargetEncoding::resolve("no-such-charset").unwrap_err();
        assert_eq!(err, TranslitError::UnknownEncoding("no-such-charset".into()));
        // The replacement pseudo-encoding cannot be a downgrade target.
        assert!(TargetEncoding::resolve("replacement").is_err());
    }

    #[test]
    fn test_can_encode_legacy_repertoire() {
        let latin1 = TargetEncoding::resolve("latin-1").unwrap();
        assert!(latin1.can_encode('é'));
        assert!(latin1.can_encode('\u{a0}'));
        assert!(!latin1.can_encode('\u{202f}'));
        assert!(!latin1.can_encode('ő'));

        let latin2 = TargetEncoding::resolve("iso-8859-2").unwrap();
        assert!(latin2.can_encode('ő'));
        assert!(latin2.can_encode('é'));
        assert!(!latin2.can_encode('«'));

        // windows-1252 carries the typographic extras latin-1 proper lacks.
        let latin1 = TargetEncoding::resolve("latin-1").unwrap();
        assert!(latin1.can_encode('Œ'));
        assert!(latin1.can_encode('€'));
    }

    #[test]
    fn test_encode_strict_reports_offending_character() {
        let ascii = TargetEncoding::Ascii;
        assert_eq!(ascii.encode_strict("plain").unwrap(), b"plain".to_vec());
        let err = ascii.encode_strict("café").unwrap_err();
        assert_eq!(
            err,
            TranslitError::StrictEncodeFailure {
                encoding: "us-ascii",
                character: 'é',
            }
        );

        let latin1 = TargetEncoding::resolve("latin-1").unwrap();
        assert_eq!(latin1.encode_strict("café").unwrap(), b"caf\xe9".to_vec());
        let err = latin1.encode_strict("a\u{202f}b").unwrap_err();
        assert_eq!(
            err,
            TranslitError::StrictEncodeFailure {
                encoding: "windows-1252",
                character: '\u{202f}',
            }
        );
    }

    #[test]
    fn test_decode_lossy_replaces_malformed_input() {
        let ascii = TargetEncoding::Ascii;
        assert_eq!(ascii.decode_lossy(b"ok\xff"), "ok\u{fffd}");

        let latin1 = TargetEncoding::resolve("latin-1").unwrap();
        assert_eq!(latin1.decode_lossy(b"d\xe9j\xe0 vu"), "déjà vu");

        let utf8 = TargetEncoding::resolve("utf-8").unwrap();
        assert_eq!(utf8.decode_lossy(b"a\xc3"), "a\u{fffd}");
    }
}
