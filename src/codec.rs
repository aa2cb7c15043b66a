//! Codec adapter for composite `<base>/translit[/<language>]` names.
//!
//! Host runtimes with a pluggable codec registry hand every requested
//! name to every registered handler until one claims it. This adapter
//! claims only names whose middle segment is exactly the literal mode
//! tag; everything else is declined with `None` so other handlers get
//! their turn — an unmatched name is never an error.

use std::sync::Arc;

use crate::encoding::TargetEncoding;
use crate::error::{Result, TranslitError};
use crate::Translit;

/// The literal mode tag claimed by this adapter.
pub const MODE_TAG: &str = "translit";

/// A parsed composite codec name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecName {
    /// The base encoding label.
    pub base: String,
    /// Optional language tag for the decode/upgrade direction.
    pub language: Option<String>,
}

impl CodecName {
    /// Parses `<base>/translit[/<language>]`.
    ///
    /// Returns `None` for any name outside the grammar: no mode segment,
    /// a different mode tag, an empty base, or trailing segments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use libtranslit::codec::CodecName;
    ///
    /// let name = CodecName::parse("latin-1/translit/fr").unwrap();
    /// assert_eq!(name.base, "latin-1");
    /// assert_eq!(name.language.as_deref(), Some("fr"));
    ///
    /// assert!(CodecName::parse("utf-8").is_none());
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let mut segments = name.split('/');
        let base = segments.next()?;
        if base.is_empty() || segments.next()? != MODE_TAG {
            return None;
        }
        let language = segments.next().map(str::to_string);
        if segments.next().is_some() {
            return None;
        }
        Some(CodecName {
            base: base.to_string(),
            language,
        })
    }
}

/// Encode/decode functions bound to one engine, one target encoding and
/// one language, in the shape a generic codec registry expects.
pub struct TranslitCodec {
    engine: Arc<Translit>,
    target: TargetEncoding,
    language: Option<String>,
}

impl std::fmt::Debug for TranslitCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslitCodec")
            .field("target", &self.target)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TranslitCodec {
    /// Builds the codec for a composite name, or declines.
    ///
    /// `Ok(None)` means the name is not ours and the registry should try
    /// other handlers.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`] when the name matches the
    /// grammar but its base labels no known encoding.
    pub fn for_name(engine: Arc<Translit>, name: &str) -> Result<Option<Self>> {
        let Some(parsed) = CodecName::parse(name) else {
            return Ok(None);
        };
        let target = TargetEncoding::resolve(&parsed.base)?;
        Ok(Some(TranslitCodec {
            engine,
            target,
            language: parsed.language,
        }))
    }

    /// Canonical name of the bound target encoding.
    #[inline]
    pub fn encoding_name(&self) -> &'static str {
        self.target.name()
    }

    /// Downgrades and strictly encodes `input`.
    ///
    /// Reports the transformed bytes alongside the number of input units
    /// (characters) consumed — always the full input; this adapter never
    /// partially consumes.
    ///
    /// # Errors
    ///
    /// [`TranslitError::StrictEncodeFailure`] if a character survives the
    /// downgrade fallback chain (a pipeline defect, surfaced rather than
    /// silently dropped).
    pub fn encode(&self, input: &str) -> Result<(Vec<u8>, usize)> {
        let downgraded = self.engine.downgrader().downgrade_to(input, self.target);
        let bytes = self.target.encode_strict(&downgraded)?;
        Ok((bytes, input.chars().count()))
    }

    /// Permissively decodes and upgrades `input`.
    ///
    /// Reports the transformed text alongside the number of input units
    /// (bytes) consumed — always the full input.
    pub fn decode(&self, input: &[u8]) -> (String, usize) {
        let text = self
            .engine
            .upgrader()
            .decode_from(input, self.target, self.language.as_deref());
        (text, input.len())
    }
}
